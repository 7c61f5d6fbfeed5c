//! Integration tests for the column scanner

use std::collections::BTreeSet;

use torus_life::core::types::{Cell, Dimensions};
use torus_life::engine::{BoardEngine, RuleSet};
use torus_life::scan::{ColumnScanner, FoldPolicy};

fn engine(rows: usize, cols: usize) -> BoardEngine {
    BoardEngine::with_seed(Dimensions::new(rows, cols), RuleSet::conway(), 7).unwrap()
}

#[test]
fn test_fold_threshold_twenty_five_on_fifty_rows() {
    let mut engine = engine(50, 50);
    engine.toggle(Cell::new(30, 12)).unwrap();
    engine.toggle(Cell::new(10, 13)).unwrap();

    let scanner = ColumnScanner::new(FoldPolicy::Fold { threshold: 25 });
    assert_eq!(scanner.scan(&engine, 12), BTreeSet::from([19]));
    assert_eq!(scanner.scan(&engine, 13), BTreeSet::from([10]));
}

#[test]
fn test_symmetric_rows_share_a_pitch() {
    let mut engine = engine(50, 4);
    engine.toggle(Cell::new(0, 0)).unwrap();
    engine.toggle(Cell::new(49, 0)).unwrap();

    let folded = ColumnScanner::new(FoldPolicy::halfway(50));
    assert_eq!(folded.scan(&engine, 0), BTreeSet::from([0]));

    let raw = ColumnScanner::new(FoldPolicy::Identity);
    assert_eq!(raw.scan(&engine, 0), BTreeSet::from([0, 49]));
}

#[test]
fn test_sweep_of_cols_calls_returns_to_start() {
    let mut engine = engine(6, 9);
    engine.seed_probability();
    let mut scanner = ColumnScanner::new(FoldPolicy::halfway(6));

    let mut swept = Vec::new();
    for _ in 0..9 {
        swept.push(scanner.current_column());
        scanner.advance_and_scan(&engine);
    }
    assert_eq!(scanner.current_column(), 0);
    assert_eq!(swept, (0..9).collect::<Vec<_>>());
}

#[test]
fn test_scan_tracks_board_changes() {
    let mut engine = engine(5, 5);
    for c in [(2, 1), (2, 2), (2, 3)] {
        engine.toggle(Cell::from(c)).unwrap();
    }
    let scanner = ColumnScanner::new(FoldPolicy::Identity);
    assert_eq!(scanner.scan(&engine, 2), BTreeSet::from([2]));

    engine.advance();
    assert_eq!(scanner.scan(&engine, 2), BTreeSet::from([1, 2, 3]));
    assert!(scanner.scan(&engine, 1).is_empty());
}
