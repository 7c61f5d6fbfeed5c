//! Column scanner - maps one board column to a set of pitches
//!
//! Each call reads a single column of the current board and reports the
//! distinct canonical row positions of its live cells. With the fold policy,
//! rows past the threshold mirror back onto `rows - 1 - row`, so two rows
//! symmetric about the middle share a pitch. That sharing is the intended
//! mapping for boards taller than the audible range.

use std::collections::BTreeSet;

use crate::engine::BoardEngine;

/// How a row index becomes a canonical pitch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldPolicy {
    /// Pitch is the row index
    Identity,
    /// Rows at or past `threshold` map to `rows - 1 - row`
    Fold { threshold: usize },
}

impl FoldPolicy {
    pub fn halfway(rows: usize) -> Self {
        Self::Fold { threshold: rows / 2 }
    }

    #[inline]
    pub fn canonical(&self, row: usize, rows: usize) -> usize {
        match *self {
            Self::Identity => row,
            Self::Fold { threshold } if row >= threshold => rows - 1 - row,
            Self::Fold { .. } => row,
        }
    }
}

/// Scan position over the board's columns. Owned by the driver; the engine
/// is borrowed read-only per call.
#[derive(Debug, Clone)]
pub struct ColumnScanner {
    current_column: usize,
    policy: FoldPolicy,
}

impl ColumnScanner {
    pub fn new(policy: FoldPolicy) -> Self {
        Self {
            current_column: 0,
            policy,
        }
    }

    pub fn current_column(&self) -> usize {
        self.current_column
    }

    pub fn policy(&self) -> FoldPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: FoldPolicy) {
        self.policy = policy;
    }

    /// Restart the sweep from column 0
    pub fn reset(&mut self) {
        self.current_column = 0;
    }

    /// Distinct canonical pitches of live cells in `column` (taken modulo cols)
    pub fn scan(&self, engine: &BoardEngine, column: usize) -> BTreeSet<usize> {
        let dims = engine.dimensions();
        let column = column % dims.cols;
        engine
            .cells()
            .filter(|cell| cell.col == column)
            .map(|cell| self.policy.canonical(cell.row, dims.rows))
            .collect()
    }

    /// Scan the current column, then step to the next one (wrapping)
    pub fn advance_and_scan(&mut self, engine: &BoardEngine) -> BTreeSet<usize> {
        let cols = engine.dimensions().cols;
        let pitches = self.scan(engine, self.current_column);
        self.current_column = (self.current_column % cols + 1) % cols;
        pitches
    }
}
