//! Moore neighborhood on a toroidal board

use crate::core::types::{Cell, Dimensions};

/// The eight (d_row, d_col) offsets of the Moore neighborhood, excluding (0, 0)
#[rustfmt::skip]
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Iterate the eight wrapped neighbors of `cell`.
///
/// On boards narrower than 3 cells along an axis, distinct offsets can wrap
/// onto the same coordinate (or onto `cell` itself); each offset is still
/// yielded once, so a neighbor reached twice counts twice.
pub fn neighbors(dims: Dimensions, cell: Cell) -> impl Iterator<Item = Cell> {
    NEIGHBOR_OFFSETS
        .into_iter()
        .map(move |(d_row, d_col)| dims.wrap(cell, d_row, d_col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_exclude_center() {
        assert_eq!(NEIGHBOR_OFFSETS.len(), 8);
        assert!(!NEIGHBOR_OFFSETS.contains(&(0, 0)));
    }

    #[test]
    fn test_interior_neighbors_are_distinct() {
        let dims = Dimensions::new(5, 5);
        let mut found: Vec<Cell> = neighbors(dims, Cell::new(2, 2)).collect();
        found.sort();
        found.dedup();
        assert_eq!(found.len(), 8);
        assert!(!found.contains(&Cell::new(2, 2)));
    }

    #[test]
    fn test_corner_neighbors_wrap() {
        let dims = Dimensions::new(4, 6);
        let found: Vec<Cell> = neighbors(dims, Cell::new(0, 0)).collect();
        assert!(found.contains(&Cell::new(3, 5)));
        assert!(found.contains(&Cell::new(0, 5)));
        assert!(found.contains(&Cell::new(3, 0)));
        assert!(found.contains(&Cell::new(1, 1)));
    }
}
