//! Core type definitions used throughout the codebase

use std::fmt;

/// Generation counter (simulation time unit)
pub type Generation = u64;

/// A board coordinate. Identity is value equality on (row, col).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Board dimensions. Fixed for the lifetime of an engine; the topology is a torus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl Dimensions {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells on the board
    pub fn area(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Apply a signed offset to a cell, wrapping around both edges
    #[inline]
    pub fn wrap(&self, cell: Cell, d_row: isize, d_col: isize) -> Cell {
        let row = (cell.row as isize + d_row).rem_euclid(self.rows as isize) as usize;
        let col = (cell.col as isize + d_col).rem_euclid(self.cols as isize) as usize;
        Cell { row, col }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_equality_is_by_value() {
        assert_eq!(Cell::new(3, 4), Cell::from((3, 4)));
        assert_ne!(Cell::new(3, 4), Cell::new(4, 3));
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::new(1, 2).to_string(), "(1, 2)");
    }

    #[test]
    fn test_contains_is_exclusive() {
        let dims = Dimensions::new(3, 5);
        assert!(dims.contains(Cell::new(2, 4)));
        assert!(!dims.contains(Cell::new(3, 0)));
        assert!(!dims.contains(Cell::new(0, 5)));
    }

    #[test]
    fn test_wrap_both_edges() {
        let dims = Dimensions::new(3, 3);
        assert_eq!(dims.wrap(Cell::new(0, 0), -1, -1), Cell::new(2, 2));
        assert_eq!(dims.wrap(Cell::new(2, 2), 1, 1), Cell::new(0, 0));
        assert_eq!(dims.wrap(Cell::new(1, 1), 0, 0), Cell::new(1, 1));
    }

    #[test]
    fn test_wrap_single_row_board() {
        let dims = Dimensions::new(1, 4);
        assert_eq!(dims.wrap(Cell::new(0, 0), 1, -1), Cell::new(0, 3));
    }
}
