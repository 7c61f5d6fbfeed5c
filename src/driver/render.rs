//! Renderer contract and a plain-text implementation

use std::io::Write;

use ahash::AHashSet;

use crate::core::error::Result;
use crate::core::types::{Cell, Dimensions};

pub const ALIVE_CHAR: char = '#';
pub const DEAD_CHAR: char = '.';

/// Receives the full live-cell set once per tick. Iteration order of
/// `cells` is unspecified.
pub trait Renderer {
    fn render(&mut self, cells: &AHashSet<Cell>, dims: Dimensions) -> Result<()>;
}

/// Draws the board as rows of `#` / `.` to any writer
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, cells: &AHashSet<Cell>, dims: Dimensions) -> Result<()> {
        writeln!(self.out, "{}", render_grid(cells, dims))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Row-major text grid, one line per row, no trailing newline
pub fn render_grid(cells: &AHashSet<Cell>, dims: Dimensions) -> String {
    let mut grid = vec![vec![DEAD_CHAR; dims.cols]; dims.rows];
    for cell in cells.iter().filter(|c| dims.contains(**c)) {
        grid[cell.row][cell.col] = ALIVE_CHAR;
    }
    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
