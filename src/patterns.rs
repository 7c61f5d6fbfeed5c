//! ASCII patterns and a small library of well-known shapes
//!
//! Rows are read top to bottom. `#`, `O` and `*` mark live cells; `.` and
//! spaces are dead. Blank lines are ignored.

use crate::core::error::{LifeError, Result};

/// A finite set of live offsets relative to a top-left origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    offsets: Vec<(usize, usize)>,
    height: usize,
    width: usize,
}

/// Names accepted by `Pattern::named`
pub const PATTERN_NAMES: [&str; 7] = [
    "block",
    "beehive",
    "blinker",
    "toad",
    "beacon",
    "glider",
    "r-pentomino",
];

impl Pattern {
    pub fn parse(text: &str) -> Result<Self> {
        let mut offsets = Vec::new();
        let mut height = 0;
        let mut width = 0;

        for line in text.lines().map(str::trim_end).filter(|l| !l.trim().is_empty()) {
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    '#' | 'O' | '*' => offsets.push((height, col)),
                    '.' | ' ' => {}
                    other => {
                        return Err(LifeError::InvalidPattern(format!(
                            "unexpected '{}' on row {}",
                            other, height
                        )))
                    }
                }
            }
            width = width.max(line.chars().count());
            height += 1;
        }

        if offsets.is_empty() {
            return Err(LifeError::InvalidPattern("pattern has no live cells".into()));
        }

        Ok(Self {
            offsets,
            height,
            width,
        })
    }

    pub fn named(name: &str) -> Result<Self> {
        let text = match name.to_ascii_lowercase().as_str() {
            "block" => "##\n##",
            "beehive" => ".##.\n#..#\n.##.",
            "blinker" => "###",
            "toad" => ".###\n###.",
            "beacon" => "##..\n##..\n..##\n..##",
            "glider" => ".#.\n..#\n###",
            "r-pentomino" => ".##\n##.\n.#.",
            _ => {
                return Err(LifeError::InvalidPattern(format!(
                    "unknown pattern '{}' (known: {})",
                    name,
                    PATTERN_NAMES.join(", ")
                )))
            }
        };
        Self::parse(text)
    }

    pub fn offsets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.offsets.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// (height, width) of the bounding box
    pub fn size(&self) -> (usize, usize) {
        (self.height, self.width)
    }
}
