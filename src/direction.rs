use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Cardinal headings the snake can take, expressed on screen axes
/// (`x` grows to the right, `y` grows downwards).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Down,
    Up,
    Right,
    Left,
}

impl Direction {
    /// Fixed enumeration order used for validity checks and greedy tie-breaks.
    pub const ALL: [Self; 4] = [Self::Down, Self::Up, Self::Right, Self::Left];

    /// Returns the unit offset `(dx, dy)` for this heading.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Down => (0, 1),
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Left => (-1, 0),
        }
    }
}
