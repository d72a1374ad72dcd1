use std::fmt;

use crate::cell::RenderClass;
use crate::config::GridSize;
use crate::game::GameStatus;
use crate::grid::Position;

/// Immutable picture of a game taken between ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    size: GridSize,
    classes: Vec<RenderClass>,
    pub length: i32,
    /// Cells still occupied by the body, head included.
    pub body_cells: usize,
    pub speed: f64,
    pub tick_count: u64,
    pub status: GameStatus,
}

impl Snapshot {
    /// `classes` holds one entry per cell, row by row.
    #[must_use]
    pub(crate) fn new(
        size: GridSize,
        classes: Vec<RenderClass>,
        length: i32,
        body_cells: usize,
        speed: f64,
        tick_count: u64,
        status: GameStatus,
    ) -> Self {
        debug_assert_eq!(classes.len(), size.total_cells());
        Self {
            size,
            classes,
            length,
            body_cells,
            speed,
            tick_count,
            status,
        }
    }

    /// Render class at `position`, or `None` outside the board.
    #[must_use]
    pub fn class_at(&self, position: Position) -> Option<RenderClass> {
        if !position.is_within_bounds(self.size) {
            return None;
        }
        let index = position.y as usize * usize::from(self.size.width) + position.x as usize;
        self.classes.get(index).copied()
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[RenderClass]> {
        self.classes.chunks(usize::from(self.size.width).max(1))
    }
}

/// Plain-text board: a `+---+` frame with space-separated glyphs.
impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat((usize::from(self.size.width) * 2).saturating_sub(1));
        writeln!(f, "+{rule}+")?;
        for row in self.rows() {
            let line: Vec<String> = row.iter().map(|class| class.glyph().to_string()).collect();
            writeln!(f, "|{}|", line.join(" "))?;
        }
        write!(f, "+{rule}+")
    }
}
