use std::ops::{Index, IndexMut};

use crate::cell::Cell;
use crate::config::GridSize;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns this position shifted by `delta` and wrapped into bounds on
    /// both axes.
    #[must_use]
    pub fn wrapped_offset(self, delta: (i32, i32), bounds: GridSize) -> Self {
        Self {
            x: (self.x + delta.0).rem_euclid(i32::from(bounds.width)),
            y: (self.y + delta.1).rem_euclid(i32::from(bounds.height)),
        }
    }

    /// Plain L1 distance, ignoring wraparound.
    #[must_use]
    pub fn manhattan(self, other: Self) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Fixed-size board of cells stored row by row.
///
/// Indexing never wraps; callers wrap positions with
/// [`Position::wrapped_offset`] first.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Grid {
    size: GridSize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-empty grid.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![Cell::EMPTY; size.total_cells()],
        }
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    #[must_use]
    pub fn get(&self, position: Position) -> Cell {
        self[position]
    }

    pub fn set(&mut self, position: Position, cell: Cell) {
        self[position] = cell;
    }

    /// Every position whose cell is currently empty, row by row.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<Position> {
        self.cells()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(position, _)| position)
            .collect()
    }

    /// Ages every body segment by one tick.
    pub fn decrement_all(&mut self) {
        for cell in &mut self.cells {
            cell.decrement(1);
        }
    }

    /// Iterates over all cells with their positions, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        let width = usize::from(self.size.width);
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let position = Position {
                x: (index % width) as i32,
                y: (index / width) as i32,
            };
            (position, *cell)
        })
    }

    /// Number of cells matching `predicate`.
    #[must_use]
    pub fn count_where(&self, predicate: impl Fn(Cell) -> bool) -> usize {
        self.cells.iter().filter(|cell| predicate(**cell)).count()
    }

    fn index_of(&self, position: Position) -> usize {
        assert!(
            position.is_within_bounds(self.size),
            "grid access out of bounds: ({}, {}) on {}x{}",
            position.x,
            position.y,
            self.size.width,
            self.size.height,
        );
        position.y as usize * usize::from(self.size.width) + position.x as usize
    }
}

impl Index<Position> for Grid {
    type Output = Cell;

    fn index(&self, position: Position) -> &Cell {
        &self.cells[self.index_of(position)]
    }
}

impl IndexMut<Position> for Grid {
    fn index_mut(&mut self, position: Position) -> &mut Cell {
        let index = self.index_of(position);
        &mut self.cells[index]
    }
}
