//! The snake body as a fixed-capacity, tail-to-head sequence of cells.

use heapless::Vec;

use crate::grid::{Cell, Direction};
use crate::shared_constants::SNAKE_CAPACITY;

/// Bodies no longer than this cannot loop back onto themselves.
const SHORTEST_SELF_COLLISION: usize = 5;

/// Segments nearest the head that are never tested for collision.
const COLLISION_SKIP: usize = 2;

/// Index 0 is the tail and the last index is the head. Length stays in `2..=64`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: Vec<Cell, SNAKE_CAPACITY>,
}

impl Snake {
    #[must_use]
    pub fn new(tail: Cell, head: Cell) -> Self {
        Self {
            body: [tail, head].into_iter().collect(),
        }
    }

    /// Builds a snake from tail-to-head cells. `None` unless `2 <= cells.len() <= 64`.
    #[must_use]
    pub fn from_cells(cells: &[Cell]) -> Option<Self> {
        if cells.len() < 2 {
            return None;
        }
        Vec::from_slice(cells).ok().map(|body| Self { body })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.body.is_full()
    }

    #[must_use]
    pub fn head(&self) -> Cell {
        self.body.last().copied().unwrap_or_default()
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.body
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Moves the head one cell in `direction`; every other segment takes the
    /// pre-move position of the segment ahead of it, and the old tail drops off.
    pub fn advance(&mut self, direction: Direction) {
        let before = self.body.clone();
        let new_head = self.head().step(direction);
        for (segment, ahead) in self.body.iter_mut().zip(before.iter().skip(1)) {
            *segment = *ahead;
        }
        if let Some(head) = self.body.last_mut() {
            *head = new_head;
        }
    }

    /// Appends `cell` after the head. Returns `false`, changing nothing, at capacity.
    pub fn grow_at(&mut self, cell: Cell) -> bool {
        self.body.push(cell).is_ok()
    }

    /// True when the head overlaps any segment other than the two nearest it.
    #[must_use]
    pub fn collides_with_self(&self) -> bool {
        if self.len() < SHORTEST_SELF_COLLISION {
            return false;
        }
        let head = self.head();
        let scan_end = self.len().saturating_sub(COLLISION_SKIP);
        self.body
            .get(..scan_end)
            .is_some_and(|older| older.contains(&head))
    }
}

impl Default for Snake {
    fn default() -> Self {
        use crate::shared_constants::{INITIAL_HEAD, INITIAL_TAIL};
        Self::new(INITIAL_TAIL, INITIAL_HEAD)
    }
}
