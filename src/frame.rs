//! Snapshot of the game handed from the game loop to the display tick.
//!
//! The game loop mutates its own [`GameState`] and then publishes a complete [`Frame`]
//! in one short critical section. The display tick copies the latest frame out under the
//! same lock, so it sees either the previous step or the new one, never a mix.

use core::cell::Cell as StdCell;

use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};

use crate::game::{GameState, GameStatus};
use crate::grid::Cell;
use crate::shared_constants::SNAKE_CAPACITY;

/// What the display needs to draw one game step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    cells: [Cell; SNAKE_CAPACITY],
    len: u8,
    apple: Cell,
    status: GameStatus,
}

impl Frame {
    /// Nothing to draw; the game has not started.
    pub const EMPTY: Self = Self {
        cells: [Cell::new(0, 0); SNAKE_CAPACITY],
        len: 0,
        apple: Cell::new(0, 0),
        status: GameStatus::NotStarted,
    };

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Snake cell at `index` (tail first), or `None` past the head.
    #[must_use]
    pub fn snake_cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(..self.len()).and_then(|cells| cells.get(index)).copied()
    }

    #[must_use]
    pub const fn apple(&self) -> Cell {
        self.apple
    }

    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }
}

impl From<&GameState> for Frame {
    fn from(game: &GameState) -> Self {
        let mut frame = Self {
            apple: game.apple(),
            status: game.status(),
            ..Self::EMPTY
        };
        for (slot, &cell) in frame.cells.iter_mut().zip(game.snake().cells()) {
            *slot = cell;
        }
        frame.len = u8::try_from(game.snake().len()).unwrap_or(u8::MAX);
        frame
    }
}

/// Static for the shared [`Frame`].
pub struct FrameStatic(Mutex<CriticalSectionRawMutex, StdCell<Frame>>);

impl FrameStatic {
    #[must_use]
    pub const fn new() -> Self {
        Self(Mutex::new(StdCell::new(Frame::EMPTY)))
    }

    /// Replaces the shared frame with a snapshot of `game`.
    pub fn publish(&self, game: &GameState) {
        let frame = Frame::from(game);
        self.0.lock(|shared| shared.set(frame));
    }

    /// A copy of the most recently published frame.
    pub fn snapshot(&self) -> Frame {
        self.0.lock(StdCell::get)
    }
}

impl Default for FrameStatic {
    fn default() -> Self {
        Self::new()
    }
}
