//! Apple placement driven by a free-running counter.
//!
//! There is no entropy source: the counter is advanced by the display tick, so the
//! value seen when an apple is needed depends on how long the player took to get there.

use portable_atomic::{AtomicU8, Ordering};

use crate::grid::Cell;
use crate::shared_constants::CELL_COUNT;
use crate::snake::Snake;

const COUNTER_MASK: u8 = 0b0011_1111;

/// A counter that can be sampled and nudged forward.
pub trait CounterSource {
    /// Current value in `0..64`.
    fn sample(&self) -> u8;
    /// Step the counter forward by one.
    fn perturb(&self);
}

/// A 6-bit wrapping counter shared between the display tick and the game loop.
pub struct FreeRunningCounter(AtomicU8);

impl FreeRunningCounter {
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicU8::new(0))
    }

    pub fn advance(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for FreeRunningCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterSource for FreeRunningCounter {
    fn sample(&self) -> u8 {
        self.0.load(Ordering::Relaxed) & COUNTER_MASK
    }

    fn perturb(&self) {
        self.advance();
    }
}

/// Picks a cell not occupied by `snake`.
///
/// Samples the counter and bumps it until the sampled cell is free. Concurrent advances of
/// the counter can make it skip values, so after one full lap the first free cell in
/// row-major order is used instead.
pub fn place_apple<S: CounterSource + ?Sized>(snake: &Snake, source: &S) -> Cell {
    debug_assert!(
        Cell::all().any(|cell| !snake.contains(cell)),
        "no free cell for the apple"
    );
    for _ in 0..CELL_COUNT {
        let cell = Cell::from_counter(source.sample());
        if !snake.contains(cell) {
            return cell;
        }
        source.perturb();
    }
    Cell::all()
        .find(|&cell| !snake.contains(cell))
        .unwrap_or_else(|| Cell::from_counter(source.sample()))
}
