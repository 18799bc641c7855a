//! Coordinates and headings on the toroidal 8×8 grid.

use crate::shared_constants::GRID_SIZE;

const LAST: u8 = GRID_SIZE - 1;

/// One LED position. Both coordinates are always in `0..8`.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    row: u8,
    col: u8,
}

impl Cell {
    /// Out-of-range coordinates wrap onto the grid.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self {
            row: row & LAST,
            col: col & LAST,
        }
    }

    /// Splits a 6-bit counter value into (value / 8, value % 8).
    #[must_use]
    pub const fn from_counter(value: u8) -> Self {
        Self::new(value >> 3, value & LAST)
    }

    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// The neighboring cell in `direction`, wrapping 7↔0 at every edge.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::new(wrapping_dec(self.row), self.col),
            Direction::Down => Self::new(wrapping_inc(self.row), self.col),
            Direction::Left => Self::new(self.row, wrapping_dec(self.col)),
            Direction::Right => Self::new(self.row, wrapping_inc(self.col)),
        }
    }

    /// Every cell in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| Self::new(row, col)))
    }
}

const fn wrapping_inc(coordinate: u8) -> u8 {
    if coordinate < LAST { coordinate.wrapping_add(1) } else { 0 }
}

const fn wrapping_dec(coordinate: u8) -> u8 {
    if coordinate > 0 { coordinate.wrapping_sub(1) } else { LAST }
}

/// Heading of the snake.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// The 180° reversal of this heading.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }
}
