use embassy_time::Duration;

use crate::grid::{Cell, Direction};

/// Rows (and columns) on the LED matrix.
pub const GRID_SIZE: u8 = 8;

/// Number of LEDs on the matrix, which is also the snake's capacity.
pub const CELL_COUNT: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);
pub const SNAKE_CAPACITY: usize = CELL_COUNT;

/// Period of the display multiplexer. One LED is lit per tick.
pub const DISPLAY_TICK: Duration = Duration::from_millis(2);

/// Step delay used until the first analog sample arrives.
pub const INITIAL_SPEED_MS: u16 = 200;

/// Added to every analog sample to get the step delay in milliseconds.
pub const SPEED_OFFSET_MS: u16 = 70;

pub const INITIAL_TAIL: Cell = Cell::new(0, 0);
pub const INITIAL_HEAD: Cell = Cell::new(0, 1);
pub const INITIAL_DIRECTION: Direction = Direction::Right;
