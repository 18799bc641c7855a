//! Snake for an 8×8 multiplexed LED matrix with four direction buttons and a speed knob.
//!
//! The game logic, the display multiplexer and the speed controller are plain `no_std`
//! code behind small board traits ([`MatrixDriver`], [`ButtonReader`], [`AnalogReader`]),
//! so they run under host tests. The Raspberry Pi Pico adapters live in `hardware`
//! behind the `pico1` feature.
#![cfg_attr(not(test), no_std)]

pub mod display;
mod error;
pub mod frame;
pub mod game;
pub mod grid;
pub mod input;
pub mod random;
pub mod scheduler;
pub mod shared_constants;
pub mod snake;
pub mod speed;

#[cfg(feature = "pico1")]
pub mod hardware;
#[cfg(feature = "pico1")]
mod output_array;

// Re-export commonly used items
pub use display::{DrivePattern, MatrixDisplay, MatrixDriver, Multiplexer};
pub use error::{Error, Result};
pub use frame::{Frame, FrameStatic};
pub use game::{GameState, GameStatus};
pub use grid::{Cell, Direction};
pub use input::{ButtonReader, Buttons};
pub use random::{CounterSource, FreeRunningCounter, place_apple};
pub use scheduler::{Scheduler, SchedulerShared};
pub use snake::Snake;
pub use speed::{AnalogReader, SpeedController, SpeedSetting};
