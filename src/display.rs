//! A persistence-of-vision multiplexer for the 8×8 matrix.
//!
//! Each tick lights at most one LED: a snake segment, the apple, or nothing. Cycling
//! through every occupied cell fast enough makes the whole picture appear steady.
//!
//! See [`MatrixDisplay`] for the tick loop and [`Multiplexer`] for the cursor logic.

use core::convert::Infallible;

use embedded_hal_async::delay::DelayNs;

use crate::Result;
use crate::frame::{Frame, FrameStatic};
use crate::game::GameStatus;
use crate::grid::Cell;
use crate::random::FreeRunningCounter;
use crate::shared_constants::DISPLAY_TICK;
use crate::speed::sleep_for;

/// Row and column drive levels for the whole matrix.
///
/// Rows are active high and columns active low: a LED at (r, c) lights when row bit `r`
/// is 1 and column bit `c` is 0.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrivePattern {
    pub row_mask: u8,
    pub col_mask: u8,
}

impl DrivePattern {
    /// Every LED off.
    pub const BLANK: Self = Self {
        row_mask: 0x00,
        col_mask: 0xFF,
    };

    /// Every LED on.
    pub const FULL: Self = Self {
        row_mask: 0xFF,
        col_mask: 0x00,
    };

    /// Exactly one LED on.
    #[must_use]
    pub const fn single(cell: Cell) -> Self {
        Self {
            row_mask: 1 << cell.row(),
            col_mask: !(1 << cell.col()),
        }
    }
}

/// Drives the row and column lines of the matrix.
pub trait MatrixDriver {
    /// Applies `pattern` to all sixteen lines.
    ///
    /// # Errors
    ///
    /// Returns an error if a line cannot be driven.
    fn set_pattern(&mut self, pattern: DrivePattern) -> Result<()>;
}

/// Walks the render cursor over `[snake cells..., apple]`.
#[derive(Debug, Default)]
pub struct Multiplexer {
    cursor: usize,
}

impl Multiplexer {
    #[must_use]
    pub const fn new() -> Self {
        Self { cursor: 0 }
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// The pattern for this tick, then advances the cursor.
    ///
    /// Nothing is lit and the cursor holds unless the game is running. The frame length
    /// may differ from the previous tick, so a cursor past the apple slot lights nothing
    /// and wraps to 0.
    pub fn tick(&mut self, frame: &Frame) -> DrivePattern {
        if frame.status() != GameStatus::Running {
            return DrivePattern::BLANK;
        }
        let len = frame.len();
        let pattern = if self.cursor == len {
            DrivePattern::single(frame.apple())
        } else {
            frame
                .snake_cell(self.cursor)
                .map_or(DrivePattern::BLANK, DrivePattern::single)
        };
        self.cursor = self.cursor.saturating_add(1);
        if self.cursor > len {
            self.cursor = 0;
        }
        pattern
    }
}

/// The display side of the game: a matrix driver plus its multiplexer.
pub struct MatrixDisplay<M> {
    driver: M,
    multiplexer: Multiplexer,
}

impl<M: MatrixDriver> MatrixDisplay<M> {
    pub const fn new(driver: M) -> Self {
        Self {
            driver,
            multiplexer: Multiplexer::new(),
        }
    }

    pub const fn driver(&self) -> &M {
        &self.driver
    }

    /// One display tick: blank, then light the next cell of `frame`.
    ///
    /// A finished game lights the whole matrix instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix lines cannot be driven.
    pub fn refresh(&mut self, frame: &Frame) -> Result<()> {
        self.driver.set_pattern(DrivePattern::BLANK)?;
        let pattern = if frame.status() == GameStatus::Over {
            DrivePattern::FULL
        } else {
            self.multiplexer.tick(frame)
        };
        self.driver.set_pattern(pattern)
    }

    /// Refreshes every [`DISPLAY_TICK`] until the game is over, then leaves the
    /// whole matrix lit for good.
    ///
    /// Each tick also advances `counter`, which is what makes it free-running.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix lines cannot be driven.
    pub async fn run<D: DelayNs>(
        mut self,
        frame_static: &FrameStatic,
        counter: &FreeRunningCounter,
        mut delay: D,
    ) -> Result<Infallible> {
        #[cfg(feature = "defmt")]
        defmt::info!("display multiplexer started");
        loop {
            sleep_for(&mut delay, DISPLAY_TICK).await;
            counter.advance();
            let frame = frame_static.snapshot();
            self.refresh(&frame)?;
            if frame.status() == GameStatus::Over {
                break;
            }
        }
        #[cfg(feature = "defmt")]
        defmt::info!("display halted on game over");
        core::future::pending().await
    }
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;
    use crate::game::GameState;
    use crate::grid::Direction;
    use crate::snake::Snake;

    fn frame(cells: &[Cell], apple: Cell, status: GameStatus) -> Frame {
        let game = GameState::from_parts(
            Snake::from_cells(cells).unwrap(),
            apple,
            Direction::Right,
            status,
        );
        Frame::from(&game)
    }

    #[derive(Default)]
    struct RecordingDriver {
        patterns: heapless::Vec<DrivePattern, 16>,
    }

    impl MatrixDriver for RecordingDriver {
        fn set_pattern(&mut self, pattern: DrivePattern) -> Result<()> {
            self.patterns.push(pattern).map_err(|_| crate::Error::CannotSetOutputState)
        }
    }

    #[test]
    fn single_cell_pattern_is_bit_exact() {
        let pattern = DrivePattern::single(Cell::new(2, 5));
        assert_eq!(pattern.row_mask, 0b0000_0100);
        assert_eq!(pattern.col_mask, 0b1101_1111);
    }

    #[test]
    fn cycles_snake_then_apple_then_wraps() {
        let frame = frame(
            &[Cell::new(0, 0), Cell::new(0, 1)],
            Cell::new(4, 4),
            GameStatus::Running,
        );
        let mut multiplexer = Multiplexer::new();
        let expected = [
            DrivePattern::single(Cell::new(0, 0)),
            DrivePattern::single(Cell::new(0, 1)),
            DrivePattern::single(Cell::new(4, 4)),
            DrivePattern::single(Cell::new(0, 0)),
        ];
        for pattern in expected {
            assert_eq!(multiplexer.tick(&frame), pattern);
        }
        assert_eq!(multiplexer.cursor(), 1);
    }

    #[test]
    fn blank_and_frozen_cursor_unless_running() {
        let frame = frame(
            &[Cell::new(0, 0), Cell::new(0, 1)],
            Cell::new(4, 4),
            GameStatus::NotStarted,
        );
        let mut multiplexer = Multiplexer::new();
        assert_eq!(multiplexer.tick(&frame), DrivePattern::BLANK);
        assert_eq!(multiplexer.cursor(), 0);
    }

    #[test]
    fn cursor_beyond_a_shorter_frame_lights_nothing_and_wraps() {
        let long = frame(
            &[Cell::new(1, 0), Cell::new(1, 1), Cell::new(1, 2), Cell::new(1, 3)],
            Cell::new(5, 5),
            GameStatus::Running,
        );
        let short = frame(
            &[Cell::new(2, 0), Cell::new(2, 1)],
            Cell::new(6, 6),
            GameStatus::Running,
        );
        let mut multiplexer = Multiplexer::new();
        for _ in 0..4 {
            let _ = multiplexer.tick(&long);
        }
        assert_eq!(multiplexer.cursor(), 4);

        assert_eq!(multiplexer.tick(&short), DrivePattern::BLANK);
        assert_eq!(multiplexer.cursor(), 0);
        assert_eq!(multiplexer.tick(&short), DrivePattern::single(Cell::new(2, 0)));
    }

    #[test]
    fn cursor_on_grown_frame_keeps_drawing_snake() {
        let short = frame(
            &[Cell::new(0, 0), Cell::new(0, 1)],
            Cell::new(7, 7),
            GameStatus::Running,
        );
        let grown = frame(
            &[Cell::new(0, 1), Cell::new(0, 2), Cell::new(0, 2)],
            Cell::new(3, 3),
            GameStatus::Running,
        );
        let mut multiplexer = Multiplexer::new();
        let _ = multiplexer.tick(&short);
        let _ = multiplexer.tick(&short);
        assert_eq!(multiplexer.tick(&grown), DrivePattern::single(Cell::new(0, 2)));
        assert_eq!(multiplexer.tick(&grown), DrivePattern::single(Cell::new(3, 3)));
        assert_eq!(multiplexer.cursor(), 0);
    }

    #[test]
    fn refresh_blanks_before_lighting() {
        let frame = frame(
            &[Cell::new(3, 1), Cell::new(3, 2)],
            Cell::new(0, 7),
            GameStatus::Running,
        );
        let mut display = MatrixDisplay::new(RecordingDriver::default());
        display.refresh(&frame).unwrap();
        assert_eq!(
            display.driver().patterns.as_slice(),
            &[DrivePattern::BLANK, DrivePattern::single(Cell::new(3, 1))]
        );
    }

    #[test]
    fn refresh_lights_everything_when_over() {
        let frame = frame(
            &[Cell::new(3, 1), Cell::new(3, 2)],
            Cell::new(0, 7),
            GameStatus::Over,
        );
        let mut display = MatrixDisplay::new(RecordingDriver::default());
        display.refresh(&frame).unwrap();
        assert_eq!(
            display.driver().patterns.as_slice(),
            &[DrivePattern::BLANK, DrivePattern::FULL]
        );
    }
}
