//! The foreground game loop.
//!
//! Waits for a first button press, then steps the game once per speed delay until the
//! snake runs into itself. Every step is computed on the loop's own [`GameState`] and
//! published to the display as one snapshot.

use core::convert::Infallible;

use embedded_hal_async::delay::DelayNs;

use crate::frame::FrameStatic;
use crate::game::{GameState, GameStatus};
use crate::input::ButtonReader;
use crate::random::CounterSource;
use crate::speed::{SpeedSetting, sleep_for};

/// Shared resources the scheduler reads but does not own.
pub struct SchedulerShared<'a, S: ?Sized> {
    pub frame_static: &'a FrameStatic,
    pub speed: &'a SpeedSetting,
    pub counter: &'a S,
}

/// Owns the game state and drives it from buttons, a delay and the speed setting.
pub struct Scheduler<'a, B, D, S: ?Sized> {
    game: GameState,
    buttons: B,
    delay: D,
    shared: SchedulerShared<'a, S>,
}

impl<'a, B, D, S> Scheduler<'a, B, D, S>
where
    B: ButtonReader,
    D: DelayNs,
    S: CounterSource + ?Sized,
{
    /// Creates the power-on game and publishes it.
    pub fn new(buttons: B, delay: D, shared: SchedulerShared<'a, S>) -> Self {
        let game = GameState::new(shared.counter);
        shared.frame_static.publish(&game);
        Self {
            game,
            buttons,
            delay,
            shared,
        }
    }

    #[must_use]
    pub const fn game(&self) -> &GameState {
        &self.game
    }

    /// One pass of the main loop for the current status. Returns the status afterwards.
    pub async fn pass(&mut self) -> GameStatus {
        match self.game.status() {
            GameStatus::NotStarted => self.execute_not_started().await,
            GameStatus::Running => self.execute_running().await,
            GameStatus::Over => {}
        }
        self.game.status()
    }

    async fn execute_not_started(&mut self) {
        if self.buttons.read_buttons().any() {
            self.game.start();
            self.shared.frame_static.publish(&self.game);
            #[cfg(feature = "defmt")]
            defmt::info!("game started, apple at {}", self.game.apple());
        } else {
            embassy_futures::yield_now().await;
        }
    }

    async fn execute_running(&mut self) {
        sleep_for(&mut self.delay, self.shared.speed.delay()).await;
        let buttons = self.buttons.read_buttons();
        self.game.step(buttons, self.shared.counter);
        self.shared.frame_static.publish(&self.game);
    }

    /// Runs until the game is over, then idles forever.
    ///
    /// The display notices the final frame and lights the whole matrix.
    pub async fn run(mut self) -> Infallible {
        #[cfg(feature = "defmt")]
        defmt::info!("waiting for a button press");
        while self.pass().await != GameStatus::Over {}
        #[cfg(feature = "defmt")]
        defmt::info!("final length {}", self.game.snake().len());
        core::future::pending().await
    }
}
