//! Game pace from the speed potentiometer.

use core::convert::Infallible;
use core::future::Future;

use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;
use portable_atomic::{AtomicU16, Ordering};

use crate::shared_constants::{INITIAL_SPEED_MS, SPEED_OFFSET_MS};

/// Produces one 8-bit analog sample per call, completing when the conversion is done.
pub trait AnalogReader {
    fn read_sample(&mut self) -> impl Future<Output = u8>;
}

/// Step delay for a raw sample: `sample + 70` ms, so 70..=325 ms.
#[must_use]
pub fn delay_ms_for_sample(sample: u8) -> u16 {
    u16::from(sample).saturating_add(SPEED_OFFSET_MS)
}

/// The current step delay. Written by the speed controller, read by the game loop.
///
/// A single relaxed atomic is enough: a stale value only shifts the pace of one step.
pub struct SpeedSetting(AtomicU16);

impl SpeedSetting {
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicU16::new(INITIAL_SPEED_MS))
    }

    #[must_use]
    pub fn delay_ms(&self) -> u16 {
        self.0.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.delay_ms()))
    }

    /// Stores the delay for `sample`, returning the previous delay.
    pub fn update_from_sample(&self, sample: u8) -> u16 {
        self.0.swap(delay_ms_for_sample(sample), Ordering::Relaxed)
    }
}

impl Default for SpeedSetting {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps [`SpeedSetting`] in step with an analog input.
pub struct SpeedController<'a, A> {
    reader: A,
    setting: &'a SpeedSetting,
}

impl<'a, A: AnalogReader> SpeedController<'a, A> {
    pub const fn new(reader: A, setting: &'a SpeedSetting) -> Self {
        Self { reader, setting }
    }

    /// Waits for one sample and publishes its delay. Returns the new delay in ms.
    pub async fn sample_once(&mut self) -> u16 {
        let sample = self.reader.read_sample().await;
        let previous = self.setting.update_from_sample(sample);
        let current = delay_ms_for_sample(sample);
        if previous != current {
            #[cfg(feature = "defmt")]
            defmt::debug!("speed: {} ms -> {} ms (sample {})", previous, current, sample);
        }
        current
    }

    /// Samples back to back forever.
    pub async fn run(mut self) -> Infallible {
        #[cfg(feature = "defmt")]
        defmt::info!("speed controller started at {} ms", self.setting.delay_ms());
        loop {
            self.sample_once().await;
        }
    }
}

/// Sleeps for `duration` on any async delay provider.
pub(crate) async fn sleep_for<D: DelayNs>(delay: &mut D, duration: Duration) {
    let micros = u32::try_from(duration.as_micros()).unwrap_or(u32::MAX);
    delay.delay_us(micros).await;
}
