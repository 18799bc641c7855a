use embassy_rp::gpio;
use embedded_hal::digital::OutputPin;

use crate::Result;

/// One GPIO output per bit of a `u8`, bit 0 first.
pub struct OutputArray<'a>([gpio::Output<'a>; u8::BITS as usize]);

impl<'a> OutputArray<'a> {
    pub const fn new(outputs: [gpio::Output<'a>; u8::BITS as usize]) -> Self {
        Self(outputs)
    }

    /// Drives output `i` high when bit `i` of `bits` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if an output cannot be set.
    #[inline]
    pub fn set_from_bits(&mut self, mut bits: u8) -> Result<()> {
        for output in &mut self.0 {
            let state = (bits & 1) == 1;
            output.set_state(state.into())?;
            bits >>= 1;
        }
        Ok(())
    }
}
