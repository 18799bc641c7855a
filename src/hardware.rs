//! Raspberry Pi Pico wiring for the matrix, the buttons and the speed knob.
//!
//! | Signal              | Pins            | Polarity                  |
//! |---------------------|-----------------|---------------------------|
//! | Matrix rows 0..8    | GPIO 0..=7      | high lights the row       |
//! | Matrix columns 0..8 | GPIO 8..=15     | low lights the column     |
//! | Up, Right, Left, Down | GPIO 16..=19  | pulled up, low is pressed |
//! | Speed potentiometer | GPIO 26 (ADC0)  | 12-bit, scaled to 8 bits  |

use embassy_rp::{
    adc, bind_interrupts,
    gpio::{self, Level, Pull},
};

use crate::Result;
use crate::display::{DrivePattern, MatrixDriver};
use crate::input::{ButtonReader, Buttons};
use crate::output_array::OutputArray;
use crate::speed::AnalogReader;

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => adc::InterruptHandler;
});

/// Everything the game needs from the board, ready to hand to its tasks.
pub struct Hardware {
    pub matrix: MatrixPins,
    pub buttons: DirectionButtons,
    pub speed_pot: SpeedPot,
}

impl Default for Hardware {
    fn default() -> Self {
        let peripherals: embassy_rp::Peripherals =
            embassy_rp::init(embassy_rp::config::Config::default());

        // Start blank: rows low, columns high.
        let rows = OutputArray::new([
            gpio::Output::new(peripherals.PIN_0, Level::Low),
            gpio::Output::new(peripherals.PIN_1, Level::Low),
            gpio::Output::new(peripherals.PIN_2, Level::Low),
            gpio::Output::new(peripherals.PIN_3, Level::Low),
            gpio::Output::new(peripherals.PIN_4, Level::Low),
            gpio::Output::new(peripherals.PIN_5, Level::Low),
            gpio::Output::new(peripherals.PIN_6, Level::Low),
            gpio::Output::new(peripherals.PIN_7, Level::Low),
        ]);

        let cols = OutputArray::new([
            gpio::Output::new(peripherals.PIN_8, Level::High),
            gpio::Output::new(peripherals.PIN_9, Level::High),
            gpio::Output::new(peripherals.PIN_10, Level::High),
            gpio::Output::new(peripherals.PIN_11, Level::High),
            gpio::Output::new(peripherals.PIN_12, Level::High),
            gpio::Output::new(peripherals.PIN_13, Level::High),
            gpio::Output::new(peripherals.PIN_14, Level::High),
            gpio::Output::new(peripherals.PIN_15, Level::High),
        ]);

        let buttons = DirectionButtons {
            up: gpio::Input::new(peripherals.PIN_16, Pull::Up),
            right: gpio::Input::new(peripherals.PIN_17, Pull::Up),
            left: gpio::Input::new(peripherals.PIN_18, Pull::Up),
            down: gpio::Input::new(peripherals.PIN_19, Pull::Up),
        };

        let speed_pot = SpeedPot {
            adc: adc::Adc::new(peripherals.ADC, Irqs, adc::Config::default()),
            channel: adc::Channel::new_pin(peripherals.PIN_26, Pull::None),
            last_sample: 0,
        };

        Self {
            matrix: MatrixPins { rows, cols },
            buttons,
            speed_pot,
        }
    }
}

/// The sixteen row and column lines of the matrix.
pub struct MatrixPins {
    rows: OutputArray<'static>,
    cols: OutputArray<'static>,
}

impl MatrixDriver for MatrixPins {
    fn set_pattern(&mut self, pattern: DrivePattern) -> Result<()> {
        self.rows.set_from_bits(pattern.row_mask)?;
        self.cols.set_from_bits(pattern.col_mask)
    }
}

/// Four active-low push buttons.
pub struct DirectionButtons {
    up: gpio::Input<'static>,
    right: gpio::Input<'static>,
    left: gpio::Input<'static>,
    down: gpio::Input<'static>,
}

impl ButtonReader for DirectionButtons {
    fn read_buttons(&mut self) -> Buttons {
        Buttons {
            up: self.up.is_low(),
            right: self.right.is_low(),
            left: self.left.is_low(),
            down: self.down.is_low(),
        }
    }
}

/// The speed potentiometer on ADC0.
pub struct SpeedPot {
    adc: adc::Adc<'static, adc::Async>,
    channel: adc::Channel<'static>,
    last_sample: u8,
}

impl AnalogReader for SpeedPot {
    /// The top 8 of the 12 conversion bits. A failed conversion repeats the last sample.
    async fn read_sample(&mut self) -> u8 {
        match self.adc.read(&mut self.channel).await {
            Ok(raw) => {
                self.last_sample = u8::try_from(raw >> 4).unwrap_or(u8::MAX);
            }
            Err(_err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("speed pot conversion failed: {}", _err);
            }
        }
        self.last_sample
    }
}
