//! Direction buttons and the reversal-rejecting input resolver.

use crate::grid::Direction;

/// Normalized button levels: `true` means pressed, whatever the wiring polarity.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Buttons {
    pub up: bool,
    pub right: bool,
    pub left: bool,
    pub down: bool,
}

impl Buttons {
    pub const RELEASED: Self = Self {
        up: false,
        right: false,
        left: false,
        down: false,
    };

    #[must_use]
    pub const fn any(self) -> bool {
        self.up || self.right || self.left || self.down
    }

    /// Pressed directions in resolver priority order: Up, Right, Left, Down.
    fn by_priority(self) -> [(bool, Direction); 4] {
        [
            (self.up, Direction::Up),
            (self.right, Direction::Right),
            (self.left, Direction::Left),
            (self.down, Direction::Down),
        ]
    }

    /// The first pressed direction that does not reverse `current`, else `current`.
    ///
    /// Simultaneous presses are decided only by the fixed priority order.
    #[must_use]
    pub fn resolve(self, current: Direction) -> Direction {
        self.by_priority()
            .into_iter()
            .find(|&(pressed, direction)| pressed && direction != current.opposite())
            .map_or(current, |(_, direction)| direction)
    }
}

/// Reads the four direction buttons.
pub trait ButtonReader {
    fn read_buttons(&mut self) -> Buttons;
}
