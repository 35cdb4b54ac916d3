//! IR reflectance line channel
//!
//! The comparator output is HIGH over the light background (off-line) and
//! LOW over the dark line. Boards with an inverting comparator stage use
//! [`IrLineSensor::inverted`].

use trackrunner_core::traits::LineInput;
use trackrunner_hal::InputPin;

pub struct IrLineSensor<P> {
    pin: P,
    inverted: bool,
}

impl<P: InputPin> IrLineSensor<P> {
    /// HIGH means off-line
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            inverted: false,
        }
    }

    /// LOW means off-line
    pub fn inverted(pin: P) -> Self {
        Self {
            pin,
            inverted: true,
        }
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: InputPin> LineInput for IrLineSensor<P> {
    fn is_off_line(&mut self) -> bool {
        self.pin.is_high() != self.inverted
    }
}
