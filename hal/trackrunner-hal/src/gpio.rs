//! GPIO pin abstractions
//!
//! Digital pins used by the line sensor array (inputs) and the ultrasonic
//! rangers (trigger output, echo input).

/// Digital output pin
pub trait OutputPin {
    /// Drive the pin high (logic 1)
    fn set_high(&mut self);

    /// Drive the pin low (logic 0)
    fn set_low(&mut self);

    /// Drive the pin to a specific level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
///
/// Takes `&mut self` because some boards sample inputs through a shared
/// port expander or a debouncing register that must be updated on read.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&mut self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}
