//! PWM channel abstraction
//!
//! Each motor terminal is one PWM channel. Duty is expressed on the 8-bit
//! scale the motor drive magnitudes use (0 = off, 255 = full on).

/// A single PWM output channel
pub trait PwmChannel {
    /// Set the duty cycle (0-255)
    fn set_duty(&mut self, duty: u8);

    /// Get the last duty cycle written
    fn duty(&self) -> u8;

    /// Turn the channel fully off
    fn off(&mut self) {
        self.set_duty(0);
    }
}
