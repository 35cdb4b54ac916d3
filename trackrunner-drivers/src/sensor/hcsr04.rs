//! HC-SR04 style ultrasonic ranger
//!
//! Trigger sequence: LOW 5 µs, HIGH 10 µs, LOW. The sensor then raises its
//! echo line for as long as the sound took to return. Both the wait for
//! the rising edge and the pulse itself are bounded by a timeout, so a
//! missing or stuck echo never blocks the control loop.

use embedded_hal::delay::DelayNs;
use trackrunner_core::traits::{RangeError, RangeFinder};
use trackrunner_hal::{Clock, InputPin, OutputPin};

/// Ranger timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hcsr04Config {
    /// Longest wait for the echo to start, and longest echo accepted (µs)
    pub timeout_us: u32,
}

impl Default for Hcsr04Config {
    fn default() -> Self {
        Self { timeout_us: 30_000 }
    }
}

pub struct Hcsr04<T, E, C, D> {
    trigger: T,
    echo: E,
    clock: C,
    delay: D,
    config: Hcsr04Config,
}

impl<T, E, C, D> Hcsr04<T, E, C, D>
where
    T: OutputPin,
    E: InputPin,
    C: Clock,
    D: DelayNs,
{
    pub fn new(trigger: T, echo: E, clock: C, delay: D, config: Hcsr04Config) -> Self {
        Self {
            trigger,
            echo,
            clock,
            delay,
            config,
        }
    }

    fn fire(&mut self) {
        self.trigger.set_low();
        self.delay.delay_us(5);
        self.trigger.set_high();
        self.delay.delay_us(10);
        self.trigger.set_low();
    }
}

impl<T, E, C, D> RangeFinder for Hcsr04<T, E, C, D>
where
    T: OutputPin,
    E: InputPin,
    C: Clock,
    D: DelayNs,
{
    fn echo_us(&mut self) -> Result<u32, RangeError> {
        let timeout = self.config.timeout_us as u64;
        self.fire();

        let sent = self.clock.now_us();
        while self.echo.is_low() {
            if self.clock.elapsed_us(sent) > timeout {
                return Err(RangeError::NoEcho);
            }
        }

        let rise = self.clock.now_us();
        while self.echo.is_high() {
            if self.clock.elapsed_us(rise) > timeout {
                return Err(RangeError::EchoTooLong);
            }
        }

        Ok(self.clock.elapsed_us(rise) as u32)
    }
}
