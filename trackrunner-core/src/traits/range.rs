//! Ultrasonic ranging channel

/// Errors from a single ranging cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangeError {
    /// Echo never started
    NoEcho,
    /// Echo pulse did not end within the timeout
    EchoTooLong,
}

/// Trigger/echo ranger
pub trait RangeFinder {
    /// Fire one ranging pulse and return the echo high time in microseconds
    fn echo_us(&mut self) -> Result<u32, RangeError>;
}
