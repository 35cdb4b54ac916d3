//! Line sensor channel

/// One binary line-presence channel
///
/// Off-line means the channel sees the light background. On the reference
/// hardware this is an electrically HIGH comparator output; drivers for
/// inverted boards translate so this convention holds everywhere above the
/// driver layer.
pub trait LineInput {
    /// Sample the channel; `true` when the sensor is off the line
    fn is_off_line(&mut self) -> bool;

    /// Sample the channel; `true` when the sensor is over the line
    fn is_on_line(&mut self) -> bool {
        !self.is_off_line()
    }
}
