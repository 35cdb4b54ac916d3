//! Monotonic time base
//!
//! Used for bounded waits: echo pulse timing and bus request deadlines.
//! Blocking delays go through `embedded_hal::delay::DelayNs` instead.

/// Monotonic microsecond clock
pub trait Clock {
    /// Microseconds since an arbitrary fixed epoch (boot)
    ///
    /// Must never go backwards. Wrapping is not expected within the
    /// lifetime of a run (u64 microseconds).
    fn now_us(&self) -> u64;

    /// Microseconds elapsed since `since_us`
    fn elapsed_us(&self, since_us: u64) -> u64 {
        self.now_us().saturating_sub(since_us)
    }
}
