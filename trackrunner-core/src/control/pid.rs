//! Shared PID correction controller
//!
//! Converts a signed deviation into an unsigned drive-correction magnitude:
//!
//! ```text
//! sum  += err
//! volt  = | kp·err + ki·sum + kd·(err − prev) |
//! prev  = err
//! ```
//!
//! The integral is updated before it is applied. All three products are
//! kept in raw Q16.16 and summed exactly before the absolute value, so
//! `calc_volt(e)` and `calc_volt(-e)` agree whenever the history is mirrored.

use super::fixed::{raw_to_magnitude, Fixed32};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// PID coefficients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PidGains {
    /// Proportional gain (Kp)
    pub kp: Fixed32,
    /// Integral gain (Ki)
    pub ki: Fixed32,
    /// Derivative gain (Kd)
    pub kd: Fixed32,
}

impl PidGains {
    /// Create gains from scaled integers (value × 100)
    pub const fn from_scaled_100(kp_x100: i32, ki_x100: i32, kd_x100: i32) -> Self {
        Self {
            kp: Fixed32::from_scaled_100(kp_x100),
            ki: Fixed32::from_scaled_100(ki_x100),
            kd: Fixed32::from_scaled_100(kd_x100),
        }
    }

    /// Check if any gain is non-zero
    pub fn is_configured(&self) -> bool {
        !self.kp.is_zero() || !self.ki.is_zero() || !self.kd.is_zero()
    }
}

/// PID accumulator state plus gains
#[derive(Debug, Clone, Default)]
pub struct Pid {
    gains: PidGains,
    err_sum: i32,
    prev_err: i32,
}

impl Pid {
    pub fn new(gains: PidGains) -> Self {
        Self {
            gains,
            err_sum: 0,
            prev_err: 0,
        }
    }

    /// Start from a given history, e.g. to resume a mirrored run
    pub fn with_history(gains: PidGains, err_sum: i32, prev_err: i32) -> Self {
        Self {
            gains,
            err_sum,
            prev_err,
        }
    }

    pub fn gains(&self) -> &PidGains {
        &self.gains
    }

    pub fn err_sum(&self) -> i32 {
        self.err_sum
    }

    pub fn prev_err(&self) -> i32 {
        self.prev_err
    }

    /// Clear integral and derivative history
    pub fn reset(&mut self) {
        self.err_sum = 0;
        self.prev_err = 0;
    }

    /// Signed PID sum in raw Q16.16 (64-bit), updating the history
    pub(crate) fn update_raw(&mut self, err: i32) -> i64 {
        self.err_sum = self.err_sum.saturating_add(err);

        let p = self.gains.kp.mul_int_raw(err);
        let i = self.gains.ki.mul_int_raw(self.err_sum);
        let d = self.gains.kd.mul_int_raw(err.saturating_sub(self.prev_err));
        self.prev_err = err;

        p.saturating_add(i).saturating_add(d)
    }

    /// Correction magnitude for `err`
    pub fn calc_volt(&mut self, err: i32) -> u16 {
        raw_to_magnitude(self.update_raw(err))
    }
}
