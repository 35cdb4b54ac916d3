//! H-bridge wheel driver
//!
//! Each wheel is a DC motor across two PWM-driven bridge inputs. Duty on
//! the positive input turns the wheel forward, duty on the negative input
//! turns it backward. The input being released is always written first so
//! both sides are never driven at once.

use trackrunner_core::traits::WheelDrive;
use trackrunner_hal::PwmChannel;

pub struct HBridgeWheel<P> {
    positive: P,
    negative: P,
}

impl<P: PwmChannel> HBridgeWheel<P> {
    pub fn new(positive: P, negative: P) -> Self {
        Self { positive, negative }
    }

    /// For a motor mounted mirrored: terminals swapped
    pub fn reversed(positive: P, negative: P) -> Self {
        Self::new(negative, positive)
    }

    /// Current `(positive, negative)` duty
    pub fn duties(&self) -> (u8, u8) {
        (self.positive.duty(), self.negative.duty())
    }

    pub fn release(self) -> (P, P) {
        (self.positive, self.negative)
    }
}

impl<P: PwmChannel> WheelDrive for HBridgeWheel<P> {
    fn apply(&mut self, positive: u8, negative: u8) {
        if positive == 0 {
            self.positive.off();
            self.negative.set_duty(negative);
        } else {
            self.negative.off();
            self.positive.set_duty(positive);
        }
    }
}
