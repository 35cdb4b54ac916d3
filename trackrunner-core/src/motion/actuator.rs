//! Motion actuator
//!
//! Wheel duty for each move, with `base` the configured floor and
//! `boost = base + magnitude` (saturating at 255):
//!
//! | Move              | Left wheel   | Right wheel  |
//! |-------------------|--------------|--------------|
//! | Forward           | boost fwd    | boost fwd    |
//! | Backward          | boost rev    | boost rev    |
//! | Left slide        | base fwd     | boost fwd    |
//! | Right slide       | boost fwd    | base fwd     |
//! | Left pivot        | 0            | boost fwd    |
//! | Right pivot       | boost fwd    | 0            |
//!
//! A pivot stops both wheels, drives only the outer wheel for
//! `pivot_ms_per_degree × degrees`, then stops again. Nothing is sensed
//! during that wait.

use embedded_hal::delay::DelayNs;
use trackrunner_protocol::TrackSide;

use crate::config::DriveConfig;
use crate::traits::{Direction, EncoderLink, LinkError, WheelDrive};

/// Last command applied to the wheels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionCommand {
    Stop,
    Drive { direction: Direction, magnitude: u16 },
    Pivot { side: TrackSide, degrees: u16 },
}

/// Differential drive and encoder requester
pub struct MotionActuator<W, E> {
    left: W,
    right: W,
    link: E,
    base: u8,
    pivot_ms_per_degree: u16,
    last: MotionCommand,
}

impl<W: WheelDrive, E: EncoderLink> MotionActuator<W, E> {
    pub fn new(left: W, right: W, link: E, config: &DriveConfig) -> Self {
        Self {
            left,
            right,
            link,
            base: config.base_magnitude,
            pivot_ms_per_degree: config.pivot_ms_per_degree,
            last: MotionCommand::Stop,
        }
    }

    fn boost(&self, magnitude: u16) -> u8 {
        (self.base as u16).saturating_add(magnitude).min(u8::MAX as u16) as u8
    }

    /// Drive or slide without stopping
    pub fn drive(&mut self, direction: Direction, magnitude: u16) {
        let boost = self.boost(magnitude);
        let base = self.base;
        match direction {
            Direction::Forward => {
                self.left.apply(boost, 0);
                self.right.apply(boost, 0);
            }
            Direction::Backward => {
                self.left.apply(0, boost);
                self.right.apply(0, boost);
            }
            Direction::Left => {
                self.left.apply(base, 0);
                self.right.apply(boost, 0);
            }
            Direction::Right => {
                self.left.apply(boost, 0);
                self.right.apply(base, 0);
            }
        }
        self.last = MotionCommand::Drive {
            direction,
            magnitude,
        };
    }

    /// Rotate in place toward `side` by roughly `degrees`
    ///
    /// Blocks on `delay` for the whole rotation.
    pub fn pivot<D: DelayNs>(
        &mut self,
        side: TrackSide,
        magnitude: u16,
        degrees: u16,
        delay: &mut D,
    ) {
        self.stop();

        let boost = self.boost(magnitude);
        match side {
            TrackSide::Left => self.right.apply(boost, 0),
            TrackSide::Right => self.left.apply(boost, 0),
        }
        debug!("pivot {} {}deg", side, degrees);
        delay.delay_ms(self.pivot_ms_per_degree as u32 * degrees as u32);

        self.stop();
        self.last = MotionCommand::Pivot { side, degrees };
    }

    /// Zero both wheels
    pub fn stop(&mut self) {
        self.left.halt();
        self.right.halt();
        self.last = MotionCommand::Stop;
    }

    pub fn last_command(&self) -> MotionCommand {
        self.last
    }

    /// Reset the remote tick count and start counting
    pub fn init_encoder(&mut self) -> Result<(), LinkError> {
        self.link.start()
    }

    /// Stop remote counting
    pub fn stop_encoder(&mut self) -> Result<(), LinkError> {
        self.link.stop()
    }

    /// Distance since the last [`init_encoder`](Self::init_encoder), in cm
    pub fn distance_travelled(&mut self) -> Result<f32, LinkError> {
        self.link.distance_cm()
    }
}
