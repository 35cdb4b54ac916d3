//! Wall following zone
//!
//! Keeps the primary wall at the centre-line distance. When the wall
//! disappears the robot either switches to a wall on the other side,
//! recognises the segment's end on the line sensors, or turns back to
//! find the wall again.

use trackrunner_protocol::{NavEvent, TrackSide, ZoneId};

use super::{Navigator, Platform, TickBudget, ZoneError};
use crate::sense::{Correction, WallDeviation};
use crate::traits::Direction;

const TURN_DEGREES: u16 = 90;

/// Result of one wall-following iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WallStep {
    Continue,
    /// Both walls gone over a zero-error cross-section
    Complete,
}

/// Wall-following zone state
#[derive(Debug, Clone)]
pub struct WallFollower {
    primary: TrackSide,
}

impl WallFollower {
    pub fn new(primary: TrackSide) -> Self {
        Self { primary }
    }

    /// Side currently followed
    pub fn primary(&self) -> TrackSide {
        self.primary
    }

    /// Run one iteration of the wall-following loop
    pub fn step<P: Platform>(
        &mut self,
        nav: &mut Navigator<P>,
        budget: &mut TickBudget,
    ) -> Result<WallStep, ZoneError> {
        let err = match nav.wall.detect(self.primary) {
            WallDeviation::Lost => return self.wall_lost(nav, budget),
            WallDeviation::Offset(err) => err,
        };

        match nav.wall.calc_volt(err) {
            Correction::Halt => {
                debug!("front wall, turning away from {}", self.primary);
                nav.pivot(self.primary.opposite(), 0, TURN_DEGREES);
            }
            Correction::Drive(volt) => {
                let direction = match err {
                    e if e < 0 => Direction::from(self.primary.opposite()),
                    e if e > 0 => Direction::from(self.primary),
                    _ => Direction::Forward,
                };
                nav.motion.drive(direction, volt);
            }
        }
        Ok(WallStep::Continue)
    }

    fn wall_lost<P: Platform>(
        &mut self,
        nav: &mut Navigator<P>,
        budget: &mut TickBudget,
    ) -> Result<WallStep, ZoneError> {
        nav.motion.stop();

        let other = self.primary.opposite();
        if nav.wall.has_wall(other) {
            info!("wall switch {} -> {}", self.primary, other);
            self.primary = other;
            nav.emit(NavEvent::WallSwitched(other));
            return Ok(WallStep::Continue);
        }

        let err = nav.line.detect();
        if err == 0 && nav.line.is_cross_section() {
            return Ok(WallStep::Complete);
        }

        warn!("wall {} lost, recovering", self.primary);
        nav.motion.drive(Direction::Forward, 0);
        let advance_ms = nav.config.recovery_advance_ms;
        nav.wait_ms(advance_ms);
        nav.pivot(self.primary.opposite(), 0, TURN_DEGREES);

        loop {
            nav.tick(budget, ZoneId::WallFollowing)?;
            nav.motion.drive(Direction::Forward, 0);
            if nav.wall.has_wall(self.primary) {
                break;
            }
        }
        nav.motion.stop();
        debug!("wall {} reacquired", self.primary);
        Ok(WallStep::Continue)
    }

    /// Step until the segment ends; returns the side followed last
    pub fn run<P: Platform>(
        mut self,
        nav: &mut Navigator<P>,
        budget: &mut TickBudget,
    ) -> Result<TrackSide, ZoneError> {
        info!("wall following, primary {}", self.primary);
        nav.emit(NavEvent::ZoneEntered(ZoneId::WallFollowing));

        loop {
            nav.tick(budget, ZoneId::WallFollowing)?;
            if self.step(nav, budget)? == WallStep::Complete {
                nav.motion.stop();
                info!("wall following complete");
                return Ok(self.primary);
            }
        }
    }
}
