//! Wall classifier
//!
//! Three ultrasonic rangers (left, front, right) and the correction that
//! keeps the robot on the centre line between `min_dist` and `max_dist`
//! from the followed wall.

use trackrunner_protocol::TrackSide;

use crate::config::{ConfigError, WallConfig};
use crate::control::fixed::raw_to_magnitude;
use crate::control::{Fixed32, Pid};
use crate::traits::RangeFinder;

/// Distance recorded when a ranging cycle fails
pub const NO_WALL_MM: u16 = u16::MAX;

/// Echo µs → mm: speed of sound 346 m/s, halved for the round trip
const MM_PER_US_X1000: u32 = 173;

/// Ranger position on the robot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Wall {
    Left = 0,
    Front = 1,
    Right = 2,
}

impl From<TrackSide> for Wall {
    fn from(side: TrackSide) -> Self {
        match side {
            TrackSide::Left => Wall::Left,
            TrackSide::Right => Wall::Right,
        }
    }
}

/// Result of [`WallClassifier::detect`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WallDeviation {
    /// Side distance at or beyond `max_dist`
    Lost,
    /// Signed offset from the centre line (mm); negative is too close
    Offset(i32),
}

/// Result of [`WallClassifier::calc_volt`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Correction {
    /// Front wall inside the centre line; do not advance
    Halt,
    /// Correction magnitude
    Drive(u16),
}

/// One ranger and its last distance
#[derive(Debug)]
pub struct RangeSensor<R> {
    finder: R,
    distance_mm: u16,
}

impl<R: RangeFinder> RangeSensor<R> {
    pub fn new(finder: R) -> Self {
        Self {
            finder,
            distance_mm: NO_WALL_MM,
        }
    }

    fn measure(&mut self) -> u16 {
        self.distance_mm = match self.finder.echo_us() {
            Ok(us) => echo_to_mm(us),
            Err(_e) => {
                trace!("range error {}", _e);
                NO_WALL_MM
            }
        };
        self.distance_mm
    }

    /// Distance from the last measurement (mm)
    pub fn distance_mm(&self) -> u16 {
        self.distance_mm
    }
}

/// Convert an echo high time to millimetres
pub fn echo_to_mm(echo_us: u32) -> u16 {
    let mm = (echo_us as u64 * MM_PER_US_X1000 as u64) / 1000;
    mm.min(NO_WALL_MM as u64) as u16
}

/// Wall array state and classification
pub struct WallClassifier<R> {
    sensors: [RangeSensor<R>; 3],
    min_dist_mm: u16,
    max_dist_mm: u16,
    avg_dist_mm: u16,
    front_gain: Fixed32,
    pid: Pid,
}

impl<R: RangeFinder> WallClassifier<R> {
    /// Take ownership of the rangers and derive the centre line
    pub fn configure(
        left: R,
        front: R,
        right: R,
        config: &WallConfig,
    ) -> Result<Self, ConfigError> {
        if config.min_dist_mm >= config.max_dist_mm {
            return Err(ConfigError::InvalidWallRange);
        }
        Ok(Self {
            sensors: [
                RangeSensor::new(left),
                RangeSensor::new(front),
                RangeSensor::new(right),
            ],
            min_dist_mm: config.min_dist_mm,
            max_dist_mm: config.max_dist_mm,
            avg_dist_mm: config.avg_dist_mm(),
            front_gain: config.front_gain,
            pid: Pid::new(config.gains),
        })
    }

    pub fn min_dist_mm(&self) -> u16 {
        self.min_dist_mm
    }

    pub fn max_dist_mm(&self) -> u16 {
        self.max_dist_mm
    }

    pub fn avg_dist_mm(&self) -> u16 {
        self.avg_dist_mm
    }

    /// Range one side and store the result
    ///
    /// A failed cycle is stored as [`NO_WALL_MM`].
    pub fn measure(&mut self, wall: Wall) -> u16 {
        self.sensors[wall as usize].measure()
    }

    /// Last measured distance for `wall`
    pub fn distance_mm(&self, wall: Wall) -> u16 {
        self.sensors[wall as usize].distance_mm()
    }

    /// Measure `side` and the front, and report the deviation from the centre line
    pub fn detect(&mut self, side: TrackSide) -> WallDeviation {
        let side_mm = self.measure(side.into());
        self.measure(Wall::Front);

        if side_mm >= self.max_dist_mm {
            WallDeviation::Lost
        } else {
            WallDeviation::Offset(side_mm as i32 - self.avg_dist_mm as i32)
        }
    }

    /// Correction for a side offset, using the front distance from the last detect
    ///
    /// Halts when the front wall is at or inside the centre line. Otherwise
    /// the closer the front wall is within `max_dist`, the smaller the
    /// magnitude, down to zero.
    pub fn calc_volt(&mut self, err: i32) -> Correction {
        let front_mm = self.distance_mm(Wall::Front);
        if front_mm <= self.avg_dist_mm {
            return Correction::Halt;
        }

        let magnitude = raw_to_magnitude(self.pid.update_raw(err));
        let inside = self.max_dist_mm.saturating_sub(front_mm);
        let front_term = raw_to_magnitude(self.front_gain.mul_int_raw(inside as i32));
        Correction::Drive(magnitude.saturating_sub(front_term))
    }

    /// Measure `side` and report whether a wall is within `max_dist`
    pub fn has_wall(&mut self, side: TrackSide) -> bool {
        self.measure(side.into()) <= self.max_dist_mm
    }

    /// Clear correction history
    pub fn reset(&mut self) {
        self.pid.reset();
    }
}
