//! Wheel drive seam

use trackrunner_protocol::TrackSide;

/// Motion directions understood by the actuator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl From<TrackSide> for Direction {
    fn from(side: TrackSide) -> Self {
        match side {
            TrackSide::Left => Direction::Left,
            TrackSide::Right => Direction::Right,
        }
    }
}

/// One wheel driven through a two-terminal bridge
pub trait WheelDrive {
    /// Set the duty on the positive and negative terminals
    ///
    /// `(d, 0)` turns the wheel forward, `(0, d)` backward, `(0, 0)` stops.
    fn apply(&mut self, positive: u8, negative: u8);

    /// Zero both terminals
    fn halt(&mut self) {
        self.apply(0, 0);
    }
}
