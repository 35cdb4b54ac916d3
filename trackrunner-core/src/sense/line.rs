//! Line classifier
//!
//! Reads an ordered left-to-right array of binary channels, computes a
//! weighted deviation and classifies the snapshot. Every classification
//! reads the snapshot taken by the last [`LineClassifier::detect`] call.
//!
//! Weights for 8 sensors:
//!
//! ```text
//! index   0   1   2   3   4   5   6   7
//! weight -3  -2  -1   0   0   1   2   3
//! ```

use heapless::Vec;
use trackrunner_protocol::NodePolarity;

use crate::config::{ConfigError, LineConfig, MAX_LINE_SENSORS};
use crate::control::Pid;
use crate::traits::LineInput;

/// Weight of sensor `index` in an array of `count`
///
/// Symmetric around zero; with an even count both centre sensors get 0.
pub const fn weight_for(index: usize, count: usize) -> i8 {
    let half = count / 2;
    let w = if count % 2 == 0 && index < half {
        index as isize - (half as isize - 1)
    } else {
        index as isize - half as isize
    };
    w as i8
}

/// Node entry signatures, scaled to any sensor count with period 4
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NodePattern {
    /// `1 0 0 1 1 0 0 1`
    Aligned,
    /// `0 0 1 1 0 0 1 1`
    ShiftedRight,
    /// `1 1 0 0 1 1 0 0`
    ShiftedLeft,
}

impl NodePattern {
    pub const ALL: [NodePattern; 3] = [
        NodePattern::Aligned,
        NodePattern::ShiftedRight,
        NodePattern::ShiftedLeft,
    ];

    /// Whether sensor `index` reads off-line in this pattern
    pub const fn is_off_line_at(self, index: usize) -> bool {
        match self {
            NodePattern::Aligned => matches!(index % 4, 0 | 3),
            NodePattern::ShiftedRight => matches!(index % 4, 2 | 3),
            NodePattern::ShiftedLeft => matches!(index % 4, 0 | 1),
        }
    }
}

/// One line channel with its weight and last reading
#[derive(Debug)]
pub struct LineSensor<I> {
    input: I,
    weight: i8,
    off_line: bool,
}

impl<I: LineInput> LineSensor<I> {
    fn sample(&mut self) -> bool {
        self.off_line = self.input.is_off_line();
        self.off_line
    }

    pub fn weight(&self) -> i8 {
        self.weight
    }

    /// Reading from the last detect cycle
    pub fn is_off_line(&self) -> bool {
        self.off_line
    }
}

/// Line sensor array state and classification
pub struct LineClassifier<I> {
    sensors: Vec<LineSensor<I>, MAX_LINE_SENSORS>,
    pid: Pid,
    max_error: i32,
}

impl<I: LineInput> LineClassifier<I> {
    /// Take ownership of the channels, assign weights and reset history
    pub fn configure(
        inputs: impl IntoIterator<Item = I>,
        config: &LineConfig,
    ) -> Result<Self, ConfigError> {
        let mut sensors = Vec::new();
        for input in inputs {
            sensors
                .push(LineSensor {
                    input,
                    weight: 0,
                    off_line: false,
                })
                .map_err(|_| ConfigError::TooManyLineSensors)?;
        }

        let count = sensors.len();
        if count == 0 {
            return Err(ConfigError::NoLineSensors);
        }
        if count != config.sensor_count as usize {
            return Err(ConfigError::SensorCountMismatch);
        }

        for (index, sensor) in sensors.iter_mut().enumerate() {
            sensor.weight = weight_for(index, count);
        }
        let max_error = sensors[count / 2..]
            .iter()
            .map(|s| s.weight as i32)
            .sum();

        Ok(Self {
            sensors,
            pid: Pid::new(config.gains),
            max_error,
        })
    }

    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }

    /// Sum of the positive-side weights
    pub fn max_error(&self) -> i32 {
        self.max_error
    }

    /// Sensor at `index`, or `None` when out of range
    pub fn sensor(&self, index: usize) -> Option<&LineSensor<I>> {
        self.sensors.get(index)
    }

    /// Last reading of sensor `index`; out-of-range reads as on-line
    pub fn is_off_line_at(&self, index: usize) -> bool {
        self.sensors.get(index).is_some_and(|s| s.off_line)
    }

    /// Sample every channel and return the weighted deviation
    ///
    /// Negative means the left-hand sensors are off the line.
    pub fn detect(&mut self) -> i32 {
        let mut err = 0i32;
        for sensor in self.sensors.iter_mut() {
            if sensor.sample() {
                err += sensor.weight as i32;
            }
        }
        trace!("line err={}", err);
        err
    }

    /// Every sensor on the line
    pub fn is_cross_section(&self) -> bool {
        self.sensors.iter().all(|s| !s.off_line)
    }

    /// Every sensor off the line
    pub fn is_off_line(&self) -> bool {
        self.sensors.iter().all(|s| s.off_line)
    }

    /// Which node signature the snapshot matches exactly, if any
    pub fn node_pattern(&self) -> Option<NodePattern> {
        NodePattern::ALL.into_iter().find(|&pattern| {
            self.sensors
                .iter()
                .enumerate()
                .all(|(i, s)| s.off_line == pattern.is_off_line_at(i))
        })
    }

    pub fn is_node(&self) -> bool {
        self.node_pattern().is_some()
    }

    /// Only the centre sensors on the line
    pub fn is_120_junction(&self) -> bool {
        let (lo, hi) = self.centre();
        self.sensors
            .iter()
            .enumerate()
            .all(|(i, s)| s.off_line != (lo..=hi).contains(&i))
    }

    /// First half or second half entirely off the line
    pub fn is_90_turn(&self) -> bool {
        let half = self.sensors.len() / 2;
        let first = &self.sensors[..half];
        let second = &self.sensors[self.sensors.len() - half..];
        let all_off = |part: &[LineSensor<I>]| !part.is_empty() && part.iter().all(|s| s.off_line);
        all_off(first) || all_off(second)
    }

    /// Polarity of the node under the robot
    ///
    /// FALSE when the centre sensors are all on the dark marker. Only
    /// meaningful while [`is_node`](Self::is_node) holds.
    pub fn node_type(&self) -> NodePolarity {
        let (lo, hi) = self.centre();
        if self.sensors[lo..=hi].iter().all(|s| !s.off_line) {
            NodePolarity::False
        } else {
            NodePolarity::True
        }
    }

    /// Correction magnitude for `err`
    pub fn calc_volt(&mut self, err: i32) -> u16 {
        self.pid.calc_volt(err)
    }

    /// Clear correction history
    pub fn reset(&mut self) {
        self.pid.reset();
    }

    pub fn pid(&self) -> &Pid {
        &self.pid
    }

    // Inclusive index range of the centre pair (single middle sensor when odd)
    fn centre(&self) -> (usize, usize) {
        let n = self.sensors.len();
        if n % 2 == 0 {
            (n / 2 - 1, n / 2)
        } else {
            (n / 2, n / 2)
        }
    }
}
