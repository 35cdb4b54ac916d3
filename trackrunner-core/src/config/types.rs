//! Configuration type definitions
//!
//! Defaults carry the values the robot was first run with. PID gains default
//! to zero (untuned); they are exposed here so tuning never needs a code
//! change.

use crate::control::{Fixed32, PidGains};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum number of line sensors a classifier can hold
pub const MAX_LINE_SENSORS: usize = 16;

/// Largest valid 7-bit bus address
pub const MAX_BUS_ADDRESS: u8 = 0x7F;

/// Errors found while validating or loading configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// No line sensors configured
    NoLineSensors,
    /// More line sensors than [`MAX_LINE_SENSORS`]
    TooManyLineSensors,
    /// Number of line channels differs from `LineConfig::sensor_count`
    SensorCountMismatch,
    /// `min_dist_mm` must be below `max_dist_mm`
    InvalidWallRange,
    /// Encoder bus address outside the 7-bit range
    InvalidBusAddress,
    /// Encoder link timeout is zero
    ZeroTimeout,
    /// Stored blob could not be encoded or decoded
    Serialization,
}

/// Line classifier configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineConfig {
    /// Number of line channels, ordered left to right
    pub sensor_count: u8,
    /// Correction gains
    pub gains: PidGains,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            sensor_count: 8,
            gains: PidGains::default(),
        }
    }
}

/// Wall classifier configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WallConfig {
    /// Closest useful wall distance (mm)
    pub min_dist_mm: u16,
    /// Farthest distance still counted as a wall (mm)
    pub max_dist_mm: u16,
    /// Correction gains on the side deviation
    pub gains: PidGains,
    /// Deceleration per mm the front wall is inside `max_dist_mm`
    pub front_gain: Fixed32,
}

impl WallConfig {
    /// Wall-following centre line
    pub fn avg_dist_mm(&self) -> u16 {
        ((self.min_dist_mm as u32 + self.max_dist_mm as u32) / 2) as u16
    }
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            min_dist_mm: 60,
            max_dist_mm: 200,
            gains: PidGains::default(),
            front_gain: Fixed32::ZERO,
        }
    }
}

/// Motion actuator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DriveConfig {
    /// Duty floor added under every move (0-255)
    pub base_magnitude: u8,
    /// Blind pivot time per degree of rotation (ms)
    pub pivot_ms_per_degree: u16,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            base_magnitude: 100,
            pivot_ms_per_degree: 5,
        }
    }
}

/// Encoder link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkConfig {
    /// 7-bit bus address of the encoder controller
    pub address: u8,
    /// Deadline for one request including retries (µs)
    pub timeout_us: u32,
    /// Extra attempts after a failed transaction
    pub retries: u8,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            address: trackrunner_protocol::ENCODER_ADDRESS,
            timeout_us: 20_000,
            retries: 2,
        }
    }
}

/// Zone timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ZoneConfig {
    /// Blind forward drive into a node after its polarity is read (ms)
    pub node_settle_ms: u32,
    /// Blind forward drive before pivoting back toward a lost wall (ms)
    pub recovery_advance_ms: u32,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            node_settle_ms: 2000,
            recovery_advance_ms: 300,
        }
    }
}

/// Complete robot configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RobotConfig {
    pub line: LineConfig,
    pub wall: WallConfig,
    pub drive: DriveConfig,
    pub link: LinkConfig,
    pub zone: ZoneConfig,
}

impl RobotConfig {
    /// Check cross-field invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.line.sensor_count == 0 {
            return Err(ConfigError::NoLineSensors);
        }
        if self.line.sensor_count as usize > MAX_LINE_SENSORS {
            return Err(ConfigError::TooManyLineSensors);
        }
        if self.wall.min_dist_mm >= self.wall.max_dist_mm {
            return Err(ConfigError::InvalidWallRange);
        }
        if self.link.address > MAX_BUS_ADDRESS {
            return Err(ConfigError::InvalidBusAddress);
        }
        if self.link.timeout_us == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Serialize into `buf`, returning the used prefix
    #[cfg(feature = "serde")]
    pub fn to_postcard<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Serialization)
    }

    /// Deserialize and validate a stored blob
    #[cfg(feature = "serde")]
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Serialization)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RobotConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.drive.base_magnitude, 100);
        assert_eq!(config.link.address, 8);
        assert_eq!(config.zone.node_settle_ms, 2000);
        assert!(!config.line.gains.is_configured());
    }

    #[test]
    fn test_avg_dist() {
        let wall = WallConfig {
            min_dist_mm: 60,
            max_dist_mm: 200,
            ..Default::default()
        };
        assert_eq!(wall.avg_dist_mm(), 130);
    }

    #[test]
    fn test_invalid_wall_range() {
        let mut config = RobotConfig::default();
        config.wall.min_dist_mm = config.wall.max_dist_mm;
        assert_eq!(config.validate(), Err(ConfigError::InvalidWallRange));
    }

    #[test]
    fn test_sensor_count_limits() {
        let mut config = RobotConfig::default();
        config.line.sensor_count = 0;
        assert_eq!(config.validate(), Err(ConfigError::NoLineSensors));
        config.line.sensor_count = MAX_LINE_SENSORS as u8 + 1;
        assert_eq!(config.validate(), Err(ConfigError::TooManyLineSensors));
    }

    #[test]
    fn test_link_limits() {
        let mut config = RobotConfig::default();
        config.link.address = 0x80;
        assert_eq!(config.validate(), Err(ConfigError::InvalidBusAddress));
        config.link.address = 0x08;
        config.link.timeout_us = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_postcard_blob() {
        let mut config = RobotConfig::default();
        config.line.gains = PidGains::from_scaled_100(150, 5, 20);
        let mut buf = [0u8; 128];
        let used = config.to_postcard(&mut buf).unwrap().len();
        assert_eq!(RobotConfig::from_postcard(&buf[..used]), Ok(config));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_postcard_rejects_invalid_blob() {
        let mut config = RobotConfig::default();
        config.wall.min_dist_mm = 500;
        let mut buf = [0u8; 128];
        let used = config.to_postcard(&mut buf).unwrap().len();
        assert_eq!(
            RobotConfig::from_postcard(&buf[..used]),
            Err(ConfigError::InvalidWallRange)
        );
    }
}
