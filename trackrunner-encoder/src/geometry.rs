//! Ticks to distance

use core::f32::consts::PI;

/// Geometry that cannot produce a distance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GeometryError {
    /// Encoder disc with no slots
    ZeroTicksPerRotation,
    /// Wheel diameter zero, negative or not finite
    InvalidDiameter,
}

/// Wheel and encoder disc dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderGeometry {
    pub wheel_diameter_cm: f32,
    /// Slots on the encoder disc
    pub ticks_per_rotation: u32,
}

impl Default for EncoderGeometry {
    fn default() -> Self {
        Self {
            wheel_diameter_cm: 7.0,
            ticks_per_rotation: 20,
        }
    }
}

impl EncoderGeometry {
    /// Build and validate a geometry
    pub fn new(wheel_diameter_cm: f32, ticks_per_rotation: u32) -> Result<Self, GeometryError> {
        let geometry = Self {
            wheel_diameter_cm,
            ticks_per_rotation,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.ticks_per_rotation == 0 {
            return Err(GeometryError::ZeroTicksPerRotation);
        }
        if !self.wheel_diameter_cm.is_finite() || self.wheel_diameter_cm <= 0.0 {
            return Err(GeometryError::InvalidDiameter);
        }
        Ok(())
    }

    /// Wheel circumference in centimetres
    pub fn circumference_cm(&self) -> f32 {
        PI * self.wheel_diameter_cm
    }

    /// Distance covered after `ticks` edges
    ///
    /// An unvalidated zero-slot disc yields 0.0.
    pub fn distance_cm(&self, ticks: u32) -> f32 {
        if self.ticks_per_rotation == 0 {
            return 0.0;
        }
        let rotations = ticks as f32 / self.ticks_per_rotation as f32;
        self.circumference_cm() * rotations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_one_rotation_is_circumference() {
        let geometry = EncoderGeometry::default();
        let distance = geometry.distance_cm(20);
        assert!((distance - 21.991_15).abs() < 1e-3);
    }

    #[test]
    fn test_two_rotations() {
        let geometry = EncoderGeometry::default();
        assert!((geometry.distance_cm(40) - 43.982_3).abs() < 1e-3);
    }

    #[test]
    fn test_zero_ticks_per_rotation() {
        let geometry = EncoderGeometry {
            ticks_per_rotation: 0,
            ..Default::default()
        };
        assert_eq!(geometry.validate(), Err(GeometryError::ZeroTicksPerRotation));
        assert_eq!(geometry.distance_cm(100), 0.0);
        assert_eq!(
            EncoderGeometry::new(7.0, 0),
            Err(GeometryError::ZeroTicksPerRotation)
        );
    }

    #[test]
    fn test_bad_diameter_rejected() {
        assert_eq!(EncoderGeometry::new(0.0, 20), Err(GeometryError::InvalidDiameter));
        assert_eq!(
            EncoderGeometry::new(f32::NAN, 20),
            Err(GeometryError::InvalidDiameter)
        );
        assert_eq!(EncoderGeometry::new(7.0, 20), Ok(EncoderGeometry::default()));
        assert_eq!(EncoderGeometry::default().validate(), Ok(()));
    }

    proptest! {
        #[test]
        fn prop_distance_grows_with_ticks(a in 0u32..100_000, b in 0u32..100_000) {
            let geometry = EncoderGeometry::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(geometry.distance_cm(lo) <= geometry.distance_cm(hi));
        }
    }
}
