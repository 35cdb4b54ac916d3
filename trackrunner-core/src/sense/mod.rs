//! Sensor interpretation
//!
//! Classifiers own their sensor arrays and correction history; zones only
//! ever see errors, magnitudes and classification results.

pub mod line;
pub mod wall;

pub use line::{weight_for, LineClassifier, LineSensor, NodePattern};
pub use wall::{
    echo_to_mm, Correction, RangeSensor, Wall, WallClassifier, WallDeviation, NO_WALL_MM,
};
