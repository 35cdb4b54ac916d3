//! Sensor drivers

pub mod hcsr04;
pub mod ir_line;

pub use hcsr04::{Hcsr04, Hcsr04Config};
pub use ir_line::IrLineSensor;
