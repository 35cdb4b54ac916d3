//! Motor drivers

pub mod hbridge;

pub use hbridge::HBridgeWheel;
