//! Hardware driver implementations
//!
//! Concrete implementations of the `trackrunner-core` seam traits over the
//! `trackrunner-hal` traits:
//!
//! - Line channel (IR reflectance comparator)
//! - Ultrasonic ranger (HC-SR04 style trigger/echo)
//! - Wheel (H-bridge on two PWM channels)
//! - Encoder link (I2C with deadline and retries)
//! - Telemetry sink (framed events over UART)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod link;
pub mod motor;
pub mod sensor;
pub mod telemetry;

pub use link::I2cEncoderLink;
pub use motor::HBridgeWheel;
pub use sensor::{Hcsr04, Hcsr04Config, IrLineSensor};
pub use telemetry::FramedEventSink;
