//! Trackrunner Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the navigation drivers are written
//! against. A board support package implements them once for its chip; the
//! drivers and the core logic never touch registers directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  trackrunner-core (zones, classifiers)  │
//! └─────────────────────────────────────────┘
//!                     │ seam traits
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  trackrunner-drivers                    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  trackrunner-hal (this crate - traits)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            board support package
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O (line sensors, ranger trigger/echo)
//! - [`pwm::PwmChannel`] - Motor terminal duty cycle
//! - [`i2c::I2cBus`] - Request/response bus to the encoder controller
//! - [`uart::UartTx`] - Telemetry link to the display controller
//! - [`timer::Clock`] - Monotonic microsecond time base for timeouts

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod pwm;
pub mod timer;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin};
pub use i2c::I2cBus;
pub use pwm::PwmChannel;
pub use timer::Clock;
pub use uart::UartTx;
