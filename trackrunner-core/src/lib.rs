//! Board-agnostic navigation logic for the track robot
//!
//! This crate contains everything that decides what the robot does, written
//! against small hardware seams so it runs unchanged on the robot and in
//! host tests:
//!
//! - Hardware seam traits (line channel, ranger, wheel, encoder link, event sink)
//! - Correction (PID) controller in Q16.16 fixed point
//! - Line and wall classifiers
//! - Motion actuator
//! - Zone state machine sequencing maze solving, wall following and
//!   distance measuring
//! - Configuration type definitions
//!
//! ```text
//!  LineClassifier ─┐
//!                  ├─► zone step ─► MotionActuator ─► wheels
//!  WallClassifier ─┘        │              └────────► encoder link
//!                           └─► EventSink (telemetry)
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod log;

pub mod config;
pub mod control;
pub mod motion;
pub mod sense;
pub mod telemetry;
pub mod traits;
pub mod zone;

#[cfg(test)]
mod mock;

pub use trackrunner_protocol::{NavEvent, NodePolarity, TrackSide, ZoneId};
