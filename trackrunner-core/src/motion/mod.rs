//! Motion
//!
//! Two-wheel differential drive plus the request/response relationship to
//! the remote tick counter.

pub mod actuator;

pub use actuator::{MotionActuator, MotionCommand};
