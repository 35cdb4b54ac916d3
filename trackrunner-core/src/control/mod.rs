//! Correction control
//!
//! One PID form shared by the line and wall classifiers.

pub mod fixed;
pub mod pid;

pub use fixed::Fixed32;
pub use pid::{Pid, PidGains};
