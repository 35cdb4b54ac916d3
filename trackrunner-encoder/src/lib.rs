//! Secondary controller: wheel tick counting
//!
//! This crate runs on the small controller that sits on the I2C bus at
//! [`trackrunner_protocol::ENCODER_ADDRESS`]. An edge interrupt from the
//! photo-interrupter bumps a tick counter; the navigation controller starts,
//! stops and reads it.
//!
//! ```text
//!  edge IRQ ──► TickCounter::on_edge
//!                     ▲
//!  I2C write ──► EncoderResponder::on_receive  (start / stop)
//!  I2C read  ◄── EncoderResponder::on_request  (4-byte distance)
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod counter;
pub mod geometry;
pub mod responder;

pub use counter::TickCounter;
pub use geometry::{EncoderGeometry, GeometryError};
pub use responder::{EdgeInterrupt, EncoderResponder};
