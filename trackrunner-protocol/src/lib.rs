//! Trackrunner wire formats
//!
//! Two links leave the navigation controller:
//!
//! 1. The **encoder bus** (I2C) to the secondary controller that counts wheel
//!    ticks. The master writes a single command byte and later reads a fixed
//!    4-byte payload carrying the travelled distance:
//!
//! ```text
//! master → encoder   ┌─────────┐
//!                    │ CMD  1B │   0 = stop, 1 = start (reset + count)
//!                    └─────────┘
//! encoder → master   ┌───────────────────────────────┐
//!                    │ DISTANCE 4B (f32, little end.) │
//!                    └───────────────────────────────┘
//! ```
//!
//! 2. The **telemetry link** (UART) to whatever renders progress. Navigation
//!    events are wrapped in checksummed frames:
//!
//! ```text
//! ┌──────┬──────┬─────┬─────────────┬───────┐
//! │ SYNC │ TYPE │ LEN │ PAYLOAD     │ CRC-8 │
//! │ 1B   │ 1B   │ 1B  │ 0–32B       │ 1B    │
//! └──────┴──────┴─────┴─────────────┴───────┘
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod distance;
pub mod frame;
pub mod telemetry;

pub use command::{CommandError, EncoderCommand, ENCODER_ADDRESS};
pub use distance::{decode_distance, encode_distance, PayloadError, DISTANCE_PAYLOAD_LEN};
pub use frame::{Frame, FrameError, FrameParser, FRAME_SYNC, MAX_PAYLOAD_SIZE};
pub use telemetry::{NavEvent, NodePolarity, TrackSide, ZoneId};
