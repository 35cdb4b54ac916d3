//! Hardware seam traits
//!
//! These traits define the interface between the navigation logic and
//! board-specific drivers.

pub mod drive;
pub mod line;
pub mod link;
pub mod range;
pub mod telemetry;

pub use drive::{Direction, WheelDrive};
pub use line::LineInput;
pub use link::{EncoderLink, LinkError};
pub use range::{RangeError, RangeFinder};
pub use telemetry::EventSink;
