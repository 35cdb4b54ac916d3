//! Remote encoder link seam
//!
//! The tick counter lives on a secondary controller. The navigation core
//! only ever starts it, stops it and asks it how far the robot went.

/// Communication failure with the encoder controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// No answer before the deadline
    Timeout,
    /// Bus transaction failed after all retries
    Bus,
    /// Answer did not decode to a distance
    Payload,
}

/// Request/response channel to the encoder controller
pub trait EncoderLink {
    /// Reset the remote tick count and start counting
    fn start(&mut self) -> Result<(), LinkError>;

    /// Stop counting; the remote keeps its count
    fn stop(&mut self) -> Result<(), LinkError>;

    /// Distance travelled since the last start, in centimetres
    fn distance_cm(&mut self) -> Result<f32, LinkError>;
}
