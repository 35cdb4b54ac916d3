//! Distance payload
//!
//! The encoder controller answers a read with one IEEE-754 binary32 value,
//! the distance travelled in centimetres since the last start command.
//! Both ends use little-endian byte order; the requester must decode with
//! exactly this layout or the reconstructed distance is garbage.

/// Size of the distance response in bytes
pub const DISTANCE_PAYLOAD_LEN: usize = 4;

/// Errors decoding a distance payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PayloadError {
    /// Payload is not exactly [`DISTANCE_PAYLOAD_LEN`] bytes
    WrongLength,
    /// Bytes decode to NaN or infinity
    NotFinite,
}

/// Encode a distance for transmission
pub fn encode_distance(distance_cm: f32) -> [u8; DISTANCE_PAYLOAD_LEN] {
    distance_cm.to_le_bytes()
}

/// Decode a received distance payload
pub fn decode_distance(bytes: &[u8]) -> Result<f32, PayloadError> {
    let raw: [u8; DISTANCE_PAYLOAD_LEN] = bytes
        .try_into()
        .map_err(|_| PayloadError::WrongLength)?;
    let value = f32::from_le_bytes(raw);
    if !value.is_finite() {
        return Err(PayloadError::NotFinite);
    }
    Ok(value)
}
