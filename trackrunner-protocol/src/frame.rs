//! Telemetry frame codec
//!
//! Frame format:
//! - SYNC (1 byte): 0x7E
//! - TYPE (1 byte): event type identifier
//! - LEN (1 byte): payload length (0-32)
//! - PAYLOAD (0-32 bytes)
//! - CRC (1 byte): CRC-8 (poly 0x07, init 0x00) over TYPE, LEN and PAYLOAD

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_SYNC: u8 = 0x7E;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 32;

/// Maximum encoded frame size (SYNC + TYPE + LEN + PAYLOAD + CRC)
pub const MAX_FRAME_SIZE: usize = 3 + MAX_PAYLOAD_SIZE + 1;

const CRC8_POLY: u8 = 0x07;

/// Errors that can occur during frame encoding or parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds [`MAX_PAYLOAD_SIZE`]
    PayloadTooLarge,
    /// CRC mismatch
    InvalidChecksum,
    /// Length byte out of range
    InvalidLength,
    /// Type or payload does not describe a known message
    InvalidFrame,
    /// Output buffer too small
    BufferTooSmall,
}

/// CRC-8 with polynomial 0x07
fn crc8(seed: u8, data: &[u8]) -> u8 {
    data.iter().fold(seed, |mut crc, &byte| {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ CRC8_POLY
            } else {
                crc << 1
            };
        }
        crc
    })
}

/// A telemetry frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type identifier
    pub msg_type: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Create a frame, copying the payload
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { msg_type, payload })
    }

    /// Create a frame with no payload
    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    fn checksum(&self) -> u8 {
        let header = [self.msg_type, self.payload.len() as u8];
        crc8(crc8(0, &header), &self.payload)
    }

    /// Number of bytes [`Frame::encode`] writes
    pub fn encoded_len(&self) -> usize {
        4 + self.payload.len()
    }

    /// Encode this frame into `buffer`, returning the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let len = self.encoded_len();
        let out = buffer.get_mut(..len).ok_or(FrameError::BufferTooSmall)?;

        let (head, rest) = out.split_at_mut(3);
        head.copy_from_slice(&[FRAME_SYNC, self.msg_type, self.payload.len() as u8]);
        let (body, crc) = rest.split_at_mut(self.payload.len());
        body.copy_from_slice(&self.payload);
        crc[0] = self.checksum();

        Ok(len)
    }

    /// Encode this frame into a heapless Vec
    pub fn to_bytes(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        Vec::from_slice(&buffer[..len]).map_err(|_| FrameError::BufferTooSmall)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Sync,
    Type,
    Length { msg_type: u8 },
    Payload { msg_type: u8, len: u8 },
    Checksum { msg_type: u8 },
}

/// Byte-at-a-time frame parser
///
/// Bytes before a SYNC byte are discarded. A frame header cut short by
/// noise is only detected once its length or checksum fails, so the frame
/// that overlaps it is lost; parsing resumes at the next SYNC byte.
#[derive(Debug, Clone)]
pub struct FrameParser {
    stage: Stage,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a parser waiting for SYNC
    pub fn new() -> Self {
        Self {
            stage: Stage::Sync,
            payload: Vec::new(),
        }
    }

    /// Drop any partial frame and wait for SYNC
    pub fn reset(&mut self) {
        self.stage = Stage::Sync;
        self.payload.clear();
    }

    /// Feed one byte
    ///
    /// Returns `Ok(Some(frame))` when a frame completes, `Ok(None)` while
    /// more bytes are needed. On error the parser resets itself.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        self.stage = match self.stage {
            Stage::Sync if byte == FRAME_SYNC => Stage::Type,
            Stage::Sync => Stage::Sync,
            Stage::Type => Stage::Length { msg_type: byte },
            Stage::Length { msg_type } => {
                if byte as usize > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::InvalidLength);
                }
                self.payload.clear();
                if byte == 0 {
                    Stage::Checksum { msg_type }
                } else {
                    Stage::Payload { msg_type, len: byte }
                }
            }
            Stage::Payload { msg_type, len } => {
                // Capacity is guaranteed by the length check above
                let _ = self.payload.push(byte);
                if self.payload.len() == len as usize {
                    Stage::Checksum { msg_type }
                } else {
                    Stage::Payload { msg_type, len }
                }
            }
            Stage::Checksum { msg_type } => {
                let frame = Frame {
                    msg_type,
                    payload: self.payload.clone(),
                };
                self.reset();
                if frame.checksum() != byte {
                    return Err(FrameError::InvalidChecksum);
                }
                return Ok(Some(frame));
            }
        };
        Ok(None)
    }

    /// Feed bytes until the first complete frame
    ///
    /// Bytes after the completed frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}
