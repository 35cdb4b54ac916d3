//! Encoder bus commands
//!
//! The master sends exactly one byte per command write.

/// 7-bit I2C address the encoder controller answers on
pub const ENCODER_ADDRESS: u8 = 0x08;

// Wire format values
const CMD_STOP: u8 = 0;
const CMD_START: u8 = 1;

/// Command byte was not a known command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// No byte was received
    Empty,
    /// Byte value is not a command
    Unknown(u8),
}

/// Commands understood by the encoder controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderCommand {
    /// Stop counting; the tick count is retained
    Stop,
    /// Reset the tick count to zero and start counting
    Start,
}

impl EncoderCommand {
    /// Parse a command from its wire byte
    pub fn from_byte(byte: u8) -> Result<Self, CommandError> {
        match byte {
            CMD_STOP => Ok(EncoderCommand::Stop),
            CMD_START => Ok(EncoderCommand::Start),
            other => Err(CommandError::Unknown(other)),
        }
    }

    /// Parse the first byte of a received write
    ///
    /// Trailing bytes are ignored, the same way a single `read()` on the
    /// receiving side only consumes the first byte.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CommandError> {
        match bytes.first() {
            Some(&byte) => Self::from_byte(byte),
            None => Err(CommandError::Empty),
        }
    }

    /// Convert to wire byte
    pub fn to_byte(self) -> u8 {
        match self {
            EncoderCommand::Stop => CMD_STOP,
            EncoderCommand::Start => CMD_START,
        }
    }
}
