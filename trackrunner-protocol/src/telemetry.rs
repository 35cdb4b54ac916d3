//! Navigation telemetry events
//!
//! The navigation core never draws anything itself. It emits these events
//! and a presentation layer renders them.

use crate::distance::{decode_distance, encode_distance};
use crate::frame::{Frame, FrameError};

/// Message type identifiers
pub mod msg_type {
    pub const ZONE_ENTERED: u8 = 0x01;
    pub const NODE_DETECTED: u8 = 0x02;
    pub const DISTANCE_MEASURED: u8 = 0x03;
    pub const SECTION_FINISHED: u8 = 0x04;
    pub const WALL_SWITCHED: u8 = 0x05;
    pub const LINK_FAULT: u8 = 0x06;
}

/// Track segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ZoneId {
    MazeSolving = 0,
    WallFollowing = 1,
    DistanceMeasuring = 2,
}

impl ZoneId {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ZoneId::MazeSolving),
            1 => Some(ZoneId::WallFollowing),
            2 => Some(ZoneId::DistanceMeasuring),
            _ => None,
        }
    }
}

/// Node marker polarity
///
/// A TRUE node leaves at least one centre sensor over the light background;
/// a FALSE node covers both centre sensors with the dark marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum NodePolarity {
    False = 0,
    True = 1,
}

impl NodePolarity {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(NodePolarity::False),
            1 => Some(NodePolarity::True),
            _ => None,
        }
    }
}

/// Side of the robot a wall or turn refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TrackSide {
    Left = 0,
    Right = 1,
}

impl TrackSide {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(TrackSide::Left),
            1 => Some(TrackSide::Right),
            _ => None,
        }
    }

    /// The other side
    pub fn opposite(self) -> Self {
        match self {
            TrackSide::Left => TrackSide::Right,
            TrackSide::Right => TrackSide::Left,
        }
    }
}

/// Event emitted by the navigation core
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavEvent {
    /// A zone started running
    ZoneEntered(ZoneId),
    /// A maze node was crossed; `index` counts from 1
    NodeDetected { index: u8, polarity: NodePolarity },
    /// Inter-node distance read from the encoder controller
    DistanceMeasured { cm: f32 },
    /// The distance segment's finish line was reached
    SectionFinished,
    /// Wall following switched to the given side
    WallSwitched(TrackSide),
    /// The encoder controller did not answer
    LinkFault,
}

impl NavEvent {
    /// Wrap this event in a telemetry frame
    pub fn to_frame(&self) -> Frame {
        match *self {
            NavEvent::ZoneEntered(zone) => frame_with(msg_type::ZONE_ENTERED, &[zone as u8]),
            NavEvent::NodeDetected { index, polarity } => {
                frame_with(msg_type::NODE_DETECTED, &[index, polarity as u8])
            }
            NavEvent::DistanceMeasured { cm } => {
                frame_with(msg_type::DISTANCE_MEASURED, &encode_distance(cm))
            }
            NavEvent::SectionFinished => Frame::empty(msg_type::SECTION_FINISHED),
            NavEvent::WallSwitched(side) => frame_with(msg_type::WALL_SWITCHED, &[side as u8]),
            NavEvent::LinkFault => Frame::empty(msg_type::LINK_FAULT),
        }
    }

    /// Decode an event from a received frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        let payload = frame.payload.as_slice();
        match (frame.msg_type, payload) {
            (msg_type::ZONE_ENTERED, &[zone]) => ZoneId::from_u8(zone)
                .map(NavEvent::ZoneEntered)
                .ok_or(FrameError::InvalidFrame),
            (msg_type::NODE_DETECTED, &[index, polarity]) => NodePolarity::from_u8(polarity)
                .map(|polarity| NavEvent::NodeDetected { index, polarity })
                .ok_or(FrameError::InvalidFrame),
            (msg_type::DISTANCE_MEASURED, bytes) => decode_distance(bytes)
                .map(|cm| NavEvent::DistanceMeasured { cm })
                .map_err(|_| FrameError::InvalidFrame),
            (msg_type::SECTION_FINISHED, &[]) => Ok(NavEvent::SectionFinished),
            (msg_type::WALL_SWITCHED, &[side]) => TrackSide::from_u8(side)
                .map(NavEvent::WallSwitched)
                .ok_or(FrameError::InvalidFrame),
            (msg_type::LINK_FAULT, &[]) => Ok(NavEvent::LinkFault),
            _ => Err(FrameError::InvalidFrame),
        }
    }
}

// Every event payload is at most 4 bytes, well under MAX_PAYLOAD_SIZE
fn frame_with(msg_type: u8, payload: &[u8]) -> Frame {
    Frame::new(msg_type, payload).unwrap_or_else(|_| Frame::empty(msg_type))
}
