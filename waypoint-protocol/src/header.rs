//! Packet header and message-kind tags.
//!
//! Every packet starts with a four byte header:
//!
//! ```text
//! +----------+----------+----------------------+
//! | length   | type     | body                 |
//! | 2 bytes  | 2 bytes  | length - 4 bytes     |
//! +----------+----------+----------------------+
//! ```
//!
//! `length` counts the whole packet, header included.

use crate::cursor::ByteCursor;
use crate::error::ProtocolError;
use std::fmt;

/// Message-kind tag carried in the packet header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketType {
    /// General action request/response.
    Action,
    /// A tag this implementation has no message kind for.
    Unknown(u16),
}

impl PacketType {
    pub const ACTION: u16 = 1010;
}

impl From<u16> for PacketType {
    fn from(tag: u16) -> Self {
        match tag {
            Self::ACTION => PacketType::Action,
            other => PacketType::Unknown(other),
        }
    }
}

impl From<PacketType> for u16 {
    fn from(packet_type: PacketType) -> Self {
        match packet_type {
            PacketType::Action => PacketType::ACTION,
            PacketType::Unknown(tag) => tag,
        }
    }
}

impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PacketType::Action => write!(f, "MsgAction({})", PacketType::ACTION),
            PacketType::Unknown(tag) => write!(f, "Unknown({})", tag),
        }
    }
}

/// Decoded packet header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    pub length: u16,
    pub packet_type: PacketType,
}

impl PacketHeader {
    /// Reads the header from the front of a cursor.
    pub fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, ProtocolError> {
        let length = cursor.read_u16()?;
        let packet_type = PacketType::from(cursor.read_u16()?);
        Ok(Self {
            length,
            packet_type,
        })
    }

    /// Reads the header of a packet without consuming it.
    pub fn peek(bytes: &[u8]) -> Result<Self, ProtocolError> {
        Self::decode(&mut ByteCursor::new(bytes))
    }
}
