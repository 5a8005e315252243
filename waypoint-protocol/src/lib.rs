//! # waypoint-protocol
//!
//! Binary wire protocol for the waypoint game server.
//!
//! This crate provides:
//! - Little-endian packet reading ([`ByteCursor`]) and writing ([`ByteWriter`])
//! - Packet header and message-kind tags
//! - The [`Message`] and [`Process`] capabilities implemented per message kind
//! - The general action message and its dispatch rules
//! - Stream framing and hex dumps for diagnostics

pub mod action;
pub mod codec;
pub mod cursor;
pub mod dump;
pub mod error;
pub mod header;
pub mod message;
pub mod writer;

pub use action::{ActionKind, ActionMessage, ACTION_MESSAGE_SIZE};
pub use codec::PacketDecoder;
pub use cursor::ByteCursor;
pub use dump::hex_dump;
pub use error::ProtocolError;
pub use header::{PacketHeader, PacketType};
pub use message::{
    CharacterView, DiagnosticSink, MemorySink, Message, NullSink, Process, Reply, UnhandledAction,
};
pub use writer::ByteWriter;

/// Size of the packet header (length + type).
pub const HEADER_SIZE: usize = 4;

/// Default maximum packet size accepted from a peer.
pub const MAX_PACKET_SIZE: usize = 1024;
