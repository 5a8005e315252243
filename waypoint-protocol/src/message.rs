//! Message capabilities shared by every message kind.

use crate::error::ProtocolError;
use crate::header::PacketType;
use bytes::Bytes;
use std::sync::Mutex;

/// Binary codec for one message kind.
pub trait Message: Sized {
    /// Header tag the dispatcher routes on.
    const PACKET_TYPE: PacketType;

    /// Decodes a complete packet, header first.
    ///
    /// The header type is not checked; routing is the caller's job.
    fn decode(bytes: &[u8]) -> Result<Self, ProtocolError>;

    /// Encodes a complete packet whose header length matches its size.
    fn encode(&self) -> Bytes;
}

/// Character state a message may read while processing.
pub trait CharacterView {
    fn character_id(&self) -> u32;
    fn map_id(&self) -> u32;
    fn x(&self) -> u16;
    fn y(&self) -> u16;
}

/// Request processing for a message kind.
///
/// Processing consumes the request and always yields exactly one reply of the
/// same kind, to be sent back to the peer the request came from.
pub trait Process: Message {
    fn process<S>(self, session: &S, sink: &dyn DiagnosticSink) -> Reply<Self>
    where
        S: CharacterView + ?Sized;
}

/// The single outbound message produced by [`Process::process`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a reply must be sent back to the peer"]
pub struct Reply<M> {
    message: M,
}

impl<M: Message> Reply<M> {
    pub fn new(message: M) -> Self {
        Self { message }
    }

    pub fn message(&self) -> &M {
        &self.message
    }

    pub fn into_message(self) -> M {
        self.message
    }

    pub fn encode(&self) -> Bytes {
        self.message.encode()
    }
}

/// Diagnostic event for an action kind with no dedicated handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnhandledAction {
    pub packet_type: PacketType,
    /// Raw action tag.
    pub action: u16,
    /// Length of the re-encoded packet.
    pub length: usize,
    /// The re-encoded packet.
    pub bytes: Bytes,
}

/// Receiver for diagnostic events raised during processing.
pub trait DiagnosticSink: Send + Sync {
    fn unhandled_action(&self, event: &UnhandledAction);
}

/// Sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn unhandled_action(&self, _event: &UnhandledAction) {}
}

/// Sink that keeps events in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<UnhandledAction>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events.
    pub fn events(&self) -> Vec<UnhandledAction> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for MemorySink {
    fn unhandled_action(&self, event: &UnhandledAction) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
