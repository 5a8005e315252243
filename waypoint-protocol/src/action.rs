//! General action message (packet type 1010).
//!
//! Used by the client and server as a question/answer exchange: the client
//! reports an action, the server answers with the same message, possibly with
//! fields rewritten from authoritative state (e.g. a corrected location).
//!
//! Layout (24 bytes, little-endian):
//!
//! ```text
//! +--------+------+-----------+--------------+---------+--------+--------+-----------+--------+
//! | length | type | timestamp | character_id | command | arg[0] | arg[1] | direction | action |
//! |   2    |  2   |     4     |      4       |    4    |   2    |   2    |     2     |   2    |
//! +--------+------+-----------+--------------+---------+--------+--------+-----------+--------+
//! ```

use crate::cursor::ByteCursor;
use crate::error::ProtocolError;
use crate::header::{PacketHeader, PacketType};
use crate::message::{CharacterView, DiagnosticSink, Message, Process, Reply, UnhandledAction};
use crate::writer::ByteWriter;
use bytes::Bytes;
use std::fmt;

/// Encoded size of an [`ActionMessage`], header included.
pub const ACTION_MESSAGE_SIZE: usize = 24;

/// Action sub-type carried by an [`ActionMessage`].
///
/// Tag values are fixed by the protocol. Tags without a named variant are kept
/// as [`ActionKind::Unknown`] so they can still be echoed and logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    SetLocation,
    SetInventory,
    SetAssociates,
    SetProficiencies,
    SetMagicSpells,
    SetDirection,
    SetAction,
    Unknown(u16),
}

impl ActionKind {
    /// All named kinds, in tag order.
    pub const NAMED: [ActionKind; 7] = [
        ActionKind::SetLocation,
        ActionKind::SetInventory,
        ActionKind::SetAssociates,
        ActionKind::SetProficiencies,
        ActionKind::SetMagicSpells,
        ActionKind::SetDirection,
        ActionKind::SetAction,
    ];

    pub fn tag(self) -> u16 {
        match self {
            ActionKind::SetLocation => 74,
            ActionKind::SetInventory => 75,
            ActionKind::SetAssociates => 76,
            ActionKind::SetProficiencies => 77,
            ActionKind::SetMagicSpells => 78,
            ActionKind::SetDirection => 79,
            ActionKind::SetAction => 80,
            ActionKind::Unknown(tag) => tag,
        }
    }

    pub fn is_unknown(self) -> bool {
        matches!(self, ActionKind::Unknown(_))
    }
}

impl From<u16> for ActionKind {
    fn from(tag: u16) -> Self {
        match tag {
            74 => ActionKind::SetLocation,
            75 => ActionKind::SetInventory,
            76 => ActionKind::SetAssociates,
            77 => ActionKind::SetProficiencies,
            78 => ActionKind::SetMagicSpells,
            79 => ActionKind::SetDirection,
            80 => ActionKind::SetAction,
            other => ActionKind::Unknown(other),
        }
    }
}

impl From<ActionKind> for u16 {
    fn from(kind: ActionKind) -> Self {
        kind.tag()
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Unknown(tag) => write!(f, "Unknown({})", tag),
            named => write!(f, "{:?}({})", named, named.tag()),
        }
    }
}

/// A general action request or response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionMessage {
    pub timestamp: u32,
    pub character_id: u32,
    /// Meaning depends on the action kind (a map id for `SetLocation`).
    pub command: u32,
    /// Meaning depends on the action kind (x/y for `SetLocation`).
    pub arguments: [u16; 2],
    pub direction: u16,
    pub action: ActionKind,
}

impl ActionMessage {
    pub fn new(action: ActionKind) -> Self {
        Self {
            timestamp: 0,
            character_id: 0,
            command: 0,
            arguments: [0; 2],
            direction: 0,
            action,
        }
    }

    /// Derives the server's answer to this request.
    ///
    /// `SetLocation` answers with the session's authoritative position; every
    /// other kind is answered with the request unchanged.
    pub fn respond<S>(&self, session: &S) -> Self
    where
        S: CharacterView + ?Sized,
    {
        match self.action {
            ActionKind::SetLocation => Self {
                character_id: session.character_id(),
                command: session.map_id(),
                arguments: [session.x(), session.y()],
                ..*self
            },
            _ => *self,
        }
    }
}

impl Message for ActionMessage {
    const PACKET_TYPE: PacketType = PacketType::Action;

    fn decode(bytes: &[u8]) -> Result<Self, ProtocolError> {
        let mut cursor = ByteCursor::new(bytes);
        PacketHeader::decode(&mut cursor)?;

        let timestamp = cursor.read_u32()?;
        let character_id = cursor.read_u32()?;
        let command = cursor.read_u32()?;
        let arguments = [cursor.read_u16()?, cursor.read_u16()?];
        let direction = cursor.read_u16()?;
        let action = ActionKind::from(cursor.read_u16()?);

        Ok(Self {
            timestamp,
            character_id,
            command,
            arguments,
            direction,
            action,
        })
    }

    fn encode(&self) -> Bytes {
        let mut writer = ByteWriter::packet_with_capacity(Self::PACKET_TYPE, ACTION_MESSAGE_SIZE);
        writer.write_u32(self.timestamp);
        writer.write_u32(self.character_id);
        writer.write_u32(self.command);
        for argument in self.arguments {
            writer.write_u16(argument);
        }
        writer.write_u16(self.direction);
        writer.write_u16(self.action.into());
        writer.finish()
    }
}

impl Process for ActionMessage {
    fn process<S>(self, session: &S, sink: &dyn DiagnosticSink) -> Reply<Self>
    where
        S: CharacterView + ?Sized,
    {
        let reply = self.respond(session);

        if reply.action != ActionKind::SetLocation {
            let bytes = reply.encode();
            sink.unhandled_action(&UnhandledAction {
                packet_type: Self::PACKET_TYPE,
                action: reply.action.tag(),
                length: bytes.len(),
                bytes,
            });
        }

        Reply::new(reply)
    }
}
