//! High-level client API.

use crate::connection::{Connection, ConnectionConfig};
use crate::error::ClientError;
use std::time::{SystemTime, UNIX_EPOCH};
use waypoint_protocol::{ActionKind, ActionMessage, Message};

/// Location reported back by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub character_id: u32,
    pub map_id: u32,
    pub x: u16,
    pub y: u16,
}

/// Client for a waypoint server.
pub struct Client {
    conn: Connection,
}

impl Client {
    /// Connects to the server.
    pub async fn connect(config: ConnectionConfig) -> Result<Self, ClientError> {
        let conn = Connection::connect(config).await?;
        Ok(Self { conn })
    }

    /// Sends a message and waits for the server's answer.
    pub async fn request<M: Message>(&mut self, message: &M) -> Result<M, ClientError> {
        self.conn.request(message).await
    }

    /// Sends an action and returns the server's answer.
    pub async fn action(
        &mut self,
        action: ActionKind,
        command: u32,
        arguments: [u16; 2],
    ) -> Result<ActionMessage, ClientError> {
        let message = ActionMessage {
            timestamp: timestamp(),
            command,
            arguments,
            ..ActionMessage::new(action)
        };
        self.request(&message).await
    }

    /// Asks the server for the authoritative character location.
    pub async fn location(&mut self) -> Result<Location, ClientError> {
        let reply = self.action(ActionKind::SetLocation, 0, [0, 0]).await?;
        Ok(Location {
            character_id: reply.character_id,
            map_id: reply.command,
            x: reply.arguments[0],
            y: reply.arguments[1],
        })
    }

    /// Closes the client.
    pub async fn close(self) -> Result<(), ClientError> {
        self.conn.close().await
    }
}

/// Milliseconds since the epoch, truncated to the 32-bit wire field.
fn timestamp() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(0)
}
