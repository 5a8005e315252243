//! Server error types.

use thiserror::Error;

/// Server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] waypoint_protocol::ProtocolError),

    #[error("server shutting down")]
    ShuttingDown,
}

impl ServerError {
    /// Returns whether the error means the peer sent a malformed packet.
    pub fn is_malformed_packet(&self) -> bool {
        matches!(self, ServerError::Protocol(_))
    }
}
