//! Protocol error types.

use thiserror::Error;

/// Errors raised while reading or framing packets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("buffer underflow: need {needed} bytes, {remaining} remaining")]
    Underflow { needed: usize, remaining: usize },

    #[error("invalid packet length: {0} (header is {} bytes)", crate::HEADER_SIZE)]
    InvalidLength(u16),

    #[error("packet too large: {size} bytes (max {max})")]
    PacketTooLarge { size: usize, max: usize },
}

impl ProtocolError {
    /// Returns whether the error indicates a truncated buffer.
    pub fn is_underflow(&self) -> bool {
        matches!(self, ProtocolError::Underflow { .. })
    }
}
