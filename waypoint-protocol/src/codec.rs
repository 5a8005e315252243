//! Stream framing for packets.
//!
//! The transport delivers arbitrary chunks of a byte stream; [`PacketDecoder`]
//! buffers them and splits off whole packets using the header length.

use crate::error::ProtocolError;
use crate::{HEADER_SIZE, MAX_PACKET_SIZE};
use bytes::{Bytes, BytesMut};

/// Splits a byte stream into complete packets.
#[derive(Debug)]
pub struct PacketDecoder {
    buffer: BytesMut,
    max_packet_size: usize,
}

impl PacketDecoder {
    pub fn new() -> Self {
        Self::with_max_packet_size(MAX_PACKET_SIZE)
    }

    pub fn with_max_packet_size(max_packet_size: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(8192),
            max_packet_size,
        }
    }

    /// Appends data to the internal buffer.
    pub fn extend(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Attempts to split the next complete packet from the buffer.
    ///
    /// Returns `Ok(None)` if more data is needed. A header length smaller than
    /// the header itself or above the packet limit is an error; the stream
    /// cannot be resynchronized after it.
    pub fn decode_packet(&mut self) -> Result<Option<Bytes>, ProtocolError> {
        if self.buffer.len() < 2 {
            return Ok(None);
        }

        let length = u16::from_le_bytes([self.buffer[0], self.buffer[1]]);
        let size = length as usize;
        if size < HEADER_SIZE {
            return Err(ProtocolError::InvalidLength(length));
        }
        if size > self.max_packet_size {
            return Err(ProtocolError::PacketTooLarge {
                size,
                max: self.max_packet_size,
            });
        }

        if self.buffer.len() < size {
            return Ok(None);
        }

        Ok(Some(self.buffer.split_to(size).freeze()))
    }

    /// Returns the number of bytes currently buffered.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Clears the internal buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for PacketDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionKind, ActionMessage};
    use crate::message::Message;

    #[test]
    fn test_decode_single_packet() {
        let message = ActionMessage::new(ActionKind::SetDirection);
        let mut decoder = PacketDecoder::new();
        decoder.extend(&message.encode());

        let packet = decoder.decode_packet().unwrap().unwrap();
        assert_eq!(ActionMessage::decode(&packet).unwrap(), message);
        assert_eq!(decoder.buffered(), 0);
        assert!(decoder.decode_packet().unwrap().is_none());
    }

    #[test]
    fn test_partial_packet_decoding() {
        let encoded = ActionMessage::new(ActionKind::SetLocation).encode();
        let mut decoder = PacketDecoder::new();

        decoder.extend(&encoded[..1]);
        assert!(decoder.decode_packet().unwrap().is_none());

        decoder.extend(&encoded[1..10]);
        assert!(decoder.decode_packet().unwrap().is_none());

        decoder.extend(&encoded[10..]);
        let packet = decoder.decode_packet().unwrap().unwrap();
        assert_eq!(packet, encoded);
    }

    #[test]
    fn test_multiple_packets_in_buffer() {
        let first = ActionMessage::new(ActionKind::SetInventory);
        let mut second = ActionMessage::new(ActionKind::SetAssociates);
        second.timestamp = 42;

        let mut decoder = PacketDecoder::new();
        decoder.extend(&first.encode());
        decoder.extend(&second.encode());

        let packet = decoder.decode_packet().unwrap().unwrap();
        assert_eq!(ActionMessage::decode(&packet).unwrap(), first);
        let packet = decoder.decode_packet().unwrap().unwrap();
        assert_eq!(ActionMessage::decode(&packet).unwrap(), second);
        assert!(decoder.decode_packet().unwrap().is_none());
    }

    #[test]
    fn test_length_shorter_than_header() {
        let mut decoder = PacketDecoder::new();
        decoder.extend(&[3, 0, 0xF2, 0x03]);
        assert_eq!(
            decoder.decode_packet().unwrap_err(),
            ProtocolError::InvalidLength(3)
        );
    }

    #[test]
    fn test_packet_too_large() {
        let mut decoder = PacketDecoder::with_max_packet_size(16);
        decoder.extend(&[24, 0, 0xF2, 0x03]);
        assert_eq!(
            decoder.decode_packet().unwrap_err(),
            ProtocolError::PacketTooLarge { size: 24, max: 16 }
        );
    }

    #[test]
    fn test_header_only_packet() {
        let mut decoder = PacketDecoder::new();
        decoder.extend(&[4, 0, 9, 0]);
        let packet = decoder.decode_packet().unwrap().unwrap();
        assert_eq!(packet.as_ref(), &[4, 0, 9, 0]);
    }

    #[test]
    fn test_decoder_buffered() {
        let mut decoder = PacketDecoder::default();
        assert_eq!(decoder.buffered(), 0);

        decoder.extend(b"some data");
        assert_eq!(decoder.buffered(), 9);

        decoder.clear();
        assert_eq!(decoder.buffered(), 0);
    }
}
