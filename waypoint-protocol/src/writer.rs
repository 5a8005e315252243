//! Append-only packet writer.

use crate::header::PacketType;
use crate::HEADER_SIZE;
use bytes::{BufMut, Bytes, BytesMut};

/// Sequential little-endian writer.
///
/// In packet mode ([`ByteWriter::packet`]) the first two bytes are reserved for
/// the header length and patched by [`ByteWriter::finish`] with the final size,
/// so the length on the wire always matches the encoded byte count.
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: BytesMut,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Starts a packet of the given type with a placeholder length.
    pub fn packet(packet_type: PacketType) -> Self {
        Self::packet_with_capacity(packet_type, HEADER_SIZE)
    }

    /// Starts a packet with room for `capacity` bytes, header included.
    pub fn packet_with_capacity(packet_type: PacketType, capacity: usize) -> Self {
        let mut writer = Self::with_capacity(capacity.max(HEADER_SIZE));
        writer.write_u16(0);
        writer.write_u16(packet_type.into());
        writer
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.put_u16_le(value);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.put_u32_le(value);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    /// Writes a one-byte length followed by the string bytes.
    ///
    /// Characters outside the single-byte range are written as `?`, and text
    /// longer than 255 bytes is truncated.
    pub fn write_prefixed_string(&mut self, value: &str) {
        let bytes = encode_text(value);
        let len = bytes.len().min(u8::MAX as usize);
        self.write_u8(len as u8);
        self.write_bytes(&bytes[..len]);
    }

    /// Writes exactly `len` bytes, truncating or NUL-padding the string.
    pub fn write_fixed_string(&mut self, value: &str, len: usize) {
        let bytes = encode_text(value);
        let take = bytes.len().min(len);
        self.write_bytes(&bytes[..take]);
        self.buf.put_bytes(0, len - take);
    }

    /// Returns the accumulated bytes as-is.
    pub fn to_bytes(self) -> Bytes {
        self.buf.freeze()
    }

    /// Patches the header length and returns the packet.
    ///
    /// # Panics
    ///
    /// Panics if the writer holds less than a header or more bytes than the
    /// 16-bit length field can describe.
    pub fn finish(mut self) -> Bytes {
        assert!(self.buf.len() >= HEADER_SIZE, "finish() on a non-packet writer");
        let len = match u16::try_from(self.buf.len()) {
            Ok(len) => len,
            Err(_) => panic!(
                "packet of {} bytes exceeds the 16-bit length field",
                self.buf.len()
            ),
        };
        self.buf[..2].copy_from_slice(&len.to_le_bytes());
        self.buf.freeze()
    }
}

fn encode_text(value: &str) -> Vec<u8> {
    value
        .chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}
