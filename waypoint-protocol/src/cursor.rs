//! Forward-only reader over a packet buffer.
//!
//! All integers are little-endian. Strings are single-byte text (each byte maps
//! to the Unicode code point of the same value) with trailing NUL padding
//! removed.

use crate::error::ProtocolError;
use bytes::Buf;

/// Sequential reader over an immutable byte slice.
///
/// Every read either consumes exactly the bytes it needs or fails with
/// [`ProtocolError::Underflow`] and leaves the cursor where it was.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, position: 0 }
    }

    /// Returns the number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    /// Returns the number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_empty(&self) -> bool {
        !self.buf.has_remaining()
    }

    fn ensure(&self, needed: usize) -> Result<(), ProtocolError> {
        if self.buf.remaining() < needed {
            return Err(ProtocolError::Underflow {
                needed,
                remaining: self.buf.remaining(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8, ProtocolError> {
        self.ensure(1)?;
        self.position += 1;
        Ok(self.buf.get_u8())
    }

    pub fn read_u16(&mut self) -> Result<u16, ProtocolError> {
        self.ensure(2)?;
        self.position += 2;
        Ok(self.buf.get_u16_le())
    }

    pub fn read_u32(&mut self) -> Result<u32, ProtocolError> {
        self.ensure(4)?;
        self.position += 4;
        Ok(self.buf.get_u32_le())
    }

    /// Reads exactly `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], ProtocolError> {
        self.ensure(len)?;
        let (head, tail) = self.buf.split_at(len);
        self.buf = tail;
        self.position += len;
        Ok(head)
    }

    /// Reads a string prefixed with a one-byte length.
    ///
    /// A failed read leaves the length byte unconsumed.
    pub fn read_prefixed_string(&mut self) -> Result<String, ProtocolError> {
        let len = *self.buf.first().ok_or(ProtocolError::Underflow {
            needed: 1,
            remaining: 0,
        })? as usize;
        if self.buf.remaining() - 1 < len {
            return Err(ProtocolError::Underflow {
                needed: len,
                remaining: self.buf.remaining() - 1,
            });
        }
        self.read_u8()?;
        let bytes = self.read_bytes(len)?;
        Ok(decode_text(bytes))
    }

    /// Reads a string whose length is known out of band.
    pub fn read_fixed_string(&mut self, len: usize) -> Result<String, ProtocolError> {
        let bytes = self.read_bytes(len)?;
        Ok(decode_text(bytes))
    }
}

fn decode_text(bytes: &[u8]) -> String {
    let text: String = bytes.iter().map(|&b| char::from(b)).collect();
    text.trim_end_matches('\0').to_string()
}
