//! Hex dumps for packet diagnostics.

use std::fmt::Write;

const BYTES_PER_ROW: usize = 16;

/// Formats bytes as a classic hex dump: offset, hex columns, printable ASCII.
///
/// ```text
/// 0000: 18 00 F2 03 00 00 00 00 07 00 00 00 64 00 00 00  ............d...
/// 0010: 0C 00 22 00 00 00 0F 27                          .."....'
/// ```
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(BYTES_PER_ROW) * 74);

    for (row, chunk) in bytes.chunks(BYTES_PER_ROW).enumerate() {
        if row > 0 {
            out.push('\n');
        }
        let _ = write!(out, "{:04X}:", row * BYTES_PER_ROW);

        let hex = hex::encode_upper(chunk);
        for i in 0..BYTES_PER_ROW {
            match hex.get(i * 2..i * 2 + 2) {
                Some(pair) => {
                    out.push(' ');
                    out.push_str(pair);
                }
                None => out.push_str("   "),
            }
        }

        out.push_str("  ");
        out.extend(chunk.iter().map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        }));
    }

    out
}
