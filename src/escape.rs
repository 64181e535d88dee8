//! Minimal HTML escaping for the two contexts the emitter writes into.
//!
//! - [`escape_body`] - text content between tags
//! - [`escape_attr`] - double-quoted attribute values
//!
//! Both stream to any `std::io::Write`, flushing unescaped runs in one
//! `write_all` call rather than byte-at-a-time.

use std::io::{self, Write};

const fn escape_set(bytes: &[u8]) -> [bool; 256] {
    let mut table = [false; 256];
    let mut i = 0;
    while i < bytes.len() {
        table[bytes[i] as usize] = true;
        i += 1;
    }
    table
}

/// Bytes that must be escaped in text content.
const BODY_ESCAPED: [bool; 256] = escape_set(b"&<>");

/// Bytes that must be escaped inside a double-quoted attribute value.
const ATTR_ESCAPED: [bool; 256] = escape_set(b"&<>\"");

/// Escape `text` for an HTML text-content position and write it to `out`.
pub fn escape_body<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    escape_with(out, text.as_bytes(), &BODY_ESCAPED)
}

/// Escape `text` for a double-quoted HTML attribute value and write it to `out`.
pub fn escape_attr<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    escape_with(out, text.as_bytes(), &ATTR_ESCAPED)
}

fn escape_with<W: Write>(out: &mut W, buffer: &[u8], table: &[bool; 256]) -> io::Result<()> {
    let mut offset = 0;
    for (i, &byte) in buffer.iter().enumerate() {
        if table[byte as usize] {
            let esc: &[u8] = match byte {
                b'&' => b"&amp;",
                b'<' => b"&lt;",
                b'>' => b"&gt;",
                b'"' => b"&quot;",
                _ => unreachable!(),
            };
            out.write_all(&buffer[offset..i])?;
            out.write_all(esc)?;
            offset = i + 1;
        }
    }
    out.write_all(&buffer[offset..])?;
    Ok(())
}
