//! Text encodings of the wire contract.
//!
//! Encoding ids are part of the cross-language protocol: every implementation
//! must agree on them byte for byte.

use std::fmt;

use crate::error::{BufferError, Result};

/// Wire id for the single-byte encoding (codepoints 0-255 map 1:1 to bytes).
pub const LATIN1_ID: u8 = 0;

/// Wire id for the variable-width UTF-8 encoding.
pub const UTF8_ID: u8 = 1;

/// A text encoding supported by the buffer layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// One byte per character, restricted to U+0000..=U+00FF. Fast path for
    /// ASCII/Latin-1 payloads.
    Latin1,
    /// Standard variable-width Unicode encoding.
    Utf8,
}

impl TextEncoding {
    /// Resolve a wire encoding id.
    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            LATIN1_ID => Ok(TextEncoding::Latin1),
            UTF8_ID => Ok(TextEncoding::Utf8),
            _ => Err(BufferError::UnsupportedEncoding { id }),
        }
    }

    /// The wire id of this encoding.
    pub fn id(self) -> u8 {
        match self {
            TextEncoding::Latin1 => LATIN1_ID,
            TextEncoding::Utf8 => UTF8_ID,
        }
    }

    /// Number of bytes `value` occupies in this encoding.
    ///
    /// Fails with [`BufferError::Unencodable`] if a latin-1 length is
    /// requested for text containing codepoints above U+00FF.
    pub fn encoded_len(self, value: &str) -> Result<usize> {
        match self {
            TextEncoding::Utf8 => Ok(value.len()),
            TextEncoding::Latin1 => {
                let mut len = 0;
                for ch in value.chars() {
                    let codepoint = ch as u32;
                    if codepoint > 0xFF {
                        return Err(BufferError::Unencodable { codepoint });
                    }
                    len += 1;
                }
                Ok(len)
            }
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Latin1 => f.write_str("latin1"),
            TextEncoding::Utf8 => f.write_str("utf8"),
        }
    }
}

/// Encode `value` into `out`, which must be exactly `encoded_len` bytes.
pub(crate) fn encode_into(value: &str, out: &mut [u8], encoding: TextEncoding) -> Result<usize> {
    match encoding {
        TextEncoding::Utf8 => {
            out.copy_from_slice(value.as_bytes());
            Ok(value.len())
        }
        TextEncoding::Latin1 => {
            for (slot, ch) in out.iter_mut().zip(value.chars()) {
                let codepoint = ch as u32;
                if codepoint > 0xFF {
                    return Err(BufferError::Unencodable { codepoint });
                }
                *slot = codepoint as u8;
            }
            Ok(out.len())
        }
    }
}

/// Decode `bytes` as text in the given encoding.
pub(crate) fn decode(bytes: &[u8], encoding: TextEncoding) -> Result<String> {
    match encoding {
        TextEncoding::Utf8 => Ok(std::str::from_utf8(bytes)?.to_owned()),
        TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}
