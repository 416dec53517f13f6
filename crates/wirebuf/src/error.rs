/// Errors that can occur while accessing or decoding a byte region.
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    /// An offset/length pair falls outside the valid region.
    #[error("access out of range (offset {offset}, len {len}, capacity {capacity})")]
    OutOfRange {
        offset: usize,
        len: usize,
        capacity: usize,
    },

    /// Unknown text-encoding identifier.
    #[error("unsupported text encoding id {id}")]
    UnsupportedEncoding { id: u8 },

    /// A variable-length integer did not terminate within the valid region.
    #[error("varint not terminated within the valid region")]
    InvalidVarint,

    /// A scalar value outside U+0000..=U+00FF was requested for latin-1 encoding.
    #[error("codepoint U+{codepoint:04X} is not representable in latin-1")]
    Unencodable { codepoint: u32 },

    /// A decoded byte range is not valid UTF-8.
    #[error("decoded bytes are not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

pub type Result<T> = std::result::Result<T, BufferError>;
