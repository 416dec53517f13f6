//! Little-endian binary buffer primitives for cross-language object
//! serialization.
//!
//! This is the byte-level substrate an object-graph codec builds on: a
//! growable byte region, a sequential writer, and a sequential zero-copy
//! reader whose encodings are bit-identical across every implementation of
//! the wider protocol:
//! - All fixed-width values are little-endian
//! - Oversized dynamic-width writes wrap modulo the field width instead of
//!   failing
//! - Varints use 7-bit groups with a continuation bit, zigzag-mapped when
//!   signed
//! - Text is latin-1 (encoding id 0) or UTF-8 (encoding id 1)
//!
//! The layer is not self-describing: reads must mirror the order and types
//! of the writes exactly, which is the calling codec's responsibility.
//!
//! ```
//! use wirebuf::{BinaryReader, BinaryWriter, TextEncoding};
//!
//! let mut writer = BinaryWriter::new();
//! writer.write_u8(7);
//! writer.write_varint64(-42);
//! writer.write_prefixed_text("hello", TextEncoding::Latin1).unwrap();
//!
//! let payload = writer.dump();
//! let mut reader = BinaryReader::new(payload);
//! assert_eq!(reader.read_u8().unwrap(), 7);
//! assert_eq!(reader.read_varint64().unwrap(), -42);
//! assert_eq!(
//!     reader.read_prefixed_text(TextEncoding::Latin1).unwrap(),
//!     "hello"
//! );
//! ```

pub mod encoding;
pub mod error;
pub mod pool;
pub mod reader;
pub mod store;
pub mod varint;
pub mod writer;

pub use encoding::TextEncoding;
pub use error::{BufferError, Result};
pub use pool::WriterPool;
pub use reader::BinaryReader;
pub use store::{ByteStore, IntWidth};
pub use writer::{BinaryWriter, DEFAULT_CAPACITY};
