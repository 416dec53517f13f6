//! Sequential, auto-growing primitive byte producer.

use std::io;

use bytes::Bytes;
use tracing::trace;

use crate::encoding::TextEncoding;
use crate::error::{BufferError, Result};
use crate::store::{ByteStore, IntWidth};
use crate::varint;

/// Default initial capacity for a fresh writer. Amortizes reallocation for
/// typical payload sizes.
pub const DEFAULT_CAPACITY: usize = 4 * 1024;

/// Sequential append-only cursor over an owned [`ByteStore`].
///
/// The writer exclusively owns its store, so growth by reallocation is always
/// safe. All multi-byte values are encoded little-endian. Numeric writes are
/// infallible: the store grows as needed, and oversized dynamic-width values
/// wrap instead of failing (see [`BinaryWriter::write_uint`]).
#[derive(Debug)]
pub struct BinaryWriter {
    store: ByteStore,
    cursor: usize,
}

impl BinaryWriter {
    /// Create a writer with the default initial capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a writer with an explicit initial capacity hint.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: ByteStore::with_capacity(capacity),
            cursor: 0,
        }
    }

    /// Ensure room for `additional` more bytes past the cursor.
    ///
    /// Grows to at least `max(capacity * 2, cursor + additional)` so appends
    /// stay amortized O(1) per byte.
    fn reserve(&mut self, additional: usize) {
        let needed = self.cursor + additional;
        if needed > self.store.capacity() {
            let new_capacity = needed.max(self.store.capacity() * 2);
            trace!(
                cursor = self.cursor,
                old = self.store.capacity(),
                new = new_capacity,
                "growing write buffer"
            );
            self.store.grow(new_capacity);
        }
    }

    fn push(&mut self, bytes: &[u8]) {
        self.reserve(bytes.len());
        let end = self.cursor + bytes.len();
        self.store.as_mut_slice()[self.cursor..end].copy_from_slice(bytes);
        self.cursor = end;
    }

    pub fn write_u8(&mut self, value: u8) {
        self.push(&value.to_le_bytes());
    }

    pub fn write_i8(&mut self, value: i8) {
        self.push(&value.to_le_bytes());
    }

    pub fn write_u16(&mut self, value: u16) {
        self.push(&value.to_le_bytes());
    }

    pub fn write_i16(&mut self, value: i16) {
        self.push(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.push(&value.to_le_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.push(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.push(&value.to_le_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.push(&value.to_le_bytes());
    }

    pub fn write_f32(&mut self, value: f32) {
        self.push(&value.to_le_bytes());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.push(&value.to_le_bytes());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(value as u8);
    }

    /// Write a fixed-width unsigned integer whose width is selected at
    /// runtime.
    ///
    /// The value is reduced modulo `2^(8 * width)` before encoding — writing
    /// 256 as [`IntWidth::W8`] emits the byte 0x00. This keeps the output
    /// wire-identical to a statically typed producer that wraps on cast.
    pub fn write_uint(&mut self, value: u64, width: IntWidth) {
        match width {
            IntWidth::W8 => self.write_u8(value as u8),
            IntWidth::W16 => self.write_u16(value as u16),
            IntWidth::W32 => self.write_u32(value as u32),
            IntWidth::W64 => self.write_u64(value),
        }
    }

    /// Write an unsigned 32-bit value as a minimal-length varint.
    pub fn write_varuint32(&mut self, value: u32) {
        let mut buf = [0u8; varint::MAX_VARUINT32_BYTES];
        let n = varint::encode_varuint32(value, &mut buf);
        self.push(&buf[..n]);
    }

    /// Write an unsigned 64-bit value as a minimal-length varint.
    pub fn write_varuint64(&mut self, value: u64) {
        let mut buf = [0u8; varint::MAX_VARUINT64_BYTES];
        let n = varint::encode_varuint64(value, &mut buf);
        self.push(&buf[..n]);
    }

    /// Write a signed 32-bit value as a zigzag varint.
    pub fn write_varint32(&mut self, value: i32) {
        self.write_varuint32(varint::zigzag32(value));
    }

    /// Write a signed 64-bit value as a zigzag varint.
    pub fn write_varint64(&mut self, value: i64) {
        self.write_varuint64(varint::zigzag64(value));
    }

    /// Append raw bytes at the cursor.
    pub fn write_bytes(&mut self, data: &[u8]) {
        self.push(data);
    }

    /// Append a varint length prefix followed by the bytes.
    ///
    /// Lengths are encoded as varuint32; the wire contract limits payloads to
    /// `u32::MAX` bytes.
    pub fn write_prefixed_bytes(&mut self, data: &[u8]) {
        debug_assert!(data.len() <= u32::MAX as usize);
        self.write_varuint32(data.len() as u32);
        self.push(data);
    }

    /// Encode `value` at the cursor, returning the encoded byte count.
    pub fn write_text(&mut self, value: &str, encoding: TextEncoding) -> Result<usize> {
        let len = encoding.encoded_len(value)?;
        self.reserve(len);
        let written = self.store.encode_text(value, self.cursor, encoding)?;
        self.cursor += written;
        Ok(written)
    }

    /// Write a varuint32 byte-length prefix, then the encoded text.
    ///
    /// Returns the encoded byte count (excluding the prefix).
    pub fn write_prefixed_text(&mut self, value: &str, encoding: TextEncoding) -> Result<usize> {
        let len = encoding.encoded_len(value)?;
        self.write_varuint32(len as u32);
        self.reserve(len);
        let written = self.store.encode_text(value, self.cursor, encoding)?;
        self.cursor += written;
        Ok(written)
    }

    fn check_patch(&self, offset: usize, len: usize) -> Result<()> {
        let end = offset.checked_add(len);
        match end {
            Some(end) if end <= self.cursor => Ok(()),
            _ => Err(BufferError::OutOfRange {
                offset,
                len,
                capacity: self.cursor,
            }),
        }
    }

    /// Overwrite a byte at an absolute offset below the cursor.
    ///
    /// Used together with [`BinaryWriter::cursor`] for the placeholder-length
    /// pattern: write a placeholder, remember the offset, patch it once the
    /// final value is known.
    pub fn patch_u8(&mut self, offset: usize, value: u8) -> Result<()> {
        self.check_patch(offset, 1)?;
        self.store.set_u8(offset, value)
    }

    /// Overwrite a little-endian u32 at an absolute offset below the cursor.
    pub fn patch_u32(&mut self, offset: usize, value: u32) -> Result<()> {
        self.check_patch(offset, 4)?;
        self.store.set_u32(offset, value)
    }

    /// Overwrite a little-endian u64 at an absolute offset below the cursor.
    pub fn patch_u64(&mut self, offset: usize, value: u64) -> Result<()> {
        self.check_patch(offset, 8)?;
        self.store.set_u64(offset, value)
    }

    /// Bytes written so far.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current capacity of the owned store.
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// A view of exactly the bytes written so far.
    ///
    /// Non-destructive: repeated calls return the same logical content until
    /// more writes occur.
    pub fn dump(&self) -> &[u8] {
        &self.store.as_slice()[..self.cursor]
    }

    /// Finalize into an owned, refcounted, immutable payload of exactly the
    /// bytes written.
    pub fn into_bytes(self) -> Bytes {
        let mut buf = self.store.into_inner();
        buf.truncate(self.cursor);
        buf.freeze()
    }

    /// Rewind the cursor to zero, retaining the allocation for reuse.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

impl Default for BinaryWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl io::Write for BinaryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.push(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
