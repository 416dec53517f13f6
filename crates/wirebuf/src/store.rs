//! Resizable contiguous byte region with primitive-width accessors.

use bytes::BytesMut;
use tracing::trace;

use crate::encoding::{self, TextEncoding};
use crate::error::{BufferError, Result};

/// Width of a fixed-size integer field, selected at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
}

impl IntWidth {
    /// Number of bytes a field of this width occupies on the wire.
    pub fn bytes(self) -> usize {
        match self {
            IntWidth::W8 => 1,
            IntWidth::W16 => 2,
            IntWidth::W32 => 4,
            IntWidth::W64 => 8,
        }
    }
}

/// A resizable, zero-initialized, contiguous byte-addressable region.
///
/// All multi-byte accessors use little-endian byte order, the single byte
/// order of the wire contract. Any offset/length outside `[0, capacity)`
/// fails with [`BufferError::OutOfRange`].
#[derive(Debug, Default)]
pub struct ByteStore {
    buf: BytesMut,
}

impl ByteStore {
    /// Allocate a zero-initialized region of `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::zeroed(capacity),
        }
    }

    /// Build a region holding a copy of `data`.
    pub fn from_slice(data: &[u8]) -> Self {
        Self {
            buf: BytesMut::from(data),
        }
    }

    /// Current capacity of the region in bytes.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Reallocate so the region holds at least `min_capacity` bytes.
    ///
    /// Existing contents are preserved; new bytes are zeroed.
    pub fn grow(&mut self, min_capacity: usize) {
        if min_capacity <= self.buf.len() {
            return;
        }
        trace!(old = self.buf.len(), new = min_capacity, "growing byte store");
        self.buf.resize(min_capacity, 0);
    }

    fn check(&self, offset: usize, len: usize) -> Result<()> {
        let end = offset.checked_add(len);
        match end {
            Some(end) if end <= self.buf.len() => Ok(()),
            _ => Err(BufferError::OutOfRange {
                offset,
                len,
                capacity: self.buf.len(),
            }),
        }
    }

    fn get_array<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        self.check(offset, N)?;
        Ok(self.buf[offset..offset + N].try_into().unwrap())
    }

    fn set_array<const N: usize>(&mut self, offset: usize, bytes: [u8; N]) -> Result<()> {
        self.check(offset, N)?;
        self.buf[offset..offset + N].copy_from_slice(&bytes);
        Ok(())
    }

    pub fn get_u8(&self, offset: usize) -> Result<u8> {
        Ok(u8::from_le_bytes(self.get_array(offset)?))
    }

    pub fn get_i8(&self, offset: usize) -> Result<i8> {
        Ok(i8::from_le_bytes(self.get_array(offset)?))
    }

    pub fn get_u16(&self, offset: usize) -> Result<u16> {
        Ok(u16::from_le_bytes(self.get_array(offset)?))
    }

    pub fn get_i16(&self, offset: usize) -> Result<i16> {
        Ok(i16::from_le_bytes(self.get_array(offset)?))
    }

    pub fn get_u32(&self, offset: usize) -> Result<u32> {
        Ok(u32::from_le_bytes(self.get_array(offset)?))
    }

    pub fn get_i32(&self, offset: usize) -> Result<i32> {
        Ok(i32::from_le_bytes(self.get_array(offset)?))
    }

    pub fn get_u64(&self, offset: usize) -> Result<u64> {
        Ok(u64::from_le_bytes(self.get_array(offset)?))
    }

    pub fn get_i64(&self, offset: usize) -> Result<i64> {
        Ok(i64::from_le_bytes(self.get_array(offset)?))
    }

    pub fn get_f32(&self, offset: usize) -> Result<f32> {
        Ok(f32::from_le_bytes(self.get_array(offset)?))
    }

    pub fn get_f64(&self, offset: usize) -> Result<f64> {
        Ok(f64::from_le_bytes(self.get_array(offset)?))
    }

    pub fn set_u8(&mut self, offset: usize, value: u8) -> Result<()> {
        self.set_array(offset, value.to_le_bytes())
    }

    pub fn set_i8(&mut self, offset: usize, value: i8) -> Result<()> {
        self.set_array(offset, value.to_le_bytes())
    }

    pub fn set_u16(&mut self, offset: usize, value: u16) -> Result<()> {
        self.set_array(offset, value.to_le_bytes())
    }

    pub fn set_i16(&mut self, offset: usize, value: i16) -> Result<()> {
        self.set_array(offset, value.to_le_bytes())
    }

    pub fn set_u32(&mut self, offset: usize, value: u32) -> Result<()> {
        self.set_array(offset, value.to_le_bytes())
    }

    pub fn set_i32(&mut self, offset: usize, value: i32) -> Result<()> {
        self.set_array(offset, value.to_le_bytes())
    }

    pub fn set_u64(&mut self, offset: usize, value: u64) -> Result<()> {
        self.set_array(offset, value.to_le_bytes())
    }

    pub fn set_i64(&mut self, offset: usize, value: i64) -> Result<()> {
        self.set_array(offset, value.to_le_bytes())
    }

    pub fn set_f32(&mut self, offset: usize, value: f32) -> Result<()> {
        self.set_array(offset, value.to_le_bytes())
    }

    pub fn set_f64(&mut self, offset: usize, value: f64) -> Result<()> {
        self.set_array(offset, value.to_le_bytes())
    }

    /// Read a fixed-width unsigned integer whose width is selected at runtime.
    pub fn get_uint(&self, offset: usize, width: IntWidth) -> Result<u64> {
        match width {
            IntWidth::W8 => Ok(self.get_u8(offset)? as u64),
            IntWidth::W16 => Ok(self.get_u16(offset)? as u64),
            IntWidth::W32 => Ok(self.get_u32(offset)? as u64),
            IntWidth::W64 => self.get_u64(offset),
        }
    }

    /// Write a fixed-width unsigned integer whose width is selected at runtime.
    ///
    /// The value is truncated modulo `2^(8 * width)` before encoding. This is
    /// defined wraparound, not an error: writing 256 as [`IntWidth::W8`]
    /// stores the byte 0x00.
    pub fn set_uint(&mut self, offset: usize, value: u64, width: IntWidth) -> Result<()> {
        match width {
            IntWidth::W8 => self.set_u8(offset, value as u8),
            IntWidth::W16 => self.set_u16(offset, value as u16),
            IntWidth::W32 => self.set_u32(offset, value as u32),
            IntWidth::W64 => self.set_u64(offset, value),
        }
    }

    /// Copy `len` bytes from `src_offset` to `dest_offset` within the region.
    ///
    /// Overlapping ranges are copied correctly.
    pub fn copy_within(&mut self, src_offset: usize, dest_offset: usize, len: usize) -> Result<()> {
        self.check(src_offset, len)?;
        self.check(dest_offset, len)?;
        self.buf.copy_within(src_offset..src_offset + len, dest_offset);
        Ok(())
    }

    /// Copy `src` into the region starting at `offset`.
    pub fn copy_from_slice_at(&mut self, offset: usize, src: &[u8]) -> Result<()> {
        self.check(offset, src.len())?;
        self.buf[offset..offset + src.len()].copy_from_slice(src);
        Ok(())
    }

    /// Encode `value` at `offset`, returning the number of bytes written.
    pub fn encode_text(
        &mut self,
        value: &str,
        offset: usize,
        encoding: TextEncoding,
    ) -> Result<usize> {
        let len = encoding.encoded_len(value)?;
        self.check(offset, len)?;
        encoding::encode_into(value, &mut self.buf[offset..offset + len], encoding)
    }

    /// Decode `len` bytes at `offset` as text in the given encoding.
    pub fn decode_text(&self, offset: usize, len: usize, encoding: TextEncoding) -> Result<String> {
        self.check(offset, len)?;
        encoding::decode(&self.buf[offset..offset + len], encoding)
    }

    /// The whole region as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// The whole region as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    /// Consume the store and return its backing buffer.
    pub fn into_inner(self) -> BytesMut {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_zero_initialized() {
        let store = ByteStore::with_capacity(16);
        assert_eq!(store.capacity(), 16);
        assert_eq!(store.as_slice(), &[0u8; 16]);
    }

    #[test]
    fn little_endian_layout() {
        let mut store = ByteStore::with_capacity(8);
        store.set_u32(0, 0xDEAD_BEEF).unwrap();
        assert_eq!(&store.as_slice()[..4], &[0xEF, 0xBE, 0xAD, 0xDE]);
        assert_eq!(store.get_u32(0).unwrap(), 0xDEAD_BEEF);
    }

    #[test]
    fn signed_and_float_roundtrip() {
        let mut store = ByteStore::with_capacity(32);
        store.set_i16(0, -2).unwrap();
        store.set_i64(2, i64::MIN).unwrap();
        store.set_f32(10, 1.5).unwrap();
        store.set_f64(14, -0.25).unwrap();

        assert_eq!(store.get_i16(0).unwrap(), -2);
        assert_eq!(store.get_i64(2).unwrap(), i64::MIN);
        assert_eq!(store.get_f32(10).unwrap(), 1.5);
        assert_eq!(store.get_f64(14).unwrap(), -0.25);
    }

    #[test]
    fn out_of_range_access() {
        let mut store = ByteStore::with_capacity(4);
        let err = store.get_u32(1).unwrap_err();
        assert!(matches!(
            err,
            BufferError::OutOfRange {
                offset: 1,
                len: 4,
                capacity: 4
            }
        ));
        assert!(store.set_u64(0, 1).is_err());
        // Offsets that would overflow usize are out of range, not a panic.
        assert!(store.get_u8(usize::MAX).is_err());
    }

    #[test]
    fn dynamic_width_truncates() {
        let mut store = ByteStore::with_capacity(8);
        store.set_uint(0, 256, IntWidth::W8).unwrap();
        assert_eq!(store.get_u8(0).unwrap(), 0);

        store.set_uint(0, 0x1_0000_0001, IntWidth::W32).unwrap();
        assert_eq!(store.get_u32(0).unwrap(), 1);

        store.set_uint(0, u64::MAX, IntWidth::W16).unwrap();
        assert_eq!(store.get_uint(0, IntWidth::W16).unwrap(), 0xFFFF);
    }

    #[test]
    fn grow_preserves_and_zeroes() {
        let mut store = ByteStore::with_capacity(2);
        store.set_u8(0, 7).unwrap();
        store.set_u8(1, 9).unwrap();

        store.grow(8);
        assert_eq!(store.capacity(), 8);
        assert_eq!(store.as_slice(), &[7, 9, 0, 0, 0, 0, 0, 0]);

        // Shrinking requests are ignored.
        store.grow(4);
        assert_eq!(store.capacity(), 8);
    }

    #[test]
    fn overlapping_copy() {
        let mut store = ByteStore::from_slice(&[1, 2, 3, 4, 5, 0, 0]);
        store.copy_within(0, 2, 5).unwrap();
        assert_eq!(store.as_slice(), &[1, 2, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn copy_out_of_range() {
        let mut store = ByteStore::with_capacity(4);
        assert!(store.copy_within(2, 0, 3).is_err());
        assert!(store.copy_from_slice_at(2, &[1, 2, 3]).is_err());
    }

    #[test]
    fn text_roundtrip_both_encodings() {
        let mut store = ByteStore::with_capacity(16);

        let n = store.encode_text("hello", 0, TextEncoding::Latin1).unwrap();
        assert_eq!(n, 5);
        assert_eq!(&store.as_slice()[..5], &[104, 101, 108, 108, 111]);
        assert_eq!(store.decode_text(0, 5, TextEncoding::Latin1).unwrap(), "hello");

        let n = store.encode_text("\u{4F60}\u{597D}", 5, TextEncoding::Utf8).unwrap();
        assert_eq!(n, 6);
        assert_eq!(
            store.decode_text(5, 6, TextEncoding::Utf8).unwrap(),
            "\u{4F60}\u{597D}"
        );
    }

    #[test]
    fn text_out_of_range() {
        let mut store = ByteStore::with_capacity(3);
        assert!(store.encode_text("hello", 0, TextEncoding::Latin1).is_err());
        assert!(store.decode_text(0, 4, TextEncoding::Latin1).is_err());
    }
}
