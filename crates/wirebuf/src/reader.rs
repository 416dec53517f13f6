//! Sequential, bounds-checked, zero-copy primitive byte consumer.

use std::io;

use crate::encoding::{self, TextEncoding};
use crate::error::{BufferError, Result};
use crate::store::IntWidth;
use crate::varint;

/// Sequential cursor over a borrowed byte region.
///
/// The reader never owns, grows, or mutates the region it consumes. Views
/// returned by [`BinaryReader::buffer_ref`] reborrow the region itself, so
/// the borrow checker rejects any use of a view after the backing storage is
/// mutated or freed. Any read past the end of the region fails with
/// [`BufferError::OutOfRange`].
#[derive(Debug)]
pub struct BinaryReader<'a> {
    region: &'a [u8],
    cursor: usize,
}

impl<'a> BinaryReader<'a> {
    /// Bind a reader to a byte region.
    pub fn new(region: &'a [u8]) -> Self {
        Self { region, cursor: 0 }
    }

    /// Rebind to a new region: cursor returns to zero and the logical end
    /// becomes the new region's length.
    pub fn reset(&mut self, region: &'a [u8]) {
        self.region = region;
        self.cursor = 0;
    }

    /// Consume `len` bytes, returning them as a view into the region.
    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.cursor.checked_add(len);
        match end {
            Some(end) if end <= self.region.len() => {
                let bytes = &self.region[self.cursor..end];
                self.cursor = end;
                Ok(bytes)
            }
            _ => Err(BufferError::OutOfRange {
                offset: self.cursor,
                len,
                capacity: self.region.len(),
            }),
        }
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        Ok(self.take(N)?.try_into().unwrap())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(u8::from_le_bytes(self.take_array()?))
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(i8::from_le_bytes(self.take_array()?))
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.take_array()?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.take_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.take_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.take_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.take_array()?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.take_array()?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.take_array()?))
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Read a fixed-width unsigned integer whose width is selected at runtime.
    pub fn read_uint(&mut self, width: IntWidth) -> Result<u64> {
        match width {
            IntWidth::W8 => Ok(self.read_u8()? as u64),
            IntWidth::W16 => Ok(self.read_u16()? as u64),
            IntWidth::W32 => Ok(self.read_u32()? as u64),
            IntWidth::W64 => self.read_u64(),
        }
    }

    /// Read a 32-bit varint, mirroring [`crate::BinaryWriter::write_varuint32`].
    pub fn read_varuint32(&mut self) -> Result<u32> {
        let (value, consumed) = varint::decode_varuint32(&self.region[self.cursor..])?;
        self.cursor += consumed;
        Ok(value)
    }

    /// Read a 64-bit varint.
    pub fn read_varuint64(&mut self) -> Result<u64> {
        let (value, consumed) = varint::decode_varuint64(&self.region[self.cursor..])?;
        self.cursor += consumed;
        Ok(value)
    }

    /// Read a zigzag-encoded signed 32-bit varint.
    pub fn read_varint32(&mut self) -> Result<i32> {
        Ok(varint::unzigzag32(self.read_varuint32()?))
    }

    /// Read a zigzag-encoded signed 64-bit varint.
    pub fn read_varint64(&mut self) -> Result<i64> {
        Ok(varint::unzigzag64(self.read_varuint64()?))
    }

    /// Read `len` bytes into a fresh allocation.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        Ok(self.take(len)?.to_vec())
    }

    /// Zero-copy alternative to [`BinaryReader::read_bytes`]: returns a view
    /// aliasing the underlying region directly, advancing the cursor by
    /// `len`. No allocation, no copy.
    pub fn buffer_ref(&mut self, len: usize) -> Result<&'a [u8]> {
        self.take(len)
    }

    /// Read a varuint32 length prefix, then that many bytes.
    pub fn read_prefixed_bytes(&mut self) -> Result<Vec<u8>> {
        let len = self.read_varuint32()? as usize;
        self.read_bytes(len)
    }

    /// Decode `len` bytes at the cursor as text.
    pub fn read_text(&mut self, len: usize, encoding: TextEncoding) -> Result<String> {
        let bytes = self.take(len)?;
        encoding::decode(bytes, encoding)
    }

    /// Read a varuint32 byte-length prefix, then the encoded text.
    pub fn read_prefixed_text(&mut self, encoding: TextEncoding) -> Result<String> {
        let len = self.read_varuint32()? as usize;
        self.read_text(len, encoding)
    }

    /// Advance the cursor by `len` bytes without decoding them.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.take(len).map(|_| ())
    }

    /// Bytes consumed so far.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Bytes left before the logical end of the region.
    pub fn remaining(&self) -> usize {
        self.region.len() - self.cursor
    }

    /// True if any bytes remain to be read.
    pub fn has_more(&self) -> bool {
        self.cursor < self.region.len()
    }
}

impl io::Read for BinaryReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.remaining().min(buf.len());
        buf[..n].copy_from_slice(&self.region[self.cursor..self.cursor + n]);
        self.cursor += n;
        Ok(n)
    }
}
