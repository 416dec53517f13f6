//! Variable-length integer encoding.
//!
//! The single convention fixed by the cross-language protocol: 7 payload bits
//! per byte, least-significant group first, continuation bit (0x80) on every
//! byte except the last, minimal-length output. Signed values are zigzag
//! mapped before encoding so small magnitudes stay compact.

use crate::error::{BufferError, Result};

/// Maximum encoded size of a 32-bit varint.
pub const MAX_VARUINT32_BYTES: usize = 5;

/// Maximum encoded size of a 64-bit varint.
pub const MAX_VARUINT64_BYTES: usize = 10;

/// Zigzag-map a signed 32-bit value to an unsigned one.
pub fn zigzag32(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

/// Inverse of [`zigzag32`].
pub fn unzigzag32(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}

/// Zigzag-map a signed 64-bit value to an unsigned one.
pub fn zigzag64(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`zigzag64`].
pub fn unzigzag64(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Encode `value` into `out`, returning the number of bytes used.
pub fn encode_varuint32(value: u32, out: &mut [u8; MAX_VARUINT32_BYTES]) -> usize {
    let mut value = value;
    let mut i = 0;
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out[i] = byte;
            return i + 1;
        }
        out[i] = byte | 0x80;
        i += 1;
    }
}

/// Encode `value` into `out`, returning the number of bytes used.
pub fn encode_varuint64(value: u64, out: &mut [u8; MAX_VARUINT64_BYTES]) -> usize {
    let mut value = value;
    let mut i = 0;
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out[i] = byte;
            return i + 1;
        }
        out[i] = byte | 0x80;
        i += 1;
    }
}

/// Decode a 32-bit varint from the front of `bytes`.
///
/// Returns the value and the number of bytes consumed, or
/// [`BufferError::InvalidVarint`] if no terminating (high-bit-clear) byte is
/// found within the valid region or the maximum group count.
pub fn decode_varuint32(bytes: &[u8]) -> Result<(u32, usize)> {
    let mut value = 0u32;
    for (i, &byte) in bytes.iter().take(MAX_VARUINT32_BYTES).enumerate() {
        value |= ((byte & 0x7F) as u32) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(BufferError::InvalidVarint)
}

/// Decode a 64-bit varint from the front of `bytes`.
pub fn decode_varuint64(bytes: &[u8]) -> Result<(u64, usize)> {
    let mut value = 0u64;
    for (i, &byte) in bytes.iter().take(MAX_VARUINT64_BYTES).enumerate() {
        value |= ((byte & 0x7F) as u64) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(BufferError::InvalidVarint)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded32(value: u32) -> Vec<u8> {
        let mut buf = [0u8; MAX_VARUINT32_BYTES];
        let n = encode_varuint32(value, &mut buf);
        buf[..n].to_vec()
    }

    fn encoded64(value: u64) -> Vec<u8> {
        let mut buf = [0u8; MAX_VARUINT64_BYTES];
        let n = encode_varuint64(value, &mut buf);
        buf[..n].to_vec()
    }

    #[test]
    fn minimal_lengths_at_group_boundaries() {
        assert_eq!(encoded32(0).len(), 1);
        assert_eq!(encoded32(127).len(), 1);
        assert_eq!(encoded32(128).len(), 2);
        assert_eq!(encoded32(16383).len(), 2);
        assert_eq!(encoded32(16384).len(), 3);
        assert_eq!(encoded32(u32::MAX).len(), 5);
        assert_eq!(encoded64(u64::MAX).len(), 10);
    }

    #[test]
    fn known_encodings() {
        assert_eq!(encoded32(0), [0x00]);
        assert_eq!(encoded32(1), [0x01]);
        assert_eq!(encoded32(300), [0xAC, 0x02]);
    }

    #[test]
    fn roundtrip32() {
        for value in [0, 1, 127, 128, 16383, 16384, 0xDEAD_BEEF, u32::MAX] {
            let bytes = encoded32(value);
            let (decoded, consumed) = decode_varuint32(&bytes).unwrap();
            assert_eq!(decoded, value);
            assert_eq!(consumed, bytes.len());
        }
    }

    #[test]
    fn roundtrip64() {
        for value in [0, 1, 127, 128, 1 << 35, u64::MAX] {
            let bytes = encoded64(value);
            let (decoded, consumed) = decode_varuint64(&bytes).unwrap();
            assert_eq!(decoded, value);
            assert_eq!(consumed, bytes.len());
        }
    }

    #[test]
    fn zigzag_pairs() {
        assert_eq!(zigzag32(0), 0);
        assert_eq!(zigzag32(-1), 1);
        assert_eq!(zigzag32(1), 2);
        assert_eq!(zigzag32(-2), 3);
        assert_eq!(zigzag32(127), 254);
        assert_eq!(zigzag32(-128), 255);
        assert_eq!(zigzag64(i64::MIN), u64::MAX);

        for value in [i32::MIN, -128, -1, 0, 1, 127, 128, i32::MAX] {
            assert_eq!(unzigzag32(zigzag32(value)), value);
        }
        for value in [i64::MIN, -1, 0, 1, i64::MAX] {
            assert_eq!(unzigzag64(zigzag64(value)), value);
        }
    }

    #[test]
    fn unterminated_varint_rejected() {
        assert!(matches!(
            decode_varuint32(&[0x80, 0x80]),
            Err(BufferError::InvalidVarint)
        ));
        assert!(matches!(decode_varuint32(&[]), Err(BufferError::InvalidVarint)));
    }

    #[test]
    fn overlong_varint_rejected() {
        // Six continuation groups can never be a valid 32-bit varint.
        let bytes = [0x80, 0x80, 0x80, 0x80, 0x80, 0x00];
        assert!(matches!(
            decode_varuint32(&bytes),
            Err(BufferError::InvalidVarint)
        ));
    }
}
