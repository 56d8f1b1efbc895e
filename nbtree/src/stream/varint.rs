//! Unsigned base-128 varints: seven bits per byte, least significant group
//! first, high bit set on every byte but the last.
use std::io::Write;

use byteorder::WriteBytesExt;

use crate::error::{Error, Result};

/// A `u32` never needs more than five groups.
pub(crate) const MAX_LEN: usize = 5;

pub(crate) fn write_u32<W: Write>(writer: &mut W, mut value: u32) -> std::io::Result<()> {
    loop {
        let group = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            return writer.write_u8(group);
        }
        writer.write_u8(group | 0x80)?;
    }
}

/// Read a varint, pulling bytes from `next`. Bits past the 32nd are
/// discarded.
pub(crate) fn read_u32(mut next: impl FnMut() -> Result<u8>) -> Result<u32> {
    let mut value = 0u32;
    for i in 0..MAX_LEN {
        let byte = next()?;
        value |= ((byte & 0x7f) as u32).wrapping_shl(7 * i as u32);
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(Error::bespoke(format!(
        "invalid varint: longer than {} bytes",
        MAX_LEN
    )))
}

#[cfg(test)]
mod test {
    use super::*;

    fn encode(value: u32) -> Vec<u8> {
        let mut buf = vec![];
        write_u32(&mut buf, value).unwrap();
        buf
    }

    fn decode(bytes: &[u8]) -> Result<u32> {
        let mut iter = bytes.iter();
        read_u32(|| Ok(*iter.next().unwrap_or(&0)))
    }

    #[test]
    fn single_byte_values() {
        assert_eq!(encode(0), [0]);
        assert_eq!(encode(1), [1]);
        assert_eq!(encode(127), [0x7f]);
    }

    #[test]
    fn multi_byte_values() {
        assert_eq!(encode(128), [0x80, 0x01]);
        assert_eq!(encode(300), [0xac, 0x02]);
        assert_eq!(encode(u32::MAX), [0xff, 0xff, 0xff, 0xff, 0x0f]);
    }

    #[test]
    fn decodes_what_was_encoded() {
        for v in [0, 1, 127, 128, 255, 300, 16384, i32::MAX as u32, u32::MAX] {
            assert_eq!(decode(&encode(v)).unwrap(), v);
        }
    }

    #[test]
    fn overlong_varint_is_an_error() {
        assert!(decode(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x01]).is_err());
    }

    #[test]
    fn high_bits_of_fifth_group_are_dropped() {
        assert_eq!(decode(&[0xff, 0xff, 0xff, 0xff, 0x7f]).unwrap(), u32::MAX);
    }
}
