//! Little-endian 32-bit integer codec.
//!
//! Every integer the daemon exchanges is a `u32` in little-endian order.
//!
//! # Example
//!
//! ```
//! use pcscd_client::codec::{decode_u32, encode_u32};
//!
//! assert_eq!(encode_u32(4), [4, 0, 0, 0]);
//! assert_eq!(decode_u32(&[3, 0, 0, 0]).unwrap(), 3);
//! ```

use crate::error::{PcscError, Result};

/// Width of every wire integer.
pub const U32_SIZE: usize = 4;

/// Encode a `u32` as 4 little-endian bytes.
#[inline]
pub fn encode_u32(value: u32) -> [u8; U32_SIZE] {
    value.to_le_bytes()
}

/// Decode the first 4 bytes of `buf` as a little-endian `u32`.
///
/// # Errors
///
/// Returns `Decode` if fewer than 4 bytes are available.
#[inline]
pub fn decode_u32(buf: &[u8]) -> Result<u32> {
    match buf.get(..U32_SIZE) {
        Some(bytes) => Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])),
        None => Err(PcscError::Decode {
            expected: U32_SIZE,
            actual: buf.len(),
        }),
    }
}

/// Read a `u32` at a fixed offset of a buffer already checked for length.
#[inline]
pub(crate) fn read_u32_at(buf: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ])
}

/// Write a `u32` at a fixed offset.
#[inline]
pub(crate) fn write_u32_at(buf: &mut [u8], offset: usize, value: u32) {
    buf[offset..offset + U32_SIZE].copy_from_slice(&value.to_le_bytes());
}
