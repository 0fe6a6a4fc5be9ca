//! Byte/hex helpers used across the SDK.
//!
//! Conventions:
//! - `hex_plain` emits bare lowercase hex (transaction JSON view, hashes).
//! - Decoders accept with/without `0x` and both cases.

use crate::error::{Error, Result};

/// Whether the string starts with `0x` or `0X`.
#[inline]
pub fn has_0x(s: &str) -> bool {
    s.starts_with("0x") || s.starts_with("0X")
}

/// Strip a leading `0x`/`0X` prefix; return the original if absent.
#[inline]
pub fn strip_0x(s: &str) -> &str {
    if has_0x(s) { &s[2..] } else { s }
}

/// Encode bytes to bare lowercase hex.
#[inline]
pub fn hex_plain<B: AsRef<[u8]>>(bytes: B) -> String {
    hex::encode(bytes.as_ref())
}

/// Decode hex into bytes. Accepts with/without `0x`; odd length is an error.
pub fn hex_decode(s: &str) -> Result<Vec<u8>> {
    let hex = strip_0x(s.trim());
    if hex.is_empty() {
        return Ok(Vec::new());
    }
    Ok(hex::decode(hex)?)
}

/// Copy a slice into `[u8; N]`, failing on any other length.
pub fn to_array<const N: usize>(bytes: &[u8]) -> Result<[u8; N]> {
    <[u8; N]>::try_from(bytes)
        .map_err(|_| Error::Decode(format!("expected {N} bytes, got {}", bytes.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let b = [0x01u8, 0xAB, 0x00, 0xFF];
        assert_eq!(hex_decode("0x01ab00ff").unwrap(), b);
        assert_eq!(hex_decode("01AB00FF").unwrap(), b);
        assert_eq!(hex_plain(b), "01ab00ff");
    }

    #[test]
    fn empty_and_odd() {
        assert_eq!(hex_decode("0x").unwrap(), Vec::<u8>::new());
        assert!(matches!(hex_decode("abc"), Err(Error::Hex(_))));
    }

    #[test]
    fn fixed_arrays() {
        assert_eq!(to_array::<2>(&[0x12, 0x34]).unwrap(), [0x12, 0x34]);
        assert!(matches!(to_array::<4>(&[1, 2, 3]), Err(Error::Decode(_))));
    }
}
