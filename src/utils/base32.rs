//! Base32 text helpers for account addresses.
//!
//! RFC 4648 alphabet without padding. Canonical form is **uppercase**.
//!
//! Notes:
//! - Mixed-case strings are rejected.
//! - We accept either lowercase or uppercase input, but we always **emit uppercase**.

use crate::error::{Error, Result};
use data_encoding::BASE32_NOPAD;

/// Encode bytes as unpadded uppercase base32.
pub fn encode(bytes: &[u8]) -> String {
    BASE32_NOPAD.encode(bytes)
}

/// Decode unpadded base32 text (all-upper or all-lower case).
///
/// # Errors
/// - `Address` on mixed case, characters outside the alphabet, or a length
///   that is not a whole number of bytes.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let has_lower = text.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = text.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(Error::Address("mixed-case base32 string".into()));
    }
    let upper = text.to_ascii_uppercase();
    BASE32_NOPAD
        .decode(upper.as_bytes())
        .map_err(|e| Error::Address(format!("base32 decode: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc4648_vectors() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b"f"), "MY");
        assert_eq!(encode(b"fo"), "MZXQ");
        assert_eq!(encode(b"foobar"), "MZXW6YTBOI");
        assert_eq!(decode("MZXW6YTBOI").unwrap(), b"foobar");
    }

    #[test]
    fn case_handling() {
        assert_eq!(decode("mzxw6ytboi").unwrap(), b"foobar");
        assert!(matches!(decode("MZXw6YTBOI"), Err(Error::Address(_))));
        assert_eq!(encode(&decode("mzxq").unwrap()), "MZXQ");
    }

    #[test]
    fn rejects_alphabet_and_length() {
        assert!(decode("MZX1").is_err());
        assert!(decode("MZX").is_err());
        assert!(decode("MZXQ====").is_err());
    }
}
