//! Account addresses (base32 "L..." human strings).
//!
//! Format:
//!   bytes   = version(1) || public_key(32) || crc16_xmodem(version || public_key) (2, little-endian)  => 35 bytes
//!   address = base32_nopad(bytes)
//!
//! Example: `LDH4MEPOJX3EGN3BLBTLEYXVHYCN3AVA7IOE772F3XGI6VNZHAP6GX5R`
//!
//! Notes:
//! - The version byte `11 << 3` makes every account address start with `L`.
//! - Input may be all-uppercase or all-lowercase; we always **emit uppercase**.
//! - Version and checksum failures are reported as distinct errors.

use crate::error::{Error, Result};
use crate::utils::base32;
use core::fmt::{Display, Formatter};
use core::str::FromStr;
use crc::{Crc, CRC_16_XMODEM};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Version byte identifying account entities.
pub const ACCOUNT_VERSION: u8 = 11 << 3;

/// Raw ed25519 public key length.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Fixed-length binary address = 1 (version) + 32 (public key) + 2 (checksum)
pub const ADDRESS_LEN: usize = 1 + PUBLIC_KEY_LEN + 2;

const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// Canonical 35-byte address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LEN]);

impl core::fmt::Debug for Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Address({})", self.encode())
    }
}

/// CRC-16/XMODEM over `version || public_key`.
pub fn checksum(version: u8, public_key: &[u8; PUBLIC_KEY_LEN]) -> u16 {
    let mut digest = CRC16.digest();
    digest.update(&[version]);
    digest.update(public_key);
    digest.finalize()
}

impl Address {
    /// Derive the address of a raw public key.
    pub fn from_public_key(public_key: &[u8; PUBLIC_KEY_LEN]) -> Self {
        let mut out = [0u8; ADDRESS_LEN];
        out[0] = ACCOUNT_VERSION;
        out[1..=PUBLIC_KEY_LEN].copy_from_slice(public_key);
        out[PUBLIC_KEY_LEN + 1..].copy_from_slice(&checksum(ACCOUNT_VERSION, public_key).to_le_bytes());
        Self(out)
    }

    /// Parse and validate 35 address bytes (length, then version, then checksum).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|_| {
            Error::Address(format!("address must be {ADDRESS_LEN} bytes, got {}", bytes.len()))
        })?;
        if raw[0] != ACCOUNT_VERSION {
            return Err(Error::InvalidVersion { expected: ACCOUNT_VERSION, got: raw[0] });
        }
        let addr = Self(raw);
        if checksum(raw[0], &addr.public_key()) != addr.checksum() {
            return Err(Error::InvalidChecksum);
        }
        Ok(addr)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    pub fn version(&self) -> u8 {
        self.0[0]
    }

    pub fn public_key(&self) -> [u8; PUBLIC_KEY_LEN] {
        let mut pk = [0u8; PUBLIC_KEY_LEN];
        pk.copy_from_slice(&self.0[1..=PUBLIC_KEY_LEN]);
        pk
    }

    /// Stored checksum (little-endian trailer).
    pub fn checksum(&self) -> u16 {
        u16::from_le_bytes([self.0[ADDRESS_LEN - 2], self.0[ADDRESS_LEN - 1]])
    }

    /// Encode to the base32 text form.
    pub fn encode(&self) -> String {
        base32::encode(&self.0)
    }

    /// Decode from base32 text, validating version and checksum.
    pub fn decode(s: &str) -> Result<Self> {
        let bytes = base32::decode(s.trim())?;
        Self::from_bytes(&bytes)
    }

    /// Quick boolean validator for a candidate address string.
    pub fn is_valid(s: &str) -> bool {
        Self::decode(s).is_ok()
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Address {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::decode(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUBKEY: &str = "cfc611ee4df64337615866b262f53e04dd82a0fa1c4fff45ddcc8f55b9381fe3";
    const ADDR: &str = "LDH4MEPOJX3EGN3BLBTLEYXVHYCN3AVA7IOE772F3XGI6VNZHAP6GX5R";

    fn pubkey() -> [u8; 32] {
        hex::decode(PUBKEY).unwrap().try_into().unwrap()
    }

    #[test]
    fn encode_known_vector() {
        let addr = Address::from_public_key(&pubkey());
        assert_eq!(addr.to_string(), ADDR);
        assert_eq!(addr.version(), ACCOUNT_VERSION);
        assert_eq!(addr.public_key(), pubkey());
    }

    #[test]
    fn decode_known_vector() {
        let addr: Address = "LADSUJQLIKT4WBBLGLJ6Q36DEBJ6KFBQIIABD6B3ZWF7NIE4RIZURI53".parse().unwrap();
        assert_eq!(
            hex::encode(addr.as_bytes()),
            "58072a260b42a7cb042b32d3e86fc32053e51430420011f83bcd8bf6a09c8a3348a3bb"
        );
    }

    #[test]
    fn zero_key() {
        let addr = Address::from_public_key(&[0u8; 32]);
        assert_eq!(addr.encode(), "LAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAABLIR");
    }

    #[test]
    fn lowercase_input_accepted() {
        let addr = Address::decode(&ADDR.to_ascii_lowercase()).unwrap();
        assert_eq!(addr.encode(), ADDR);
    }

    #[test]
    fn version_and_checksum_are_distinct_errors() {
        let mut raw = *Address::from_public_key(&pubkey()).as_bytes();
        raw[34] ^= 0x01;
        assert!(matches!(Address::from_bytes(&raw), Err(Error::InvalidChecksum)));

        let mut raw = *Address::from_public_key(&pubkey()).as_bytes();
        raw[0] = 0x30;
        assert!(matches!(
            Address::from_bytes(&raw),
            Err(Error::InvalidVersion { expected: ACCOUNT_VERSION, got: 0x30 })
        ));

        assert!(matches!(Address::from_bytes(&raw[..34]), Err(Error::Address(_))));
    }

    #[test]
    fn mutated_text_fails_checksum() {
        let mut chars: Vec<char> = ADDR.chars().collect();
        chars[10] = if chars[10] == 'A' { 'B' } else { 'A' };
        let mutated: String = chars.into_iter().collect();
        assert!(matches!(Address::decode(&mutated), Err(Error::InvalidChecksum)));
        assert!(!Address::is_valid(&mutated));
    }

    #[test]
    fn serde_as_string() {
        let addr = Address::decode(ADDR).unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{ADDR}\""));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
