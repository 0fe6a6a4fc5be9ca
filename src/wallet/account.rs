//! Ed25519 accounts.
//!
//! An [`Account`] always carries a 32-byte public key and, optionally, the
//! signing key it belongs to. Derived accounts (see [`Account::create`]) carry
//! a hash digest in place of a public key; nobody holds a private key for them,
//! so the raw bytes are kept as-is and only decompressed when verifying.

use crate::address::{Address, PUBLIC_KEY_LEN};
use crate::error::{Error, Result};
use crate::utils::hash::blake2b_256;
use crate::utils::rlp::Item;
use core::fmt::{Display, Formatter};
use core::hash::{Hash, Hasher};
use core::str::FromStr;
use ed25519_dalek::{Signature, Signer as _, SigningKey, Verifier as _, VerifyingKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Private key length: seed(32) || public key(32).
pub const PRIVATE_KEY_LEN: usize = 64;

/// Detached signature length.
pub const SIGNATURE_LEN: usize = 64;

#[derive(Clone)]
pub struct Account {
    public_key: [u8; PUBLIC_KEY_LEN],
    signing_key: Option<SigningKey>,
}

impl core::fmt::Debug for Account {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address().encode())
            .field("has_private_key", &self.has_private_key())
            .finish()
    }
}

impl Account {
    /// Build from raw key bytes: 64 bytes is a private key, 32 bytes a public key.
    pub fn from_key(key: &[u8]) -> Result<Self> {
        match key.len() {
            PRIVATE_KEY_LEN => Self::from_private_key(key),
            PUBLIC_KEY_LEN => {
                let mut pk = [0u8; PUBLIC_KEY_LEN];
                pk.copy_from_slice(key);
                Ok(Self::from_public_key(pk))
            }
            n => Err(Error::InvalidKey(format!(
                "key must be {PUBLIC_KEY_LEN} or {PRIVATE_KEY_LEN} bytes, got {n}"
            ))),
        }
    }

    /// Public-key-only account.
    pub fn from_public_key(public_key: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self { public_key, signing_key: None }
    }

    /// 64-byte `seed || public_key` keypair; the public half must match the seed.
    pub fn from_private_key(key: &[u8]) -> Result<Self> {
        let bytes: &[u8; PRIVATE_KEY_LEN] = key.try_into().map_err(|_| {
            Error::InvalidKey(format!("private key must be {PRIVATE_KEY_LEN} bytes, got {}", key.len()))
        })?;
        let signing_key = SigningKey::from_keypair_bytes(bytes)
            .map_err(|e| Error::InvalidKey(format!("keypair mismatch: {e}")))?;
        Ok(Self::from_signing_key(signing_key))
    }

    /// Deterministic keypair from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(seed))
    }

    pub fn from_signing_key(signing_key: SigningKey) -> Self {
        Self { public_key: signing_key.verifying_key().to_bytes(), signing_key: Some(signing_key) }
    }

    /// Fresh keypair from OS randomness.
    pub fn generate() -> Self {
        let mut rng = rand_core::OsRng;
        Self::from_signing_key(SigningKey::generate(&mut rng))
    }

    /// Public-key-only account from 35 address bytes.
    pub fn from_address(bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_public_key(Address::from_bytes(bytes)?.public_key()))
    }

    pub fn public_key(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.public_key
    }

    pub fn has_private_key(&self) -> bool {
        self.signing_key.is_some()
    }

    /// 64-byte `seed || public_key`, when held.
    pub fn private_key(&self) -> Option<[u8; PRIVATE_KEY_LEN]> {
        self.signing_key.as_ref().map(SigningKey::to_keypair_bytes)
    }

    pub fn address(&self) -> Address {
        Address::from_public_key(&self.public_key)
    }

    /// Detached ed25519 signature over `message`.
    pub fn sign(&self, message: &[u8]) -> Result<[u8; SIGNATURE_LEN]> {
        let key = self.signing_key.as_ref().ok_or(Error::MissingPrivateKey)?;
        Ok(key.sign(message).to_bytes())
    }

    /// Check a detached signature. Never errors: a signature of the wrong
    /// length or a public key that is not a curve point simply yields `false`.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(sig_bytes) = <&[u8; SIGNATURE_LEN]>::try_from(signature) else {
            return false;
        };
        let Ok(vk) = VerifyingKey::from_bytes(&self.public_key) else {
            return false;
        };
        vk.verify(message, &Signature::from_bytes(sig_bytes)).is_ok()
    }

    /// Derive the account created by this account at `nonce`.
    ///
    /// The key is `blake2b_256(rlp([address, nonce]))`; it has no private key.
    pub fn create(&self, nonce: u64) -> Account {
        let preimage = Item::list(vec![Item::bytes(self.address().to_vec()), Item::uint(nonce)]);
        Account::from_public_key(blake2b_256(preimage.encode()))
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.public_key == other.public_key
    }
}

impl Eq for Account {}

impl Hash for Account {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.public_key.hash(state);
    }
}

impl From<Address> for Account {
    fn from(addr: Address) -> Self {
        Account::from_public_key(addr.public_key())
    }
}

impl Display for Account {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&self.address(), f)
    }
}

impl FromStr for Account {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Ok(Address::decode(s)?.into())
    }
}

impl Serialize for Account {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        self.address().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Account {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        Address::deserialize(deserializer).map(Account::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "b66311a8a3401fe772615c610bb6d4add13d373289f6841ed3dc87ac2ec0b16d";

    fn seeded() -> Account {
        Account::from_seed(&hex::decode(SEED).unwrap().try_into().unwrap())
    }

    #[test]
    fn seed_vector() {
        let acc = seeded();
        assert_eq!(
            hex::encode(acc.public_key()),
            "cfc611ee4df64337615866b262f53e04dd82a0fa1c4fff45ddcc8f55b9381fe3"
        );
        assert_eq!(acc.to_string(), "LDH4MEPOJX3EGN3BLBTLEYXVHYCN3AVA7IOE772F3XGI6VNZHAP6GX5R");
        assert!(acc.has_private_key());
    }

    #[test]
    fn key_length_dispatch() {
        let acc = seeded();
        let sk = acc.private_key().unwrap();
        let again = Account::from_key(&sk).unwrap();
        assert!(again.has_private_key());
        assert_eq!(again, acc);

        let public = Account::from_key(acc.public_key()).unwrap();
        assert!(!public.has_private_key());
        assert_eq!(public, acc);

        assert!(matches!(Account::from_key(&[0u8; 33]), Err(Error::InvalidKey(_))));
    }

    #[test]
    fn mismatched_keypair_rejected() {
        let mut sk = seeded().private_key().unwrap();
        sk[40] ^= 0xff;
        assert!(matches!(Account::from_private_key(&sk), Err(Error::InvalidKey(_))));
    }

    #[test]
    fn sign_known_vector() {
        let acc = seeded();
        let sig = acc.sign(b"hello").unwrap();
        assert_eq!(
            hex::encode(sig),
            "3e2dc0de95cd6851aa4eab73c3424506291ccd6884c599a12e2fe3d43188b65a\
             6634d7110add8d8c4d1cba74e42b21ed4f70e2b435f03ea6b88f827108e9ed05"
        );
        assert!(acc.verify(b"hello", &sig));
    }

    #[test]
    fn verify_is_total() {
        let acc = seeded();
        let mut sig = acc.sign(b"hello").unwrap();
        sig[0] ^= 0x01;
        assert!(!acc.verify(b"hello", &sig));
        assert!(!acc.verify(b"hello", &sig[..10]));
        assert!(!acc.verify(b"other", &acc.sign(b"hello").unwrap()));
    }

    #[test]
    fn public_only_cannot_sign() {
        let acc = Account::from_public_key(*seeded().public_key());
        assert!(matches!(acc.sign(b"x"), Err(Error::MissingPrivateKey)));
    }

    #[test]
    fn create_is_deterministic() {
        let acc = seeded();
        assert_eq!(acc.create(0).to_string(), "LB36YY2JHKXFXSESE75QIB5KWTOPFJ5G4267PJWLPY4WDLHGCBRRJWLS");
        assert_eq!(acc.create(1).to_string(), "LCPML46ZM36URNZZYESDE5KSBP44L7MPXJMK2WBHGXITKB6LWUCSAQGR");
        assert!(!acc.create(0).has_private_key());
        assert_eq!(acc.create(7), Account::from_public_key(*acc.public_key()).create(7));
    }

    #[test]
    fn generated_accounts_differ() {
        let a = Account::generate();
        let b = Account::generate();
        assert_ne!(a, b);
        let sig = a.sign(b"m").unwrap();
        assert!(a.verify(b"m", &sig));
    }

    #[test]
    fn text_roundtrip() {
        let acc = seeded();
        let parsed: Account = acc.to_string().parse().unwrap();
        assert_eq!(parsed, acc);
        assert!(!parsed.has_private_key());
        assert_eq!(Account::from_address(acc.address().as_bytes()).unwrap(), acc);
    }
}
