//! Wallet module: ed25519 accounts and pluggable signers.
//!
//! The address format is:
//!
//! ```text
//! bytes   = 0x58 || pubkey(32) || crc16_xmodem(0x58 || pubkey) (LE)
//! address = base32_nopad(bytes)
//! ```
//!
//! The `Wallet` wraps a pluggable [`Signer`]; [`Account`] is the in-process
//! implementation.
//!
//! ## Examples
//! ```
//! use liquid_sdk::wallet::{Account, Wallet};
//! let w = Wallet::new(Account::from_seed(&[1u8; 32]));
//! assert!(w.address().to_string().starts_with('L'));
//! let sig = w.sign(b"hello")?;
//! assert!(w.account().verify(b"hello", &sig));
//! # Ok::<(), liquid_sdk::error::Error>(())
//! ```
use crate::address::{Address, PUBLIC_KEY_LEN};
use crate::error::Result;
use std::sync::Arc;

pub mod account;
pub mod signer;

pub use account::{Account, PRIVATE_KEY_LEN, SIGNATURE_LEN};
pub use signer::Signer;

/// Convenience wrapper around a signer providing address derivation and helpers.
#[derive(Clone)]
pub struct Wallet {
    public_key: [u8; PUBLIC_KEY_LEN],
    address: Address,
    signer: Arc<dyn Signer>,
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet").field("address", &self.address.encode()).finish()
    }
}

impl Wallet {
    /// Construct from any signer implementation.
    pub fn new<S: Signer + 'static>(signer: S) -> Self {
        let public_key = signer.public_key();
        Self { public_key, address: Address::from_public_key(&public_key), signer: Arc::new(signer) }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn public_key(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.public_key
    }

    /// Public-key-only account for this wallet; used as a transaction sender.
    pub fn account(&self) -> Account {
        Account::from_public_key(self.public_key)
    }

    pub fn sign(&self, message: &[u8]) -> Result<[u8; SIGNATURE_LEN]> {
        self.signer.sign(message)
    }
}

impl Signer for Wallet {
    fn public_key(&self) -> [u8; PUBLIC_KEY_LEN] {
        self.public_key
    }

    fn sign(&self, message: &[u8]) -> Result<[u8; SIGNATURE_LEN]> {
        self.signer.sign(message)
    }
}
