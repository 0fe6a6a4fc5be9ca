use crate::address::PUBLIC_KEY_LEN;
use crate::error::Result;
use crate::wallet::account::{Account, SIGNATURE_LEN};

/// Minimal signer interface. Anything that holds an ed25519 key (a local
/// [`Account`], a hardware device, a remote service) can sign transactions
/// through it.
pub trait Signer: Send + Sync {
    /// Raw 32-byte public key; the sender identity written into transactions.
    fn public_key(&self) -> [u8; PUBLIC_KEY_LEN];

    /// Detached 64-byte ed25519 signature over `message`.
    fn sign(&self, message: &[u8]) -> Result<[u8; SIGNATURE_LEN]>;
}

impl Signer for Account {
    fn public_key(&self) -> [u8; PUBLIC_KEY_LEN] {
        *Account::public_key(self)
    }

    fn sign(&self, message: &[u8]) -> Result<[u8; SIGNATURE_LEN]> {
        Account::sign(self, message)
    }
}

impl<S: Signer + ?Sized> Signer for std::sync::Arc<S> {
    fn public_key(&self) -> [u8; PUBLIC_KEY_LEN] {
        (**self).public_key()
    }

    fn sign(&self, message: &[u8]) -> Result<[u8; SIGNATURE_LEN]> {
        (**self).sign(message)
    }
}
