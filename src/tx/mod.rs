//! Transactions: construction, signing, identifiers and the JSON view.
//!
//! Lifecycle: build unsigned ([`Transaction::new`] or [`build`]) → sign
//! ([`Transaction::sign`], [`Transaction::sign_with`] or adopt an external
//! signature with [`Transaction::sign_with_signature`]) → serialize with
//! [`Transaction::to_bytes`] → hand the bytes to [`send`].

use crate::error::{Error, Result};
use crate::utils::bytes::{hex_decode, hex_plain, to_array};
use crate::utils::hash::blake2b_256;
use crate::wallet::{Account, Signer, SIGNATURE_LEN};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

pub mod build;
pub mod encode;
pub mod send;

pub use build::{build_deploy, build_invoke, GasParams};
pub use encode::NULL_RECIPIENT;

/// Wire format version written by this crate.
pub const TRANSACTION_VERSION: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub version: u64,
    pub from: Account,
    pub nonce: u64,
    pub payload: Vec<Option<Vec<u8>>>,
    pub to: Option<Account>,
    pub gas_price: u64,
    pub gas_limit: u64,
    pub signature: Option<[u8; SIGNATURE_LEN]>,
}

impl Transaction {
    /// Unsigned transaction at the current version. Empty payload entries become `None`.
    pub fn new(
        from: Account,
        nonce: u64,
        payload: Vec<Option<Vec<u8>>>,
        to: Option<Account>,
        gas_price: u64,
        gas_limit: u64,
    ) -> Self {
        Self {
            version: TRANSACTION_VERSION,
            from,
            nonce,
            payload: normalize_payload(payload),
            to,
            gas_price,
            gas_limit,
            signature: None,
        }
    }

    /// blake2b-256 of the encoding without the signature; the signed message.
    pub fn signature_hash(&self) -> [u8; 32] {
        blake2b_256(self.to_bytes(false))
    }

    /// Self-sign with the sender's private key.
    pub fn sign(&mut self) -> Result<[u8; SIGNATURE_LEN]> {
        let sig = self.from.sign(&self.signature_hash())?;
        self.signature = Some(sig);
        Ok(sig)
    }

    /// Sign through an external signer holding the sender's key.
    pub fn sign_with<S: Signer + ?Sized>(&mut self, signer: &S) -> Result<[u8; SIGNATURE_LEN]> {
        if signer.public_key() != *self.from.public_key() {
            return Err(Error::InvalidKey("signer key does not match transaction sender".into()));
        }
        let sig = signer.sign(&self.signature_hash())?;
        self.sign_with_signature(&sig)?;
        Ok(sig)
    }

    /// Adopt an externally produced signature after verifying it. A rejected
    /// signature leaves the transaction unchanged.
    pub fn sign_with_signature(&mut self, signature: &[u8]) -> Result<()> {
        if !self.from.verify(&self.signature_hash(), signature) {
            debug!(sender = %self.from, "rejected transaction signature");
            return Err(Error::InvalidSignature);
        }
        self.signature = Some(to_array(signature)?);
        Ok(())
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Transaction identifier: blake2b-256 of the full encoding.
    pub fn hash(&self) -> [u8; 32] {
        blake2b_256(self.to_bytes(true))
    }

    /// Identifier as bare lowercase hex, the form nodes index by.
    pub fn hash_hex(&self) -> String {
        hex_plain(self.hash())
    }
}

pub(crate) fn normalize_payload(payload: Vec<Option<Vec<u8>>>) -> Vec<Option<Vec<u8>>> {
    payload.into_iter().map(|p| p.filter(|b| !b.is_empty())).collect()
}

// ------------------------------ JSON view ------------------------------------

/// JSON view: numbers as decimal strings, accounts as base32 text, bytes as hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionJson {
    pub version: u64,
    pub from: String,
    pub nonce: String,
    pub payload: Vec<Option<String>>,
    pub to: Option<String>,
    pub gas_price: String,
    pub gas_limit: String,
    pub signature: Option<String>,
}

impl From<&Transaction> for TransactionJson {
    fn from(tx: &Transaction) -> Self {
        Self {
            version: tx.version,
            from: tx.from.to_string(),
            nonce: tx.nonce.to_string(),
            payload: tx.payload.iter().map(|p| p.as_ref().map(hex_plain)).collect(),
            to: tx.to.as_ref().map(Account::to_string),
            gas_price: tx.gas_price.to_string(),
            gas_limit: tx.gas_limit.to_string(),
            signature: tx.signature.map(hex_plain),
        }
    }
}

impl TryFrom<TransactionJson> for Transaction {
    type Error = Error;
    fn try_from(j: TransactionJson) -> Result<Self> {
        let payload = j
            .payload
            .iter()
            .map(|p| p.as_deref().map(hex_decode).transpose())
            .collect::<Result<Vec<_>>>()?;
        let mut tx = Transaction {
            version: j.version,
            from: j.from.parse()?,
            nonce: parse_u64("nonce", &j.nonce)?,
            payload: normalize_payload(payload),
            to: j.to.as_deref().map(str::parse).transpose()?,
            gas_price: parse_u64("gasPrice", &j.gas_price)?,
            gas_limit: parse_u64("gasLimit", &j.gas_limit)?,
            signature: None,
        };
        if let Some(sig) = j.signature.as_deref() {
            tx.sign_with_signature(&hex_decode(sig)?)?;
        }
        Ok(tx)
    }
}

fn parse_u64(field: &str, s: &str) -> Result<u64> {
    s.trim().parse::<u64>().map_err(|e| Error::ValueRange(format!("{field} '{s}': {e}")))
}

impl Serialize for Transaction {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        TransactionJson::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Transaction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let j = TransactionJson::deserialize(deserializer)?;
        Transaction::try_from(j).map_err(serde::de::Error::custom)
    }
}
