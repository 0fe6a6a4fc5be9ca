//! Transaction wire codec.
//!
//! ```text
//! [ version,
//!   [ sender_pubkey(32), nonce ],
//!   recipient_address(35) | 35 zero bytes,
//!   [ payload_0, payload_1, ... ],
//!   gas_limit,
//!   gas_price,
//!   signature(64)?            // only when encoding with the signature
//! ]
//! ```
//!
//! Integers are minimal big-endian; absent payload entries are empty strings.

use super::{normalize_payload, Transaction};
use crate::address::{ADDRESS_LEN, PUBLIC_KEY_LEN};
use crate::error::{Error, Result};
use crate::utils::bytes::to_array;
use crate::utils::rlp::Item;
use crate::wallet::Account;

/// Placeholder written for a deployment (no recipient).
pub const NULL_RECIPIENT: [u8; ADDRESS_LEN] = [0u8; ADDRESS_LEN];

impl Transaction {
    /// Wire encoding. A signature is appended only when requested and present.
    pub fn to_bytes(&self, include_signature: bool) -> Vec<u8> {
        let mut fields = vec![
            Item::uint(self.version),
            Item::list(vec![Item::bytes(self.from.public_key().to_vec()), Item::uint(self.nonce)]),
            match &self.to {
                Some(to) => Item::bytes(to.address().to_vec()),
                None => Item::bytes(NULL_RECIPIENT.to_vec()),
            },
            Item::list(
                self.payload
                    .iter()
                    .map(|p| Item::bytes(p.clone().unwrap_or_default()))
                    .collect(),
            ),
            Item::uint(self.gas_limit),
            Item::uint(self.gas_price),
        ];
        if include_signature {
            if let Some(sig) = &self.signature {
                fields.push(Item::bytes(sig.to_vec()));
            }
        }
        Item::list(fields).encode()
    }

    /// Parse the wire form. A present signature must verify.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let fields = Item::decode(bytes)?.into_list()?;
        if fields.len() != 6 && fields.len() != 7 {
            return Err(Error::Decode(format!("transaction needs 6 or 7 fields, got {}", fields.len())));
        }

        let version = fields[0].as_uint()?;
        let sender = fields[1].expect_list(2)?;
        let public_key: [u8; PUBLIC_KEY_LEN] = to_array(sender[0].as_bytes()?)
            .map_err(|_| Error::Decode("sender public key must be 32 bytes".into()))?;
        let nonce = sender[1].as_uint()?;
        let to = decode_recipient(fields[2].as_bytes()?)?;
        let payload = fields[3]
            .as_list()?
            .iter()
            .map(|item| item.as_bytes().map(|b| Some(b.to_vec())))
            .collect::<Result<Vec<_>>>()?;
        let gas_limit = fields[4].as_uint()?;
        let gas_price = fields[5].as_uint()?;

        let mut tx = Transaction {
            version,
            from: Account::from_public_key(public_key),
            nonce,
            payload: normalize_payload(payload),
            to,
            gas_price,
            gas_limit,
            signature: None,
        };
        if let Some(sig) = fields.get(6) {
            let sig = sig.as_bytes()?;
            if !sig.is_empty() {
                tx.sign_with_signature(sig)?;
            }
        }
        Ok(tx)
    }
}

fn decode_recipient(bytes: &[u8]) -> Result<Option<Account>> {
    if bytes.iter().all(|b| *b == 0) && matches!(bytes.len(), 0 | PUBLIC_KEY_LEN | ADDRESS_LEN) {
        return Ok(None);
    }
    match bytes.len() {
        PUBLIC_KEY_LEN => Ok(Some(Account::from_public_key(to_array(bytes)?))),
        _ => Account::from_address(bytes).map(Some),
    }
}
