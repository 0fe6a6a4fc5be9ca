//! Chain response types returned by the node's `chain.*` methods.
//!
//! These models are intentionally lenient:
//! - Numeric fields accept either JSON numbers or decimal strings (the node
//!   reports nonces and gas amounts as strings).
//! - Missing fields fall back to their defaults.
//! - Unknown fields from the node are preserved via `#[serde(flatten)]`.
//!
//! Hashes are bare lowercase hex strings; accounts are base-32 address text.

use crate::abi::Header;
use crate::contracts::Contract;
use crate::error::{Error, Result};
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bare lowercase hex transaction or block hash.
pub type Hash = String;

/// Result of `chain.Broadcast`. A non-zero `code` is a rejection described by `log`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastResponse {
    #[serde(default)]
    pub hash: Hash,
    #[serde(default, deserialize_with = "lenient::i64")]
    pub code: i64,
    #[serde(default)]
    pub log: String,
    #[serde(default)]
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Account state from `chain.GetAccount`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    #[serde(default, deserialize_with = "lenient::u64")]
    pub nonce: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(default)]
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl AccountInfo {
    /// Whether the account holds contract code.
    pub fn is_contract(&self) -> bool {
        self.contract_hash.as_deref().is_some_and(|h| !h.is_empty() && h.bytes().any(|b| b != b'0'))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAccountResponse {
    pub account: AccountInfo,
}

/// One decoded call argument as reported by the node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedValue {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub value: String,
}

/// Decoded payload of a transaction: the invoked function and its arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub args: Vec<NamedValue>,
}

/// Event emitted during execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxEvent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contract: String,
    #[serde(default)]
    pub attributes: Vec<NamedValue>,
}

impl TxEvent {
    /// Value of the attribute called `name`, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter().find(|a| a.name == name).map(|a| a.value.as_str())
    }
}

/// Execution receipt embedded in [`TransactionData`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    #[serde(default)]
    pub transaction: Hash,
    #[serde(default)]
    pub result: String,
    #[serde(default, deserialize_with = "lenient::u64")]
    pub gas_used: u64,
    #[serde(default, deserialize_with = "lenient::i64")]
    pub code: i64,
    #[serde(default)]
    pub events: Vec<TxEvent>,
    #[serde(default)]
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Receipt {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// Transaction as indexed by the node (`chain.GetTransaction`, block bodies).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionData {
    #[serde(default)]
    pub hash: Hash,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient::u64")]
    pub height: u64,
    #[serde(default, deserialize_with = "lenient::u64")]
    pub version: u64,
    #[serde(default)]
    pub sender: String,
    #[serde(default, deserialize_with = "lenient::u64")]
    pub nonce: u64,
    #[serde(default)]
    pub receiver: String,
    #[serde(default)]
    pub payload: TxPayload,
    #[serde(default, deserialize_with = "lenient::u64")]
    pub gas_price: u64,
    #[serde(default, deserialize_with = "lenient::u64")]
    pub gas_limit: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<Receipt>,
    #[serde(default)]
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTransactionResponse {
    pub transaction: TransactionData,
}

/// Block view from `chain.GetBlockByHeight` / `chain.GetLatestBlock`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(default)]
    pub hash: Hash,
    #[serde(default, deserialize_with = "lenient::string")]
    pub time: String,
    #[serde(default, deserialize_with = "lenient::u64")]
    pub height: u64,
    #[serde(default)]
    pub parent: Hash,
    #[serde(default)]
    pub state_root: Hash,
    #[serde(default)]
    pub transaction_root: Hash,
    #[serde(default)]
    pub receipt_root: Hash,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub transactions: Vec<TransactionData>,
    #[serde(default)]
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetBlockResponse {
    pub block: Block,
}

/// Result of a read-only `chain.Call`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallResponse {
    #[serde(default, deserialize_with = "lenient::string")]
    pub result: String,
    #[serde(default, deserialize_with = "lenient::i64")]
    pub code: i64,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub events: Vec<TxEvent>,
    #[serde(default)]
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Deployed contract from `chain.GetContract`: JSON header plus base64 code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractResponse {
    pub header: Header,
    #[serde(default)]
    pub code: String,
}

impl ContractResponse {
    /// Decode the code blob (standard base64).
    pub fn code_bytes(&self) -> Result<Vec<u8>> {
        Ok(base64::engine::general_purpose::STANDARD.decode(self.code.trim())?)
    }

    pub fn into_contract(self) -> Result<Contract> {
        let code = self.code_bytes()?;
        Ok(Contract::new(self.header, code))
    }
}

impl TryFrom<ContractResponse> for Contract {
    type Error = Error;
    fn try_from(r: ContractResponse) -> Result<Self> {
        r.into_contract()
    }
}

/// Deserializers tolerating the node's mix of strings, numbers and nulls.
mod lenient {
    use serde::de::{DeserializeOwned, Error as _};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn u64<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        match Value::deserialize(d)? {
            Value::Null => Ok(0),
            Value::Number(n) => n.as_u64().ok_or_else(|| D::Error::custom(format!("not a u64: {n}"))),
            Value::String(s) if s.is_empty() => Ok(0),
            Value::String(s) => s.trim().parse().map_err(|e| D::Error::custom(format!("'{s}': {e}"))),
            other => Err(D::Error::custom(format!("expected integer, got {other}"))),
        }
    }

    pub fn i64<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        match Value::deserialize(d)? {
            Value::Null => Ok(0),
            Value::Number(n) => n.as_i64().ok_or_else(|| D::Error::custom(format!("not an i64: {n}"))),
            Value::String(s) if s.is_empty() => Ok(0),
            Value::String(s) => s.trim().parse().map_err(|e| D::Error::custom(format!("'{s}': {e}"))),
            other => Err(D::Error::custom(format!("expected integer, got {other}"))),
        }
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Null => String::new(),
            Value::String(s) => s,
            other => other.to_string(),
        })
    }

    pub fn vec<'de, D: Deserializer<'de>, T: DeserializeOwned>(d: D) -> Result<Vec<T>, D::Error> {
        Option::<Vec<T>>::deserialize(d).map(Option::unwrap_or_default)
    }
}
