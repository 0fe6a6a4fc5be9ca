//! Transaction builders for the two payload kinds: **invoke** and **deploy**.
//!
//! Both return unsigned [`Transaction`]s; sign them with
//! [`Transaction::sign`] or [`Transaction::sign_with`].
//!
//! ### Example
//! ```
//! use liquid_sdk::abi::{Function, Parameter, PrimitiveType};
//! use liquid_sdk::tx::{build_invoke, GasParams};
//! use liquid_sdk::wallet::Account;
//!
//! let sender = Account::from_seed(&[7u8; 32]);
//! let token = sender.create(0);
//! let mint = Function::new("mint", vec![Parameter::new("amount", PrimitiveType::Uint64)]);
//! let mut tx = build_invoke(sender, 1, &token, &mint, &["1000".into()], GasParams::default()).unwrap();
//! tx.sign().unwrap();
//! assert_eq!(tx.to, Some(token));
//! ```

use super::Transaction;
use crate::abi::{Argument, Function};
use crate::contracts::Contract;
use crate::error::Result;
use crate::wallet::Account;
use serde::{Deserialize, Serialize};

pub const DEFAULT_GAS_PRICE: u64 = 1;
pub const DEFAULT_GAS_LIMIT: u64 = 1_000_000;

/// Fee parameters carried by every transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasParams {
    pub gas_price: u64,
    pub gas_limit: u64,
}

impl GasParams {
    pub fn new(gas_price: u64, gas_limit: u64) -> Self {
        Self { gas_price, gas_limit }
    }
}

impl Default for GasParams {
    fn default() -> Self {
        Self { gas_price: DEFAULT_GAS_PRICE, gas_limit: DEFAULT_GAS_LIMIT }
    }
}

/// Call `function` on the deployed contract at `contract`.
pub fn build_invoke(
    from: Account,
    nonce: u64,
    contract: &Account,
    function: &Function,
    args: &[Argument],
    gas: GasParams,
) -> Result<Transaction> {
    let payload = function.encode(args)?.into_payload();
    Ok(Transaction::new(from, nonce, payload, Some(contract.clone()), gas.gas_price, gas.gas_limit))
}

/// Deploy `contract`, optionally running its `init` function with `init_args`.
pub fn build_deploy(
    from: Account,
    nonce: u64,
    contract: &Contract,
    init_args: Option<&[Argument]>,
    gas: GasParams,
) -> Result<Transaction> {
    let payload = contract.encode(init_args)?.into_payload();
    Ok(Transaction::new(from, nonce, payload, None, gas.gas_price, gas.gas_limit))
}
