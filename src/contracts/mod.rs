//! Contract envelope (header + code) and the clients that deploy and call it.
//!
//! The envelope is `rlp([header_bytes, code])`. Deployment payloads carry it
//! in the third invocation slot:
//!
//! ```text
//! with init args:    (method_id("init"), rlp(args), envelope)
//! without init args: (00000000,          None,      envelope)
//! ```

use crate::abi::{Argument, Header, Invocation, ZERO_METHOD_ID};
use crate::error::Result;
use crate::utils::rlp::Item;
use crate::wallet::Account;

pub mod client;
pub mod deployer;

pub use client::{ContractClient, InvokeOptions};
pub use deployer::{DeployOptions, Deployer, Deployment};

/// Function invoked with the deployment's init arguments.
pub const INIT_FUNCTION_NAME: &str = "init";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contract {
    pub header: Header,
    pub code: Vec<u8>,
}

impl Contract {
    pub fn new(header: Header, code: impl Into<Vec<u8>>) -> Self {
        Self { header, code: code.into() }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        Item::list(vec![Item::bytes(self.header.to_bytes()), Item::bytes(self.code.clone())]).encode()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let item = Item::decode(bytes)?;
        let fields = item.expect_list(2)?;
        Ok(Self { header: Header::from_bytes(fields[0].as_bytes()?)?, code: fields[1].as_bytes()?.to_vec() })
    }

    /// Deployment invocation. `Some(args)` calls `init`, which must exist.
    pub fn encode(&self, init_args: Option<&[Argument]>) -> Result<Invocation> {
        let envelope = Some(self.to_bytes());
        match init_args {
            Some(args) => {
                let init = self.header.function(INIT_FUNCTION_NAME)?;
                Ok(Invocation { method_id: init.method_id(), args: Some(init.encode_args(args)?), contract: envelope })
            }
            None => Ok(Invocation { method_id: ZERO_METHOD_ID, args: None, contract: envelope }),
        }
    }

    /// Address the contract will live at when `creator` deploys it with `nonce`.
    pub fn deploy_address(creator: &Account, nonce: u64) -> Account {
        creator.create(nonce)
    }
}
