//! Liquid SDK (Rust).
//!
//! Client-side toolkit for a smart-contract chain whose wire format is RLP:
//!
//! - [`utils::rlp`]: recursive length-prefixed codec (byte strings and lists)
//! - [`abi`]: primitive value codec, parameters, functions/events, contract headers
//! - [`wallet`]: ed25519 accounts, base-32 checksummed addresses, pluggable signers
//! - [`contracts`]: the header + code envelope, deployer and contract client
//! - [`tx`]: transaction construction, signing, hashing and broadcast
//! - [`rpc`]: JSON-RPC transport and the typed `chain.*` client
//!
//! ## Quickstart
//! ```
//! use liquid_sdk::abi::{Argument, Function, Header, Parameter, PrimitiveType};
//! use liquid_sdk::contracts::Contract;
//! use liquid_sdk::tx::{build_deploy, GasParams};
//! use liquid_sdk::wallet::Account;
//!
//! let header = Header::new(
//!     1,
//!     vec![Function::new("init", vec![Parameter::new("start", PrimitiveType::Uint64)])],
//!     vec![],
//! )?;
//! let contract = Contract::new(header, vec![0x00, 0x61, 0x73, 0x6d]);
//! let owner = Account::from_seed(&[1u8; 32]);
//!
//! let mut tx = build_deploy(owner.clone(), 0, &contract, Some(&[Argument::from("5")][..]), GasParams::default())?;
//! tx.sign()?;
//! let raw = tx.to_bytes(true);
//! assert_eq!(liquid_sdk::Transaction::from_bytes(&raw)?, tx);
//! println!("contract will live at {}", Contract::deploy_address(&owner, 0));
//! # Ok::<(), liquid_sdk::Error>(())
//! ```

pub mod abi;
pub mod address;
pub mod config;
pub mod contracts;
pub mod error;
pub mod rpc;
pub mod tx;
pub mod types;
pub mod utils;
pub mod version;
pub mod wallet;

pub use abi::{Argument, Event, Function, Header, Parameter, PrimitiveType};
pub use address::Address;
pub use config::ClientConfig;
pub use contracts::{Contract, ContractClient, Deployer};
pub use error::{Error, Result};
pub use rpc::{ChainClient, Transport};
pub use tx::Transaction;
pub use wallet::{Account, Signer, Wallet};

#[cfg(feature = "native")]
pub use rpc::HttpClient;
