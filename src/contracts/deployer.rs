//! Contract **deployer** (header + code envelope).
//!
//! Builds a deploy transaction around a [`Contract`] envelope, signs it,
//! submits it and optionally waits until the node has indexed it.
//!
//! The contract's address is known before submission: it is derived from the
//! sender and the nonce used for the deployment (see [`Contract::deploy_address`]).

use crate::abi::Argument;
use crate::contracts::Contract;
use crate::error::Result;
use crate::rpc::{ChainClient, Transport};
use crate::tx::build::{build_deploy, GasParams};
use crate::tx::send::sign_and_send;
use crate::tx::Transaction;
use crate::wallet::{Account, Signer};
use std::time::Duration;
use tracing::info;

#[cfg(feature = "native")]
use crate::types::TransactionData;

/// Options for a deploy (write) transaction.
#[derive(Debug, Clone, Copy)]
pub struct DeployOptions {
    /// Taken from `chain.GetAccount` when `None`.
    pub nonce: Option<u64>,
    pub gas: GasParams,
    /// Poll frequency while waiting for the transaction.
    pub poll_every: Duration,
    /// Overall wait timeout.
    pub timeout: Duration,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            nonce: None,
            gas: GasParams::default(),
            poll_every: Duration::from_secs(1),
            timeout: Duration::from_secs(60),
        }
    }
}

impl DeployOptions {
    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn with_gas(mut self, gas: GasParams) -> Self {
        self.gas = gas;
        self
    }
}

/// Result of a submitted deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub hash: String,
    /// Address the contract lives at once the transaction executes.
    pub address: Account,
    pub nonce: u64,
}

/// Deployer bound to a chain client.
#[derive(Debug, Clone)]
pub struct Deployer<'c, T> {
    chain: &'c ChainClient<T>,
}

impl<'c, T: Transport> Deployer<'c, T> {
    pub fn new(chain: &'c ChainClient<T>) -> Self {
        Self { chain }
    }

    /// Build a deploy transaction (unsigned).
    pub fn build_tx(
        &self,
        from: Account,
        nonce: u64,
        contract: &Contract,
        init_args: Option<&[Argument]>,
        gas: GasParams,
    ) -> Result<Transaction> {
        build_deploy(from, nonce, contract, init_args, gas)
    }

    /// Deploy: resolve nonce → build → sign → send.
    pub async fn deploy<S: Signer + ?Sized>(
        &self,
        signer: &S,
        contract: &Contract,
        init_args: Option<&[Argument]>,
        opts: DeployOptions,
    ) -> Result<Deployment> {
        let from = Account::from_public_key(signer.public_key());
        let nonce = match opts.nonce {
            Some(n) => n,
            None => self.chain.next_nonce(&from).await?,
        };
        let address = Contract::deploy_address(&from, nonce);
        let mut tx = self.build_tx(from, nonce, contract, init_args, opts.gas)?;
        let hash = sign_and_send(self.chain, &mut tx, signer).await?;
        info!(%hash, contract = %address, nonce, "contract deployment submitted");
        Ok(Deployment { hash, address, nonce })
    }

    /// Deploy, then wait until the node has indexed the transaction.
    #[cfg(feature = "native")]
    pub async fn deploy_and_wait<S: Signer + ?Sized>(
        &self,
        signer: &S,
        contract: &Contract,
        init_args: Option<&[Argument]>,
        opts: DeployOptions,
    ) -> Result<(Deployment, TransactionData)> {
        let deployment = self.deploy(signer, contract, init_args, opts).await?;
        let indexed = self.chain.wait_for_transaction(&deployment.hash, opts.poll_every, opts.timeout).await?;
        Ok((deployment, indexed))
    }
}

// ---------------------------------- Tests ------------------------------------
