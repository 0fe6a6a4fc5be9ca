//! Typed client for the node's `chain.*` JSON-RPC namespace.
//!
//! | method                  | params                                   |
//! |-------------------------|------------------------------------------|
//! | `chain.Broadcast`       | `{rawTx}` (base64 of the signed bytes)   |
//! | `chain.GetAccount`      | `{address}`                              |
//! | `chain.GetTransaction`  | `{hash}`                                 |
//! | `chain.Call`            | `{address, method, args, height}`        |
//! | `chain.GetBlockByHeight`| `{height}`                               |
//! | `chain.GetLatestBlock`  | `{}`                                     |
//! | `chain.GetContract`     | `{address}`                              |

use crate::abi::Argument;
use crate::error::{Error, Result, RpcErrorObj};
use crate::rpc::Transport;
use crate::tx::Transaction;
use crate::types::{
    AccountInfo, Block, BroadcastResponse, CallResponse, ContractResponse, GetAccountResponse, GetBlockResponse,
    GetTransactionResponse, TransactionData,
};
use crate::wallet::Account;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone)]
pub struct ChainClient<T> {
    transport: T,
}

impl<T: Transport> ChainClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_inner(self) -> T {
        self.transport
    }

    async fn request<R: DeserializeOwned>(&self, method: &str, params: Value) -> Result<R> {
        let value = self.transport.request(method, params).await?;
        serde_json::from_value(value).map_err(|e| Error::RpcResponse(format!("{method}: {e}")))
    }

    /// Submit signed transaction bytes. A non-zero result code is an error carrying the node's log.
    #[instrument(level = "debug", skip_all, fields(bytes = raw.len()))]
    pub async fn broadcast_raw(&self, raw: &[u8]) -> Result<BroadcastResponse> {
        let raw_tx = base64::engine::general_purpose::STANDARD.encode(raw);
        let res: BroadcastResponse = self.request("chain.Broadcast", json!({ "rawTx": raw_tx })).await?;
        if res.code != 0 {
            debug!(code = res.code, log = %res.log, "broadcast rejected");
            return Err(Error::Rpc(RpcErrorObj::new(res.code, res.log, None)));
        }
        Ok(res)
    }

    /// Submit a transaction in its full wire form.
    pub async fn broadcast(&self, tx: &Transaction) -> Result<BroadcastResponse> {
        if !tx.is_signed() {
            warn!(hash = %tx.hash_hex(), "broadcasting an unsigned transaction");
        }
        self.broadcast_raw(&tx.to_bytes(true)).await
    }

    #[instrument(level = "debug", skip(self, address), fields(address = %address))]
    pub async fn get_account(&self, address: &Account) -> Result<AccountInfo> {
        let res: GetAccountResponse =
            self.request("chain.GetAccount", json!({ "address": address.to_string() })).await?;
        Ok(res.account)
    }

    /// Nonce to use for the next transaction from `address`, as reported by the node.
    pub async fn next_nonce(&self, address: &Account) -> Result<u64> {
        Ok(self.get_account(address).await?.nonce)
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn get_transaction(&self, hash: &str) -> Result<TransactionData> {
        let res: GetTransactionResponse = self.request("chain.GetTransaction", json!({ "hash": hash })).await?;
        Ok(res.transaction)
    }

    /// Read-only execution of `method` on the contract at `address`.
    /// `height = None` evaluates against the latest state.
    #[instrument(level = "debug", skip(self, address, args), fields(address = %address))]
    pub async fn call(
        &self,
        address: &Account,
        method: &str,
        args: &[Argument],
        height: Option<u64>,
    ) -> Result<CallResponse> {
        let args: Vec<String> = args.iter().map(Argument::to_string).collect();
        self.request(
            "chain.Call",
            json!({
                "address": address.to_string(),
                "method": method,
                "args": args,
                "height": height.unwrap_or(0),
            }),
        )
        .await
    }

    pub async fn get_block_by_height(&self, height: u64) -> Result<Block> {
        let res: GetBlockResponse = self.request("chain.GetBlockByHeight", json!({ "height": height })).await?;
        Ok(res.block)
    }

    pub async fn get_latest_block(&self) -> Result<Block> {
        let res: GetBlockResponse = self.request("chain.GetLatestBlock", json!({})).await?;
        Ok(res.block)
    }

    #[instrument(level = "debug", skip(self, address), fields(address = %address))]
    pub async fn get_contract(&self, address: &Account) -> Result<ContractResponse> {
        self.request("chain.GetContract", json!({ "address": address.to_string() })).await
    }
}

#[cfg(feature = "native")]
mod wait {
    use super::*;
    use std::time::Duration;
    use tokio::time::{sleep, Instant};

    impl<T: Transport> ChainClient<T> {
        /// Poll `chain.GetTransaction` until the node knows `hash` or `timeout` elapses.
        ///
        /// "Not found" answers keep polling; any other error is returned.
        #[instrument(level = "debug", skip(self))]
        pub async fn wait_for_transaction(
            &self,
            hash: &str,
            poll_every: Duration,
            timeout: Duration,
        ) -> Result<TransactionData> {
            let deadline = Instant::now() + timeout;
            loop {
                match self.get_transaction(hash).await {
                    Ok(tx) if !tx.hash.is_empty() => return Ok(tx),
                    Ok(_) => debug!("transaction not indexed yet"),
                    Err(e) if is_not_found(&e) => debug!(error = %e, "transaction not found yet"),
                    Err(e) => return Err(e),
                }
                let now = Instant::now();
                if now >= deadline {
                    return Err(Error::Timeout("waiting for transaction"));
                }
                sleep(std::cmp::min(poll_every, deadline - now)).await;
            }
        }
    }

    fn is_not_found(e: &Error) -> bool {
        match e {
            Error::Rpc(obj) => obj.message.to_ascii_lowercase().contains("not found"),
            Error::RpcResponse(_) => true,
            _ => false,
        }
    }
}
