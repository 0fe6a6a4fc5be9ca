//! Submit signed transactions and await their inclusion.
//!
//! - `send`              → broadcast through `chain.Broadcast`, return the hash
//! - `sign_and_send`     → sign with a [`Signer`], then `send`
//! - `send_and_wait`     → `send`, then poll `chain.GetTransaction` (feature `native`)

use crate::error::Result;
use crate::rpc::{ChainClient, Transport};
use crate::tx::Transaction;
use crate::wallet::Signer;
use tracing::debug;

#[cfg(feature = "native")]
use crate::types::TransactionData;
#[cfg(feature = "native")]
use std::time::Duration;

/// Broadcast `tx` and return its hash (bare hex).
///
/// The node's reported hash wins; the locally computed one is used when the
/// node leaves it empty.
pub async fn send<T: Transport>(chain: &ChainClient<T>, tx: &Transaction) -> Result<String> {
    let res = chain.broadcast(tx).await?;
    let hash = if res.hash.is_empty() { tx.hash_hex() } else { res.hash };
    debug!(%hash, nonce = tx.nonce, "transaction accepted");
    Ok(hash)
}

/// Sign `tx` with `signer` (which must hold the sender's key) and broadcast it.
pub async fn sign_and_send<T: Transport, S: Signer + ?Sized>(
    chain: &ChainClient<T>,
    tx: &mut Transaction,
    signer: &S,
) -> Result<String> {
    tx.sign_with(signer)?;
    send(chain, tx).await
}

/// Convenience: send → wait until the node has indexed the transaction.
///
/// Returns `(tx_hash, indexed_transaction)`.
#[cfg(feature = "native")]
pub async fn send_and_wait<T: Transport>(
    chain: &ChainClient<T>,
    tx: &Transaction,
    poll_every: Duration,
    timeout: Duration,
) -> Result<(String, TransactionData)> {
    let hash = send(chain, tx).await?;
    let indexed = chain.wait_for_transaction(&hash, poll_every, timeout).await?;
    Ok((hash, indexed))
}
