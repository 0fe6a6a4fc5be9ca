//! JSON-RPC plumbing.
//!
//! [`Transport`] is the seam between chain semantics ([`chain::ChainClient`])
//! and the wire ([`http::HttpClient`] with the `native` feature). Anything
//! that can answer `(method, params) -> result` can drive a `ChainClient`.

use crate::error::Result;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

pub mod chain;
#[cfg(feature = "native")]
pub mod http;

pub use chain::ChainClient;
#[cfg(feature = "native")]
pub use http::{HttpClient, HttpClientBuilder};

/// A JSON-RPC request/response channel.
///
/// Implementations return the `result` member of a successful response and
/// map `error` members to [`crate::Error::Rpc`].
pub trait Transport: Send + Sync {
    fn request(&self, method: &str, params: Value) -> impl Future<Output = Result<Value>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn request(&self, method: &str, params: Value) -> impl Future<Output = Result<Value>> + Send {
        (**self).request(method, params)
    }
}

impl<T: Transport> Transport for &T {
    fn request(&self, method: &str, params: Value) -> impl Future<Output = Result<Value>> + Send {
        (**self).request(method, params)
    }
}
