//! Minimal, robust JSON-RPC HTTP client with retries (reqwest).
//!
//! Features:
//! - Async `reqwest` client with sane defaults (timeouts, UA).
//! - Exponential backoff for transient failures (5xx/429/timeouts).
//! - Typed single-call API and convenient raw/batch helpers.
//! - Optional bearer auth & custom headers.
//!
//! This client is transport-only. It does not interpret chain semantics.

use crate::config::ClientConfig;
use crate::error::{Error, Result, RpcErrorObj};
use crate::rpc::Transport;
use reqwest::{header, Client, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Upper bound for a single backoff sleep.
const MAX_BACKOFF: Duration = Duration::from_secs(3);

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<Value>,
}

/// JSON-RPC 2.0 response envelope.
#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    #[serde(default)]
    id: Value,
    result: Option<T>,
    #[serde(default)]
    error: Option<RpcErrorWire>,
}

/// Error member; some nodes send the code as a string.
#[derive(Debug, Deserialize)]
struct RpcErrorWire {
    #[serde(default)]
    code: Value,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

impl From<RpcErrorWire> for RpcErrorObj {
    fn from(w: RpcErrorWire) -> Self {
        let code = w
            .code
            .as_i64()
            .or_else(|| w.code.as_str().and_then(|s| s.trim().parse().ok()))
            .unwrap_or(-32603);
        RpcErrorObj::new(code, w.message, w.data)
    }
}

impl<T> RpcResponse<T> {
    fn into_result(self) -> Result<T> {
        if let Some(err) = self.error {
            return Err(Error::Rpc(err.into()));
        }
        self.result.ok_or_else(|| Error::RpcResponse("missing result and error".into()))
    }
}

/// Builder for [`HttpClient`].
#[derive(Clone, Debug)]
pub struct HttpClientBuilder {
    endpoint: Url,
    timeout: Duration,
    connect_timeout: Duration,
    max_retries: u32,
    retry_base: Duration,
    default_headers: header::HeaderMap,
    user_agent: Option<String>,
}

impl HttpClientBuilder {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            timeout: Duration::from_secs(20),
            connect_timeout: Duration::from_secs(10),
            max_retries: 3,
            retry_base: Duration::from_millis(250),
            default_headers: header::HeaderMap::new(),
            user_agent: None,
        }
    }

    pub fn from_url_str(endpoint: &str) -> Result<Self> {
        Ok(Self::new(endpoint.parse::<Url>()?))
    }

    /// Apply endpoint, timeouts and retry policy from a [`ClientConfig`].
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut b = Self::from_url_str(&config.rpc_url)?
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .max_retries(config.max_retries)
            .retry_base(config.retry_base());
        if let Some(token) = &config.bearer_token {
            b = b.bearer_auth(token)?;
        }
        Ok(b)
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn retry_base(mut self, base: Duration) -> Self {
        self.retry_base = base;
        self
    }

    pub fn bearer_auth(mut self, token: &str) -> Result<Self> {
        let value = header::HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| Error::Config(format!("bearer token: {e}")))?;
        self.default_headers.insert(header::AUTHORIZATION, value);
        Ok(self)
    }

    pub fn header(mut self, key: header::HeaderName, value: header::HeaderValue) -> Self {
        self.default_headers.insert(key, value);
        self
    }

    pub fn user_agent(mut self, ua: &str) -> Self {
        self.user_agent = Some(ua.to_owned());
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let mut headers = self.default_headers.clone();
        headers.entry(header::CONTENT_TYPE).or_insert(header::HeaderValue::from_static("application/json"));
        let ua = self.user_agent.unwrap_or_else(crate::version::user_agent);
        let ua = header::HeaderValue::from_str(&ua).map_err(|e| Error::Config(format!("user agent: {e}")))?;
        headers.entry(header::USER_AGENT).or_insert(ua);

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(self.connect_timeout)
            .timeout(self.timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| Error::Network(format!("reqwest build: {e}")))?;

        Ok(HttpClient {
            endpoint: self.endpoint,
            client,
            max_retries: self.max_retries,
            retry_base: self.retry_base,
            id: Arc::new(AtomicU64::new(1)),
        })
    }
}

/// Async JSON-RPC HTTP client.
#[derive(Clone)]
pub struct HttpClient {
    endpoint: Url,
    client: Client,
    max_retries: u32,
    retry_base: Duration,
    id: Arc<AtomicU64>,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("endpoint", &self.endpoint)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl HttpClient {
    /// Quick constructor with defaults.
    pub fn new(endpoint: &str) -> Result<Self> {
        HttpClientBuilder::from_url_str(endpoint)?.build()
    }

    /// Create a builder for custom configuration.
    pub fn builder(endpoint: &str) -> Result<HttpClientBuilder> {
        HttpClientBuilder::from_url_str(endpoint)
    }

    /// Client configured from [`ClientConfig`].
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        HttpClientBuilder::from_config(config)?.build()
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Perform a typed JSON-RPC call with automatic retries on transient errors.
    pub async fn call<T, P>(&self, method: &str, params: P) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize,
    {
        let params_value = Some(serde_json::to_value(params)?);
        self.call_value::<T>(method, params_value).await
    }

    /// Same as [`call`](Self::call) but takes pre-built params (or `None`).
    #[instrument(level = "debug", skip(self, params), fields(endpoint = %self.endpoint))]
    pub async fn call_value<T>(&self, method: &str, params: Option<Value>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let id = self.next_id();
        let req = RpcRequest { jsonrpc: "2.0", id, method, params };
        let body = serde_json::to_vec(&req)?;
        debug!(id, bytes = body.len(), "sending rpc request");

        let mut attempt = 0;
        loop {
            match self.try_send::<T>(&body).await {
                Ok(v) => return Ok(v),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    warn!(attempt, error = %e, "transient rpc failure; retrying");
                    self.sleep_backoff(attempt).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Perform a **raw** call returning the untyped `serde_json::Value` result.
    pub async fn call_raw(&self, method: &str, params: Option<Value>) -> Result<Value> {
        self.call_value::<Value>(method, params).await
    }

    /// Execute a JSON-RPC batch. Each item is `(method, params)`.
    /// Results are returned in input order.
    #[instrument(level = "debug", skip_all, fields(endpoint = %self.endpoint, calls = calls.len()))]
    pub async fn batch(&self, calls: Vec<(&str, Option<Value>)>) -> Result<Vec<Result<Value>>> {
        if calls.is_empty() {
            return Ok(vec![]);
        }
        let reqs: Vec<RpcRequest<'_>> = calls
            .iter()
            .map(|(m, p)| RpcRequest { jsonrpc: "2.0", id: self.next_id(), method: *m, params: p.clone() })
            .collect();
        let ids: Vec<u64> = reqs.iter().map(|r| r.id).collect();
        let body = serde_json::to_vec(&reqs)?;

        let mut attempt = 0;
        loop {
            match self.try_send_batch(&body, &ids).await {
                Ok(v) => return Ok(v),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    warn!(attempt, error = %e, "transient batch failure; retrying");
                    self.sleep_backoff(attempt).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    // --------------------------- internals ----------------------------------

    fn next_id(&self) -> u64 {
        self.id.fetch_add(1, Ordering::Relaxed)
    }

    async fn post(&self, body: &[u8]) -> Result<Vec<u8>> {
        let resp = self.client.post(self.endpoint.clone()).body(body.to_vec()).send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            return Err(http_status_error(status, &bytes));
        }
        Ok(bytes.to_vec())
    }

    async fn try_send<T>(&self, body: &[u8]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        decode_response(&self.post(body).await?)
    }

    async fn try_send_batch(&self, body: &[u8], ids: &[u64]) -> Result<Vec<Result<Value>>> {
        decode_batch(&self.post(body).await?, ids)
    }

    fn backoff(&self, attempt: u32) -> Duration {
        // attempt = 0 → base, 1 → 2x, etc., capped
        let pow = 1u32.checked_shl(attempt.min(16)).unwrap_or(u32::MAX);
        self.retry_base.saturating_mul(pow).min(MAX_BACKOFF)
    }

    async fn sleep_backoff(&self, attempt: u32) {
        tokio::time::sleep(self.backoff(attempt)).await
    }
}

impl Transport for HttpClient {
    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        self.call_value::<Value>(method, Some(params)).await
    }
}

// --------------------------- helpers -----------------------------------------

fn decode_response<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let parsed: RpcResponse<T> = serde_json::from_slice(bytes)
        .map_err(|e| Error::RpcResponse(format!("{e}; body={}", truncate_body(bytes))))?;
    parsed.into_result()
}

/// Match batch responses back to request ids; servers may reorder them.
fn decode_batch(bytes: &[u8], ids: &[u64]) -> Result<Vec<Result<Value>>> {
    let parsed: Vec<RpcResponse<Value>> = serde_json::from_slice(bytes)
        .map_err(|e| Error::RpcResponse(format!("batch: {e}; body={}", truncate_body(bytes))))?;
    let mut by_id: Vec<(u64, RpcResponse<Value>)> = parsed
        .into_iter()
        .map(|r| {
            let id = r.id.as_u64().or_else(|| r.id.as_str().and_then(|s| s.parse().ok())).unwrap_or(0);
            (id, r)
        })
        .collect();
    Ok(ids
        .iter()
        .map(|id| match by_id.iter().position(|(rid, _)| rid == id) {
            Some(i) => by_id.swap_remove(i).1.into_result(),
            None => Err(Error::RpcResponse(format!("no response for request id {id}"))),
        })
        .collect())
}

fn truncate_body(bytes: &[u8]) -> String {
    const LIM: usize = 512;
    let s = String::from_utf8_lossy(bytes);
    match s.char_indices().nth(LIM) {
        Some((cut, _)) => format!("{}...[+{}B]", &s[..cut], s.len() - cut),
        None => s.into_owned(),
    }
}

fn http_status_error(status: StatusCode, body: &[u8]) -> Error {
    Error::HttpStatus { status: status.as_u16(), body: truncate_body(body) }
}

// ------------------------------ tests ----------------------------------------
