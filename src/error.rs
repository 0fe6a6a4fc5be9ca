use core::fmt;
use thiserror::Error;

/// Common result alias for the SDK.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Structured JSON-RPC error object (or a node-side rejection carrying a code and log).
#[derive(Debug, Clone, PartialEq)]
pub struct RpcErrorObj {
    pub code: i64,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl RpcErrorObj {
    pub fn new(code: i64, message: impl Into<String>, data: Option<serde_json::Value>) -> Self {
        Self { code, message: message.into(), data }
    }
}

impl fmt::Display for RpcErrorObj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(d) = &self.data {
            write!(f, "RPC error {}: {} (data={})", self.code, self.message, d)
        } else {
            write!(f, "RPC error {}: {}", self.code, self.message)
        }
    }
}

/// Top-level SDK error.
///
/// Codec and identity failures each get their own variant so callers can tell
/// malformed input apart from, say, an address minted for another network.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    // ---- Wire codec --------------------------------------------------------
    /// Malformed nested byte shape, wrong arity, trailing bytes.
    #[error("decode error: {0}")]
    Decode(String),

    /// Primitive type code or name outside the known enumeration.
    #[error("unknown primitive type: {0}")]
    UnknownType(String),

    /// Numeric text unparsable or outside the type's range.
    #[error("value out of range: {0}")]
    ValueRange(String),

    // ---- Identity ----------------------------------------------------------
    /// Wrong key length or key material that is not a valid signing keypair.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Address version byte does not identify an account.
    #[error("invalid address version: expected 0x{expected:02x}, got 0x{got:02x}")]
    InvalidVersion { expected: u8, got: u8 },

    /// Address checksum mismatch.
    #[error("invalid address checksum")]
    InvalidChecksum,

    /// Address text or bytes of the wrong length or alphabet.
    #[error("address error: {0}")]
    Address(String),

    /// Signature failed verification against the signature hash.
    #[error("invalid signature")]
    InvalidSignature,

    /// Signing was requested from a public-key-only account.
    #[error("account has no private key")]
    MissingPrivateKey,

    // ---- ABI / Contracts ---------------------------------------------------
    /// Decoded method id disagrees with the declared function.
    #[error("method id mismatch for '{name}': expected {expected}, got {got}")]
    NameMismatch { name: String, expected: String, got: String },

    /// Argument count differs from parameter count.
    #[error("argument count mismatch: expected {expected}, got {got}")]
    ArgumentCount { expected: usize, got: usize },

    /// Function or event name could not be resolved.
    #[error("not found: {0}")]
    NotFound(String),

    /// Header validation error (duplicate names and similar).
    #[error("abi error: {0}")]
    Abi(String),

    // ---- Transport / IO ----------------------------------------------------
    /// Network error (request building, connection, DNS, etc.).
    #[error("network error: {0}")]
    Network(String),

    /// HTTP status error (non-2xx).
    #[error("http status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Timeout reached while waiting for a response or a transaction.
    #[error("timeout: {0}")]
    Timeout(&'static str),

    /// URL parse error.
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    // ---- Encoding ----------------------------------------------------------
    /// JSON (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Base64 decoding error.
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    // ---- RPC / Protocol ----------------------------------------------------
    /// JSON-RPC error response, or a non-zero node result code.
    #[error("{0}")]
    Rpc(RpcErrorObj),

    /// RPC response had an unexpected shape.
    #[error("malformed rpc response: {0}")]
    RpcResponse(String),

    /// Invalid configuration value.
    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error is likely transient and safe to retry.
    pub fn is_retryable(&self) -> bool {
        use Error::*;
        match self {
            Network(_) | Timeout(_) => true,
            HttpStatus { status, .. } => (500..=599).contains(status) || *status == 429 || *status == 408,
            // -32603 internal error and the -320xx server range are node-side.
            Rpc(e) => e.code == -32603 || (-32099..=-32000).contains(&e.code),
            Decode(_)
            | UnknownType(_)
            | ValueRange(_)
            | InvalidKey(_)
            | InvalidVersion { .. }
            | InvalidChecksum
            | Address(_)
            | InvalidSignature
            | MissingPrivateKey
            | NameMismatch { .. }
            | ArgumentCount { .. }
            | NotFound(_)
            | Abi(_)
            | Url(_)
            | Json(_)
            | Hex(_)
            | Base64(_)
            | RpcResponse(_)
            | Config(_) => false,
        }
    }
}

// ---- Conversions from common backends ---------------------------------------

impl From<alloy_rlp::Error> for Error {
    fn from(e: alloy_rlp::Error) -> Self {
        Error::Decode(e.to_string())
    }
}

impl From<RpcErrorObj> for Error {
    fn from(e: RpcErrorObj) -> Self {
        Error::Rpc(e)
    }
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::Timeout("http")
        } else if let Some(status) = e.status() {
            Error::HttpStatus { status: status.as_u16(), body: e.to_string() }
        } else {
            Error::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_are_retryable() {
        assert!(Error::Network("reset".into()).is_retryable());
        assert!(Error::Timeout("http").is_retryable());
        assert!(Error::HttpStatus { status: 503, body: String::new() }.is_retryable());
        assert!(Error::HttpStatus { status: 429, body: String::new() }.is_retryable());
        assert!(!Error::HttpStatus { status: 404, body: String::new() }.is_retryable());
        assert!(Error::Rpc(RpcErrorObj::new(-32000, "busy", None)).is_retryable());
        assert!(!Error::Rpc(RpcErrorObj::new(-32601, "method not found", None)).is_retryable());
    }

    #[test]
    fn codec_errors_are_not_retryable() {
        assert!(!Error::InvalidChecksum.is_retryable());
        assert!(!Error::InvalidSignature.is_retryable());
        assert!(!Error::Decode("x".into()).is_retryable());
        assert!(!Error::ArgumentCount { expected: 1, got: 2 }.is_retryable());
    }

    #[test]
    fn rpc_display_includes_data() {
        let e = RpcErrorObj::new(5, "rejected", Some(serde_json::json!("nonce")));
        assert_eq!(e.to_string(), "RPC error 5: rejected (data=\"nonce\")");
    }
}
