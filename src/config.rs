//! Client configuration: RPC endpoint, timeouts, retry and polling policy.
//!
//! Values come from code, a serde document, or the environment:
//!
//! | variable                   | field          |
//! |----------------------------|----------------|
//! | `LIQUID_RPC_URL`           | `rpc_url`      |
//! | `LIQUID_RPC_TIMEOUT_SECS`  | `timeout_secs` |
//! | `LIQUID_RPC_MAX_RETRIES`   | `max_retries`  |
//! | `LIQUID_RPC_TOKEN`         | `bearer_token` |

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const ENV_RPC_URL: &str = "LIQUID_RPC_URL";
pub const ENV_TIMEOUT_SECS: &str = "LIQUID_RPC_TIMEOUT_SECS";
pub const ENV_MAX_RETRIES: &str = "LIQUID_RPC_MAX_RETRIES";
pub const ENV_TOKEN: &str = "LIQUID_RPC_TOKEN";

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:5555";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub rpc_url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_base_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
    /// Interval between polls while waiting for a transaction.
    pub poll_interval_ms: u64,
    /// Overall deadline while waiting for a transaction.
    pub wait_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            timeout_secs: 20,
            connect_timeout_secs: 10,
            max_retries: 3,
            retry_base_ms: 250,
            bearer_token: None,
            poll_interval_ms: 1_000,
            wait_timeout_secs: 60,
        }
    }
}

impl ClientConfig {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self { rpc_url: rpc_url.into(), ..Self::default() }
    }

    /// Defaults overridden by `LIQUID_RPC_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();
        if let Some(url) = lookup(ENV_RPC_URL).filter(|v| !v.trim().is_empty()) {
            cfg.rpc_url = url.trim().to_string();
        }
        if let Some(v) = lookup(ENV_TIMEOUT_SECS) {
            cfg.timeout_secs = parse_var(ENV_TIMEOUT_SECS, &v)?;
        }
        if let Some(v) = lookup(ENV_MAX_RETRIES) {
            cfg.max_retries = parse_var(ENV_MAX_RETRIES, &v)?;
        }
        if let Some(token) = lookup(ENV_TOKEN).filter(|v| !v.is_empty()) {
            cfg.bearer_token = Some(token);
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values no client could work with.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.rpc_url).map_err(|e| Error::Config(format!("rpc_url '{}': {e}", self.rpc_url)))?;
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be positive".into()));
        }
        if self.poll_interval_ms == 0 {
            return Err(Error::Config("poll_interval_ms must be positive".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn retry_base(&self) -> Duration {
        Duration::from_millis(self.retry_base_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| Error::Config(format!("{key}='{value}': {e}")))
}
