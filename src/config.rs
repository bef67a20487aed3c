//! Service Configuration
//!
//! All settings come from environment variables read once at startup. Unset
//! variables fall back to defaults; malformed ones abort startup.

use crate::engine::client::EngineSettings;
use crate::engine::connection::{DelayStrategy, RetryPolicy};
use anyhow::{anyhow, Context, Result};
use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_ENGINE_HOST: &str = "http://elasticsearch-service:9567";
pub const DEFAULT_INDEX: &str = "wikipedia_india";
pub const DEFAULT_BIND: &str = "0.0.0.0:8001";

/// Upper bound for the exponential strategy's delay.
const MAX_EXPONENTIAL_DELAY: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub engine_host: String,
    pub index: String,
    pub bind_addr: SocketAddr,
    pub connect_attempts: u32,
    pub connect_delay: Duration,
    pub retry_strategy: RetryStrategyKind,
    pub request_timeout: Duration,
    pub ensure_index: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryStrategyKind {
    Fixed,
    Exponential,
}

impl FromStr for RetryStrategyKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(RetryStrategyKind::Fixed),
            "exponential" => Ok(RetryStrategyKind::Exponential),
            other => Err(format!("unknown retry strategy '{}'", other)),
        }
    }
}

impl BackendConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let connect_attempts: u32 = load(&lookup, "ES_CONNECT_ATTEMPTS", "5")?;
        if connect_attempts == 0 {
            return Err(anyhow!("ES_CONNECT_ATTEMPTS must be at least 1"));
        }

        Ok(Self {
            engine_host: load(&lookup, "ELASTICSEARCH_HOST", DEFAULT_ENGINE_HOST)?,
            index: load(&lookup, "ELASTICSEARCH_INDEX", DEFAULT_INDEX)?,
            bind_addr: load(&lookup, "BACKEND_BIND", DEFAULT_BIND)?,
            connect_attempts,
            connect_delay: Duration::from_millis(load(&lookup, "ES_CONNECT_DELAY_MS", "5000")?),
            retry_strategy: load(&lookup, "ES_RETRY_STRATEGY", "fixed")?,
            request_timeout: Duration::from_millis(load(
                &lookup,
                "ES_REQUEST_TIMEOUT_MS",
                "30000",
            )?),
            ensure_index: load(&lookup, "ES_ENSURE_INDEX", "false")?,
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        let delay = match self.retry_strategy {
            RetryStrategyKind::Fixed => DelayStrategy::Fixed(self.connect_delay),
            RetryStrategyKind::Exponential => DelayStrategy::Exponential {
                initial: self.connect_delay,
                max: MAX_EXPONENTIAL_DELAY.max(self.connect_delay),
                jitter: self.connect_delay / 10,
            },
        };

        RetryPolicy {
            max_attempts: self.connect_attempts,
            delay,
        }
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings::for_host(&self.engine_host, self.request_timeout)
    }
}

fn load<F, T>(lookup: &F, key: &str, default: &str) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        tracing::info!("{} not set, using default: {}", key, default);
        default.to_string()
    });

    raw.trim()
        .parse()
        .map_err(|e: T::Err| anyhow!("{}", e))
        .with_context(|| format!("Invalid value for {}: {:?}", key, raw))
}
