use anyhow::{anyhow, Context, Result};
use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://backend:8001";
pub const DEFAULT_BIND: &str = "0.0.0.0:8000";

#[derive(Debug, Clone)]
pub struct UiConfig {
    pub backend_url: String,
    pub bind_addr: SocketAddr,
    pub backend_timeout: Duration,
}

impl UiConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url: String = load(&lookup, "BACKEND_URL", DEFAULT_BACKEND_URL)?;

        Ok(Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            bind_addr: load(&lookup, "UI_BIND", DEFAULT_BIND)?,
            backend_timeout: Duration::from_millis(load(&lookup, "BACKEND_TIMEOUT_MS", "30000")?),
        })
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
