//! HTTP client for the search backend. No retries happen here.

use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Why a backend call produced no displayable result. The `Display` text is
/// what ends up on the page.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Connection refused, timeout, non-2xx status or a body that is not JSON.
    #[error("Error contacting backend: {0}")]
    Request(#[from] reqwest::Error),

    #[error("An error occurred: {0}")]
    Format(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct BackendClient {
    base_url: String,
    client: reqwest::Client,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn search(&self, query: &str) -> Result<Value, BackendError> {
        self.post_json("/search", &json!({ "query": query })).await
    }

    pub async fn insert(&self, text: &str) -> Result<Value, BackendError> {
        self.post_json("/insert", &json!({ "text": text })).await
    }

    async fn post_json<T: Serialize>(&self, path: &str, payload: &T) -> Result<Value, BackendError> {
        let url = format!("{}{}", self.base_url, path);

        let resp = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;

        Ok(resp.json::<Value>().await?)
    }
}

/// Heading, blank line, then the backend's JSON pretty-printed.
pub fn format_result(heading: &str, result: &Value) -> Result<String, BackendError> {
    let pretty = serde_json::to_string_pretty(result)?;
    Ok(format!("{}\n\n{}", heading, pretty))
}
