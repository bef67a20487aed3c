//! Engine Client
//!
//! The `EngineClient` trait is the seam between this service and the search
//! engine. `HttpEngineClient` implements it over the engine's REST API with
//! `reqwest`; tests substitute in-process fakes.

use super::protocol::{self, Document, SearchResponse, ENDPOINT_PING};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Outcome of a failed engine call, before it is mapped onto the HTTP taxonomy.
#[derive(Debug, Clone, Error)]
pub enum EngineFailure {
    #[error("index '{0}' not found")]
    IndexNotFound(String),

    #[error("{error}")]
    Transport { status: Option<u16>, error: String },

    #[error("{0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for EngineFailure {
    fn from(e: reqwest::Error) -> Self {
        EngineFailure::Transport {
            status: e.status().map(|s| s.as_u16()),
            error: e.to_string(),
        }
    }
}

/// A live handle to the search engine.
#[async_trait]
pub trait EngineClient: Send + Sync {
    /// Liveness check. Never fails, only reports.
    async fn ping(&self) -> bool;

    async fn search(&self, index: &str, body: &Value) -> Result<SearchResponse, EngineFailure>;

    /// Writes `document` under its own id and waits until it is searchable.
    /// Returns the engine's raw write response.
    async fn index_document(&self, index: &str, document: &Document)
        -> Result<Value, EngineFailure>;

    async fn index_exists(&self, index: &str) -> Result<bool, EngineFailure>;

    async fn create_index(&self, index: &str, body: &Value) -> Result<(), EngineFailure>;
}

/// Builds fresh engine handles for the connection manager.
pub trait Connector: Send + Sync {
    /// Address the handles point at, for logging.
    fn address(&self) -> &str;

    fn connect(&self) -> Result<Arc<dyn EngineClient>, EngineFailure>;
}

/// Everything needed to construct an `HttpEngineClient`.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub host: String,
    pub request_timeout: Duration,
    pub basic_auth: Option<(String, String)>,
    pub accept_invalid_certs: bool,
}

impl EngineSettings {
    /// Settings for `host` with the dev-only credentials and TLS relaxations
    /// applied to `https://` hosts.
    pub fn for_host(host: &str, request_timeout: Duration) -> Self {
        let host = host.trim().trim_end_matches('/').to_string();
        let basic_auth = if host.contains("https://elastic") {
            Some(("elastic".to_string(), "changeme".to_string()))
        } else {
            None
        };
        let accept_invalid_certs = host.starts_with("https://");

        Self {
            host,
            request_timeout,
            basic_auth,
            accept_invalid_certs,
        }
    }
}

pub struct HttpConnector {
    settings: EngineSettings,
}

impl HttpConnector {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }
}

impl Connector for HttpConnector {
    fn address(&self) -> &str {
        &self.settings.host
    }

    fn connect(&self) -> Result<Arc<dyn EngineClient>, EngineFailure> {
        let client: Arc<dyn EngineClient> = Arc::new(HttpEngineClient::new(&self.settings)?);
        Ok(client)
    }
}

pub struct HttpEngineClient {
    http_client: reqwest::Client,
    base_url: String,
    basic_auth: Option<(String, String)>,
}

impl HttpEngineClient {
    pub fn new(settings: &EngineSettings) -> Result<Self, EngineFailure> {
        let http_client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .build()
            .map_err(|e| EngineFailure::Unexpected(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: settings.host.clone(),
            basic_auth: settings.basic_auth.clone(),
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http_client.request(method, url);
        match &self.basic_auth {
            Some((user, password)) => builder.basic_auth(user, Some(password)),
            None => builder,
        }
    }

    /// Turns a response into its JSON body, classifying non-2xx statuses.
    async fn read_json(resp: reqwest::Response, index: &str) -> Result<Value, EngineFailure> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(classify_error(status, &body, index));
        }

        serde_json::from_str(&body)
            .map_err(|e| EngineFailure::Unexpected(format!("malformed engine response: {}", e)))
    }
}

/// Maps a non-2xx engine reply onto an `EngineFailure`.
pub fn classify_error(status: StatusCode, body: &str, index: &str) -> EngineFailure {
    let (kind, detail) = protocol::error_detail(body);

    if status == StatusCode::NOT_FOUND
        || kind.as_deref() == Some(protocol::INDEX_NOT_FOUND_TYPE)
    {
        return EngineFailure::IndexNotFound(index.to_string());
    }

    EngineFailure::Transport {
        status: Some(status.as_u16()),
        error: detail,
    }
}

#[async_trait]
impl EngineClient for HttpEngineClient {
    async fn ping(&self) -> bool {
        match self.request(reqwest::Method::HEAD, ENDPOINT_PING).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                tracing::debug!("Ping to {} failed: {}", self.base_url, e);
                false
            }
        }
    }

    async fn search(&self, index: &str, body: &Value) -> Result<SearchResponse, EngineFailure> {
        let resp = self
            .request(reqwest::Method::POST, &protocol::search_path(index))
            .json(body)
            .send()
            .await?;

        let json = Self::read_json(resp, index).await?;
        serde_json::from_value(json)
            .map_err(|e| EngineFailure::Unexpected(format!("malformed search response: {}", e)))
    }

    async fn index_document(
        &self,
        index: &str,
        document: &Document,
    ) -> Result<Value, EngineFailure> {
        let resp = self
            .request(
                reqwest::Method::PUT,
                &protocol::document_path(index, &document.id),
            )
            .json(document)
            .send()
            .await?;

        Self::read_json(resp, index).await
    }

    async fn index_exists(&self, index: &str) -> Result<bool, EngineFailure> {
        let resp = self
            .request(reqwest::Method::HEAD, &protocol::index_path(index))
            .send()
            .await?;

        match resp.status() {
            s if s.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            s => Err(EngineFailure::Transport {
                status: Some(s.as_u16()),
                error: format!("unexpected status {} checking index '{}'", s, index),
            }),
        }
    }

    async fn create_index(&self, index: &str, body: &Value) -> Result<(), EngineFailure> {
        let resp = self
            .request(reqwest::Method::PUT, &protocol::index_path(index))
            .json(body)
            .send()
            .await?;

        Self::read_json(resp, index).await.map(|_| ())
    }
}
