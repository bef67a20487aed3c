//! Engine Wire Protocol
//!
//! Defines the REST paths and Data Transfer Objects (DTOs) used to talk to the
//! Elasticsearch-compatible engine.
//!
//! The engine's wire format is an external contract: these structures only
//! mirror the parts of it this service reads or writes.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// --- API Endpoints ---

/// Root endpoint, answered with 2xx while the engine is alive (`HEAD /`).
pub const ENDPOINT_PING: &str = "/";
/// Suffix for the search endpoint of an index.
pub const ENDPOINT_SEARCH: &str = "_search";
/// Suffix for the single-document endpoint of an index.
pub const ENDPOINT_DOC: &str = "_doc";
/// Refresh mode that holds the write response until the document is searchable.
pub const REFRESH_WAIT_FOR: &str = "wait_for";

/// Error type the engine reports when the target index does not exist.
pub const INDEX_NOT_FOUND_TYPE: &str = "index_not_found_exception";

pub fn index_path(index: &str) -> String {
    format!("/{}", urlencoding::encode(index))
}

pub fn search_path(index: &str) -> String {
    format!("{}/{}", index_path(index), ENDPOINT_SEARCH)
}

pub fn document_path(index: &str, id: &str) -> String {
    format!(
        "{}/{}/{}?refresh={}",
        index_path(index),
        ENDPOINT_DOC,
        urlencoding::encode(id),
        REFRESH_WAIT_FOR
    )
}

// --- Data Transfer Objects ---

/// A stored document: the generated identifier plus its full-text body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
}

/// Relevance-ranked match query on the `text` field, limited to `size` hits.
pub fn match_query(query: &str, size: usize) -> Value {
    json!({
        "query": {
            "match": {
                "text": query
            }
        },
        "size": size
    })
}

/// Index mapping: `id` as an exact keyword, `text` as analysed full text.
pub fn index_mapping() -> Value {
    json!({
        "mappings": {
            "properties": {
                "id": { "type": "keyword" },
                "text": { "type": "text" }
            }
        }
    })
}

/// Body of a `_search` response. Only the hit list is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: HitsEnvelope,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HitsEnvelope {
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// A single ranked hit. Hits arrive ordered by descending relevance.
///
/// `source` is the stored body exactly as the engine returns it. Documents
/// loaded by other tools may lack an `id` or carry extra fields.
#[derive(Debug, Clone, Deserialize)]
pub struct Hit {
    #[serde(rename = "_score")]
    pub score: Option<f64>,
    #[serde(rename = "_source", default)]
    pub source: Value,
}

impl SearchResponse {
    /// Consumes the response and keeps only the top-ranked hit.
    pub fn into_top_hit(self) -> Option<Hit> {
        self.hits.hits.into_iter().next()
    }
}

/// Reads the `result` field of a write response (`created`, `updated`, `noop`, ...).
pub fn write_result(response: &Value) -> Option<&str> {
    response.get("result").and_then(Value::as_str)
}

/// Extracts a human-readable diagnostic from an engine error body.
///
/// Understands both `{"error": {"type", "reason"}}` and `{"error": "..."}`;
/// falls back to the raw body.
pub fn error_detail(body: &str) -> (Option<String>, String) {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let error = parsed.as_ref().and_then(|v| v.get("error"));

    match error {
        Some(Value::Object(obj)) => {
            let kind = obj.get("type").and_then(Value::as_str).map(str::to_string);
            let reason = obj.get("reason").and_then(Value::as_str);
            let detail = match (&kind, reason) {
                (Some(kind), Some(reason)) => format!("{}: {}", kind, reason),
                (Some(kind), None) => kind.clone(),
                (None, Some(reason)) => reason.to_string(),
                (None, None) => body.to_string(),
            };
            (kind, detail)
        }
        Some(Value::String(s)) => (None, s.clone()),
        _ => (None, body.to_string()),
    }
}
