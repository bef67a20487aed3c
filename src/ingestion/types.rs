//! Ingestion Data Types

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
pub struct InsertRequest {
    pub text: String,
}

/// Returned once the document is stored and searchable.
///
/// `engine_response` is the engine's raw write acknowledgment, passed through
/// untouched for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertResponse {
    pub message: String,
    pub id: String,
    pub engine_response: Value,
}
