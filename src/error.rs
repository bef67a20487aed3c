use crate::engine::client::EngineFailure;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every way a request to this service can fail. Each variant carries the
/// detail string returned to the caller.
#[derive(Error, Debug)]
pub enum ShimError {
    #[error("Could not connect to Elasticsearch after {attempts} attempts.")]
    ServiceUnavailable { attempts: u32 },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    EngineError(String),

    #[error("{0}")]
    InternalError(String),
}

/// The operation an engine failure happened in; only changes the wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Search,
    Insert,
}

impl ShimError {
    pub fn from_engine(failure: EngineFailure, operation: Operation, index: &str) -> Self {
        match (failure, operation) {
            (EngineFailure::IndexNotFound(_), Operation::Search) => {
                ShimError::NotFound(format!("Index '{}' not found.", index))
            }
            (EngineFailure::IndexNotFound(_), Operation::Insert) => ShimError::NotFound(format!(
                "Index '{}' not found. Please create it first.",
                index
            )),
            (EngineFailure::Transport { status, error }, operation) => {
                tracing::error!("Engine transport error (status {:?}): {}", status, error);
                let verb = match operation {
                    Operation::Search => "search",
                    Operation::Insert => "insert",
                };
                ShimError::EngineError(format!("Elasticsearch {} error: {}", verb, error))
            }
            (EngineFailure::Unexpected(description), _) => {
                tracing::error!("Unexpected error talking to engine: {}", description);
                ShimError::internal(description)
            }
        }
    }

    pub fn internal(description: impl std::fmt::Display) -> Self {
        ShimError::InternalError(format!(
            "An internal server error occurred: {}",
            description
        ))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ShimError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ShimError::NotFound(_) => StatusCode::NOT_FOUND,
            ShimError::EngineError(_) | ShimError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for ShimError {
    fn into_response(self) -> Response {
        let status = self.status();
        (
            status,
            Json(ErrorBody {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}
