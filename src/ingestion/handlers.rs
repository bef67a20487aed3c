use super::types::{InsertRequest, InsertResponse};
use crate::app::AppContext;
use crate::engine::connection::ConnectionManager;
use crate::engine::protocol::{write_result, Document};
use crate::error::{Operation, ShimError};
use axum::{Extension, Json};
use std::sync::Arc;

pub const INSERTED_MESSAGE: &str = "Document inserted successfully";

pub async fn handle_insert(
    Extension(ctx): Extension<Arc<AppContext>>,
    Json(req): Json<InsertRequest>,
) -> Result<Json<InsertResponse>, ShimError> {
    let response = insert_document(req.text, &ctx.connections, &ctx.index).await?;
    Ok(Json(response))
}

/// Stores `text` as a new document under a generated id.
pub async fn insert_document(
    text: String,
    connections: &ConnectionManager,
    index: &str,
) -> Result<InsertResponse, ShimError> {
    let client = connections.acquire().await?;

    let document = Document {
        id: uuid::Uuid::new_v4().to_string(),
        text,
    };

    let engine_response = client
        .index_document(index, &document)
        .await
        .map_err(|failure| ShimError::from_engine(failure, Operation::Insert, index))?;

    match write_result(&engine_response) {
        Some("created") | Some("updated") => {
            tracing::info!("Inserted document {} into '{}'", document.id, index);
            Ok(InsertResponse {
                message: INSERTED_MESSAGE.to_string(),
                id: document.id,
                engine_response,
            })
        }
        _ => {
            tracing::error!("Unexpected write result for {}: {}", document.id, engine_response);
            Err(ShimError::InternalError(format!(
                "Failed to insert document. ES Response: {}",
                engine_response
            )))
        }
    }
}
