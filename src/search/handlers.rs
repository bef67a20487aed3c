use super::engine::best_match;
use super::types::{SearchRequest, SearchResult};
use crate::app::AppContext;
use crate::error::ShimError;
use axum::{Extension, Json};
use std::sync::Arc;

pub async fn handle_search(
    Extension(ctx): Extension<Arc<AppContext>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResult>, ShimError> {
    tracing::debug!("Search request: {:?}", req.query);

    let result = best_match(&req.query, &ctx.connections, &ctx.index).await?;
    Ok(Json(result))
}
