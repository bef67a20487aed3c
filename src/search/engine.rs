use super::types::SearchResult;
use crate::engine::connection::ConnectionManager;
use crate::engine::protocol::{match_query, SearchResponse};
use crate::error::{Operation, ShimError};

pub const NO_MATCH_MESSAGE: &str = "No matching documents found.";
pub const MATCH_MESSAGE: &str = "Found document(s)";

/// Runs `query` against `index` and returns the single best-scoring document.
pub async fn best_match(
    query: &str,
    connections: &ConnectionManager,
    index: &str,
) -> Result<SearchResult, ShimError> {
    let client = connections.acquire().await?;

    let response = client
        .search(index, &match_query(query, 1))
        .await
        .map_err(|failure| ShimError::from_engine(failure, Operation::Search, index))?;

    Ok(into_search_result(response))
}

pub fn into_search_result(response: SearchResponse) -> SearchResult {
    match response.into_top_hit() {
        Some(hit) => SearchResult {
            message: MATCH_MESSAGE.to_string(),
            best_hit: Some(hit.source),
            score: hit.score,
        },
        None => SearchResult {
            message: NO_MATCH_MESSAGE.to_string(),
            best_hit: None,
            score: None,
        },
    }
}
