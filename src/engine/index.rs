//! Index bootstrap: creates the document index with its mapping when absent.

use super::client::{EngineClient, EngineFailure};
use super::protocol::index_mapping;

/// Makes sure `index` exists.
///
/// # Returns
/// * `Ok(true)` if the index was created by this call.
/// * `Ok(false)` if it already existed.
pub async fn ensure_index(client: &dyn EngineClient, index: &str) -> Result<bool, EngineFailure> {
    if client.index_exists(index).await? {
        tracing::info!("Index '{}' already exists.", index);
        return Ok(false);
    }

    tracing::info!("Index '{}' not found. Creating index...", index);
    client.create_index(index, &index_mapping()).await?;
    tracing::info!("Index '{}' created successfully.", index);

    Ok(true)
}
