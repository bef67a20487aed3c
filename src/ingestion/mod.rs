//! Ingestion Service Module
//!
//! Writes new documents into the index.
//!
//! ## Workflow
//! 1. **Identify**: Generates a fresh UUID for the document.
//! 2. **Write**: Stores `{id, text}` under that id, waiting for the engine's refresh so the
//!    document is searchable before the call returns.
//! 3. **Classify**: Accepts only `created` / `updated` write results.

pub mod handlers;
pub mod types;
