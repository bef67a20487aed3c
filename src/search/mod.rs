//! Search Service Module
//!
//! Answers best-match queries against the document index.
//!
//! ## Overview
//! A query is sent to the engine as a relevance-ranked match on the `text` field,
//! restricted to a single hit. Only the top-ranked document and its score are
//! returned; lower-ranked hits are never fetched.
//!
//! ## Submodules
//! - **`engine`**: Runs the query through the engine connection and shapes the result.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`types`**: Data Transfer Objects (DTOs) for API communication.

pub mod engine;
pub mod handlers;
pub mod types;
