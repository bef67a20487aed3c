//! Search Engine Module
//!
//! Everything that talks to the external Elasticsearch-compatible engine.
//!
//! ## Core Concepts
//! - **Client**: `EngineClient` is a live handle; `HttpEngineClient` speaks the engine's REST API.
//! - **Connection**: `ConnectionManager` caches one handle, checks it with a ping before reuse
//!   and rebuilds it under a `RetryPolicy` when it goes stale.
//! - **Protocol**: Paths, query bodies and response DTOs of the engine's wire format.
//! - **Index**: Optional bootstrap of the document index and its mapping.

pub mod client;
pub mod connection;
pub mod index;
pub mod protocol;

#[cfg(test)]
pub(crate) mod fake;
