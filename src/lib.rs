//! Search Backend Library
//!
//! A thin HTTP service in front of an Elasticsearch-compatible engine. It keeps one
//! reusable engine connection and exposes two operations: best-match search and
//! single-document insertion.
//!
//! ## Architecture Modules
//! - **`engine`**: Engine client, wire protocol and the retrying connection manager.
//! - **`search`**: Best-match lookup (`POST /search`).
//! - **`ingestion`**: Document insertion with generated ids (`POST /insert`).
//! - **`error`**: The failure taxonomy and its single mapping onto HTTP statuses.
//! - **`config`**: Environment-driven settings.
//! - **`app`**: Router, shared request context and shutdown handling.

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod ingestion;
pub mod search;
