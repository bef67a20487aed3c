//! Form front end for the search backend.
//!
//! Serves one HTML page with a search form and an insert form. Submissions are
//! forwarded to the backend, the outcome is stored as the page's message and the
//! browser is redirected back to `/` (303), so a refresh never resubmits.

pub mod backend;
pub mod config;
pub mod handlers;
pub mod page;
pub mod state;


use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub fn router(state: state::AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/search", post(handlers::submit_search))
        .route("/insert", post(handlers::submit_insert))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
