use crate::backend::format_result;
use crate::page::render;
use crate::state::AppState;
use axum::extract::State;
use axum::response::{Html, Redirect};
use axum::Form;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct SearchForm {
    pub query: String,
}

#[derive(Deserialize)]
pub struct InsertForm {
    pub text: String,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render(&state.message().await))
}

pub async fn submit_search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Redirect {
    let heading = format!("Search Results for '{}':", form.query);

    let message = state
        .backend
        .search(&form.query)
        .await
        .and_then(|result| format_result(&heading, &result))
        .unwrap_or_else(|e| {
            tracing::warn!("Search via backend failed: {}", e);
            e.to_string()
        });

    state.set_message(message).await;
    Redirect::to("/")
}

pub async fn submit_insert(
    State(state): State<AppState>,
    Form(form): Form<InsertForm>,
) -> Redirect {
    let message = state
        .backend
        .insert(&form.text)
        .await
        .and_then(|result| format_result("Insertion Status:", &result))
        .unwrap_or_else(|e| {
            tracing::warn!("Insert via backend failed: {}", e);
            e.to_string()
        });

    state.set_message(message).await;
    Redirect::to("/")
}
