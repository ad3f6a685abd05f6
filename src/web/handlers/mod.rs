pub mod auth;
pub mod blogs;

use crate::web::error::AppResult;
use crate::web::state::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use std::sync::Arc;

/// The host's not-found page.
pub(crate) fn not_found(state: &AppState) -> AppResult<Response> {
    let ctx = state.context();
    let html = state.templates.render("pages/404.html", &ctx)?;
    Ok((
        StatusCode::NOT_FOUND,
        [(header::CACHE_CONTROL, "no-store")],
        Html(html),
    )
        .into_response())
}

pub async fn fallback(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    not_found(&state)
}

pub async fn health() -> &'static str {
    "ok"
}
