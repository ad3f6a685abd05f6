use super::handlers;
use super::state::AppState;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

pub fn page_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::blogs::index))
        .route("/blogs/:id", get(handlers::blogs::show))
        .route(
            "/login",
            get(handlers::auth::login_page).post(handlers::auth::login),
        )
        .route("/health", get(handlers::health))
}
