use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// Failure inside the frontend itself (template rendering and the like).
/// API failures never reach here; handlers turn those into page content or
/// the not-found page.
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Page rendering failed: {:?}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CACHE_CONTROL, "no-store")],
            "Internal server error",
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;
