use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Listing failure. The message is fixed and never taken from the response.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to fetch blogs")]
    Status(StatusCode),
    #[error("Failed to fetch blogs")]
    Request(#[source] reqwest::Error),
}

/// Any failure loading a single post. Pages turn this into a 404 rather
/// than showing it.
#[derive(Debug, Error)]
#[error("Blog not found")]
pub struct BlogNotFound {
    pub id: String,
    pub status: Option<StatusCode>,
    #[source]
    pub source: Option<reqwest::Error>,
}

#[derive(Debug, Error)]
pub enum LoginError {
    #[error("{}", .detail.as_deref().unwrap_or("Login failed"))]
    Rejected {
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("{0}")]
    Request(#[from] reqwest::Error),
}

impl LoginError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Request(e) => e.status(),
        }
    }
}

/// Pull a human readable message out of an API error body.
///
/// `detail` is usually a string. Request validation errors carry a list of
/// objects with a `msg` field instead; those are joined.
pub fn error_detail(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        _ => None,
    }
}
