use std::time::Duration;

/// Freshness directive attached to an outgoing API request and forwarded to
/// the rendered page so the browser (or any proxy in front of the frontend)
/// knows how long the result may be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    Revalidate(Duration),
    NoStore,
}

impl CachePolicy {
    pub const BLOG_LIST: Self = Self::Revalidate(Duration::from_secs(60));
    pub const BLOG_DETAIL: Self = Self::NoStore;

    /// `Cache-Control` value sent to the blog API.
    pub fn request_header(&self) -> String {
        match self {
            Self::Revalidate(ttl) => format!("max-age={}", ttl.as_secs()),
            Self::NoStore => "no-store".to_string(),
        }
    }

    /// `Cache-Control` value on the page built from the response.
    pub fn response_header(&self) -> String {
        match self {
            Self::Revalidate(ttl) => format!("public, max-age={}", ttl.as_secs()),
            Self::NoStore => "no-store".to_string(),
        }
    }
}
