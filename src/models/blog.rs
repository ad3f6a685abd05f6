use super::Author;
use serde::{Deserialize, Serialize};

/// Display name used when a post carries no author.
pub const ANONYMOUS: &str = "Anonymous";

/// A single post as returned by the blog API. Fields the API may omit are
/// kept as `Option` and resolved through the accessor methods at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub likes_count: Option<u64>,
    #[serde(default)]
    pub comments_count: Option<u64>,
    #[serde(default)]
    pub author: Option<Author>,
}

impl Blog {
    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(|a| a.username.as_str())
            .unwrap_or(ANONYMOUS)
    }

    pub fn likes(&self) -> u64 {
        self.likes_count.unwrap_or(0)
    }

    pub fn comments(&self) -> u64 {
        self.comments_count.unwrap_or(0)
    }

    /// Tags in server order; empty when the field is absent.
    pub fn tag_list(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    pub fn href(&self) -> String {
        format!("/blogs/{}", self.id)
    }
}
