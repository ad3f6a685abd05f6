use serde::{Deserialize, Serialize};

/// One page of results plus the total count across all pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
    pub data: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Listing parameters. `None`, empty and zero values are left out of the
/// query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogQuery {
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl BlogQuery {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(limit) = self.limit.filter(|n| *n > 0) {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset.filter(|n| *n > 0) {
            pairs.push(("offset", offset.to_string()));
        }
        pairs
    }
}
