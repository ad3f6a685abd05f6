mod cookie;
mod file;

pub use cookie::CookieStore;
pub use file::FileStore;

use crate::models::TokenResponse;
use std::collections::HashMap;
use thiserror::Error;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to write token store: {0}")]
    Io(#[from] std::io::Error),
    #[error("Token store is corrupt: {0}")]
    Format(#[from] serde_json::Error),
}

/// Durable string key-value storage for client state. Writes overwrite.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Write several entries. Stores that persist to disk override this to
    /// land all of them or none.
    fn set_all(&mut self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

/// Save both issued tokens, replacing whatever was stored before.
pub fn persist_tokens<S>(store: &mut S, tokens: &TokenResponse) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
{
    store.set_all(&[
        (ACCESS_TOKEN_KEY, tokens.access_token.as_str()),
        (REFRESH_TOKEN_KEY, tokens.refresh_token.as_str()),
    ])
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
