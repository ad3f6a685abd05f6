use super::{KeyValueStore, StoreError};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Browser-side storage: each key is a long-lived cookie on the visitor's
/// browser. Writes are collected on the jar, which the handler must return
/// with its response.
#[derive(Debug, Default, Clone)]
pub struct CookieStore {
    jar: CookieJar,
}

impl CookieStore {
    const MAX_AGE_DAYS: i64 = 365;

    pub fn new(jar: CookieJar) -> Self {
        Self { jar }
    }

    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl KeyValueStore for CookieStore {
    fn get(&self, key: &str) -> Option<String> {
        self.jar.get(key).map(|c| c.value().to_string())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let cookie = Cookie::build((key.to_string(), value.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(Duration::days(Self::MAX_AGE_DAYS))
            .build();

        let jar = std::mem::take(&mut self.jar);
        self.jar = jar.add(cookie);
        Ok(())
    }
}
