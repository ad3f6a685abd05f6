use crate::api::DEFAULT_BASE_URL;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub listing: ListingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_language")]
    pub language: String,
    /// chrono format string for post dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
            language: default_language(),
            date_format: default_date_format(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListingConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_title() -> String {
    "Blog".to_string()
}

fn default_description() -> String {
    "Posts from the blog API".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_date_format() -> String {
    "%b %-d, %Y".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    12
}

impl Config {
    /// Read the config file at `path`, or fall back to defaults when it does
    /// not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let config = match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                anyhow::anyhow!("Could not parse config file '{}': {}", path.display(), e)
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config at '{}', using defaults", path.display());
                Config::default()
            }
            Err(e) => {
                anyhow::bail!("Could not read config file '{}': {}", path.display(), e)
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply an API base URL taken from the command line or the
    /// `BLOG_API_BASE_URL` environment variable.
    pub fn with_api_base_url(mut self, base_url: Option<String>) -> Result<Self> {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
            self.validate()?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.listing.page_size == 0 {
            anyhow::bail!("listing.page_size must be greater than 0");
        }
        if self.listing.page_size > 100 {
            anyhow::bail!("listing.page_size must be 100 or less");
        }
        if !crate::components::is_valid_date_format(&self.site.date_format) {
            anyhow::bail!(
                "site.date_format '{}' is not a valid date format",
                self.site.date_format
            );
        }
        let url = url::Url::parse(&self.api.base_url)
            .map_err(|e| anyhow::anyhow!("api.base_url '{}' is invalid: {}", self.api.base_url, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("api.base_url must use http or https");
        }
        Ok(())
    }
}
