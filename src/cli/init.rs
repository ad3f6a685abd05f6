use anyhow::Result;
use std::path::PathBuf;

pub async fn run(path: PathBuf, title: Option<String>) -> Result<()> {
    let site_title = title.unwrap_or_else(|| "Blog".to_string());

    std::fs::create_dir_all(&path)?;

    let config_path = path.join("blogfront.toml");
    if config_path.exists() {
        anyhow::bail!("{} already exists", config_path.display());
    }

    let config = format!(
        r#"[site]
title = "{}"
description = "Posts from the blog API"
language = "en"
date_format = "%b %-d, %Y"

[server]
host = "127.0.0.1"
port = 3000

[api]
# Overridden by BLOG_API_BASE_URL when set.
base_url = "http://localhost:8000"

[listing]
page_size = 12
"#,
        site_title.replace('"', "\\\"")
    );

    std::fs::write(&config_path, config)?;
    tracing::info!("Wrote {}", config_path.display());

    Ok(())
}
