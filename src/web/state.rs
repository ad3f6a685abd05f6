use crate::api::ApiClient;
use crate::components::login_form::MIN_PASSWORD_LEN;
use crate::Config;
use anyhow::Result;
use tera::{Context, Tera};

pub struct AppState {
    pub config: Config,
    pub api: ApiClient,
    pub templates: Tera,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let api = ApiClient::new(&config.api.base_url)?;
        Ok(Self::with_client(config, api, build_templates()?))
    }

    pub fn with_client(config: Config, api: ApiClient, templates: Tera) -> Self {
        Self {
            config,
            api,
            templates,
        }
    }

    /// Base template context shared by every page.
    pub fn context(&self) -> Context {
        let mut ctx = Context::new();
        ctx.insert("site", &self.config.site);
        ctx.insert("min_password_len", &MIN_PASSWORD_LEN);
        ctx
    }
}

pub fn build_templates() -> Result<Tera> {
    let mut templates = Tera::default();

    templates.add_raw_templates(vec![
        ("css/bundle.css", include_str!("../../templates/css/bundle.css")),
        ("base.html", include_str!("../../templates/base.html")),
        (
            "components/blog_card.html",
            include_str!("../../templates/components/blog_card.html"),
        ),
        (
            "components/login_form.html",
            include_str!("../../templates/components/login_form.html"),
        ),
        ("pages/index.html", include_str!("../../templates/pages/index.html")),
        ("pages/blog.html", include_str!("../../templates/pages/blog.html")),
        ("pages/login.html", include_str!("../../templates/pages/login.html")),
        ("pages/404.html", include_str!("../../templates/pages/404.html")),
    ])?;

    Ok(templates)
}
