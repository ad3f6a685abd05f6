use super::format_date;
use crate::models::Blog;
use serde::Serialize;
use tera::{Context, Tera};

pub const TEMPLATE: &str = "components/blog_card.html";

/// Display-ready summary of one post. Optional fields are resolved here so
/// templates never see a missing author or counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogCard {
    pub id: i64,
    pub href: String,
    pub title: String,
    pub author_name: String,
    pub created_on: String,
    pub updated_on: Option<String>,
    pub thumbnail_url: Option<String>,
    pub tags: Vec<String>,
    pub likes: u64,
    pub comments: u64,
}

impl BlogCard {
    pub fn new(blog: &Blog, date_format: &str) -> Self {
        Self {
            id: blog.id,
            href: blog.href(),
            title: blog.title.clone(),
            author_name: blog.author_name().to_string(),
            created_on: format_date(&blog.created_at, date_format),
            updated_on: blog
                .updated_at
                .as_deref()
                .map(|d| format_date(d, date_format)),
            thumbnail_url: blog.thumbnail_url.clone(),
            tags: blog.tag_list().to_vec(),
            likes: blog.likes(),
            comments: blog.comments(),
        }
    }

    pub fn render(&self, templates: &Tera) -> tera::Result<String> {
        let mut ctx = Context::new();
        ctx.insert("card", self);
        templates.render(TEMPLATE, &ctx)
    }
}
