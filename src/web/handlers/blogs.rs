use super::not_found;
use crate::api::CachePolicy;
use crate::components::BlogCard;
use crate::models::BlogQuery;
use crate::web::error::AppResult;
use crate::web::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct ListQuery {
    search: Option<String>,
}

/// First page of posts, optionally filtered by `?search=`.
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQuery>,
) -> AppResult<Response> {
    let search = params.search.filter(|s| !s.is_empty());
    let query = BlogQuery {
        search: search.clone(),
        limit: Some(state.config.listing.page_size),
        offset: Some(0),
    };

    let mut ctx = state.context();
    ctx.insert("search", &search.unwrap_or_default());

    let (status, policy) = match state.api.fetch_blogs(&query).await {
        Ok(page) => {
            let date_format = &state.config.site.date_format;
            let cards: Vec<BlogCard> = page
                .data
                .iter()
                .map(|blog| BlogCard::new(blog, date_format))
                .collect();
            ctx.insert("total", &page.total);
            ctx.insert("cards", &cards);
            (StatusCode::OK, CachePolicy::BLOG_LIST)
        }
        Err(e) => {
            ctx.insert("error", &e.to_string());
            (StatusCode::BAD_GATEWAY, CachePolicy::NoStore)
        }
    };

    let html = state.templates.render("pages/index.html", &ctx)?;
    Ok((
        status,
        [(header::CACHE_CONTROL, policy.response_header())],
        Html(html),
    )
        .into_response())
}

/// A single post. Any failure to load it is answered with the not-found page.
pub async fn show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let blog = match state.api.fetch_blog_by_id(&id).await {
        Ok(blog) => blog,
        Err(e) => {
            tracing::debug!("Blog '{}' unavailable: {:?}", e.id, e.status);
            return not_found(&state);
        }
    };

    let mut ctx = state.context();
    ctx.insert("card", &BlogCard::new(&blog, &state.config.site.date_format));
    ctx.insert("content", blog.content.as_deref().unwrap_or_default());

    let html = state.templates.render("pages/blog.html", &ctx)?;
    Ok((
        [(header::CACHE_CONTROL, CachePolicy::BLOG_DETAIL.response_header())],
        Html(html),
    )
        .into_response())
}
