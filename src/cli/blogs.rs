use crate::api::ApiClient;
use crate::components::BlogCard;
use crate::models::BlogQuery;
use crate::Config;
use anyhow::Result;

pub async fn list(
    config: &Config,
    search: Option<String>,
    limit: Option<u32>,
    offset: Option<u32>,
) -> Result<()> {
    let api = ApiClient::new(&config.api.base_url)?;
    let query = BlogQuery {
        search,
        limit: limit.or(Some(config.listing.page_size)),
        offset,
    };

    let page = api.fetch_blogs(&query).await?;

    println!("{} total posts", page.total);
    if page.is_empty() {
        println!("No blogs found.");
        return Ok(());
    }

    println!(
        "{:<8} {:<40} {:<20} {:<14} {:>6} {:>6}",
        "ID", "TITLE", "AUTHOR", "DATE", "LIKES", "COMM."
    );
    println!("{}", "-".repeat(99));
    for blog in &page.data {
        let card = BlogCard::new(blog, &config.site.date_format);
        println!(
            "{:<8} {:<40} {:<20} {:<14} {:>6} {:>6}",
            card.id,
            truncate(&card.title, 40),
            truncate(&card.author_name, 20),
            card.created_on,
            card.likes,
            card.comments
        );
    }

    Ok(())
}

pub async fn show(config: &Config, id: &str) -> Result<()> {
    let api = ApiClient::new(&config.api.base_url)?;
    let blog = api.fetch_blog_by_id(id).await?;
    let card = BlogCard::new(&blog, &config.site.date_format);

    println!("{}", card.title);
    println!("{} · {}", card.author_name, card.created_on);
    if !card.tags.is_empty() {
        println!("tags: {}", card.tags.join(", "));
    }
    println!("likes: {}  comments: {}", card.likes, card.comments);
    if let Some(content) = blog.content.as_deref() {
        println!();
        println!("{}", content);
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
