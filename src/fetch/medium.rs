//! Medium posts through an RSS-to-JSON bridge.
//!
//! Medium has no public posts API; its RSS feed at
//! `https://medium.com/feed/@user` is converted to JSON by the configured
//! bridge (`medium.api_base`), which answers:
//!
//! ```json
//! { "status": "ok", "items": [{ "title": "...", "pubDate": "2024-01-15 10:00:00",
//!   "link": "...", "thumbnail": "...", "categories": ["rust"] }] }
//! ```

use super::{FetchError, parse_timestamp, send_json, strip_html_tags};
use crate::config::MediumConfig;
use crate::types::{ExternalPost, PostSource};
use reqwest::blocking::Client;
use serde::Deserialize;

#[derive(Deserialize)]
struct FeedResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    items: Vec<FeedItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedItem {
    title: String,
    link: String,
    #[serde(default)]
    pub_date: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    categories: Vec<String>,
}

/// Posts for the configured Medium user; empty on failure.
pub fn fetch_posts(http: &Client, config: &MediumConfig) -> Vec<ExternalPost> {
    let Some(user) = config.user.as_deref().filter(|u| !u.trim().is_empty()) else {
        return Vec::new();
    };
    match try_fetch_posts(http, config, user) {
        Ok(posts) => {
            log::info!("Medium: {} posts for @{user}", posts.len());
            posts
        }
        Err(e) => {
            log::warn!("Medium posts for @{user} unavailable: {e}");
            Vec::new()
        }
    }
}

pub fn try_fetch_posts(
    http: &Client,
    config: &MediumConfig,
    user: &str,
) -> Result<Vec<ExternalPost>, FetchError> {
    let feed_url = format!("https://medium.com/feed/@{}", user.trim_start_matches('@'));
    let request = http
        .get(&config.api_base)
        .query(&[("rss_url", feed_url.as_str())]);
    let response: FeedResponse = send_json(request)?;
    if response.status != "ok" {
        return Err(FetchError::Api(
            response
                .message
                .unwrap_or_else(|| format!("bridge status '{}'", response.status)),
        ));
    }
    Ok(response.items.into_iter().map(into_post).collect())
}

fn into_post(item: FeedItem) -> ExternalPost {
    ExternalPost {
        title: strip_html_tags(&item.title).trim().to_string(),
        url: item.link,
        published_at: item.pub_date.as_deref().and_then(parse_timestamp),
        source: PostSource::Medium,
        thumbnail: item.thumbnail.filter(|t| !t.trim().is_empty()),
        tags: item
            .categories
            .iter()
            .map(|c| strip_html_tags(c).trim().to_string())
            .filter(|c| !c.is_empty())
            .collect(),
    }
}
