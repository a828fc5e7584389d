//! Blog posts from the Contentful Content Delivery API.

use super::{FetchError, parse_timestamp, send_json};
use crate::config::{self, ContentfulConfig};
use crate::types::{ExternalPost, PostSource};
use reqwest::blocking::Client;
use serde::Deserialize;

#[derive(Deserialize)]
struct EntriesResponse {
    #[serde(default)]
    items: Vec<Entry>,
}

#[derive(Deserialize)]
struct Entry {
    sys: Sys,
    fields: Fields,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Sys {
    id: String,
    #[serde(default)]
    created_at: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Fields {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    publish_date: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

/// Posts from the configured space; empty when unconfigured or on failure.
pub fn fetch_posts(http: &Client, config: &ContentfulConfig) -> Vec<ExternalPost> {
    let Some(space) = config.space_id.as_deref().filter(|s| !s.trim().is_empty()) else {
        return Vec::new();
    };
    match try_fetch_posts(http, config, space) {
        Ok(posts) => {
            log::info!("Contentful: {} posts from space {space}", posts.len());
            posts
        }
        Err(e) => {
            log::warn!("Contentful posts from space {space} unavailable: {e}");
            Vec::new()
        }
    }
}

pub fn try_fetch_posts(
    http: &Client,
    config: &ContentfulConfig,
    space: &str,
) -> Result<Vec<ExternalPost>, FetchError> {
    let token = config::secret(&config.token_env)
        .ok_or_else(|| FetchError::MissingCredential(config.token_env.clone()))?;
    let url = format!(
        "{}/spaces/{}/environments/{}/entries",
        config.api_base.trim_end_matches('/'),
        space,
        config.environment
    );
    let request = http
        .get(url)
        .query(&[
            ("content_type", config.content_type.as_str()),
            ("order", "-fields.publishDate"),
        ])
        .bearer_auth(token);
    let response: EntriesResponse = send_json(request)?;
    Ok(into_posts(response, config.post_base_url.as_deref()))
}

fn into_posts(response: EntriesResponse, post_base_url: Option<&str>) -> Vec<ExternalPost> {
    response
        .items
        .into_iter()
        .filter_map(|entry| {
            let Entry { sys, fields } = entry;
            let (Some(title), Some(slug), Some(base)) = (fields.title, fields.slug, post_base_url)
            else {
                log::debug!("Contentful entry {} has no title, slug, or base URL", sys.id);
                return None;
            };
            let published_at = fields
                .publish_date
                .or(sys.created_at)
                .as_deref()
                .and_then(parse_timestamp);
            Some(ExternalPost {
                title,
                url: format!("{}/{}", base.trim_end_matches('/'), slug),
                published_at,
                source: PostSource::Contentful,
                thumbnail: None,
                tags: fields.tags,
            })
        })
        .collect()
}
