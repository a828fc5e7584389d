//! Network glue for the CMS and third-party APIs.
//!
//! | Integration | Module | On failure |
//! |---|---|---|
//! | Sanity (GROQ query + mutate) | [`sanity`] | error returned to caller |
//! | GitHub repositories | [`github`] | empty list, 0 stars |
//! | Contentful blog posts | [`contentful`] | empty list |
//! | Medium posts (RSS-to-JSON) | [`medium`] | empty list |
//! | Pushover notification | [`pushover`] | `false` |
//!
//! Every integration is one blocking request on a shared
//! [`reqwest::blocking::Client`]. The low-level `try_*` functions return
//! `Result<_, FetchError>`; the public wrappers log the error with
//! `log::warn!` and return the default, so a broken integration empties a
//! page section instead of failing the build. There is no retry.

pub mod contentful;
pub mod github;
pub mod medium;
pub mod pushover;
pub mod sanity;

use crate::config::HttpConfig;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

pub use github::GithubSummary;
pub use sanity::SanityClient;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("API error: {0}")]
    Api(String),
    #[error("missing credential: environment variable {0} is not set")]
    MissingCredential(String),
}

/// Build the shared blocking client.
pub fn http_client(config: &HttpConfig) -> Result<Client, FetchError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(config.user_agent.clone())
        .build()?)
}

/// Send a request and decode a JSON body, turning non-2xx into
/// [`FetchError::Status`].
pub(crate) fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, FetchError> {
    let response = request.send()?;
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text()?;
    if !status.is_success() {
        return Err(FetchError::Status {
            url,
            status: status.as_u16(),
            body: crate::text::truncate(&text, 200),
        });
    }
    Ok(serde_json::from_str(&text)?)
}

/// Parse the timestamp formats third-party feeds hand out: RFC 3339,
/// `YYYY-MM-DD HH:MM:SS` (assumed UTC), or a bare date.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Remove anything between angle brackets.
pub(crate) fn strip_html_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}
