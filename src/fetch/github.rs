//! Public repositories and star counts from the GitHub REST API.

use super::{FetchError, send_json};
use crate::config::{self, GithubConfig};
use crate::types::GithubRepo;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};

/// What the site shows from GitHub.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GithubSummary {
    /// Non-fork repositories, most-starred first, capped at `max_repos`.
    #[serde(default)]
    pub repos: Vec<GithubRepo>,
    /// Stars across all non-fork repositories, before the cap.
    #[serde(default)]
    pub total_stars: u64,
}

impl GithubSummary {
    /// Star count for `owner/name`, if that repository was fetched.
    pub fn stars_for(&self, full_name: &str) -> Option<u64> {
        self.repos
            .iter()
            .find(|r| r.full_name.eq_ignore_ascii_case(full_name))
            .map(|r| r.stargazers_count)
    }
}

/// Fetch the configured user's repositories. Empty summary when GitHub is
/// not configured or the request fails.
pub fn fetch_summary(http: &Client, config: &GithubConfig) -> GithubSummary {
    let Some(user) = config.user.as_deref().filter(|u| !u.trim().is_empty()) else {
        return GithubSummary::default();
    };
    match try_fetch_summary(http, config, user) {
        Ok(summary) => {
            log::info!(
                "GitHub: {} repos, {} stars for {user}",
                summary.repos.len(),
                summary.total_stars
            );
            summary
        }
        Err(e) => {
            log::warn!("GitHub repositories for {user} unavailable: {e}");
            GithubSummary::default()
        }
    }
}

pub fn try_fetch_summary(
    http: &Client,
    config: &GithubConfig,
    user: &str,
) -> Result<GithubSummary, FetchError> {
    let url = format!("{}/users/{}/repos", config.api_base.trim_end_matches('/'), user);
    let mut request = http
        .get(url)
        .query(&[("per_page", "100"), ("sort", "updated")])
        .header(ACCEPT, "application/vnd.github+json");
    if let Some(token) = config::secret(&config.token_env) {
        request = request.bearer_auth(token);
    }
    let repos: Vec<GithubRepo> = send_json(request)?;
    Ok(summarize(repos, config.max_repos))
}

fn summarize(mut repos: Vec<GithubRepo>, max_repos: usize) -> GithubSummary {
    repos.retain(|r| !r.fork);
    let total_stars = repos.iter().map(|r| r.stargazers_count).sum();
    repos.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    repos.truncate(max_repos);
    GithubSummary { repos, total_stars }
}
