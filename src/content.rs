//! Content fetching and manifest generation.
//!
//! Stage 1 of the build pipeline. Queries the CMS and the third-party
//! integrations, normalises every collection, and produces a
//! [`ContentManifest`] that the generate stage consumes.
//!
//! ## Sources
//!
//! ```text
//! CMS (GROQ)      profile, events, talks, workshops, projects,
//!                 companies, media, testimonials, metrics, posts
//! Medium          posts
//! Contentful      posts
//! GitHub          repositories + star counts
//! ```
//!
//! The CMS documents and the external posts are independent reads, so they
//! run side by side with `rayon::join`. Everything else is sequential.
//!
//! ## Failure model
//!
//! Each section is fetched on its own. A failing query or integration is
//! logged and leaves that section empty; the manifest is still produced. Only
//! local problems (building the HTTP client, reading or writing the manifest
//! file) are errors.
//!
//! ## Normalisation
//!
//! - Collections are sorted by their `order` field and given unique slugs
//!   ([`crate::naming::normalize`]).
//! - Metrics and testimonials are sorted by `order`.
//! - Posts from all sources are merged, deduplicated by URL, newest first.

use crate::config::{CmsConfig, SiteConfig};
use crate::fetch::{self, FetchError, GithubSummary, SanityClient, contentful, github, medium};
use crate::naming;
use crate::queries;
use crate::types::{
    Company, Event, ExternalPost, ImpactMetric, Media, Project, SpeakerProfile, Talk,
    Testimonial, Workshop,
};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}

/// Manifest output from the fetch stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<SpeakerProfile>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub talks: Vec<Talk>,
    #[serde(default)]
    pub workshops: Vec<Workshop>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub companies: Vec<Company>,
    #[serde(default)]
    pub media: Vec<Media>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    #[serde(default)]
    pub metrics: Vec<ImpactMetric>,
    #[serde(default)]
    pub posts: Vec<ExternalPost>,
    #[serde(default)]
    pub github: GithubSummary,
    #[serde(default)]
    pub config: SiteConfig,
}

/// Everything read from the CMS in one pass.
#[derive(Debug, Default)]
struct CmsContent {
    profile: Option<SpeakerProfile>,
    events: Vec<Event>,
    talks: Vec<Talk>,
    workshops: Vec<Workshop>,
    projects: Vec<Project>,
    companies: Vec<Company>,
    media: Vec<Media>,
    testimonials: Vec<Testimonial>,
    metrics: Vec<ImpactMetric>,
    posts: Vec<ExternalPost>,
}

/// Fetch all content for `config` into a normalised manifest.
pub fn fetch(config: &SiteConfig) -> Result<ContentManifest, ContentError> {
    let http = fetch::http_client(&config.http)?;

    let (cms, external_posts) = rayon::join(
        || fetch_cms(&http, &config.cms),
        || fetch_external_posts(&http, config),
    );
    let github = github::fetch_summary(&http, &config.github);

    Ok(assemble(cms, external_posts, github, config.clone()))
}

fn fetch_cms(http: &Client, config: &CmsConfig) -> CmsContent {
    if !config.is_enabled() {
        log::warn!("cms.project_id is not set; skipping CMS content");
        return CmsContent::default();
    }
    let client = SanityClient::new(http, config);
    CmsContent {
        profile: section_one(&client, "profile", queries::PROFILE),
        events: section(&client, "events", queries::EVENTS),
        talks: section(&client, "talks", queries::TALKS),
        workshops: section(&client, "workshops", queries::WORKSHOPS),
        projects: section(&client, "projects", queries::PROJECTS),
        companies: section(&client, "companies", queries::COMPANIES),
        media: section(&client, "media", queries::MEDIA),
        testimonials: section(&client, "testimonials", queries::TESTIMONIALS),
        metrics: section(&client, "metrics", queries::METRICS),
        posts: section(&client, "posts", queries::POSTS),
    }
}

/// One collection query; empty on failure.
fn section<T: DeserializeOwned>(client: &SanityClient<'_>, name: &str, groq: &str) -> Vec<T> {
    match client.query_documents(groq) {
        Ok(docs) => {
            log::debug!("CMS {name}: {} documents", docs.len());
            docs
        }
        Err(e) => {
            log::warn!("CMS {name} unavailable: {e}");
            Vec::new()
        }
    }
}

/// One single-document query; `None` on failure or absence.
fn section_one<T: DeserializeOwned>(client: &SanityClient<'_>, name: &str, groq: &str) -> Option<T> {
    match client.query::<Option<T>>(groq) {
        Ok(doc) => doc,
        Err(e) => {
            log::warn!("CMS {name} unavailable: {e}");
            None
        }
    }
}

fn fetch_external_posts(http: &Client, config: &SiteConfig) -> Vec<ExternalPost> {
    let mut posts = medium::fetch_posts(http, &config.medium);
    posts.extend(contentful::fetch_posts(http, &config.contentful));
    posts
}

fn assemble(
    cms: CmsContent,
    external_posts: Vec<ExternalPost>,
    github: GithubSummary,
    config: SiteConfig,
) -> ContentManifest {
    let CmsContent {
        profile,
        events,
        talks,
        workshops,
        projects,
        companies,
        media,
        testimonials,
        metrics,
        posts,
    } = cms;

    let mut manifest = ContentManifest {
        profile,
        events,
        talks,
        workshops,
        projects,
        companies,
        media,
        testimonials,
        metrics,
        posts: merge_posts(posts, external_posts),
        github,
        config,
    };
    normalize(&mut manifest);
    manifest
}

/// Sort every collection by `order` and give each page-backed document a
/// unique, non-empty slug.
fn normalize(manifest: &mut ContentManifest) {
    naming::normalize(&mut manifest.events, "event");
    naming::normalize(&mut manifest.talks, "talk");
    naming::normalize(&mut manifest.workshops, "workshop");
    naming::normalize(&mut manifest.projects, "project");
    manifest
        .testimonials
        .sort_by_key(|t| (t.order.is_none(), t.order.unwrap_or_default()));
    manifest
        .metrics
        .sort_by_key(|m| (m.order.is_none(), m.order.unwrap_or_default()));
}

/// Merge post lists, keeping the first occurrence of each URL, newest first.
/// Undated posts go last.
pub fn merge_posts(first: Vec<ExternalPost>, second: Vec<ExternalPost>) -> Vec<ExternalPost> {
    let mut seen = HashSet::new();
    let mut posts: Vec<ExternalPost> = first
        .into_iter()
        .chain(second)
        .filter(|p| seen.insert(p.url.trim_end_matches('/').to_string()))
        .collect();
    posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    posts
}

/// Reference problems worth telling the editor about.
///
/// Dangling references do not stop the build (they render as absent), but
/// `folio check` lists them.
pub fn find_dangling_references(manifest: &ContentManifest) -> Vec<String> {
    let talk_ids: HashSet<&str> = manifest.talks.iter().map(|t| t.id.as_str()).collect();
    let company_ids: HashSet<&str> = manifest.companies.iter().map(|c| c.id.as_str()).collect();
    let media_ids: HashSet<&str> = manifest.media.iter().map(|m| m.id.as_str()).collect();

    let mut problems = Vec::new();
    for event in &manifest.events {
        if let Some(r) = event.talk.as_ref().filter(|r| !talk_ids.contains(r.id.as_str())) {
            problems.push(format!("event \"{}\" references missing talk {}", event.title, r.id));
        }
    }
    for project in &manifest.projects {
        if let Some(r) = project
            .company
            .as_ref()
            .filter(|r| !company_ids.contains(r.id.as_str()))
        {
            problems.push(format!(
                "project \"{}\" references missing company {}",
                project.title, r.id
            ));
        }
    }
    for testimonial in &manifest.testimonials {
        if let Some(r) = testimonial
            .company
            .as_ref()
            .filter(|r| !company_ids.contains(r.id.as_str()))
        {
            problems.push(format!(
                "testimonial by {} references missing company {}",
                testimonial.author, r.id
            ));
        }
    }
    for company in &manifest.companies {
        if let Some(r) = company.logo.as_ref().filter(|r| !media_ids.contains(r.id.as_str())) {
            problems.push(format!(
                "company \"{}\" references missing logo {}",
                company.name, r.id
            ));
        }
    }
    problems
}

/// Write the manifest as pretty JSON, creating parent directories.
pub fn write_manifest(manifest: &ContentManifest, path: &Path) -> Result<(), ContentError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(path, json)?;
    Ok(())
}

/// Read a manifest back. It is normalised again, so a hand-edited file
/// cannot produce missing or colliding page slugs.
pub fn read_manifest(path: &Path) -> Result<ContentManifest, ContentError> {
    let content = fs::read_to_string(path)?;
    let mut manifest: ContentManifest = serde_json::from_str(&content)?;
    normalize(&mut manifest);
    Ok(manifest)
}
