//! Shared test utilities for the folio test suite.
//!
//! Provides document builders for unit tests and a loader for the sample
//! manifest in `fixtures/content.json`, the same file the CLI integration
//! tests feed to `folio generate`.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let manifest = sample_manifest();
//! let talk = find_talk(&manifest, "fearless-refactoring");
//! assert_eq!(talk.title, "Fearless Refactoring");
//!
//! let ordered = vec![talk("a", "First").with_order(1)];
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::content::{ContentManifest, read_manifest};
use crate::types::{
    ExternalPost, GithubRepo, ImpactMetric, PortableBlock, PostSource, Slug, Span, Talk,
};

// =========================================================================
// Fixtures
// =========================================================================

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// The sample manifest: a speaker with events on both sides of mid-2024,
/// two talks, a workshop, a project with a company, metrics, testimonials,
/// and posts from every source.
pub fn sample_manifest() -> ContentManifest {
    read_manifest(&fixtures_dir().join("content.json")).unwrap()
}

/// Find a talk by slug, panicking with the available slugs if missing.
pub fn find_talk<'a>(manifest: &'a ContentManifest, slug: &str) -> &'a Talk {
    manifest
        .talks
        .iter()
        .find(|t| t.slug.as_ref().is_some_and(|s| s.current == slug))
        .unwrap_or_else(|| {
            let slugs: Vec<_> = manifest
                .talks
                .iter()
                .filter_map(|t| t.slug.as_ref().map(|s| s.current.as_str()))
                .collect();
            panic!("talk '{slug}' not found. Available: {slugs:?}")
        })
}

// =========================================================================
// Portable Text builders
// =========================================================================

/// A text block with one unmarked span.
pub fn block(style: &str, text: &str) -> PortableBlock {
    PortableBlock {
        kind: "block".to_string(),
        style: Some(style.to_string()),
        children: vec![Span {
            key: None,
            text: text.to_string(),
            marks: vec![],
        }],
        ..PortableBlock::default()
    }
}

/// A heading block with an optional stored `_key`.
pub fn heading(style: &str, text: &str, key: Option<&str>) -> PortableBlock {
    PortableBlock {
        key: key.map(str::to_string),
        ..block(style, text)
    }
}

/// A non-text block (image, code, …).
pub fn object_block(kind: &str) -> PortableBlock {
    PortableBlock {
        kind: kind.to_string(),
        ..PortableBlock::default()
    }
}

/// A bullet or number list item.
pub fn list_item(list: &str, text: &str) -> PortableBlock {
    PortableBlock {
        list_item: Some(list.to_string()),
        level: Some(1),
        ..block("normal", text)
    }
}

/// A span carrying the given marks.
pub fn span(text: &str, marks: &[&str]) -> Span {
    Span {
        key: None,
        text: text.to_string(),
        marks: marks.iter().map(|m| m.to_string()).collect(),
    }
}

// =========================================================================
// Document builders
// =========================================================================

pub fn talk(id: &str, title: &str) -> Talk {
    Talk {
        id: id.to_string(),
        title: title.to_string(),
        slug: None,
        summary: None,
        body: vec![],
        video_url: None,
        slides_url: None,
        tags: vec![],
        icon: None,
        order: None,
    }
}

impl Talk {
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_slug(mut self, slug: &str) -> Self {
        self.slug = Some(Slug {
            current: slug.to_string(),
        });
        self
    }
}

pub fn metric(id: &str, value: f64, unit: Option<&str>) -> ImpactMetric {
    ImpactMetric {
        id: id.to_string(),
        label: id.to_string(),
        value,
        unit: unit.map(str::to_string),
        order: None,
    }
}

impl ImpactMetric {
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }
}

/// A CMS-sourced post; `published` is RFC 3339.
pub fn post(title: &str, url: &str, published: Option<&str>) -> ExternalPost {
    ExternalPost {
        title: title.to_string(),
        url: url.to_string(),
        published_at: published.map(|p| {
            DateTime::parse_from_rfc3339(p)
                .unwrap()
                .with_timezone(&Utc)
        }),
        source: PostSource::Cms,
        thumbnail: None,
        tags: vec![],
    }
}

pub fn repo(full_name: &str, stars: u64) -> GithubRepo {
    let name = full_name.rsplit('/').next().unwrap_or(full_name);
    GithubRepo {
        name: name.to_string(),
        full_name: full_name.to_string(),
        html_url: format!("https://github.com/{full_name}"),
        description: None,
        stargazers_count: stars,
        language: Some("Rust".to_string()),
        fork: false,
    }
}

impl GithubRepo {
    pub fn forked(mut self) -> Self {
        self.fork = true;
        self
    }
}
