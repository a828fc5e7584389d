//! # Folio
//!
//! Content pipeline and static site generator for a speaker portfolio.
//! Events, talks, workshops, projects and the rest live in a hosted headless
//! CMS; folio reads them with GROQ, adds GitHub, Medium and Contentful data,
//! and renders a static site with an RSS feed and a sitemap.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Fetch     CMS + APIs  →  content.json   (network → structured data)
//! 2. Generate  manifest    →  dist/          (HTML, rss.xml, sitemap.xml)
//! ```
//!
//! The content manifest is plain JSON. It can be inspected, diffed between
//! runs, and fed to `generate` without touching the network, which is also
//! how the generate stage is tested.
//!
//! Inside the generate stage the flow is one-directional:
//!
//! ```text
//! manifest record → resolver → view model → maud component → HTML
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Stage 1: runs every query and integration, normalises, produces the manifest |
//! | [`generate`] | Stage 2: renders the manifest into the site using Maud |
//! | [`feed`] | RSS 2.0 feed and sitemap |
//! | [`portable`] | Portable Text blocks to HTML |
//! | [`resolve`] | Pure resolvers: dates, flags, metrics, icons, video embeds, view models |
//! | [`queries`] | GROQ query strings, one per document type |
//! | [`fetch`] | HTTP glue for Sanity, GitHub, Medium, Contentful, Pushover |
//! | [`migrate`] | One-shot import of legacy JSON fixtures into the CMS |
//! | [`config`] | `folio.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | CMS document records and Portable Text blocks |
//! | [`text`] | Plain-text extraction, heading extraction, truncation |
//! | [`naming`] | Slugs, slug deduplication, `order` sorting |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Integrations Never Fail the Build
//!
//! A third-party API being down should cost a page section, not the deploy.
//! Every integration returns a default (empty list, zero stars, `false`) and
//! logs a warning. Local problems (bad config, unwritable output) are still
//! errors.
//!
//! ## Blocking HTTP
//!
//! Each integration is a single request and the pipeline is linear, so the
//! HTTP client is `reqwest::blocking`. The one spot with two independent
//! reads (CMS documents and external posts) uses `rayon::join`.
//!
//! ## Explicit Rendering Context
//!
//! The colour scheme, analytics tracker and "today" used to split upcoming
//! from past events are all passed in from config and the CLI. Rendering has
//! no globals, so the same manifest and date always give the same site.

pub mod config;
pub mod content;
pub mod feed;
pub mod fetch;
pub mod generate;
pub mod migrate;
pub mod naming;
pub mod output;
pub mod portable;
pub mod queries;
pub mod resolve;
pub mod text;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
