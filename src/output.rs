//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is a **content inventory**, not a request log. Every document is
//! shown by its positional index and title, with secondary details (slug,
//! date, location, source) on indented context lines. HTTP chatter goes to
//! the logger instead (`-v`).
//!
//! # Entity Display Contract
//!
//! 1. **Header line**: positional index + title
//! 2. **Context lines**: indented `Slug:`, `Date:`, `Location:`, …
//!
//! [`entity_header`] and [`context`] enforce this so fetch, check and
//! generate output read the same way.
//!
//! # Output Format
//!
//! ## Fetch / Check
//!
//! ```text
//! Events
//! 001 RustConf
//!     Date: Sep 10–13, 2024
//!     Location: 🇺🇸 Portland, OR, USA
//!     Talk: Fearless Refactoring
//!
//! Talks
//! 001 Fearless Refactoring
//!     Slug: fearless-refactoring
//!     Summary: Changing large Rust codebases without…
//!
//! Posts
//! 001 Shipping Rust
//!     Source: Medium, May 1, 2024
//!
//! GitHub
//!     1 repository, 134 stars
//!
//! Fetched 4 events, 2 talks, 1 workshop, 2 projects, 2 testimonials, 3 metrics, 3 posts
//! ```
//!
//! `check` appends the dangling references it found.
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! Talks → talks/index.html
//!     fearless-refactoring → talks/fearless-refactoring/index.html
//!
//! Generated 10 pages, 0 assets
//! ```
//!
//! ## Migrate
//!
//! ```text
//! Created
//! 001 talk Fearless Refactoring (abc123)
//!
//! Failed
//! 001 event event #3: invalid record: missing name
//!
//! created 4, failed 1
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::content::ContentManifest;
use crate::generate::GeneratedSite;
use crate::migrate::MigrationReport;
use crate::resolve::{country_flag, date_label, format_metric_number, page_slug};
use crate::text::truncate;

const SUMMARY_WIDTH: usize = 60;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// ```text
/// 001 RustConf
/// ```
fn entity_header(index: usize, title: &str) -> String {
    format!("{} {}", format_index(index), title)
}

/// ```text
///     Slug: fearless-refactoring
/// ```
fn context(label: &str, value: &str) -> String {
    format!("{}{}: {}", indent(1), label, value)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    format!("{} {}", n, if n == 1 { one } else { many })
}

/// Push a section title plus its lines, skipping empty sections.
fn section(lines: &mut Vec<String>, title: &str, body: Vec<String>) {
    if body.is_empty() {
        return;
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(title.to_string());
    lines.extend(body);
}

// ============================================================================
// Fetch / check
// ============================================================================

pub fn format_fetch_output(manifest: &ContentManifest) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(profile) = &manifest.profile {
        let mut body = vec![context("Name", &profile.name)];
        if let Some(tagline) = &profile.tagline {
            body.push(context("Tagline", tagline));
        }
        section(&mut lines, "Profile", body);
    }

    let mut body = Vec::new();
    for (i, event) in manifest.events.iter().enumerate() {
        body.push(entity_header(i + 1, &event.title));
        if let Some(date) = event.date {
            body.push(context("Date", &date_label(date, event.end_date)));
        }
        if let Some(location) = &event.location {
            let flag = country_flag(Some(location));
            body.push(context("Location", &format!("{flag} {location}")));
        }
        let talk = event
            .talk
            .as_ref()
            .and_then(|r| manifest.talks.iter().find(|t| t.id == r.id));
        if let Some(talk) = talk {
            body.push(context("Talk", &talk.title));
        }
    }
    section(&mut lines, "Events", body);

    let mut body = Vec::new();
    for (i, talk) in manifest.talks.iter().enumerate() {
        body.push(entity_header(i + 1, &talk.title));
        body.push(context("Slug", &page_slug(talk)));
        if let Some(summary) = &talk.summary {
            body.push(context("Summary", &truncate(summary, SUMMARY_WIDTH)));
        }
    }
    section(&mut lines, "Talks", body);

    let mut body = Vec::new();
    for (i, workshop) in manifest.workshops.iter().enumerate() {
        body.push(entity_header(i + 1, &workshop.title));
        body.push(context("Slug", &page_slug(workshop)));
    }
    section(&mut lines, "Workshops", body);

    let mut body = Vec::new();
    for (i, project) in manifest.projects.iter().enumerate() {
        body.push(entity_header(i + 1, &project.title));
        if let Some(repo) = &project.repo {
            match manifest.github.stars_for(repo) {
                Some(stars) => body.push(context("Repo", &format!("{repo} ★ {stars}"))),
                None => body.push(context("Repo", repo)),
            }
        }
    }
    section(&mut lines, "Projects", body);

    let body: Vec<String> = manifest
        .metrics
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let value = format_metric_number(m.value, m.unit.as_deref());
            entity_header(i + 1, &format!("{} {}", value, m.label))
        })
        .collect();
    section(&mut lines, "Metrics", body);

    let body: Vec<String> = manifest
        .testimonials
        .iter()
        .enumerate()
        .map(|(i, t)| entity_header(i + 1, &t.author))
        .collect();
    section(&mut lines, "Testimonials", body);

    let mut body = Vec::new();
    for (i, post) in manifest.posts.iter().enumerate() {
        body.push(entity_header(i + 1, &post.title));
        let source = match post.published_at {
            Some(date) => format!("{}, {}", post.source.label(), date.format("%b %-d, %Y")),
            None => post.source.label().to_string(),
        };
        body.push(context("Source", &source));
    }
    section(&mut lines, "Posts", body);

    if !manifest.github.repos.is_empty() {
        section(
            &mut lines,
            "GitHub",
            vec![format!(
                "{}{}, {}",
                indent(1),
                plural(manifest.github.repos.len(), "repository", "repositories"),
                plural(manifest.github.total_stars as usize, "star", "stars")
            )],
        );
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Fetched {}, {}, {}, {}, {}, {}, {}",
        plural(manifest.events.len(), "event", "events"),
        plural(manifest.talks.len(), "talk", "talks"),
        plural(manifest.workshops.len(), "workshop", "workshops"),
        plural(manifest.projects.len(), "project", "projects"),
        plural(manifest.testimonials.len(), "testimonial", "testimonials"),
        plural(manifest.metrics.len(), "metric", "metrics"),
        plural(manifest.posts.len(), "post", "posts"),
    ));
    lines
}

pub fn print_fetch_output(manifest: &ContentManifest) {
    for line in format_fetch_output(manifest) {
        println!("{}", line);
    }
}

/// Inventory plus the reference problems `check` found.
pub fn format_check_output(manifest: &ContentManifest, problems: &[String]) -> Vec<String> {
    let mut lines = format_fetch_output(manifest);
    lines.push(String::new());
    if problems.is_empty() {
        lines.push("No dangling references".to_string());
    } else {
        lines.push(format!("Problems ({})", problems.len()));
        lines.extend(problems.iter().map(|p| format!("{}{}", indent(1), p)));
    }
    lines
}

pub fn print_check_output(manifest: &ContentManifest, problems: &[String]) {
    for line in format_check_output(manifest, problems) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

fn page_name(url: &str) -> &str {
    match url {
        "/" => "Home",
        "/events/" => "Events",
        "/talks/" => "Talks",
        "/workshops/" => "Workshops",
        "/projects/" => "Projects",
        "/writing/" => "Writing",
        "/about/" => "About",
        other => other.trim_matches('/').rsplit('/').next().unwrap_or(other),
    }
}

fn page_file(url: &str) -> String {
    let dir = url.trim_matches('/');
    if dir.is_empty() {
        "index.html".to_string()
    } else {
        format!("{dir}/index.html")
    }
}

pub fn format_generate_output(site: &GeneratedSite) -> Vec<String> {
    let mut lines: Vec<String> = site
        .pages
        .iter()
        .map(|url| {
            // Detail pages sit two levels deep: /talks/{slug}/
            let depth = usize::from(url.trim_matches('/').contains('/'));
            format!("{}{} → {}", indent(depth), page_name(url), page_file(url))
        })
        .collect();
    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}",
        plural(site.pages.len(), "page", "pages"),
        plural(site.assets_copied, "asset", "assets")
    ));
    lines
}

pub fn print_generate_output(site: &GeneratedSite) {
    for line in format_generate_output(site) {
        println!("{}", line);
    }
}

// ============================================================================
// Migrate
// ============================================================================

pub fn format_migration_report(report: &MigrationReport) -> Vec<String> {
    let mut lines = Vec::new();
    section(
        &mut lines,
        "Created",
        report
            .created
            .iter()
            .enumerate()
            .map(|(i, c)| entity_header(i + 1, &format!("{} {} ({})", c.kind, c.label, c.id)))
            .collect(),
    );
    section(
        &mut lines,
        "Failed",
        report
            .failed
            .iter()
            .enumerate()
            .map(|(i, f)| entity_header(i + 1, &format!("{} {}: {}", f.kind, f.label, f.reason)))
            .collect(),
    );
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "created {}, failed {}",
        report.created.len(),
        report.failed.len()
    ));
    lines
}

pub fn print_migration_report(report: &MigrationReport) {
    for line in format_migration_report(report) {
        println!("{}", line);
    }
}
