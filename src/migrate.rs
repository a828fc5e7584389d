//! One-off import of legacy JSON fixtures into the CMS.
//!
//! Reads `talks.json`, `events.json` and `testimonials.json` from a fixtures
//! directory, reshapes each record into a CMS document and creates it
//! through a [`DocumentSink`].
//!
//! ## Guarantees
//!
//! - Each record results in at most one `create_document` call. Records that
//!   cannot be transformed are reported and skipped without a call.
//! - A failed create is logged and recorded; later records still run.
//! - Nothing is transactional. A partial run leaves the documents it
//!   created, and a rerun creates them again.
//!
//! Talks go first so that events naming a talk by title can reference the
//! id the CMS returned for it.
//!
//! ## Legacy shapes
//!
//! ```json
//! // events.json
//! [{ "name": "RustConf", "date": "2024-09-10", "endDate": "2024-09-13",
//!    "city": "Portland", "country": "USA", "link": "https://…",
//!    "type": "conference", "talkTitle": "Fearless Refactoring" }]
//! // talks.json
//! [{ "title": "…", "abstract": "para one\n\npara two", "video": "…",
//!    "slides": "…", "tags": ["rust"] }]
//! // testimonials.json
//! [{ "text": "…", "name": "Sam Lee", "title": "CTO", "company": "Acme" }]
//! ```

use crate::fetch::{FetchError, SanityClient};
use crate::text::slugify;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{file}: {source}")]
    Fixture {
        file: String,
        source: serde_json::Error,
    },
    #[error("invalid record: {0}")]
    InvalidRecord(String),
    #[error("create failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where migrated documents go.
pub trait DocumentSink {
    /// Create one document, returning its id.
    fn create_document(&mut self, document: &Value) -> Result<String, MigrateError>;
}

impl DocumentSink for SanityClient<'_> {
    fn create_document(&mut self, document: &Value) -> Result<String, MigrateError> {
        Ok(self.create(document)?)
    }
}

/// Prints documents instead of creating them (`--dry-run`).
pub struct DryRun<W: Write> {
    out: W,
    count: usize,
}

impl<W: Write> DryRun<W> {
    pub fn new(out: W) -> Self {
        Self { out, count: 0 }
    }
}

impl<W: Write> DocumentSink for DryRun<W> {
    fn create_document(&mut self, document: &Value) -> Result<String, MigrateError> {
        self.count += 1;
        writeln!(self.out, "{}", serde_json::to_string_pretty(document)?)?;
        Ok(format!("dry-run.{}", self.count))
    }
}

// ============================================================================
// Legacy records
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyEvent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub talk_title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyTalk {
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "abstract")]
    pub summary: Option<String>,
    #[serde(default)]
    pub video: Option<String>,
    #[serde(default)]
    pub slides: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyTestimonial {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

/// The three fixture files. A missing file is an empty list.
#[derive(Debug, Default)]
pub struct LegacyFixtures {
    pub talks: Vec<LegacyTalk>,
    pub events: Vec<LegacyEvent>,
    pub testimonials: Vec<LegacyTestimonial>,
}

impl LegacyFixtures {
    pub fn len(&self) -> usize {
        self.talks.len() + self.events.len() + self.testimonials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn load_fixtures(dir: &Path) -> Result<LegacyFixtures, MigrateError> {
    Ok(LegacyFixtures {
        talks: load_file(dir, "talks.json")?,
        events: load_file(dir, "events.json")?,
        testimonials: load_file(dir, "testimonials.json")?,
    })
}

fn load_file<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Vec<T>, MigrateError> {
    let path = dir.join(name);
    if !path.exists() {
        log::info!("{} not found, nothing to migrate from it", path.display());
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(&path)?;
    serde_json::from_str(&content).map_err(|source| MigrateError::Fixture {
        file: name.to_string(),
        source,
    })
}

// ============================================================================
// Transformation
// ============================================================================

fn required(value: &str, field: &str) -> Result<String, MigrateError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(MigrateError::InvalidRecord(format!("missing {field}")));
    }
    Ok(value.to_string())
}

fn date(value: Option<&str>) -> Result<Option<String>, MigrateError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(|d| Some(d.to_string()))
            .map_err(|_| MigrateError::InvalidRecord(format!("unparseable date '{raw}'"))),
    }
}

fn slug(title: &str) -> Value {
    json!({ "_type": "slug", "current": slugify(title) })
}

/// Plain text paragraphs (blank-line separated) as Portable Text blocks.
pub fn paragraphs(text: &str) -> Vec<Value> {
    let text = text.replace("\r\n", "\n");
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .enumerate()
        .map(|(i, p)| {
            json!({
                "_type": "block",
                "_key": format!("p{i}"),
                "style": "normal",
                "markDefs": [],
                "children": [{ "_type": "span", "_key": format!("p{i}s"), "text": p, "marks": [] }]
            })
        })
        .collect()
}

/// `"City, Country"`, or whichever part exists.
fn location(city: Option<&str>, country: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [city, country]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join(", "))
}

/// Insert `value` under `key` when present.
fn put(doc: &mut Value, key: &str, value: Option<impl Into<Value>>) {
    if let (Some(map), Some(value)) = (doc.as_object_mut(), value) {
        map.insert(key.to_string(), value.into());
    }
}

pub fn talk_document(talk: &LegacyTalk) -> Result<Value, MigrateError> {
    let title = required(&talk.title, "title")?;
    let body = talk.summary.as_deref().map(paragraphs).unwrap_or_default();
    let summary = talk
        .summary
        .as_deref()
        .and_then(|s| s.split("\n\n").map(str::trim).find(|p| !p.is_empty()))
        .map(str::to_string);

    let mut doc = json!({
        "_type": "talk",
        "title": title,
        "slug": slug(&title),
        "body": body,
        "tags": talk.tags,
    });
    put(&mut doc, "summary", summary);
    put(&mut doc, "videoUrl", talk.video.clone());
    put(&mut doc, "slidesUrl", talk.slides.clone());
    Ok(doc)
}

/// `talk_ids` maps talk slugs to the ids created earlier in the run.
pub fn event_document(
    event: &LegacyEvent,
    talk_ids: &HashMap<String, String>,
) -> Result<Value, MigrateError> {
    let title = required(&event.name, "name")?;
    let start = date(event.date.as_deref())?;
    let end = date(event.end_date.as_deref())?;

    let mut doc = json!({
        "_type": "event",
        "title": title,
        "slug": slug(&title),
    });
    put(&mut doc, "date", start);
    put(&mut doc, "endDate", end);
    put(
        &mut doc,
        "location",
        location(event.city.as_deref(), event.country.as_deref()),
    );
    put(&mut doc, "url", event.link.clone());
    put(&mut doc, "kind", event.kind.clone());

    if let Some(talk_title) = event.talk_title.as_deref() {
        match talk_ids.get(&slugify(talk_title)) {
            Some(id) => put(&mut doc, "talk", Some(json!({ "_type": "reference", "_ref": id }))),
            None => log::warn!("event \"{title}\" names unknown talk \"{talk_title}\""),
        }
    }
    Ok(doc)
}

/// The legacy company is free text, so it is folded into the role.
pub fn testimonial_document(testimonial: &LegacyTestimonial) -> Result<Value, MigrateError> {
    let quote = required(&testimonial.text, "text")?;
    let author = required(&testimonial.name, "name")?;
    let role = location(testimonial.title.as_deref(), testimonial.company.as_deref());

    let mut doc = json!({
        "_type": "testimonial",
        "quote": quote,
        "author": author,
    });
    put(&mut doc, "role", role);
    Ok(doc)
}

// ============================================================================
// Run
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CreatedDocument {
    pub kind: &'static str,
    pub label: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FailedRecord {
    pub kind: &'static str,
    pub label: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct MigrationReport {
    pub created: Vec<CreatedDocument>,
    pub failed: Vec<FailedRecord>,
}

impl MigrationReport {
    fn submit(
        &mut self,
        sink: &mut dyn DocumentSink,
        kind: &'static str,
        label: String,
        document: Result<Value, MigrateError>,
    ) -> Option<String> {
        let outcome = document.and_then(|doc| sink.create_document(&doc));
        match outcome {
            Ok(id) => {
                log::info!("created {kind} \"{label}\" as {id}");
                self.created.push(CreatedDocument {
                    kind,
                    label,
                    id: id.clone(),
                });
                Some(id)
            }
            Err(e) => {
                log::warn!("{kind} \"{label}\" not migrated: {e}");
                self.failed.push(FailedRecord {
                    kind,
                    label,
                    reason: e.to_string(),
                });
                None
            }
        }
    }
}

/// Migrate every record in `fixtures` into `sink`.
pub fn migrate(fixtures: &LegacyFixtures, sink: &mut dyn DocumentSink) -> MigrationReport {
    let mut report = MigrationReport::default();

    let mut talk_ids = HashMap::new();
    for (i, talk) in fixtures.talks.iter().enumerate() {
        let label = record_label(&talk.title, "talk", i);
        if let Some(id) = report.submit(sink, "talk", label, talk_document(talk)) {
            talk_ids.insert(slugify(&talk.title), id);
        }
    }

    for (i, event) in fixtures.events.iter().enumerate() {
        let label = record_label(&event.name, "event", i);
        report.submit(sink, "event", label, event_document(event, &talk_ids));
    }

    for (i, testimonial) in fixtures.testimonials.iter().enumerate() {
        let label = record_label(&testimonial.name, "testimonial", i);
        report.submit(sink, "testimonial", label, testimonial_document(testimonial));
    }

    report
}

fn record_label(name: &str, kind: &str, index: usize) -> String {
    if name.trim().is_empty() {
        format!("{kind} #{}", index + 1)
    } else {
        name.trim().to_string()
    }
}
