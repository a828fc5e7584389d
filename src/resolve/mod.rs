//! View models for the generate stage.
//!
//! The manifest stores documents as the CMS shapes them: references are bare
//! ids, dates are raw, icons are names. Pages want the resolved form: the
//! talk an event links to, a formatted date label, a flag, an embed URL.
//! [`Resolver`] does that mapping once per build and hands out borrowed
//! views, so rendering never looks anything up itself.
//!
//! References that point at documents missing from the manifest resolve to
//! `None`; the page simply omits that piece.

pub mod dates;
pub mod flags;
pub mod media;
pub mod metrics;

pub use dates::{date_label, is_upcoming};
pub use flags::{GLOBE, country_flag};
pub use media::{Icon, VideoEmbed, VideoProvider, resolve_icon, resolve_video};
pub use metrics::format_metric_number;

use crate::content::ContentManifest;
use crate::text::{Heading, extract_headings, slugify};
use crate::types::{
    Company, Event, ExternalPost, ImpactMetric, Media, Ordered, Project, Reference,
    SpeakerProfile, Talk, Testimonial, Workshop,
};
use chrono::NaiveDate;
use std::collections::HashMap;

pub struct ProfileView<'a> {
    pub profile: &'a SpeakerProfile,
    /// Flag for `profile.location`, absent when no location is set.
    pub flag: Option<String>,
}

pub struct MetricView<'a> {
    pub metric: &'a ImpactMetric,
    pub display: String,
}

#[derive(Clone)]
pub struct EventView<'a> {
    pub event: &'a Event,
    pub date_label: Option<String>,
    pub flag: String,
    pub upcoming: bool,
    pub talk: Option<&'a Talk>,
}

impl EventView<'_> {
    /// Site-relative URL of the linked talk's page.
    pub fn talk_url(&self) -> Option<String> {
        self.talk.map(|t| format!("/talks/{}/", page_slug(t)))
    }
}

/// Events split around "today".
pub struct EventTimeline<'a> {
    /// Soonest first; undated events last.
    pub upcoming: Vec<EventView<'a>>,
    /// Most recent first.
    pub past: Vec<EventView<'a>>,
}

pub struct TalkView<'a> {
    pub talk: &'a Talk,
    pub slug: String,
    pub icon: Icon,
    pub video: Option<VideoEmbed>,
    pub headings: Vec<Heading>,
    /// Events where this talk was given, most recent first.
    pub events: Vec<EventView<'a>>,
}

impl TalkView<'_> {
    pub fn url(&self) -> String {
        format!("/talks/{}/", self.slug)
    }
}

pub struct WorkshopView<'a> {
    pub workshop: &'a Workshop,
    pub slug: String,
    pub headings: Vec<Heading>,
}

impl WorkshopView<'_> {
    pub fn url(&self) -> String {
        format!("/workshops/{}/", self.slug)
    }
}

#[derive(Clone, Copy)]
pub struct CompanyView<'a> {
    pub company: &'a Company,
    pub logo: Option<&'a Media>,
}

pub struct ProjectView<'a> {
    pub project: &'a Project,
    pub icon: Icon,
    pub company: Option<CompanyView<'a>>,
    /// GitHub stars, when `project.repo` matches a fetched repository.
    pub stars: Option<u64>,
}

pub struct TestimonialView<'a> {
    pub testimonial: &'a Testimonial,
    pub company: Option<CompanyView<'a>>,
}

/// Slug used in page URLs.
///
/// The fetch stage assigns one to every document; a hand-edited manifest
/// might not have one, so fall back to the title.
pub fn page_slug<T: Ordered>(item: &T) -> String {
    match item.slug().filter(|s| !s.trim().is_empty()) {
        Some(slug) => slug.to_string(),
        None => slugify(item.title()),
    }
}

/// Resolves manifest documents into view models.
pub struct Resolver<'a> {
    manifest: &'a ContentManifest,
    today: NaiveDate,
    talks: HashMap<&'a str, &'a Talk>,
    companies: HashMap<&'a str, &'a Company>,
    media: HashMap<&'a str, &'a Media>,
}

impl<'a> Resolver<'a> {
    /// `today` decides which events are upcoming.
    pub fn new(manifest: &'a ContentManifest, today: NaiveDate) -> Self {
        Self {
            manifest,
            today,
            talks: manifest.talks.iter().map(|t| (t.id.as_str(), t)).collect(),
            companies: manifest
                .companies
                .iter()
                .map(|c| (c.id.as_str(), c))
                .collect(),
            media: manifest.media.iter().map(|m| (m.id.as_str(), m)).collect(),
        }
    }

    pub fn manifest(&self) -> &'a ContentManifest {
        self.manifest
    }

    pub fn talk(&self, reference: Option<&Reference>) -> Option<&'a Talk> {
        reference.and_then(|r| self.talks.get(r.id.as_str()).copied())
    }

    pub fn company(&self, reference: Option<&Reference>) -> Option<CompanyView<'a>> {
        let company = reference.and_then(|r| self.companies.get(r.id.as_str()).copied())?;
        Some(CompanyView {
            company,
            logo: company
                .logo
                .as_ref()
                .and_then(|r| self.media.get(r.id.as_str()).copied()),
        })
    }

    pub fn profile(&self) -> Option<ProfileView<'a>> {
        let profile = self.manifest.profile.as_ref()?;
        let flag = profile
            .location
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .map(|l| country_flag(Some(l)));
        Some(ProfileView { profile, flag })
    }

    pub fn metrics(&self) -> Vec<MetricView<'a>> {
        self.manifest
            .metrics
            .iter()
            .map(|metric| MetricView {
                metric,
                display: format_metric_number(metric.value, metric.unit.as_deref()),
            })
            .collect()
    }

    pub fn event(&self, event: &'a Event) -> EventView<'a> {
        EventView {
            event,
            date_label: event.date.map(|start| date_label(start, event.end_date)),
            flag: country_flag(event.location.as_deref()),
            upcoming: is_upcoming(event.date, event.end_date, self.today),
            talk: self.talk(event.talk.as_ref()),
        }
    }

    pub fn events(&self) -> EventTimeline<'a> {
        let (mut upcoming, mut past): (Vec<_>, Vec<_>) = self
            .manifest
            .events
            .iter()
            .map(|e| self.event(e))
            .partition(|v| v.upcoming);
        upcoming.sort_by_key(|v| (v.event.date.is_none(), v.event.date));
        past.sort_by(|a, b| b.event.date.cmp(&a.event.date));
        EventTimeline { upcoming, past }
    }

    pub fn talks(&self) -> Vec<TalkView<'a>> {
        self.manifest.talks.iter().map(|t| self.talk_view(t)).collect()
    }

    pub fn talk_view(&self, talk: &'a Talk) -> TalkView<'a> {
        let mut events: Vec<EventView<'a>> = self
            .manifest
            .events
            .iter()
            .filter(|e| e.talk.as_ref().is_some_and(|r| r.id == talk.id))
            .map(|e| self.event(e))
            .collect();
        events.sort_by(|a, b| b.event.date.cmp(&a.event.date));

        TalkView {
            talk,
            slug: page_slug(talk),
            icon: resolve_icon(talk.icon.as_deref()),
            video: resolve_video(talk.video_url.as_deref()),
            headings: extract_headings(&talk.body),
            events,
        }
    }

    pub fn workshops(&self) -> Vec<WorkshopView<'a>> {
        self.manifest
            .workshops
            .iter()
            .map(|workshop| WorkshopView {
                workshop,
                slug: page_slug(workshop),
                headings: extract_headings(&workshop.body),
            })
            .collect()
    }

    pub fn projects(&self) -> Vec<ProjectView<'a>> {
        self.manifest
            .projects
            .iter()
            .map(|project| ProjectView {
                project,
                icon: resolve_icon(project.icon.as_deref()),
                company: self.company(project.company.as_ref()),
                stars: project
                    .repo
                    .as_deref()
                    .and_then(|r| self.manifest.github.stars_for(r)),
            })
            .collect()
    }

    pub fn testimonials(&self) -> Vec<TestimonialView<'a>> {
        self.manifest
            .testimonials
            .iter()
            .map(|testimonial| TestimonialView {
                testimonial,
                company: self.company(testimonial.company.as_ref()),
            })
            .collect()
    }

    /// Posts, newest first.
    pub fn posts(&self) -> Vec<&'a ExternalPost> {
        let mut posts: Vec<&ExternalPost> = self.manifest.posts.iter().collect();
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        posts
    }
}
