//! HTML site generation.
//!
//! Stage 2 of the folio build pipeline. Takes the content manifest and
//! generates the final static site.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): hero, impact metrics, next events, featured
//!   talks, testimonials, latest posts
//! - **Events** (`/events/index.html`): upcoming and past events
//! - **Talks** (`/talks/index.html`, `/talks/{slug}/index.html`): talk list
//!   and one page per talk with table of contents, video and slides
//! - **Workshops** (`/workshops/index.html`, `/workshops/{slug}/index.html`)
//! - **Projects** (`/projects/index.html`): icons, companies, GitHub stars
//! - **Writing** (`/writing/index.html`): external posts, newest first
//! - **About** (`/about/index.html`): speaker bio
//! - **Not found** (`/404.html`)
//!
//! Plus `rss.xml` and `sitemap.xml` (see [`crate::feed`]) and the static
//! assets from `site.assets_dir`.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── 404.html
//! ├── rss.xml
//! ├── sitemap.xml
//! ├── events/index.html
//! ├── talks/
//! │   ├── index.html
//! │   └── fearless-refactoring/index.html
//! ├── workshops/...
//! ├── projects/index.html
//! ├── writing/index.html
//! ├── about/index.html
//! └── favicon.svg                # from assets_dir
//! ```
//!
//! ## CSS
//!
//! `static/style.css` is embedded at compile time and inlined into every
//! page, prefixed with the color custom properties generated from config.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::config::{self, SiteConfig};
use crate::content::ContentManifest;
use crate::feed;
use crate::portable::render_blocks;
use crate::resolve::{
    EventView, Icon, ProjectView, Resolver, TalkView, TestimonialView, VideoEmbed, WorkshopView,
    resolve_icon,
};
use crate::text::Heading;
use crate::types::ExternalPost;
use chrono::NaiveDate;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("asset copy failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// What a generate run wrote.
#[derive(Debug, Default)]
pub struct GeneratedSite {
    /// Site-relative URLs of the HTML pages (`/`, `/talks/`, …), excluding 404.
    pub pages: Vec<String>,
    pub assets_copied: usize,
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Write the whole site for `manifest` into `output_dir`.
///
/// `assets_dir` is copied verbatim when it exists. `today` decides which
/// events are upcoming.
pub fn generate(
    manifest: &ContentManifest,
    output_dir: &Path,
    assets_dir: &Path,
    today: NaiveDate,
) -> Result<GeneratedSite, GenerateError> {
    let resolver = Resolver::new(manifest, today);
    let layout = Layout::new(&manifest.config);
    let mut site = GeneratedSite::default();

    fs::create_dir_all(output_dir)?;

    let mut write = |path: &str, markup: Markup| -> Result<(), GenerateError> {
        write_page(output_dir, path, markup)?;
        log::debug!("wrote {path}");
        site.pages.push(path.to_string());
        Ok(())
    };

    write("/", render_home(&resolver, &layout))?;
    write("/events/", render_events_page(&resolver, &layout))?;

    let talks = resolver.talks();
    write("/talks/", render_talks_page(&talks, &layout))?;
    for talk in &talks {
        write(&talk.url(), render_talk_page(talk, &layout))?;
    }

    let workshops = resolver.workshops();
    write("/workshops/", render_workshops_page(&workshops, &layout))?;
    for workshop in &workshops {
        write(&workshop.url(), render_workshop_page(workshop, &layout))?;
    }

    write("/projects/", render_projects_page(&resolver, &layout))?;
    write("/writing/", render_writing_page(&resolver.posts(), &layout))?;
    write("/about/", render_about_page(&resolver, &layout))?;

    fs::write(
        output_dir.join("404.html"),
        render_not_found(&layout).into_string(),
    )?;

    fs::write(
        output_dir.join("rss.xml"),
        feed::render_rss(manifest).into_string(),
    )?;
    fs::write(
        output_dir.join("sitemap.xml"),
        feed::render_sitemap(&manifest.config.site, &site.pages).into_string(),
    )?;

    site.assets_copied = copy_assets(assets_dir, output_dir)?;
    log::info!(
        "generated {} pages and {} assets in {}",
        site.pages.len(),
        site.assets_copied,
        output_dir.display()
    );
    Ok(site)
}

/// `/talks/x/` → `talks/x/index.html`.
fn write_page(output_dir: &Path, url: &str, markup: Markup) -> std::io::Result<()> {
    let dir = output_dir.join(url.trim_matches('/'));
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("index.html"), markup.into_string())
}

/// Copy every file under `assets_dir` into `output_dir`, keeping the tree.
/// A missing assets directory copies nothing.
fn copy_assets(assets_dir: &Path, output_dir: &Path) -> Result<usize, GenerateError> {
    if !assets_dir.is_dir() {
        log::debug!("no assets at {}", assets_dir.display());
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(assets_dir).follow_links(true) {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(assets_dir) else {
            continue;
        };
        let target = output_dir.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

// ============================================================================
// Layout
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Home,
    Events,
    Talks,
    Workshops,
    Projects,
    Writing,
    About,
    Other,
}

const NAV: &[(Section, &str, &str)] = &[
    (Section::Events, "/events/", "Events"),
    (Section::Talks, "/talks/", "Talks"),
    (Section::Workshops, "/workshops/", "Workshops"),
    (Section::Projects, "/projects/", "Projects"),
    (Section::Writing, "/writing/", "Writing"),
    (Section::About, "/about/", "About"),
];

/// Per-site values every page needs.
struct Layout<'a> {
    config: &'a SiteConfig,
    css: String,
}

impl<'a> Layout<'a> {
    fn new(config: &'a SiteConfig) -> Self {
        let color_css = config::generate_color_css(&config.colors);
        Self {
            config,
            css: format!("{}\n\n{}", color_css, CSS_STATIC),
        }
    }

    /// `Page · Site`, or just the site title for the home page.
    fn title(&self, page: Option<&str>) -> String {
        match page {
            Some(page) => format!("{} · {}", page, self.config.site.title),
            None => self.config.site.title.clone(),
        }
    }
}

/// Renders the base HTML document structure
fn base_document(
    layout: &Layout<'_>,
    page_title: Option<&str>,
    section: Section,
    content: Markup,
) -> Markup {
    let site = &layout.config.site;
    let analytics = &layout.config.analytics;
    let description = (!site.description.is_empty()).then_some(site.description.as_str());
    let author = (!site.author.is_empty()).then_some(site.author.as_str());

    html! {
        (DOCTYPE)
        html lang=(site.language) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (layout.title(page_title)) }
                @if let Some(description) = description {
                    meta name="description" content=(description);
                }
                @if let Some(author) = author {
                    meta name="author" content=(author);
                }
                link rel="alternate" type="application/rss+xml" title=(site.title) href="/rss.xml";
                style { (PreEscaped(&layout.css)) }
                @if let Some(domain) = analytics.domain.as_deref().filter(|d| !d.is_empty()) {
                    script defer data-domain=(domain) src=(analytics.script_src) {}
                }
            }
            body {
                (site_header(layout, section))
                (content)
                (site_footer(layout))
            }
        }
    }
}

/// Renders the site header with title and section navigation
fn site_header(layout: &Layout<'_>, current: Section) -> Markup {
    html! {
        header.site-header {
            a.site-title href="/" { (layout.config.site.title) }
            nav.site-nav {
                ul {
                    @for (section, href, label) in NAV {
                        li class=[(*section == current).then_some("current")] {
                            a href=(href) { (label) }
                        }
                    }
                }
            }
        }
    }
}

fn site_footer(layout: &Layout<'_>) -> Markup {
    let site = &layout.config.site;
    html! {
        footer.site-footer {
            @if !site.author.is_empty() {
                span { "© " (site.author) }
                " · "
            }
            a href="/rss.xml" { "RSS" }
        }
    }
}

// ============================================================================
// Components
// ============================================================================

fn icon(icon: Icon) -> Markup {
    html! {
        span.icon role="img" aria-label=(icon.label()) { (icon.glyph()) }
    }
}

fn tag_list(tags: &[String]) -> Markup {
    html! {
        @if !tags.is_empty() {
            ul.tags {
                @for tag in tags {
                    li { (tag) }
                }
            }
        }
    }
}

fn event_item(view: &EventView<'_>) -> Markup {
    let event = view.event;
    html! {
        li.event {
            h3 {
                @if let Some(url) = &event.url {
                    a href=(url) rel="noopener" { (event.title) }
                } @else {
                    (event.title)
                }
            }
            p.meta {
                @if let Some(label) = &view.date_label {
                    time datetime=[event.date.map(|d| d.to_string())] { (label) }
                    " · "
                }
                span.flag { (view.flag) }
                " "
                (event.location.as_deref().unwrap_or("TBA"))
                @if let Some(kind) = &event.kind {
                    " · " (kind)
                }
            }
            @if let (Some(talk), Some(url)) = (view.talk, view.talk_url()) {
                p { "Talk: " a href=(url) { (talk.title) } }
            }
        }
    }
}

fn event_list(events: &[EventView<'_>]) -> Markup {
    html! {
        ul.event-list {
            @for view in events {
                (event_item(view))
            }
        }
    }
}

fn talk_card(view: &TalkView<'_>) -> Markup {
    let talk = view.talk;
    html! {
        li.card {
            h3 {
                (icon(view.icon))
                a href=(view.url()) { (talk.title) }
            }
            @if let Some(summary) = &talk.summary {
                p { (summary) }
            }
            (tag_list(&talk.tags))
        }
    }
}

fn testimonial_item(view: &TestimonialView<'_>) -> Markup {
    let t = view.testimonial;
    html! {
        figure.testimonial {
            blockquote { p { (t.quote) } }
            figcaption {
                "— " (t.author)
                @if let Some(role) = &t.role {
                    ", " (role)
                }
                @if let Some(company) = view.company {
                    ", " (company.company.name)
                }
            }
        }
    }
}

fn post_item(post: &ExternalPost) -> Markup {
    html! {
        li.post {
            h3 { a href=(post.url) rel="noopener" { (post.title) } }
            p.meta {
                @if let Some(date) = post.published_at {
                    time datetime=(date.to_rfc3339()) { (date.format("%b %-d, %Y")) }
                    " · "
                }
                (post.source.label())
            }
            (tag_list(&post.tags))
        }
    }
}

fn toc(headings: &[Heading]) -> Markup {
    html! {
        @if !headings.is_empty() {
            nav.toc aria-label="Contents" {
                h2 { "Contents" }
                ul {
                    @for heading in headings {
                        li class={ "level-" (heading.level) } {
                            a href={ "#" (heading.id) } { (heading.text) }
                        }
                    }
                }
            }
        }
    }
}

fn video(embed: Option<&VideoEmbed>, raw: Option<&str>) -> Markup {
    html! {
        @if let Some(embed) = embed {
            div.video {
                iframe src=(embed.embed_url) title="Recording" loading="lazy"
                    allow="fullscreen; picture-in-picture" allowfullscreen {}
            }
        } @else if let Some(url) = raw.filter(|u| !u.trim().is_empty()) {
            p { a href=(url) rel="noopener" { "Watch the recording" } }
        }
    }
}

// ============================================================================
// Pages
// ============================================================================

fn render_home(resolver: &Resolver<'_>, layout: &Layout<'_>) -> Markup {
    let home = &layout.config.home;
    let profile = resolver.profile();
    let metrics = resolver.metrics();
    let timeline = resolver.events();
    let upcoming: Vec<_> = timeline
        .upcoming
        .into_iter()
        .take(home.upcoming_events)
        .collect();
    let talks: Vec<_> = resolver
        .talks()
        .into_iter()
        .take(home.featured_talks)
        .collect();
    let testimonials = resolver.testimonials();
    let posts: Vec<_> = resolver
        .posts()
        .into_iter()
        .take(home.latest_posts)
        .collect();

    let content = html! {
        main.home {
            section.hero {
                @if let Some(view) = &profile {
                    h1 { (view.profile.name) }
                    @if let Some(tagline) = &view.profile.tagline {
                        p.tagline { (tagline) }
                    }
                    @if let (Some(flag), Some(location)) = (&view.flag, &view.profile.location) {
                        p.meta { span.flag { (flag) } " " (location) }
                    }
                    @if !view.profile.socials.is_empty() {
                        ul.socials {
                            @for social in &view.profile.socials {
                                li {
                                    (icon(resolve_icon(Some(social.platform.as_str()))))
                                    a href=(social.url) rel="me noopener" { (social.platform) }
                                }
                            }
                        }
                    }
                } @else {
                    h1 { (layout.config.site.title) }
                    @if !layout.config.site.description.is_empty() {
                        p.tagline { (layout.config.site.description) }
                    }
                }
            }
            @if !metrics.is_empty() {
                section.metrics aria-label="Impact" {
                    @for view in &metrics {
                        div.metric {
                            span.metric-value { (view.display) }
                            span.metric-label { (view.metric.label) }
                        }
                    }
                }
            }
            @if !upcoming.is_empty() {
                section {
                    h2 { "Upcoming events" }
                    (event_list(&upcoming))
                    p { a href="/events/" { "All events" } }
                }
            }
            @if !talks.is_empty() {
                section {
                    h2 { "Featured talks" }
                    ul.card-list {
                        @for view in &talks {
                            (talk_card(view))
                        }
                    }
                    p { a href="/talks/" { "All talks" } }
                }
            }
            @if !testimonials.is_empty() {
                section.testimonials {
                    h2 { "What people say" }
                    @for view in &testimonials {
                        (testimonial_item(view))
                    }
                }
            }
            @if !posts.is_empty() {
                section {
                    h2 { "Latest writing" }
                    ul.post-list {
                        @for post in &posts {
                            (post_item(post))
                        }
                    }
                    p { a href="/writing/" { "All writing" } }
                }
            }
        }
    };

    base_document(layout, None, Section::Home, content)
}

fn render_events_page(resolver: &Resolver<'_>, layout: &Layout<'_>) -> Markup {
    let timeline = resolver.events();
    let content = html! {
        main.events-page {
            h1 { "Events" }
            section {
                h2 { "Upcoming" }
                @if timeline.upcoming.is_empty() {
                    p.meta { "Nothing scheduled right now." }
                } @else {
                    (event_list(&timeline.upcoming))
                }
            }
            @if !timeline.past.is_empty() {
                section {
                    h2 { "Past" }
                    (event_list(&timeline.past))
                }
            }
        }
    };
    base_document(layout, Some("Events"), Section::Events, content)
}

fn render_talks_page(talks: &[TalkView<'_>], layout: &Layout<'_>) -> Markup {
    let content = html! {
        main.talks-page {
            h1 { "Talks" }
            ul.card-list {
                @for view in talks {
                    (talk_card(view))
                }
            }
        }
    };
    base_document(layout, Some("Talks"), Section::Talks, content)
}

fn render_talk_page(view: &TalkView<'_>, layout: &Layout<'_>) -> Markup {
    let talk = view.talk;
    let content = html! {
        main.talk-page {
            article {
                header {
                    h1 { (icon(view.icon)) (talk.title) }
                    @if let Some(summary) = &talk.summary {
                        p.tagline { (summary) }
                    }
                    (tag_list(&talk.tags))
                }
                (video(view.video.as_ref(), talk.video_url.as_deref()))
                @if let Some(slides) = &talk.slides_url {
                    p { a href=(slides) rel="noopener" { "Slides" } }
                }
                (toc(&view.headings))
                div.prose {
                    (render_blocks(&talk.body, &view.headings))
                }
                @if !view.events.is_empty() {
                    section {
                        h2 { "Given at" }
                        (event_list(&view.events))
                    }
                }
            }
        }
    };
    base_document(layout, Some(&talk.title), Section::Talks, content)
}

fn render_workshops_page(workshops: &[WorkshopView<'_>], layout: &Layout<'_>) -> Markup {
    let content = html! {
        main.workshops-page {
            h1 { "Workshops" }
            ul.card-list {
                @for view in workshops {
                    li.card {
                        h3 { a href=(view.url()) { (view.workshop.title) } }
                        (workshop_meta(view))
                        @if let Some(summary) = &view.workshop.summary {
                            p { (summary) }
                        }
                    }
                }
            }
        }
    };
    base_document(layout, Some("Workshops"), Section::Workshops, content)
}

fn workshop_meta(view: &WorkshopView<'_>) -> Markup {
    let w = view.workshop;
    html! {
        @if w.duration.is_some() || w.level.is_some() {
            p.meta {
                @if let Some(duration) = &w.duration { (duration) }
                @if w.duration.is_some() && w.level.is_some() { " · " }
                @if let Some(level) = &w.level { (level) }
            }
        }
    }
}

fn render_workshop_page(view: &WorkshopView<'_>, layout: &Layout<'_>) -> Markup {
    let workshop = view.workshop;
    let content = html! {
        main.workshop-page {
            article {
                header {
                    h1 { (workshop.title) }
                    (workshop_meta(view))
                    @if let Some(summary) = &workshop.summary {
                        p.tagline { (summary) }
                    }
                }
                (toc(&view.headings))
                div.prose {
                    (render_blocks(&workshop.body, &view.headings))
                }
            }
        }
    };
    base_document(layout, Some(&workshop.title), Section::Workshops, content)
}

fn project_card(view: &ProjectView<'_>) -> Markup {
    let project = view.project;
    html! {
        li.card {
            h3 {
                (icon(view.icon))
                @if let Some(url) = &project.url {
                    a href=(url) rel="noopener" { (project.title) }
                } @else {
                    (project.title)
                }
                @if let Some(stars) = view.stars {
                    " "
                    span.stars title="GitHub stars" { "★ " (stars) }
                }
            }
            @if let Some(summary) = &project.summary {
                p { (summary) }
            }
            @if let Some(company) = view.company {
                p.meta {
                    @if let Some(logo) = company.logo {
                        img.company-logo src=(logo.url)
                            alt=(logo.alt.as_deref().unwrap_or(&company.company.name));
                        " "
                    }
                    @if let Some(url) = &company.company.url {
                        a href=(url) rel="noopener" { (company.company.name) }
                    } @else {
                        (company.company.name)
                    }
                }
            }
            @if let Some(repo) = &project.repo {
                p.meta { a href={ "https://github.com/" (repo) } rel="noopener" { (repo) } }
            }
            (tag_list(&project.tech))
        }
    }
}

fn render_projects_page(resolver: &Resolver<'_>, layout: &Layout<'_>) -> Markup {
    let projects = resolver.projects();
    let github = &resolver.manifest().github;
    let content = html! {
        main.projects-page {
            h1 { "Projects" }
            @if github.total_stars > 0 {
                p.meta { "★ " (github.total_stars) " stars on GitHub" }
            }
            ul.card-list {
                @for view in &projects {
                    (project_card(view))
                }
            }
        }
    };
    base_document(layout, Some("Projects"), Section::Projects, content)
}

fn render_writing_page(posts: &[&ExternalPost], layout: &Layout<'_>) -> Markup {
    let content = html! {
        main.writing-page {
            h1 { "Writing" }
            @if posts.is_empty() {
                p.meta { "No posts yet." }
            } @else {
                ul.post-list {
                    @for post in posts {
                        (post_item(post))
                    }
                }
            }
        }
    };
    base_document(layout, Some("Writing"), Section::Writing, content)
}

fn render_about_page(resolver: &Resolver<'_>, layout: &Layout<'_>) -> Markup {
    let profile = resolver.profile();
    let content = html! {
        main.about-page {
            @if let Some(view) = &profile {
                h1 { "About " (view.profile.name) }
                @if let (Some(flag), Some(location)) = (&view.flag, &view.profile.location) {
                    p.meta { span.flag { (flag) } " " (location) }
                }
                div.prose {
                    (render_blocks(&view.profile.bio, &[]))
                }
                @if let Some(email) = &view.profile.email {
                    p { a href={ "mailto:" (email) } { (email) } }
                }
                @if !view.profile.socials.is_empty() {
                    ul.socials {
                        @for social in &view.profile.socials {
                            li { a href=(social.url) rel="me noopener" { (social.platform) } }
                        }
                    }
                }
            } @else {
                h1 { "About" }
                @if !layout.config.site.description.is_empty() {
                    p { (layout.config.site.description) }
                }
            }
        }
    };
    base_document(layout, Some("About"), Section::About, content)
}

fn render_not_found(layout: &Layout<'_>) -> Markup {
    let content = html! {
        main.not-found {
            h1 { "Page not found" }
            p { "The page you were looking for does not exist or has moved." }
            p { a href="/" { "Back to the home page" } }
        }
    };
    base_document(layout, Some("Not found"), Section::Other, content)
}

// ============================================================================
// Tests
// ============================================================================
