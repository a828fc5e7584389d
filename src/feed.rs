//! RSS feed and sitemap.
//!
//! Both documents are rendered with maud like the HTML pages; maud's
//! escaping covers the five XML-significant characters, so the output is
//! well-formed XML.
//!
//! The feed combines dated events and posts, newest first, capped at
//! `feed.limit`. Undated items are left out since RSS readers order by
//! `pubDate`.

use crate::config::SiteSection;
use crate::content::ContentManifest;
use crate::resolve::{date_label, page_slug};
use chrono::{DateTime, NaiveTime, Utc};
use maud::{Markup, PreEscaped, html};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// One entry in the RSS feed.
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub description: Option<String>,
    pub category: &'static str,
    pub published: DateTime<Utc>,
}

/// Dated events and posts, newest first, capped at `feed.limit`.
pub fn feed_items(manifest: &ContentManifest) -> Vec<FeedItem> {
    let site = &manifest.config.site;
    let talks_by_id = |id: &str| manifest.talks.iter().find(|t| t.id == id);

    let events = manifest.events.iter().filter_map(|event| {
        let date = event.date?;
        let talk = event.talk.as_ref().and_then(|r| talks_by_id(&r.id));
        let link = match (&event.url, talk) {
            (Some(url), _) => url.clone(),
            (None, Some(talk)) => site.absolute_url(&format!("/talks/{}/", page_slug(talk))),
            (None, None) => site.absolute_url("/events/"),
        };
        let mut description = date_label(date, event.end_date);
        if let Some(location) = &event.location {
            description.push_str(" · ");
            description.push_str(location);
        }
        if let Some(talk) = talk {
            description.push_str(" · ");
            description.push_str(&talk.title);
        }
        Some(FeedItem {
            title: event.title.clone(),
            link,
            description: Some(description),
            category: "Event",
            published: date.and_time(NaiveTime::MIN).and_utc(),
        })
    });

    let posts = manifest.posts.iter().filter_map(|post| {
        Some(FeedItem {
            title: post.title.clone(),
            link: post.url.clone(),
            description: None,
            category: post.source.label(),
            published: post.published_at?,
        })
    });

    let mut items: Vec<FeedItem> = events.chain(posts).collect();
    items.sort_by(|a, b| b.published.cmp(&a.published));
    items.truncate(manifest.config.feed.limit);
    items
}

/// RSS 2.0 document for the site.
pub fn render_rss(manifest: &ContentManifest) -> Markup {
    let site = &manifest.config.site;
    let items = feed_items(manifest);
    let description = if site.description.is_empty() {
        &site.title
    } else {
        &site.description
    };

    html! {
        (PreEscaped(XML_DECLARATION))
        rss version="2.0" {
            channel {
                title { (site.title) }
                link { (site.absolute_url("/")) }
                description { (description) }
                language { (site.language) }
                @if let Some(newest) = items.first() {
                    lastBuildDate { (newest.published.to_rfc2822()) }
                }
                @for item in &items {
                    item {
                        title { (item.title) }
                        link { (item.link) }
                        guid isPermaLink="true" { (item.link) }
                        pubDate { (item.published.to_rfc2822()) }
                        category { (item.category) }
                        @if let Some(description) = &item.description {
                            description { (description) }
                        }
                    }
                }
            }
        }
    }
}

/// Sitemap listing every page URL under `site.base_url`.
pub fn render_sitemap(site: &SiteSection, pages: &[String]) -> Markup {
    html! {
        (PreEscaped(XML_DECLARATION))
        urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" {
            @for page in pages {
                url { loc { (site.absolute_url(page)) } }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn feed_is_newest_first_and_capped() {
        let manifest = sample_manifest();
        let titles: Vec<String> = feed_items(&manifest).into_iter().map(|i| i.title).collect();
        assert_eq!(
            titles,
            vec!["RustConf", "Shipping Rust", "Swiss Devs", "Hello", "Notes on Testing"]
        );
    }

    #[test]
    fn undated_items_are_left_out() {
        let mut manifest = sample_manifest();
        manifest.config.feed.limit = 100;
        let items = feed_items(&manifest);
        assert!(!items.iter().any(|i| i.title == "Meetup TBA"));
        assert_eq!(items.len(), 6);
    }

    #[test]
    fn event_links_fall_back_to_talk_page() {
        let manifest = sample_manifest();
        let swiss = feed_items(&manifest)
            .into_iter()
            .find(|i| i.title == "Swiss Devs")
            .unwrap();
        assert_eq!(swiss.link, "https://jane.dev/talks/fearless-refactoring/");
        assert_eq!(
            swiss.description.as_deref(),
            Some("Mar 5, 2024 · Zürich, Switzerland · Fearless Refactoring")
        );
        assert_eq!(swiss.category, "Event");
    }

    #[test]
    fn rss_document_shape() {
        let xml = render_rss(&sample_manifest()).into_string();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0">"#));
        assert!(xml.contains("<title>Jane Doe</title>"));
        assert!(xml.contains("<pubDate>Tue, 10 Sep 2024 00:00:00 +0000</pubDate>"));
        assert!(xml.contains("<lastBuildDate>Tue, 10 Sep 2024 00:00:00 +0000</lastBuildDate>"));
        assert_eq!(xml.matches("<item>").count(), 5);
    }

    #[test]
    fn rss_escapes_titles() {
        let mut manifest = sample_manifest();
        manifest.posts[0].title = "Tom & Jerry <3".to_string();
        let xml = render_rss(&manifest).into_string();
        assert!(xml.contains("Tom &amp; Jerry &lt;3"));
    }

    #[test]
    fn sitemap_lists_absolute_urls() {
        let site = SiteSection {
            base_url: "https://jane.dev/".to_string(),
            ..SiteSection::default()
        };
        let xml =
            render_sitemap(&site, &["/".to_string(), "/talks/x/".to_string()]).into_string();
        assert!(xml.contains("<loc>https://jane.dev/</loc>"));
        assert!(xml.contains("<loc>https://jane.dev/talks/x/</loc>"));
        assert_eq!(xml.matches("<url>").count(), 2);
    }
}
