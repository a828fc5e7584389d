//! Icon and video resolution.
//!
//! Editors pick icons by name in the CMS and paste video links in whatever
//! form their browser gave them. Both are normalised here: icon names map to
//! a closed set of [`Icon`]s, and YouTube/Vimeo links map to embeddable
//! player URLs. Anything unrecognised degrades to a generic link icon or a
//! plain link, never an error.

use url::Url;

/// The icons the site knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Github,
    Youtube,
    Linkedin,
    Mastodon,
    Twitter,
    Mail,
    Mic,
    Code,
    Book,
    Rocket,
    Cloud,
    Shield,
    Chart,
    Users,
    Link,
}

impl Icon {
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Github => "🐙",
            Icon::Youtube => "▶️",
            Icon::Linkedin => "💼",
            Icon::Mastodon => "🐘",
            Icon::Twitter => "𝕏",
            Icon::Mail => "✉️",
            Icon::Mic => "🎤",
            Icon::Code => "💻",
            Icon::Book => "📘",
            Icon::Rocket => "🚀",
            Icon::Cloud => "☁️",
            Icon::Shield => "🛡️",
            Icon::Chart => "📈",
            Icon::Users => "👥",
            Icon::Link => "🔗",
        }
    }

    /// Accessible label, also used as the CSS modifier class.
    pub fn label(self) -> &'static str {
        match self {
            Icon::Github => "github",
            Icon::Youtube => "youtube",
            Icon::Linkedin => "linkedin",
            Icon::Mastodon => "mastodon",
            Icon::Twitter => "twitter",
            Icon::Mail => "mail",
            Icon::Mic => "mic",
            Icon::Code => "code",
            Icon::Book => "book",
            Icon::Rocket => "rocket",
            Icon::Cloud => "cloud",
            Icon::Shield => "shield",
            Icon::Chart => "chart",
            Icon::Users => "users",
            Icon::Link => "link",
        }
    }
}

/// Map a CMS icon or social platform name to an [`Icon`].
pub fn resolve_icon(name: Option<&str>) -> Icon {
    let name = name.map(|n| n.trim().to_ascii_lowercase()).unwrap_or_default();
    match name.as_str() {
        "github" | "git" => Icon::Github,
        "youtube" | "video" => Icon::Youtube,
        "linkedin" => Icon::Linkedin,
        "mastodon" | "fediverse" => Icon::Mastodon,
        "twitter" | "x" => Icon::Twitter,
        "mail" | "email" | "e-mail" => Icon::Mail,
        "mic" | "microphone" | "talk" | "podcast" => Icon::Mic,
        "code" | "terminal" => Icon::Code,
        "book" | "docs" | "blog" => Icon::Book,
        "rocket" | "launch" => Icon::Rocket,
        "cloud" => Icon::Cloud,
        "shield" | "security" => Icon::Shield,
        "chart" | "analytics" | "growth" => Icon::Chart,
        "users" | "community" | "team" => Icon::Users,
        _ => Icon::Link,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoProvider {
    Youtube,
    Vimeo,
}

/// An embeddable video resolved from a pasted link.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoEmbed {
    pub provider: VideoProvider,
    pub id: String,
    pub embed_url: String,
}

/// Resolve a YouTube or Vimeo link to its embed URL.
///
/// Returns `None` for other hosts and malformed links; the caller shows
/// those as a plain "watch" link.
pub fn resolve_video(raw: Option<&str>) -> Option<VideoEmbed> {
    let url = Url::parse(raw?.trim()).ok()?;
    let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");
    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|p| !p.is_empty()).collect())
        .unwrap_or_default();

    match host {
        "youtu.be" => youtube(segments.first().copied()),
        "youtube.com" | "youtube-nocookie.com" => match segments.as_slice() {
            ["watch"] => youtube(
                url.query_pairs()
                    .find(|(k, _)| k == "v")
                    .map(|(_, v)| v.into_owned())
                    .as_deref(),
            ),
            ["embed" | "shorts" | "live" | "v", id, ..] => youtube(Some(*id)),
            _ => None,
        },
        "vimeo.com" => vimeo(segments.iter().copied().find(|s| is_numeric(s))),
        "player.vimeo.com" => match segments.as_slice() {
            ["video", id, ..] => vimeo(Some(*id)),
            _ => None,
        },
        _ => None,
    }
}

fn youtube(id: Option<&str>) -> Option<VideoEmbed> {
    let id = id.filter(|id| is_video_id(id))?;
    Some(VideoEmbed {
        provider: VideoProvider::Youtube,
        id: id.to_string(),
        embed_url: format!("https://www.youtube-nocookie.com/embed/{id}"),
    })
}

fn vimeo(id: Option<&str>) -> Option<VideoEmbed> {
    let id = id.filter(|id| is_numeric(id))?;
    Some(VideoEmbed {
        provider: VideoProvider::Vimeo,
        id: id.to_string(),
        embed_url: format!("https://player.vimeo.com/video/{id}?dnt=1"),
    })
}

fn is_video_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
