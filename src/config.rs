//! Site configuration module.
//!
//! Handles loading, validating, and merging `folio.toml`. Configuration is
//! layered: stock defaults are overridden by the user's file, key by key.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Speaker Portfolio"
//! base_url = "https://example.com"  # Absolute URLs in feed and sitemap
//! author = ""
//! description = ""
//! language = "en"
//! assets_dir = "assets"             # Copied verbatim to the output root
//!
//! [http]
//! timeout_secs = 20
//!
//! [cms]
//! project_id = ""                   # Empty disables the CMS fetch
//! dataset = "production"
//! api_version = "2024-01-01"
//! use_cdn = true
//! token_env = "SANITY_TOKEN"        # Name of the env var holding the token
//!
//! [github]
//! # user = "octocat"
//! max_repos = 6
//!
//! [medium]
//! # user = "someone"
//!
//! [contentful]
//! # space_id = "abc123"
//! environment = "master"
//! content_type = "blogPost"
//! token_env = "CONTENTFUL_TOKEN"
//!
//! [pushover]
//! token_env = "PUSHOVER_TOKEN"
//! user_env = "PUSHOVER_USER"
//!
//! [feed]
//! limit = 20
//!
//! [home]
//! upcoming_events = 3
//! featured_talks = 3
//! latest_posts = 3
//!
//! [analytics]
//! # domain = "example.com"
//!
//! [colors.light]
//! background = "#ffffff"
//! ...
//! ```
//!
//! ## Secrets
//!
//! Tokens never live in the file. Each integration names the environment
//! variable that holds its credential (`token_env`, `user_env`), read at fetch
//! time with [`secret`].
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [cms]
//! project_id = "x1y2z3"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `folio.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub site: SiteSection,
    pub http: HttpConfig,
    pub cms: CmsConfig,
    pub github: GithubConfig,
    pub medium: MediumConfig,
    pub contentful: ContentfulConfig,
    pub pushover: PushoverConfig,
    pub feed: FeedConfig,
    pub home: HomeConfig,
    pub analytics: AnalyticsConfig,
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match url::Url::parse(&self.site.base_url) {
            Ok(u) if u.scheme() == "http" || u.scheme() == "https" => {}
            _ => {
                return Err(ConfigError::Validation(format!(
                    "site.base_url must be an absolute http(s) URL, got '{}'",
                    self.site.base_url
                )));
            }
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "http.timeout_secs must be positive".into(),
            ));
        }
        if self.feed.limit == 0 {
            return Err(ConfigError::Validation("feed.limit must be positive".into()));
        }
        if self.cms.dataset.trim().is_empty() {
            return Err(ConfigError::Validation(
                "cms.dataset must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// General site metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Shown in the `<title>` of every page and as the feed title.
    pub title: String,
    /// Absolute base URL, used for feed links and the sitemap.
    pub base_url: String,
    pub author: String,
    pub description: String,
    /// `lang` attribute of generated pages.
    pub language: String,
    /// Directory of static assets copied to the output root.
    pub assets_dir: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "Speaker Portfolio".to_string(),
            base_url: "https://example.com".to_string(),
            author: String::new(),
            description: String::new(),
            language: "en".to_string(),
            assets_dir: "assets".to_string(),
        }
    }
}

impl SiteSection {
    /// Join a site-relative path onto `base_url`.
    pub fn absolute_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Shared HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 20,
            user_agent: concat!("folio/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Headless CMS (Sanity) connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CmsConfig {
    /// Empty disables the CMS fetch entirely.
    pub project_id: String,
    pub dataset: String,
    /// Dated API version, e.g. `2024-01-01`.
    pub api_version: String,
    /// Read from the CDN host when no token is configured.
    pub use_cdn: bool,
    /// Environment variable holding a read/write token.
    pub token_env: String,
    /// Override the API base URL entirely (e.g. a local mock).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: "production".to_string(),
            api_version: "2024-01-01".to_string(),
            use_cdn: true,
            token_env: "SANITY_TOKEN".to_string(),
            api_base: None,
        }
    }
}

impl CmsConfig {
    pub fn is_enabled(&self) -> bool {
        !self.project_id.trim().is_empty() || self.api_base.is_some()
    }

    /// Base URL for requests. Authenticated requests bypass the CDN.
    pub fn base_url(&self, authenticated: bool) -> String {
        if let Some(base) = &self.api_base {
            return base.trim_end_matches('/').to_string();
        }
        let host = if self.use_cdn && !authenticated {
            "apicdn.sanity.io"
        } else {
            "api.sanity.io"
        };
        format!("https://{}.{}", self.project_id, host)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GithubConfig {
    /// Account whose public repositories are listed. Absent disables GitHub.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// How many repositories to keep, most-starred first.
    pub max_repos: usize,
    /// Optional token, raises the rate limit.
    pub token_env: String,
    pub api_base: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            user: None,
            max_repos: 6,
            token_env: "GITHUB_TOKEN".to_string(),
            api_base: "https://api.github.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MediumConfig {
    /// Medium handle without the `@`. Absent disables Medium.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// RSS-to-JSON bridge endpoint.
    pub api_base: String,
}

impl Default for MediumConfig {
    fn default() -> Self {
        Self {
            user: None,
            api_base: "https://api.rss2json.com/v1/api.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentfulConfig {
    /// Absent disables Contentful.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_id: Option<String>,
    pub environment: String,
    pub content_type: String,
    pub token_env: String,
    /// Posts link to `post_base_url` + slug.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_base_url: Option<String>,
    pub api_base: String,
}

impl Default for ContentfulConfig {
    fn default() -> Self {
        Self {
            space_id: None,
            environment: "master".to_string(),
            content_type: "blogPost".to_string(),
            token_env: "CONTENTFUL_TOKEN".to_string(),
            post_base_url: None,
            api_base: "https://cdn.contentful.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PushoverConfig {
    pub token_env: String,
    pub user_env: String,
    pub api_base: String,
}

impl Default for PushoverConfig {
    fn default() -> Self {
        Self {
            token_env: "PUSHOVER_TOKEN".to_string(),
            user_env: "PUSHOVER_USER".to_string(),
            api_base: "https://api.pushover.net/1/messages.json".to_string(),
        }
    }
}

/// RSS feed settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedConfig {
    /// Maximum number of items, newest first.
    pub limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self { limit: 20 }
    }
}

/// How many items each home page section shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HomeConfig {
    pub upcoming_events: usize,
    pub featured_talks: usize,
    pub latest_posts: usize,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            upcoming_events: 3,
            featured_talks: 3,
            latest_posts: 3,
        }
    }
}

/// Privacy-friendly analytics tracker, emitted only when `domain` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyticsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    pub script_src: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            domain: None,
            script_src: "https://plausible.io/js/script.js".to_string(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    /// Cards, metric tiles, testimonial quotes.
    pub surface: String,
    pub text: String,
    /// Dates, locations, captions.
    pub text_muted: String,
    /// Links and highlighted numbers.
    pub accent: String,
    pub border: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            surface: "#f5f5f4".to_string(),
            text: "#1c1917".to_string(),
            text_muted: "#57534e".to_string(),
            accent: "#c2410c".to_string(),
            border: "#e7e5e4".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0c0a09".to_string(),
            surface: "#1c1917".to_string(),
            text: "#f5f5f4".to_string(),
            text_muted: "#a8a29e".to_string(),
            accent: "#fb923c".to_string(),
            border: "#292524".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

/// Read a secret from the environment variable named `env_name`.
///
/// Empty values count as unset.
pub fn secret(env_name: &str) -> Option<String> {
    std::env::var(env_name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// =============================================================================
// Loading folio.toml
// =============================================================================

/// `SiteConfig::default()` as a TOML table: the layer `folio.toml` is laid over.
fn defaults_table() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Lay `overrides` over `defaults`.
///
/// Sections merge key by key, down to nested ones like `[colors.dark]`, so a
/// `folio.toml` that sets only `colors.dark.accent` keeps every other dark
/// colour. Any non-table value in `overrides` wins outright.
pub fn overlay_toml(defaults: toml::Value, overrides: toml::Value) -> toml::Value {
    match (defaults, overrides) {
        (toml::Value::Table(mut table), toml::Value::Table(overrides)) => {
            for (key, value) in overrides {
                let merged = match table.remove(&key) {
                    Some(default) => overlay_toml(default, value),
                    None => value,
                };
                table.insert(key, merged);
            }
            toml::Value::Table(table)
        }
        (_, value) => value,
    }
}

/// Parse `folio.toml` contents over the defaults and validate the result.
pub fn parse_config(text: &str) -> Result<SiteConfig, ConfigError> {
    let overrides: toml::Value = toml::from_str(text)?;
    let config: SiteConfig = overlay_toml(defaults_table(), overrides).try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `folio.toml` from `path`.
///
/// A missing file is not an error: every section has a default, and with no
/// CMS project configured `fetch` simply produces an empty manifest.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    if !path.exists() {
        log::info!("no config at {}, using defaults", path.display());
        return parse_config("");
    }
    parse_config(&fs::read_to_string(path)?)
}

/// Returns a fully-commented stock `folio.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# folio configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.
#
# Secrets are never stored here: each integration names the environment
# variable that holds its token.

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
title = "Speaker Portfolio"
# Absolute URL the site is served from; used by rss.xml and sitemap.xml.
base_url = "https://example.com"
author = ""
description = ""
language = "en"
# Static files (favicon, fonts, images) copied to the output root.
assets_dir = "assets"

# ---------------------------------------------------------------------------
# HTTP client shared by all integrations
# ---------------------------------------------------------------------------
[http]
timeout_secs = 20
# user_agent = "folio/<version>"

# ---------------------------------------------------------------------------
# Headless CMS (Sanity). Leave project_id empty to skip the CMS fetch.
# ---------------------------------------------------------------------------
[cms]
project_id = ""
dataset = "production"
api_version = "2024-01-01"
# Reads go through the CDN unless a token is set.
use_cdn = true
token_env = "SANITY_TOKEN"

# ---------------------------------------------------------------------------
# GitHub repositories (star counts on projects)
# ---------------------------------------------------------------------------
[github]
# user = "octocat"
max_repos = 6
token_env = "GITHUB_TOKEN"
api_base = "https://api.github.com"

# ---------------------------------------------------------------------------
# Medium posts, via an RSS-to-JSON bridge
# ---------------------------------------------------------------------------
[medium]
# user = "someone"
api_base = "https://api.rss2json.com/v1/api.json"

# ---------------------------------------------------------------------------
# Contentful blog posts
# ---------------------------------------------------------------------------
[contentful]
# space_id = "abc123"
environment = "master"
content_type = "blogPost"
token_env = "CONTENTFUL_TOKEN"
# post_base_url = "https://blog.example.com/posts/"
api_base = "https://cdn.contentful.com"

# ---------------------------------------------------------------------------
# Pushover notifications (`folio build --notify`)
# ---------------------------------------------------------------------------
[pushover]
token_env = "PUSHOVER_TOKEN"
user_env = "PUSHOVER_USER"
api_base = "https://api.pushover.net/1/messages.json"

# ---------------------------------------------------------------------------
# RSS feed
# ---------------------------------------------------------------------------
[feed]
# Maximum items, newest first (events and posts combined).
limit = 20

# ---------------------------------------------------------------------------
# Home page sections
# ---------------------------------------------------------------------------
[home]
upcoming_events = 3
featured_talks = 3
latest_posts = 3

# ---------------------------------------------------------------------------
# Analytics (tracker script emitted only when domain is set)
# ---------------------------------------------------------------------------
[analytics]
# domain = "example.com"
script_src = "https://plausible.io/js/script.js"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
surface = "#f5f5f4"
text = "#1c1917"
text_muted = "#57534e"
accent = "#c2410c"
border = "#e7e5e4"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0c0a09"
surface = "#1c1917"
text = "#f5f5f4"
text_muted = "#a8a29e"
accent = "#fb923c"
border = "#292524"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-surface: {light_surface};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-accent: {light_accent};
    --color-border: {light_border};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-surface: {dark_surface};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-accent: {dark_accent};
        --color-border: {dark_border};
    }}
}}"#,
        light_bg = colors.light.background,
        light_surface = colors.light.surface,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_accent = colors.light.accent,
        light_border = colors.light.border,
        dark_bg = colors.dark.background,
        dark_surface = colors.dark.surface,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_accent = colors.dark.accent,
        dark_border = colors.dark.border,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_valid() {
        let config = SiteConfig::default();
        config.validate().unwrap();
        assert_eq!(config.cms.dataset, "production");
        assert_eq!(config.feed.limit, 20);
        assert!(!config.cms.is_enabled());
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[cms]
project_id = "abc123"

[colors.dark]
accent = "#ff0000"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.cms.project_id, "abc123");
        assert_eq!(config.cms.dataset, "production");
        assert_eq!(config.colors.dark.accent, "#ff0000");
        assert_eq!(config.colors.dark.background, "#0c0a09");
        assert_eq!(config.site.language, "en");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml = r#"
[cms]
projectid = "typo"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn cms_base_url_picks_cdn_only_for_anonymous_reads() {
        let cms = CmsConfig {
            project_id: "p1".to_string(),
            ..CmsConfig::default()
        };
        assert_eq!(cms.base_url(false), "https://p1.apicdn.sanity.io");
        assert_eq!(cms.base_url(true), "https://p1.api.sanity.io");

        let no_cdn = CmsConfig {
            use_cdn: false,
            ..cms.clone()
        };
        assert_eq!(no_cdn.base_url(false), "https://p1.api.sanity.io");
    }

    #[test]
    fn cms_api_base_override_wins() {
        let cms = CmsConfig {
            api_base: Some("http://127.0.0.1:9999/".to_string()),
            ..CmsConfig::default()
        };
        assert!(cms.is_enabled());
        assert_eq!(cms.base_url(true), "http://127.0.0.1:9999");
    }

    #[test]
    fn absolute_url_joins_without_double_slash() {
        let site = SiteSection {
            base_url: "https://jane.dev/".to_string(),
            ..SiteSection::default()
        };
        assert_eq!(site.absolute_url("/talks/x/"), "https://jane.dev/talks/x/");
        assert_eq!(site.absolute_url("rss.xml"), "https://jane.dev/rss.xml");
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("folio.toml")).unwrap();
        assert_eq!(config.site.title, "Speaker Portfolio");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("folio.toml");
        fs::write(
            &path,
            r#"
[site]
title = "Jane Doe"
base_url = "https://jane.dev"

[github]
user = "janedoe"
"#,
        )
        .unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.site.title, "Jane Doe");
        assert_eq!(config.github.user.as_deref(), Some("janedoe"));
        assert_eq!(config.github.max_repos, 6);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("folio.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_base_url() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("folio.toml");
        fs::write(&path, "[site]\nbase_url = \"jane.dev\"\n").unwrap();
        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn zero_feed_limit_is_invalid() {
        let mut config = SiteConfig::default();
        config.feed.limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        config.validate().unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.site.title, defaults.site.title);
        assert_eq!(config.colors.light.accent, defaults.colors.light.accent);
        assert_eq!(config.colors.dark.border, defaults.colors.dark.border);
        assert_eq!(config.pushover.api_base, defaults.pushover.api_base);
    }

    // =========================================================================
    // overlay_toml tests
    // =========================================================================

    #[test]
    fn overlay_scalar_replaces_default() {
        let defaults: toml::Value = toml::from_str("[feed]\nlimit = 20").unwrap();
        let overrides: toml::Value = toml::from_str("[feed]\nlimit = 5").unwrap();
        let merged = overlay_toml(defaults, overrides);
        assert_eq!(merged["feed"]["limit"].as_integer(), Some(5));
    }

    #[test]
    fn nested_colour_override_keeps_other_colours() {
        let config = parse_config(
            r##"
[colors.light]
background = "#fafafa"
"##,
        )
        .unwrap();
        assert_eq!(config.colors.light.background, "#fafafa");
        assert_eq!(config.colors.light.text, "#1c1917");
        assert_eq!(config.colors.dark.background, ColorScheme::default_dark().background);
    }

    #[test]
    fn empty_file_parses_to_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.site.title, SiteConfig::default().site.title);
        assert_eq!(config.colors.light.text, "#1c1917");
    }

    // =========================================================================
    // CSS generation
    // =========================================================================

    #[test]
    fn generate_css_includes_both_schemes() {
        let mut colors = ColorConfig::default();
        colors.light.accent = "#123456".to_string();
        let css = generate_color_css(&colors);
        assert!(css.contains("--color-accent: #123456"));
        assert!(css.contains("--color-bg: #0c0a09"));
        assert!(css.contains("@media (prefers-color-scheme: dark)"));
    }
}
