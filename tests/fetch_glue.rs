//! Fetch glue against a local HTTP server.
//!
//! Every integration's base URL is configurable, so these tests point them at
//! an in-process server that answers canned responses by request target, and
//! check both the happy path and the fall-back-to-default behaviour.

use folio::config::{
    CmsConfig, ContentfulConfig, GithubConfig, MediumConfig, PushoverConfig, SiteConfig,
};
use folio::content;
use folio::fetch::{FetchError, SanityClient, contentful, github, medium, pushover};
use folio::queries;
use folio::types::{Ordered, PostSource, Talk};
use reqwest::blocking::Client;
use serde_json::json;
use std::io::{Read as _, Write as _};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

// Always set by cargo when running tests, so it stands in for a secret.
const PRESENT_SECRET_ENV: &str = "CARGO_PKG_NAME";

// ===========================================================================
// Minimal HTTP server with canned responses
// ===========================================================================

/// A canned response, served for any request whose target contains `needle`.
struct Route {
    needle: &'static str,
    status: u16,
    body: String,
}

fn route(needle: &'static str, status: u16, body: impl Into<String>) -> Route {
    Route {
        needle,
        status,
        body: body.into(),
    }
}

#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    target: String,
    headers: String,
    body: String,
}

struct TestServer {
    port: u16,
    requests: Arc<Mutex<Vec<Recorded>>>,
    _stop: std::sync::mpsc::Sender<()>,
}

impl TestServer {
    fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let (tx, rx) = std::sync::mpsc::channel::<()>();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let routes = Arc::new(routes);

        let recorded = Arc::clone(&requests);
        thread::spawn(move || {
            listener.set_nonblocking(true).unwrap();
            loop {
                if rx.try_recv().is_ok() {
                    break;
                }
                match listener.accept() {
                    Ok((stream, _)) => {
                        let routes = Arc::clone(&routes);
                        let recorded = Arc::clone(&recorded);
                        thread::spawn(move || serve_request(stream, &routes, &recorded));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Self {
            port,
            requests,
            _stop: tx,
        }
    }

    fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn request_to(&self, needle: &str) -> Recorded {
        self.requests()
            .into_iter()
            .find(|r| r.target.contains(needle))
            .unwrap_or_else(|| panic!("no request matching {needle}"))
    }
}

fn serve_request(mut stream: TcpStream, routes: &[Route], recorded: &Mutex<Vec<Recorded>>) {
    let _ = stream.set_nonblocking(false);
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));

    let mut raw = Vec::new();
    let mut buf = [0u8; 4096];
    let header_end = loop {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => raw.extend_from_slice(&buf[..n]),
        }
        if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&raw[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|l| l.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while raw.len() < header_end + content_length {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => raw.extend_from_slice(&buf[..n]),
        }
    }

    let mut request_line = head.lines().next().unwrap_or("").split_whitespace();
    let method = request_line.next().unwrap_or("").to_string();
    let target = request_line.next().unwrap_or("/").to_string();
    let body = String::from_utf8_lossy(&raw[header_end..]).to_string();

    let (status, response_body) = routes
        .iter()
        .find(|r| target.contains(r.needle))
        .map(|r| (r.status, r.body.clone()))
        .unwrap_or((404, r#"{"error":"not found"}"#.to_string()));

    recorded.lock().unwrap().push(Recorded {
        method,
        target,
        headers: head,
        body,
    });

    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        _ => "Error",
    };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{response_body}",
        response_body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn http() -> Client {
    Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

fn cms_config(server: &TestServer) -> CmsConfig {
    CmsConfig {
        project_id: "test".to_string(),
        api_base: Some(server.url()),
        ..CmsConfig::default()
    }
}

fn has_header(recorded: &Recorded, name: &str, value: &str) -> bool {
    recorded.headers.lines().any(|line| {
        line.split_once(':').is_some_and(|(n, v)| {
            n.trim().eq_ignore_ascii_case(name) && v.trim() == value
        })
    })
}

// ===========================================================================
// Sanity
// ===========================================================================

#[test]
fn sanity_query_decodes_documents_and_skips_broken_ones() {
    let body = json!({
        "result": [
            {"_id": "t1", "title": "Fearless Refactoring", "videoUrl": "https://youtu.be/abc123"},
            {"_id": "t2"},
            {"_id": "t3", "title": "Async in Practice"}
        ]
    });
    let server = TestServer::start(vec![route("/data/query/", 200, body.to_string())]);
    let http = http();
    let config = cms_config(&server);
    let client = SanityClient::with_token(&http, &config, None);

    let talks: Vec<Talk> = client.query_documents(queries::TALKS).unwrap();
    let titles: Vec<&str> = talks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Fearless Refactoring", "Async in Practice"]);

    let request = server.request_to("/data/query/");
    assert_eq!(request.method, "GET");
    assert!(
        request
            .target
            .starts_with("/v2024-01-01/data/query/production?query=")
    );
    assert!(!request.headers.to_ascii_lowercase().contains("authorization:"));
}

#[test]
fn documents_with_null_rich_text_are_kept() {
    let talks = json!({
        "result": [{"_id": "t1", "title": "Work in Progress", "body": null, "tags": null}]
    });
    let profile = json!({
        "result": {"name": "Jane Doe", "bio": null, "location": "Zürich, Switzerland"}
    });
    let server = TestServer::start(vec![
        route("%3D%3D+%22talk%22", 200, talks.to_string()),
        route("%22speakerProfile%22", 200, profile.to_string()),
        route("/data/query/", 200, r#"{"result":[]}"#),
    ]);
    let config = SiteConfig {
        cms: cms_config(&server),
        ..SiteConfig::default()
    };

    let manifest = content::fetch(&config).unwrap();
    assert_eq!(manifest.talks.len(), 1);
    assert!(manifest.talks[0].body.is_empty());
    let profile = manifest.profile.expect("profile without bio is kept");
    assert_eq!(profile.name, "Jane Doe");
    assert!(profile.bio.is_empty());
}

#[test]
fn sanity_query_with_null_result_is_empty() {
    let server = TestServer::start(vec![route("/data/query/", 200, r#"{"result":null}"#)]);
    let http = http();
    let config = cms_config(&server);
    let client = SanityClient::with_token(&http, &config, None);
    let talks: Vec<Talk> = client.query_documents(queries::TALKS).unwrap();
    assert!(talks.is_empty());
}

#[test]
fn sanity_http_error_is_returned() {
    let server = TestServer::start(vec![route("/data/query/", 500, r#"{"error":"boom"}"#)]);
    let http = http();
    let config = cms_config(&server);
    let client = SanityClient::with_token(&http, &config, None);
    let err = client.query_documents::<Talk>(queries::TALKS).unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 500, .. }), "{err}");
}

#[test]
fn sanity_malformed_body_is_a_json_error() {
    let server = TestServer::start(vec![route("/data/query/", 200, "<html>oops</html>")]);
    let http = http();
    let config = cms_config(&server);
    let client = SanityClient::with_token(&http, &config, None);
    let err = client.query_documents::<Talk>(queries::TALKS).unwrap_err();
    assert!(matches!(err, FetchError::Json(_)), "{err}");
}

#[test]
fn sanity_create_posts_mutation_with_token() {
    let server = TestServer::start(vec![route(
        "/data/mutate/",
        200,
        r#"{"transactionId":"tx1","results":[{"id":"abc","operation":"create"}]}"#,
    )]);
    let http = http();
    let config = cms_config(&server);
    let client = SanityClient::with_token(&http, &config, Some("secret".to_string()));

    let id = client
        .create(&json!({"_type": "talk", "title": "New talk"}))
        .unwrap();
    assert_eq!(id, "abc");

    let request = server.request_to("/data/mutate/");
    assert_eq!(request.method, "POST");
    assert!(request.target.contains("returnIds=true"));
    assert!(has_header(&request, "authorization", "Bearer secret"));
    let sent: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(sent["mutations"][0]["create"]["title"], "New talk");
}

#[test]
fn sanity_create_without_results_is_an_api_error() {
    let server = TestServer::start(vec![route("/data/mutate/", 200, r#"{"results":[]}"#)]);
    let http = http();
    let config = cms_config(&server);
    let client = SanityClient::with_token(&http, &config, Some("secret".to_string()));
    let err = client.create(&json!({"_type": "talk"})).unwrap_err();
    assert!(matches!(err, FetchError::Api(_)), "{err}");
}

// ===========================================================================
// GitHub
// ===========================================================================

fn github_config(server: &TestServer) -> GithubConfig {
    GithubConfig {
        user: Some("jane".to_string()),
        max_repos: 2,
        token_env: "FOLIO_TEST_GITHUB_TOKEN_UNSET".to_string(),
        api_base: server.url(),
    }
}

fn repo_json(name: &str, stars: u64, fork: bool) -> serde_json::Value {
    json!({
        "name": name,
        "full_name": format!("jane/{name}"),
        "html_url": format!("https://github.com/jane/{name}"),
        "stargazers_count": stars,
        "fork": fork
    })
}

#[test]
fn github_summary_sorts_and_caps_repositories() {
    let body = json!([
        repo_json("small", 2, false),
        repo_json("tool", 120, false),
        repo_json("forked", 500, true),
        repo_json("site", 12, false)
    ]);
    let server = TestServer::start(vec![route("/users/jane/repos", 200, body.to_string())]);

    let summary = github::fetch_summary(&http(), &github_config(&server));
    let names: Vec<&str> = summary.repos.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["tool", "site"]);
    assert_eq!(summary.total_stars, 134);

    let request = server.request_to("/users/jane/repos");
    assert!(request.target.contains("per_page=100"));
    assert!(request.target.contains("sort=updated"));
}

#[test]
fn github_failure_returns_empty_summary() {
    let server = TestServer::start(vec![route("/users/jane/repos", 500, "{}")]);
    let summary = github::fetch_summary(&http(), &github_config(&server));
    assert!(summary.repos.is_empty());
    assert_eq!(summary.total_stars, 0);
}

#[test]
fn github_malformed_body_returns_empty_summary() {
    let server = TestServer::start(vec![route(
        "/users/jane/repos",
        200,
        r#"{"message":"API rate limit exceeded"}"#,
    )]);
    let summary = github::fetch_summary(&http(), &github_config(&server));
    assert!(summary.repos.is_empty());
    assert_eq!(summary.total_stars, 0);
}

// ===========================================================================
// Medium
// ===========================================================================

fn medium_config(server: &TestServer) -> MediumConfig {
    MediumConfig {
        user: Some("jane".to_string()),
        api_base: format!("{}/v1/api.json", server.url()),
    }
}

#[test]
fn medium_items_become_posts() {
    let body = json!({
        "status": "ok",
        "items": [{
            "title": "Shipping Rust",
            "link": "https://medium.com/@jane/shipping-rust",
            "pubDate": "2024-05-01 09:00:00",
            "thumbnail": "https://cdn.test/thumb.png",
            "categories": ["rust"]
        }]
    });
    let server = TestServer::start(vec![route("/v1/api.json", 200, body.to_string())]);

    let posts = medium::fetch_posts(&http(), &medium_config(&server));
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Shipping Rust");
    assert_eq!(posts[0].source, PostSource::Medium);
    assert!(posts[0].published_at.is_some());

    let request = server.request_to("/v1/api.json");
    assert!(
        request
            .target
            .contains("rss_url=https%3A%2F%2Fmedium.com%2Ffeed%2F%40jane")
    );
}

#[test]
fn medium_bridge_error_returns_empty() {
    let server = TestServer::start(vec![route(
        "/v1/api.json",
        200,
        r#"{"status":"error","message":"feed not found"}"#,
    )]);
    assert!(medium::fetch_posts(&http(), &medium_config(&server)).is_empty());
}

#[test]
fn medium_http_error_returns_empty() {
    let server = TestServer::start(vec![route("/v1/api.json", 503, "")]);
    assert!(medium::fetch_posts(&http(), &medium_config(&server)).is_empty());
}

// ===========================================================================
// Contentful
// ===========================================================================

fn contentful_config(server: &TestServer, token_env: &str) -> ContentfulConfig {
    ContentfulConfig {
        space_id: Some("space1".to_string()),
        token_env: token_env.to_string(),
        post_base_url: Some("https://blog.jane.dev/posts".to_string()),
        api_base: server.url(),
        ..ContentfulConfig::default()
    }
}

#[test]
fn contentful_entries_become_posts() {
    let body = json!({
        "items": [
            {"sys": {"id": "a"}, "fields": {"title": "Hello", "slug": "hello", "publishDate": "2024-02-02"}},
            {"sys": {"id": "b"}, "fields": {"title": "Draft"}}
        ]
    });
    let server = TestServer::start(vec![route(
        "/spaces/space1/environments/master/entries",
        200,
        body.to_string(),
    )]);

    let posts = contentful::fetch_posts(&http(), &contentful_config(&server, PRESENT_SECRET_ENV));
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].url, "https://blog.jane.dev/posts/hello");
    assert_eq!(posts[0].source, PostSource::Contentful);

    let request = server.request_to("/entries");
    assert!(request.target.contains("content_type=blogPost"));
    assert!(request.headers.to_ascii_lowercase().contains("authorization: bearer "));
}

#[test]
fn contentful_without_token_makes_no_request() {
    let server = TestServer::start(vec![route("/entries", 200, r#"{"items":[]}"#)]);
    let config = contentful_config(&server, "FOLIO_TEST_CONTENTFUL_TOKEN_UNSET");
    assert!(contentful::fetch_posts(&http(), &config).is_empty());
    assert!(server.requests().is_empty());
}

#[test]
fn contentful_malformed_body_returns_empty() {
    let server = TestServer::start(vec![route("/entries", 200, "not json")]);
    let config = contentful_config(&server, PRESENT_SECRET_ENV);
    assert!(contentful::fetch_posts(&http(), &config).is_empty());
}

// ===========================================================================
// Pushover
// ===========================================================================

fn pushover_config(server: &TestServer) -> PushoverConfig {
    PushoverConfig {
        token_env: PRESENT_SECRET_ENV.to_string(),
        user_env: PRESENT_SECRET_ENV.to_string(),
        api_base: format!("{}/1/messages.json", server.url()),
    }
}

#[test]
fn pushover_accepted_returns_true() {
    let server = TestServer::start(vec![route(
        "/1/messages.json",
        200,
        r#"{"status":1,"request":"r1"}"#,
    )]);
    assert!(pushover::notify(
        &http(),
        &pushover_config(&server),
        "Jane Doe build",
        "10 pages generated"
    ));

    let request = server.request_to("/1/messages.json");
    assert_eq!(request.method, "POST");
    assert!(request.body.contains("title=Jane+Doe+build"));
    assert!(request.body.contains("message=10+pages+generated"));
}

#[test]
fn pushover_rejected_returns_false() {
    let server = TestServer::start(vec![route(
        "/1/messages.json",
        200,
        r#"{"status":0,"errors":["user identifier is invalid"]}"#,
    )]);
    assert!(!pushover::notify(&http(), &pushover_config(&server), "t", "m"));
}

#[test]
fn pushover_http_error_returns_false() {
    let server = TestServer::start(vec![route("/1/messages.json", 400, r#"{"status":0}"#)]);
    assert!(!pushover::notify(&http(), &pushover_config(&server), "t", "m"));
}

// ===========================================================================
// Whole fetch stage
// ===========================================================================

fn site_config(server: &TestServer) -> SiteConfig {
    SiteConfig {
        cms: cms_config(server),
        github: github_config(server),
        medium: medium_config(server),
        contentful: contentful_config(server, PRESENT_SECRET_ENV),
        ..SiteConfig::default()
    }
}

#[test]
fn fetch_stage_assembles_manifest_from_all_sources() {
    let talks = json!({
        "result": [
            {"_id": "t2", "title": "Same Title", "order": 2},
            {"_id": "t1", "title": "Same Title", "order": 1}
        ]
    });
    let medium_body = json!({
        "status": "ok",
        "items": [{"title": "On Medium", "link": "https://medium.com/@jane/x", "pubDate": "2024-05-01 09:00:00"}]
    });
    let contentful_body = json!({
        "items": [{"sys": {"id": "a"}, "fields": {"title": "On Blog", "slug": "b", "publishDate": "2024-06-01"}}]
    });
    let server = TestServer::start(vec![
        // `_type == "talk"` as encoded in the query string
        route("%3D%3D+%22talk%22", 200, talks.to_string()),
        route("%22speakerProfile%22", 200, r#"{"result":null}"#),
        route("/data/query/", 200, r#"{"result":[]}"#),
        route("/users/jane/repos", 200, json!([repo_json("tool", 7, false)]).to_string()),
        route("/v1/api.json", 200, medium_body.to_string()),
        route("/entries", 200, contentful_body.to_string()),
    ]);

    let manifest = content::fetch(&site_config(&server)).unwrap();

    let ids: Vec<&str> = manifest.talks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["t1", "t2"]);
    let slugs: Vec<&str> = manifest.talks.iter().filter_map(|t| t.slug()).collect();
    assert_eq!(slugs, vec!["same-title", "same-title-2"]);

    assert!(manifest.profile.is_none());
    assert!(manifest.events.is_empty());

    let titles: Vec<&str> = manifest.posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["On Blog", "On Medium"]);

    assert_eq!(manifest.github.total_stars, 7);
}

#[test]
fn fetch_stage_survives_every_source_failing() {
    let server = TestServer::start(vec![route("/", 500, r#"{"error":"down"}"#)]);

    let manifest = content::fetch(&site_config(&server)).unwrap();
    assert!(manifest.talks.is_empty());
    assert!(manifest.events.is_empty());
    assert!(manifest.posts.is_empty());
    assert!(manifest.profile.is_none());
    assert_eq!(manifest.github.total_stars, 0);
    // Every section was still attempted.
    assert!(server.requests().len() >= 10);
}
