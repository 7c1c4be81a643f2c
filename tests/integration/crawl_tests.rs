//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use homepage_harvest::config::Config;
use homepage_harvest::crawler::{
    build_http_client, crawl, CrawlReport, CrawlTarget, DomainThrottle, SiteCrawler,
};
use homepage_harvest::{url_key, CrawlState};
use regex::Regex;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_AGENT: &str = "TestHarvester/1.0";
const PRIVATE_ROBOTS: &str = "User-agent: *\nDisallow: /private/\n";

/// Creates a crawl target for the mock server root with no delay
fn create_target(server: &MockServer) -> CrawlTarget {
    CrawlTarget {
        root_url: format!("{}/", server.uri()),
        max_pages: 50,
        delay_seconds: 0.0,
        timeout: Duration::from_secs(5),
        user_agent: USER_AGENT.to_string(),
        respect_robots: false,
        exclude: Vec::new(),
    }
}

async fn run_crawl(target: CrawlTarget) -> CrawlReport {
    let client = build_http_client(USER_AGENT, target.timeout).expect("client builds");
    SiteCrawler::new(target, client, DomainThrottle::new())
        .run()
        .await
        .expect("crawl runs")
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><head><title>Test</title></head><body>{}</body></html>", body),
        "text/html",
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: &str, expected: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html_page(body))
        .expect(expected)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_budget_limits_breadth_first_walk() {
    let server = MockServer::start().await;
    let external = MockServer::start().await;

    let index = format!(
        r#"<a href="/b">B</a> <a href="/c">C</a> <a href="{}/d">D</a>"#,
        external.uri()
    );
    mount_page(&server, "/", &index, 1).await;
    mount_page(&server, "/b", "Page B", 1).await;
    mount_page(&server, "/c", "Page C", 0).await;
    mount_page(&external, "/d", "Page D", 0).await;

    let mut target = create_target(&server);
    target.max_pages = 2;
    let report = run_crawl(target).await;

    assert_eq!(report.state, CrawlState::Completed);
    assert_eq!(report.results.len(), 2);
    assert!(report
        .results
        .contains_key(&url_key(&format!("{}/b", server.uri()))));
}

#[tokio::test]
async fn test_robots_disallow_enforced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PRIVATE_ROBOTS))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/", r#"Home <a href="/private/page">secret</a>"#, 1).await;
    mount_page(&server, "/private/page", "Secret", 0).await;

    let mut target = create_target(&server);
    target.respect_robots = true;
    let report = run_crawl(target).await;

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.stats.robots_denied, 1);
}

#[tokio::test]
async fn test_robots_ignored_when_disabled() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PRIVATE_ROBOTS))
        .expect(0)
        .mount(&server)
        .await;
    mount_page(&server, "/", r#"Home <a href="/private/page">secret</a>"#, 1).await;
    mount_page(&server, "/private/page", "Secret", 1).await;

    let report = run_crawl(create_target(&server)).await;

    assert_eq!(report.results.len(), 2);
    assert_eq!(report.stats.robots_denied, 0);
}

#[tokio::test]
async fn test_unreachable_robots_does_not_block_crawl() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, "/", "Still crawled", 1).await;

    let mut target = create_target(&server);
    target.respect_robots = true;
    let report = run_crawl(target).await;

    assert_eq!(report.results.len(), 1);
}

#[tokio::test]
async fn test_http_error_skipped_and_crawl_continues() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<a href="/missing">gone</a> <a href="/ok">ok</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/ok", r#"Fine <a href="/missing">gone again</a>"#, 1).await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let report = run_crawl(create_target(&server)).await;

    assert_eq!(report.state, CrawlState::Completed);
    assert_eq!(report.results.len(), 2);
    assert_eq!(report.stats.http_errors, 1);
    assert!(!report
        .results
        .contains_key(&url_key(&format!("{}/missing", server.uri()))));
}

#[tokio::test]
async fn test_non_html_and_skip_extensions() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<a href="/feed">feed</a> <a href="/cv.PDF">cv</a> <a href="/photo.jpg">photo</a>"#,
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"items":[]}"#, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/cv.PDF", "not html anyway", 0).await;
    mount_page(&server, "/photo.jpg", "not html anyway", 0).await;

    let report = run_crawl(create_target(&server)).await;

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.stats.non_html, 1);
}

#[tokio::test]
async fn test_duplicate_links_fetched_once() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<a href="/about">1</a> <a href="/about#team">2</a> <a href="/about">3</a>"#,
        1,
    )
    .await;
    let about = r#"About <a href="/">home</a> <a href="/about">self</a>"#;
    mount_page(&server, "/about", about, 1).await;

    let report = run_crawl(create_target(&server)).await;

    assert_eq!(report.results.len(), 2);
    assert_eq!(report.visited, 2);
}

#[tokio::test]
async fn test_exclusion_patterns() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<a href="/calendar/2024">cal</a> <a href="/news">news</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/calendar/2024", "Events", 0).await;
    mount_page(&server, "/news", "News", 1).await;

    let mut target = create_target(&server);
    target.exclude = vec![Regex::new("/calendar/").unwrap()];
    let report = run_crawl(target).await;

    assert_eq!(report.results.len(), 2);
}

/// Writes a candidate CSV and returns a config pointing at the temp dirs
fn harvest_config(dir: &TempDir, csv: &str) -> Config {
    let csv_path = dir.path().join("candidates.csv");
    fs::write(&csv_path, csv).unwrap();
    let json_dir = dir.path().join("json");

    let mut config = Config::default();
    config.input.candidates_csv = csv_path;
    config.input.json_dirs = vec![json_dir.clone()];
    config.output.json_dir = json_dir;
    config.crawler.delay_seconds = 0.0;
    config.crawler.respect_robots = false;
    config.user_agent.name = USER_AGENT.to_string();
    config
}

#[tokio::test]
async fn test_harvest_writes_json_per_candidate() {
    let server = MockServer::start().await;
    mount_page(&server, "/", r#"Jane for council <a href="/platform">Platform</a>"#, 1).await;
    mount_page(&server, "/platform", "Parks and transit", 1).await;

    let dir = TempDir::new().unwrap();
    let csv = format!(
        "person_id,person_name,homepage_url\n101,Jane Doe,{}/\n102,No Site,\n",
        server.uri()
    );
    let config = harvest_config(&dir, &csv);

    let stats = crawl(config).await.unwrap();
    assert_eq!(stats.scraped, 1);
    assert_eq!(stats.skipped_no_homepage, 1);
    assert_eq!(stats.total_pages, 2);

    let written = fs::read_to_string(dir.path().join("json").join("101_Jane_Doe.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
    let object = parsed.as_object().unwrap();
    assert_eq!(object.len(), 2);

    let root_key = url_key(&format!("{}/", server.uri()));
    assert_eq!(object[&root_key], "Test Jane for council Platform");
    let platform_key = url_key(&format!("{}/platform", server.uri()));
    assert_eq!(object[&platform_key], "Test Parks and transit");
}

#[tokio::test]
async fn test_existing_output_means_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html_page("should not be fetched"))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let json_dir = dir.path().join("json");
    fs::create_dir_all(&json_dir).unwrap();
    fs::write(json_dir.join("101_Jane_Doe.json"), "{}").unwrap();

    let csv = format!(
        "person_id,person_name,homepage_url\n101,Jane Doe,{}/\n",
        server.uri()
    );
    let stats = crawl(harvest_config(&dir, &csv)).await.unwrap();

    assert_eq!(stats.candidates, 0);
    assert_eq!(stats.scraped, 0);
}

#[tokio::test]
async fn test_empty_site_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let csv = format!(
        "person_id,person_name,homepage_url\n7,Down Site,{}/\n",
        server.uri()
    );
    let stats = crawl(harvest_config(&dir, &csv)).await.unwrap();

    assert_eq!(stats.empty, 1);
    assert!(!dir.path().join("json").join("7_Down_Site.json").exists());
}
