//! HTTP fetcher implementation
//!
//! This module handles all page requests for the crawler:
//! - Building the HTTP client with the configured user agent and timeout
//! - GET requests with redirect following
//! - Classifying each response into a [`FetchOutcome`]

use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Maximum redirect hops followed per request
const MAX_REDIRECTS: usize = 10;

/// A successfully fetched HTML page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,
    /// HTTP status code
    pub status_code: u16,
    /// Content-Type header value
    pub content_type: String,
    /// Page body content
    pub body: String,
}

/// Result of a fetch operation
///
/// Every variant other than `Success` means "skip this URL and continue".
#[derive(Debug)]
pub enum FetchOutcome {
    /// HTML page fetched
    Success(FetchedPage),

    /// Connection refused, DNS failure, timeout, redirect limit, unreadable body
    NetworkError(String),

    /// Response was not `text/html`; carries the received Content-Type
    NonHtml(String),

    /// Response status was 400 or above
    HttpError(u16),
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - Sent as the `User-Agent` header on every request
/// * `timeout` - Hard limit for each request, connect through body
///
/// # Example
///
/// ```no_run
/// use homepage_harvest::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client("CandidateWebsiteScraper/1.0", Duration::from_secs(20)).unwrap();
/// ```
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the response
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | Request error (timeout, connect, DNS, redirects) | `NetworkError` |
/// | Status >= 400 | `HttpError` |
/// | Content-Type without `text/html` | `NonHtml` |
/// | Body not readable | `NetworkError` |
/// | Otherwise | `Success` |
///
/// `timeout` overrides the client default for this request. No retries are
/// made; the page budget absorbs failed URLs.
pub async fn fetch_page(client: &Client, url: &str, timeout: Duration) -> FetchOutcome {
    let response = match client.get(url).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => return FetchOutcome::NetworkError(describe_error(&e)),
    };

    let status = response.status();
    if status.as_u16() >= 400 {
        return FetchOutcome::HttpError(status.as_u16());
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.to_ascii_lowercase().contains("text/html") {
        return FetchOutcome::NonHtml(content_type);
    }

    let final_url = response.url().to_string();

    match response.text().await {
        Ok(body) => FetchOutcome::Success(FetchedPage {
            final_url,
            status_code: status.as_u16(),
            content_type,
            body,
        }),
        Err(e) => FetchOutcome::NetworkError(describe_error(&e)),
    }
}

/// Short description of a request error for logs
fn describe_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        "Connection failed".to_string()
    } else if error.is_redirect() {
        "Too many redirects".to_string()
    } else {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn client() -> Client {
        build_http_client("TestHarvester/1.0", TIMEOUT).unwrap()
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client("TestHarvester/1.0", Duration::from_secs(1)).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_html_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(header("user-agent", "TestHarvester/1.0"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html><body>Hi</body></html>", "text/html; charset=utf-8"),
            )
            .mount(&server)
            .await;

        match fetch_page(&client(), &format!("{}/", server.uri()), TIMEOUT).await {
            FetchOutcome::Success(page) => {
                assert_eq!(page.status_code, 200);
                assert!(page.body.contains("Hi"));
                assert!(page.content_type.starts_with("text/html"));
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let outcome = fetch_page(&client(), &format!("{}/missing", server.uri()), TIMEOUT).await;
        assert!(matches!(outcome, FetchOutcome::HttpError(404)));
    }

    #[tokio::test]
    async fn test_fetch_non_html() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("{}", "application/json"),
            )
            .mount(&server)
            .await;

        let outcome = fetch_page(&client(), &format!("{}/data", server.uri()), TIMEOUT).await;
        match outcome {
            FetchOutcome::NonHtml(content_type) => assert_eq!(content_type, "application/json"),
            other => panic!("expected non-html, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_follows_redirect() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("<p>moved</p>", "text/html"),
            )
            .mount(&server)
            .await;

        match fetch_page(&client(), &format!("{}/old", server.uri()), TIMEOUT).await {
            FetchOutcome::Success(page) => assert!(page.final_url.ends_with("/new")),
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<p>late</p>", "text/html")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let url = format!("{}/slow", server.uri());
        match fetch_page(&client(), &url, Duration::from_millis(200)).await {
            FetchOutcome::NetworkError(message) => assert_eq!(message, "Request timeout"),
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Port 9 (discard) is not listening on loopback in test environments
        let outcome = fetch_page(&client(), "http://127.0.0.1:9/", TIMEOUT).await;
        assert!(matches!(outcome, FetchOutcome::NetworkError(_)));
    }
}
