// Common test utilities for integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use headlines_api::config::{Config, FeedConfig, ServerConfig};
use headlines_api::fetcher::{FeedFetcher, FetchError};
use headlines_api::services::rss::RssService;
use headlines_api::{create_app, AppState};

/// Canned-response fetcher that counts outbound calls, so tests can assert
/// how often the "network" was actually hit.
pub struct MockFetcher {
    response: MockResponse,
    calls: AtomicUsize,
}

enum MockResponse {
    Body(String),
    Unavailable,
}

impl MockFetcher {
    pub fn with_body(body: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            response: MockResponse::Body(body.into()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            response: MockResponse::Unavailable,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedFetcher for MockFetcher {
    async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            MockResponse::Body(body) => Ok(body.clone()),
            MockResponse::Unavailable => {
                Err(FetchError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR))
            }
        }
    }
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        feed: FeedConfig {
            url: "http://feed.test/index.rss".to_string(),
            source_name: "SPIEGEL ONLINE".to_string(),
            fetch_timeout: Duration::from_secs(2),
            cache_ttl: Duration::from_secs(300),
            fetch_limit: 250,
        },
        environment: "test".to_string(),
    }
}

pub fn test_state(fetcher: Arc<dyn FeedFetcher>) -> AppState {
    let config = test_config();
    let rss = Arc::new(RssService::new(fetcher, config.feed.clone()));
    AppState { rss, config }
}

pub fn test_app(fetcher: Arc<dyn FeedFetcher>) -> Router {
    create_app(test_state(fetcher))
}

/// Feed body with one item per title, links and dates numbered in order.
pub fn feed_with_titles(titles: &[String]) -> String {
    let items: String = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            format!(
                "<item><title>{}</title><link>https://www.spiegel.de/artikel-{}</link>\
                 <pubDate>Mon, 02 Jun 2025 06:{:02}:00 +0200</pubDate></item>",
                title,
                i + 1,
                i % 60
            )
        })
        .collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><rss version=\"2.0\"><channel>\
         <title>DER SPIEGEL</title><link>https://www.spiegel.de</link>{}</channel></rss>",
        items
    )
}

pub fn numbered_feed(count: usize) -> String {
    let titles: Vec<String> = (1..=count).map(|i| format!("Headline {}", i)).collect();
    feed_with_titles(&titles)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_str(&self.body).unwrap_or_else(|e| {
            panic!("Failed to parse JSON response: {}. Body: {}", e, self.body)
        })
    }

    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status, expected,
            "Expected status {}, got {}. Body: {}",
            expected, self.status, self.body
        );
    }

    pub fn assert_ok(&self) {
        self.assert_status(StatusCode::OK);
    }

    pub fn assert_bad_request(&self) {
        self.assert_status(StatusCode::BAD_REQUEST);
    }

    pub fn assert_unavailable(&self) {
        self.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    }

    pub fn error_message(&self) -> String {
        let value: serde_json::Value = self.json();
        value["error"].as_str().unwrap_or_default().to_string()
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds");
    let response = app.clone().oneshot(request).await.expect("request succeeds");

    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();

    TestResponse {
        status,
        headers,
        body: String::from_utf8(body_bytes.to_vec()).unwrap_or_default(),
    }
}
