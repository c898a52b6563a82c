// Shared test helpers: an in-memory HTTP transport and config builders.
//
// Each test file pulls this in with `mod helpers;`, so not every item is used
// by every file.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use indexnow_submitter::{Config, HttpResponse, HttpTransport, TransportError};
use tokio::time::Instant;

/// A POST the fake transport received.
#[derive(Debug, Clone)]
pub struct RecordedPost {
    pub url: String,
    pub body: serde_json::Value,
    pub at: Instant,
}

impl RecordedPost {
    /// The `urlList` of the payload.
    pub fn urls(&self) -> Vec<String> {
        self.body["urlList"]
            .as_array()
            .expect("payload has a urlList array")
            .iter()
            .map(|v| v.as_str().expect("urlList holds strings").to_string())
            .collect()
    }
}

/// Scripted outcome of one POST.
pub enum PostOutcome {
    Status(u16),
    Unavailable(&'static str),
}

/// In-memory `HttpTransport` that records POSTs and serves canned pages.
///
/// POSTs answer 200 unless an outcome was queued with `queue_post`.
#[derive(Default)]
pub struct FakeTransport {
    posts: Mutex<Vec<RecordedPost>>,
    outcomes: Mutex<VecDeque<PostOutcome>>,
    pages: Mutex<HashMap<String, HttpResponse>>,
    gets: Mutex<Vec<String>>,
    latency: Duration,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every POST takes `latency` (on tokio's clock) before answering.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    pub fn queue_post(&self, outcome: PostOutcome) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn serve(&self, url: &str, status: u16, body: &str) {
        self.pages.lock().unwrap().insert(
            url.to_string(),
            HttpResponse {
                status,
                body: body.to_string(),
            },
        );
    }

    pub fn posts(&self) -> Vec<RecordedPost> {
        self.posts.lock().unwrap().clone()
    }

    pub fn post_count(&self) -> usize {
        self.posts.lock().unwrap().len()
    }

    pub fn gets(&self) -> Vec<String> {
        self.gets.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, TransportError> {
        let at = Instant::now();
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.posts.lock().unwrap().push(RecordedPost {
            url: url.to_string(),
            body: body.clone(),
            at,
        });
        let outcome = self.outcomes.lock().unwrap().pop_front();
        match outcome {
            None => Ok(HttpResponse {
                status: 200,
                body: String::new(),
            }),
            Some(PostOutcome::Status(status)) => Ok(HttpResponse {
                status,
                body: String::new(),
            }),
            Some(PostOutcome::Unavailable(message)) => {
                Err(TransportError::Unavailable(message.to_string()))
            }
        }
    }

    async fn get_text(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.gets.lock().unwrap().push(url.to_string());
        self.pages
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| TransportError::Unavailable(format!("connection refused: {url}")))
    }
}

/// A valid configuration for `www.example.com`.
pub fn test_config(batch_size: usize, rate_limit_delay_ms: u64, cache_ttl_secs: u64) -> Config {
    Config {
        engine: "api.indexnow.org".to_string(),
        key: "abc123".to_string(),
        host: "www.example.com".to_string(),
        key_path: None,
        batch_size,
        rate_limit_delay_ms,
        cache_ttl_secs,
        timeout_seconds: 5,
        user_agent: "indexnow_submitter_test/1.0".to_string(),
    }
}

/// `count` distinct URLs under `www.example.com`.
pub fn example_urls(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("https://www.example.com/page-{i}"))
        .collect()
}

/// A `urlset` document with one `<url>` per `(loc, lastmod)` pair.
pub fn urlset(entries: &[(&str, Option<&str>)]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
"#,
    );
    for (loc, lastmod) in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{loc}</loc>\n"));
        if let Some(lastmod) = lastmod {
            xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
        }
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// A `sitemapindex` document listing `children`.
pub fn sitemap_index(children: &[&str]) -> String {
    let mut xml = String::from(
        r#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
"#,
    );
    for child in children {
        xml.push_str(&format!("  <sitemap><loc>{child}</loc></sitemap>\n"));
    }
    xml.push_str("</sitemapindex>\n");
    xml
}
