//! HTTP capability used by the submission pipeline.
//!
//! The pipeline only needs two operations: POST a JSON document and GET a text
//! body. [`HttpTransport`] captures exactly that, so the submitter can run on
//! top of [`ReqwestTransport`] in production and on an in-memory fake in tests.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::config::Config;
use crate::error_handling::{InitializationError, TransportError};
use crate::initialization::init_client;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Status and body of a completed HTTP exchange.
///
/// A non-2xx status is still a response; deciding whether it is a failure is
/// up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body decoded as text.
    pub body: String,
}

/// "POST JSON, GET text" capability.
///
/// Implementations return `Err` only when no response could be obtained.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POSTs `body` as JSON to `url`.
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, TransportError>;

    /// GETs `url` and returns its body as text.
    async fn get_text(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

/// [`HttpTransport`] backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Arc<reqwest::Client>,
}

impl ReqwestTransport {
    /// Wraps an already configured client.
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self { client }
    }

    /// Builds a client with the timeout and user agent from `config`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be
    /// built (e.g. the TLS backend fails to initialize).
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        let client = init_client(config)?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body.to_string())
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }

    async fn get_text(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}
