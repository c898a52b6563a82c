//! Sitemap ingestion.
//!
//! This module provides:
//! - Fetching a sitemap over the injected [`HttpTransport`]
//! - Decoding `urlset` documents (and following `sitemapindex` documents)
//! - Filtering entries by last-modified date

mod filter;
mod parse;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::config::MAX_SITEMAP_INDEX_DEPTH;
use crate::error_handling::{is_success, ParseError, SitemapError};
use crate::http::HttpTransport;
use parse::{parse_sitemap, SitemapDocument};

pub use filter::{filter_since, parse_timestamp};

/// One `<url>` of a sitemap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    /// Page location (`<loc>`), trimmed.
    pub loc: String,
    /// Raw `<lastmod>` value, if present.
    pub lastmod: Option<String>,
}

impl SitemapEntry {
    /// `lastmod` as a UTC timestamp, or `None` if absent or unreadable.
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.lastmod.as_deref().and_then(parse_timestamp)
    }
}

/// Downloads and decodes sitemaps.
#[derive(Clone)]
pub struct SitemapParser {
    transport: Arc<dyn HttpTransport>,
}

impl SitemapParser {
    /// Parser fetching over `transport`.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Fetches `sitemap_url` and returns its entries in document order.
    ///
    /// A sitemap index is followed: each child sitemap is fetched in order and
    /// its entries appended, up to `MAX_SITEMAP_INDEX_DEPTH` levels of
    /// nesting.
    ///
    /// # Errors
    ///
    /// - `SitemapError::Fetch` if a download fails
    /// - `SitemapError::Status` if the server answers with a non-2xx status
    /// - `SitemapError::Parse` if a body is not a well-formed sitemap; no
    ///   partial result is returned
    pub async fn fetch_and_parse(
        &self,
        sitemap_url: &str,
    ) -> Result<Vec<SitemapEntry>, SitemapError> {
        let mut entries = Vec::new();
        // Depth-first, children pushed in reverse to keep document order
        let mut pending = vec![(sitemap_url.to_string(), 0usize)];

        while let Some((url, depth)) = pending.pop() {
            let body = self.fetch(&url).await?;
            let document = parse_sitemap(&body).map_err(|source| SitemapError::Parse {
                url: url.clone(),
                source,
            })?;

            match document {
                SitemapDocument::UrlSet(mut found) => {
                    debug!("Parsed {} entries from sitemap {}", found.len(), url);
                    entries.append(&mut found);
                }
                SitemapDocument::Index(children) => {
                    if depth >= MAX_SITEMAP_INDEX_DEPTH {
                        return Err(SitemapError::Parse {
                            url,
                            source: ParseError {
                                position: 0,
                                message: format!(
                                    "sitemap index nesting exceeds {MAX_SITEMAP_INDEX_DEPTH} levels"
                                ),
                            },
                        });
                    }
                    debug!(
                        "Sitemap index {} lists {} child sitemaps",
                        url,
                        children.len()
                    );
                    pending.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
                }
            }
        }

        info!("Found {} URLs in sitemap {}", entries.len(), sitemap_url);
        Ok(entries)
    }

    async fn fetch(&self, url: &str) -> Result<String, SitemapError> {
        let response =
            self.transport
                .get_text(url)
                .await
                .map_err(|source| SitemapError::Fetch {
                    url: url.to_string(),
                    source,
                })?;
        if !is_success(response.status) {
            return Err(SitemapError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }
        Ok(response.body)
    }
}
