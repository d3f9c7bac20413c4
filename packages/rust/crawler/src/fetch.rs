//! HTTP fetcher with a fixed browser identification header.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;

use civicode_shared::{CiviCodeError, CrawlConfig, Result};

/// Issues GET requests against the origin. One client, built once, carrying
/// the configured User-Agent on every request.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Build the HTTP client from the crawl config.
    pub fn new(config: &CrawlConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CiviCodeError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Fetch one page and return its raw HTML body.
    ///
    /// Non-2xx status, transport failure, and timeout all surface as
    /// [`CiviCodeError::Fetch`] with the URL and cause. No retries: retry
    /// policy belongs to the caller, and the crawl has none.
    pub async fn fetch(&self, url: &Url) -> Result<String> {
        debug!(%url, "fetching page");

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| CiviCodeError::fetch(url.as_str(), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CiviCodeError::fetch(url.as_str(), format!("HTTP {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| CiviCodeError::fetch(url.as_str(), format!("body read failed: {e}")))
    }
}
