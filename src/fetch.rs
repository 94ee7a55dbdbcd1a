//! Page fetching with optional exponential backoff.
//!
//! # Architecture
//!
//! - [`PageFetcher`]: one GET, returning a parsed document
//! - [`HttpFetcher`]: the `reqwest` implementation used at runtime
//! - [`RetryFetch`]: decorator that retries transient failures of any fetcher
//!
//! # Retry Strategy
//!
//! Only transport errors and 5xx statuses are retried. The delay between
//! attempts is `min(base * 2^(attempt-1), 30s)` plus 0-250ms of jitter.

use crate::error::ScrapeError;
use rand::{Rng, rng};
use reqwest::Client;
use scraper::Html;
use std::fmt;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, instrument, warn};

/// Fetch a URL and hand back a queryable document.
pub trait PageFetcher {
    /// Issue a single GET for `url`.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::Http`] when the request or body read fails,
    /// [`ScrapeError::Status`] for any non-2xx response.
    async fn fetch(&self, url: &str) -> Result<Html, ScrapeError>;
}

/// [`PageFetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(10))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|source| ScrapeError::Http {
                url: String::new(),
                source,
            })?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<Html, ScrapeError> {
        let t0 = Instant::now();
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ScrapeError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = res.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = res.text().await.map_err(|source| ScrapeError::Http {
            url: url.to_string(),
            source,
        })?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(Html::parse_document(&body))
    }
}

/// Wrapper that adds exponential backoff retry logic to any [`PageFetcher`].
pub struct RetryFetch<F> {
    inner: F,
    max_retries: usize,
    base_delay: Duration,
    max_delay: Duration,
}

impl<F> RetryFetch<F>
where
    F: PageFetcher,
{
    /// Wrap `inner`, allowing up to `max_retries` extra attempts per URL.
    ///
    /// A zero `base_delay` retries immediately and without jitter.
    pub fn new(inner: F, max_retries: usize, base_delay: Duration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: Duration::from_secs(30),
        }
    }

    fn backoff(&self, attempt: usize) -> Duration {
        if self.base_delay.is_zero() {
            return Duration::ZERO;
        }
        let shift = (attempt.saturating_sub(1)).min(16) as u32;
        let delay = self.base_delay.saturating_mul(1 << shift).min(self.max_delay);
        let jitter_ms: u64 = rng().random_range(0..=250);
        delay + Duration::from_millis(jitter_ms)
    }
}

impl<F> fmt::Debug for RetryFetch<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<F> PageFetcher for RetryFetch<F>
where
    F: PageFetcher,
{
    async fn fetch(&self, url: &str) -> Result<Html, ScrapeError> {
        let mut attempt = 0usize;

        loop {
            match self.inner.fetch(url).await {
                Ok(doc) => return Ok(doc),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => {
                    attempt += 1;
                    if attempt > self.max_retries {
                        error!(attempt, max = self.max_retries, %url, error = %e, "fetch exhausted retries");
                        return Err(e);
                    }

                    let delay = self.backoff(attempt);
                    warn!(
                        attempt,
                        max = self.max_retries,
                        ?delay,
                        %url,
                        error = %e,
                        "fetch attempt failed; backing off"
                    );
                    if !delay.is_zero() {
                        sleep(delay).await;
                    }
                }
            }
        }
    }
}
