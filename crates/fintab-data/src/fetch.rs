//! HTML page downloader with rate limiting and retry.

use crate::error::{DataError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::{debug, warn};

/// User agent sent with every request; the source site rejects bare clients.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 6.1; Win64; x64; rv:72.0) Gecko/20100101 Firefox/72.0";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Retry behaviour for transient request failures.
///
/// The delay before retry `n` (0-based) is `base_delay_ms * 2^n`, capped at
/// `max_delay_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Retries after the first attempt (total attempts = `max_retries + 1`)
    pub max_retries: u32,
    /// Delay before the first retry, in milliseconds
    pub base_delay_ms: u64,
    /// Upper bound for any single delay, in milliseconds
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay_ms: 500,
            max_delay_ms: 5_000,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay_ms: 0,
            max_delay_ms: 0,
        }
    }

    /// Delay before the given retry attempt (0-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt);
        let millis = self.base_delay_ms.saturating_mul(factor).min(self.max_delay_ms);
        Duration::from_millis(millis)
    }
}

/// Keeps a minimum interval between consecutive requests
#[derive(Debug)]
struct RateLimiter {
    last_request: Option<Instant>,
    min_interval: Duration,
}

impl RateLimiter {
    const fn new(min_interval: Duration) -> Self {
        Self {
            last_request: None,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}

/// Options for building an [`HtmlFetcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetcherOptions {
    /// Per-request timeout
    pub timeout: Duration,
    /// Minimum interval between two requests
    pub min_interval: Duration,
    /// Retry policy for transient failures
    pub retry: RetryPolicy,
}

impl Default for FetcherOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            min_interval: Duration::ZERO,
            retry: RetryPolicy::default(),
        }
    }
}

/// Downloads HTML pages.
///
/// Cloning is cheap and clones share the rate limiter.
#[derive(Debug, Clone)]
pub struct HtmlFetcher {
    client: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    retry: RetryPolicy,
}

impl HtmlFetcher {
    /// Create a fetcher with default options.
    pub fn new() -> Result<Self> {
        Self::with_options(FetcherOptions::default())
    }

    /// Create a fetcher with custom options.
    pub fn with_options(options: FetcherOptions) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(options.timeout)
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(options.min_interval))),
            retry: options.retry,
        })
    }

    /// Download a page and return its text.
    ///
    /// Transient failures are retried according to the retry policy; a
    /// non-success status that is not transient fails immediately with
    /// [`DataError::BadResponse`].
    pub async fn fetch_page(&self, url: &str) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(url).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_transient() && attempt < self.retry.max_retries => {
                    let delay = self.retry.delay(attempt);
                    warn!(url, attempt = attempt + 1, ?delay, error = %err, "retrying request");
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(final_error(url, attempt, err)),
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<String> {
        self.rate_limiter.lock().await.wait().await;

        debug!(url, "fetching page");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::BadResponse {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Error reported when a request stops being retried after `retries` retries.
///
/// Only a transient failure that used up the retry budget is wrapped; any
/// other error is returned as is.
fn final_error(url: &str, retries: u32, err: DataError) -> DataError {
    if retries > 0 && err.is_transient() {
        DataError::RetriesExhausted {
            url: url.to_string(),
            attempts: retries + 1,
            last: Box::new(err),
        }
    } else {
        err
    }
}
