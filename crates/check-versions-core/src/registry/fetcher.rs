//! Registry fetching over HTTP
//!
//! One GET per call, no retries. Transport failures, timeouts and non-success
//! statuses come back as distinct [`CheckError`] variants.

use crate::error::{CheckError, Result};
use anyhow::Context;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Default bound on a single registry request
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Capability to GET a registry URL and return the raw body
pub trait HttpFetcher {
    fn get(&self, url: &str) -> impl Future<Output = Result<String>>;
}

/// reqwest-backed fetcher sending a descriptive user agent on every request
pub struct ReqwestFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestFetcher {
    /// Create a new fetcher with a custom user agent and per-request timeout
    pub fn new(user_agent: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The client timeout covers both sending and reading the body.
    fn transport_error(&self, url: &str, error: reqwest::Error) -> CheckError {
        if error.is_timeout() {
            CheckError::Timeout {
                what: format!("Request to {}", url),
                after: self.timeout,
            }
        } else {
            CheckError::Network {
                url: url.to_string(),
                source: error,
            }
        }
    }
}

impl HttpFetcher for ReqwestFetcher {
    async fn get(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        let status = response.status();
        debug!("{} answered HTTP {}", url, status);

        if !status.is_success() {
            return Err(CheckError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| self.transport_error(url, e))
    }
}
