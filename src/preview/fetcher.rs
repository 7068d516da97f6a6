// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Outbound HTTP fetching
//!
//! Every strategy that needs the network goes through a [`Fetcher`]. The
//! production implementation wraps a single `reqwest::Client` with a fixed
//! timeout and User-Agent.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::config::ResolverConfig;
use super::types::ResolveError;

/// Raw response of an outbound GET
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body decoded as text
    pub body: String,
}

impl FetchResponse {
    /// Fail with `BadStatus` unless the status is exactly 200
    pub fn ensure_ok(self, url: &str) -> Result<Self, ResolveError> {
        if self.status != 200 {
            return Err(ResolveError::BadStatus {
                url: url.to_string(),
                status: self.status,
            });
        }
        Ok(self)
    }
}

/// Performs outbound GET requests
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url`, aborting when `cancel` fires
    async fn fetch(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<FetchResponse, ResolveError>;
}

/// reqwest-backed fetcher
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a new fetcher from configuration
    pub fn new(config: &ResolverConfig) -> Result<Self, ResolveError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| ResolveError::FetchFailure {
                url: String::new(),
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> Result<FetchResponse, ResolveError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_reqwest_error(url, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| map_reqwest_error(url, e))?;

        Ok(FetchResponse { status, body })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<FetchResponse, ResolveError> {
        if cancel.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }

        debug!("Fetching: {}", url);

        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Fetch cancelled: {}", url);
                Err(ResolveError::Cancelled)
            }
            result = self.get(url) => result,
        }
    }
}

fn map_reqwest_error(url: &str, e: reqwest::Error) -> ResolveError {
    if e.is_timeout() {
        ResolveError::Timeout {
            url: url.to_string(),
        }
    } else {
        ResolveError::FetchFailure {
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}
