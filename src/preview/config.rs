// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for URL resolution
//!
//! Defines settings for outbound fetching, the resolution cache and the
//! site-specific endpoints.

use std::env;

use crate::version;

/// Default Komiflo API base URL
pub const DEFAULT_KOMIFLO_API_BASE: &str = "https://api.komiflo.com";

/// Default Komiflo cover image CDN prefix
pub const DEFAULT_KOMIFLO_IMAGE_BASE: &str = "https://t.komiflo.com/564_mobile_large_3x/";

/// Configuration for the resolution pipeline
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Timeout for a whole outbound request in seconds (default: 10)
    pub timeout_secs: u64,
    /// User-Agent sent with every outbound request
    pub user_agent: String,
    /// Maximum redirects followed per request (default: 5)
    pub max_redirects: usize,
    /// Cache TTL in seconds, 0 keeps entries for the process lifetime (default: 0)
    pub cache_ttl_secs: u64,
    /// Maximum cache entries, 0 means unbounded (default: 0)
    pub max_cache_entries: usize,
    /// Base URL of the Komiflo content API
    pub komiflo_api_base: String,
    /// Prefix prepended to Komiflo cover filenames
    pub komiflo_image_base: String,
}

impl ResolverConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            timeout_secs: env::var("TEASER_FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            user_agent: env::var("TEASER_USER_AGENT")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.user_agent),
            max_redirects: env::var("TEASER_MAX_REDIRECTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_redirects),
            cache_ttl_secs: env::var("TEASER_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_ttl_secs),
            max_cache_entries: env::var("TEASER_CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_cache_entries),
            komiflo_api_base: env::var("TEASER_KOMIFLO_API_BASE")
                .unwrap_or(defaults.komiflo_api_base),
            komiflo_image_base: env::var("TEASER_KOMIFLO_IMAGE_BASE")
                .unwrap_or(defaults.komiflo_image_base),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be at least 1".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("user_agent cannot be empty".to_string());
        }
        if url::Url::parse(&self.komiflo_api_base).is_err() {
            return Err(format!(
                "komiflo_api_base is not a valid URL: {}",
                self.komiflo_api_base
            ));
        }
        Ok(())
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: version::user_agent(),
            max_redirects: 5,
            cache_ttl_secs: 0,
            max_cache_entries: 0,
            komiflo_api_base: DEFAULT_KOMIFLO_API_BASE.to_string(),
            komiflo_image_base: DEFAULT_KOMIFLO_IMAGE_BASE.to_string(),
        }
    }
}
