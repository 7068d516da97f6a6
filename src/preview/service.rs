// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Preview service orchestration
//!
//! Puts the material cache in front of the router. This is the single entry
//! point used by the HTTP front door and by any other caller.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::cache::{CacheStats, MaterialCache};
use super::config::ResolverConfig;
use super::fetcher::Fetcher;
use super::router::Router;
use super::types::{Material, ResolveError};

/// Cached URL resolution
pub struct PreviewService {
    router: Router,
    cache: MaterialCache,
}

impl PreviewService {
    /// Create a service with the default rules and an HTTP fetcher
    pub fn new(config: &ResolverConfig) -> Result<Self, ResolveError> {
        Ok(Self::with_router(
            Router::with_defaults(config)?,
            MaterialCache::new(config.cache_ttl_secs, config.max_cache_entries),
        ))
    }

    /// Create a service with the default rules on top of `fetcher`
    pub fn with_fetcher(
        config: &ResolverConfig,
        fetcher: Arc<dyn Fetcher>,
    ) -> Result<Self, ResolveError> {
        Ok(Self::with_router(
            Router::with_fetcher(config, fetcher)?,
            MaterialCache::new(config.cache_ttl_secs, config.max_cache_entries),
        ))
    }

    /// Assemble a service from its parts
    pub fn with_router(router: Router, cache: MaterialCache) -> Self {
        Self { router, cache }
    }

    /// Resolve `url` into preview material
    ///
    /// Cache hits skip the router entirely. Errors are never cached, so a
    /// failing URL is attempted again on the next call.
    pub async fn resolve(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<Material, ResolveError> {
        if let Some(material) = self.cache.get(url) {
            debug!("Material cache hit for: {}", url);
            return Ok(material);
        }

        let material = self.router.resolve(url, cancel).await?;
        self.cache.insert(url, material.clone());

        Ok(material)
    }

    /// Resolve without a cancellation signal
    pub async fn resolve_url(&self, url: &str) -> Result<Material, ResolveError> {
        self.resolve(url, &CancellationToken::new()).await
    }

    /// The underlying router
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Get cache statistics
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Whether `url` currently has a cached material
    pub fn is_cached(&self, url: &str) -> bool {
        self.cache.contains(url)
    }

    /// Clear the material cache
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
