// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Resolved material cache
//!
//! Keyed by the exact URL string supplied by the caller. By default entries
//! live for the whole process; a TTL and a size bound can be configured.
//! Only successful resolutions are ever inserted.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use super::types::Material;

/// Cache of resolved materials
pub struct MaterialCache {
    cache: RwLock<HashMap<String, CachedEntry>>,
    ttl: Option<Duration>,
    max_entries: Option<usize>,
}

struct CachedEntry {
    material: Material,
    inserted_at: Instant,
}

impl CachedEntry {
    fn is_expired(&self, ttl: Option<Duration>) -> bool {
        ttl.is_some_and(|ttl| self.inserted_at.elapsed() > ttl)
    }
}

/// Cache statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Total entries in cache
    pub total: usize,
    /// Expired entries (not yet evicted)
    pub expired: usize,
    /// Maximum cache capacity, `None` when unbounded
    pub max: Option<usize>,
}

impl MaterialCache {
    /// Create a cache that never expires or evicts
    pub fn unbounded() -> Self {
        Self::new(0, 0)
    }

    /// Create a new material cache
    ///
    /// # Arguments
    /// * `ttl_secs` - Time-to-live for entries in seconds, 0 disables expiry
    /// * `max_entries` - Maximum number of entries, 0 disables eviction
    pub fn new(ttl_secs: u64, max_entries: usize) -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
            ttl: (ttl_secs > 0).then(|| Duration::from_secs(ttl_secs)),
            max_entries: (max_entries > 0).then_some(max_entries),
        }
    }

    /// Get the cached material for `url`
    ///
    /// Returns None if not found or expired
    pub fn get(&self, url: &str) -> Option<Material> {
        let cache = self.cache.read().ok()?;
        let entry = cache.get(url)?;

        if entry.is_expired(self.ttl) {
            return None;
        }

        Some(entry.material.clone())
    }

    /// Store a resolved material under `url`
    ///
    /// Expired entries are purged first when a TTL is configured.
    pub fn insert(&self, url: &str, material: Material) {
        let mut cache = match self.cache.write() {
            Ok(c) => c,
            Err(_) => return,
        };

        if self.ttl.is_some() {
            Self::purge_expired(&mut cache, self.ttl);
        }

        if let Some(max) = self.max_entries {
            if !cache.contains_key(url) && cache.len() >= max {
                Self::evict_oldest(&mut cache);
            }
        }

        cache.insert(
            url.to_string(),
            CachedEntry {
                material,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Whether a live entry exists for `url`
    pub fn contains(&self, url: &str) -> bool {
        self.get(url).is_some()
    }

    /// Clear all cache entries
    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let cache = match self.cache.read() {
            Ok(c) => c,
            Err(_) => {
                return CacheStats {
                    total: 0,
                    expired: 0,
                    max: self.max_entries,
                }
            }
        };

        CacheStats {
            total: cache.len(),
            expired: cache.values().filter(|e| e.is_expired(self.ttl)).count(),
            max: self.max_entries,
        }
    }

    /// Remove expired entries from cache
    pub fn cleanup_expired(&self) {
        if let Ok(mut cache) = self.cache.write() {
            Self::purge_expired(&mut cache, self.ttl);
        }
    }

    fn purge_expired(cache: &mut HashMap<String, CachedEntry>, ttl: Option<Duration>) {
        cache.retain(|_, entry| !entry.is_expired(ttl));
    }

    fn evict_oldest(cache: &mut HashMap<String, CachedEntry>) {
        if let Some(oldest_key) = cache
            .iter()
            .min_by_key(|(_, v)| v.inserted_at)
            .map(|(k, _)| k.clone())
        {
            cache.remove(&oldest_key);
        }
    }
}

impl Default for MaterialCache {
    fn default() -> Self {
        Self::unbounded()
    }
}
