// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Komiflo comics strategy
//!
//! Comic pages are rendered client-side, so instead of scraping HTML this
//! strategy looks the comic up in the Komiflo content API.

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::config::ResolverConfig;
use super::fetcher::Fetcher;
use super::strategy::ExtractionStrategy;
use super::types::{Material, ResolveError};

/// Matches comic page URLs, with or without the `/#!` routing prefix
pub const COMICS_PAGE_PATTERN: &str = r"komiflo\.com(?:/#!)?/comics/(\d+)";

const STRATEGY_NAME: &str = "komiflo";

/// Placeholder for a missing artist or magazine name
const UNKNOWN: &str = "?";

/// Komiflo JSON-API strategy
pub struct KomifloStrategy {
    fetcher: Arc<dyn Fetcher>,
    pattern: Regex,
    api_base: String,
    image_base: String,
}

impl KomifloStrategy {
    /// Create a new Komiflo strategy
    pub fn new(fetcher: Arc<dyn Fetcher>, config: &ResolverConfig) -> Result<Self, ResolveError> {
        let pattern = Regex::new(COMICS_PAGE_PATTERN).map_err(|e| ResolveError::InvalidRule {
            pattern: COMICS_PAGE_PATTERN.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            fetcher,
            pattern,
            api_base: config.komiflo_api_base.trim_end_matches('/').to_string(),
            image_base: config.komiflo_image_base.clone(),
        })
    }

    /// Extract the numeric comic id from a page URL
    pub fn comic_id<'a>(&self, url: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(url)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    fn api_url(&self, id: &str) -> String {
        format!("{}/content/id/{}", self.api_base, id)
    }

    /// Build material from a content API response body
    pub fn parse_content(&self, url: &str, body: &str) -> Result<Material, ResolveError> {
        let json: Value = serde_json::from_str(body).map_err(|e| ResolveError::MalformedResponse {
            strategy: STRATEGY_NAME,
            message: format!("invalid json: {}", e),
        })?;

        let content = &json["content"];

        let artists = names(&content["attributes"]["artists"]["children"], "/data/name");
        let artist = string_at(content, "/attributes/artists/children/0/data/name");
        let artist = if artist.is_empty() {
            UNKNOWN
        } else {
            artist.as_str()
        };

        let magazine = string_at(content, "/parents/0/data/title");
        let magazine = if magazine.is_empty() {
            UNKNOWN
        } else {
            magazine.as_str()
        };

        let description = format!("{} - {}", artist, magazine);

        let image = format!(
            "{}{}",
            self.image_base,
            string_at(content, "/named_imgs/cover/filename")
        );

        let mut tags = names(&content["attributes"]["tags"]["children"], "/data/name");
        tags.sort();

        let mut all_tags = artists;
        all_tags.extend(tags);

        Ok(Material {
            url: url.to_string(),
            title: string_at(content, "/data/title"),
            description,
            image,
            tags: all_tags,
        })
    }
}

#[async_trait]
impl ExtractionStrategy for KomifloStrategy {
    async fn resolve(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<Material, ResolveError> {
        let id = self.comic_id(url).ok_or_else(|| ResolveError::PatternMismatch {
            strategy: STRATEGY_NAME,
            url: url.to_string(),
        })?;

        let api_url = self.api_url(id);
        debug!("Komiflo comic {} -> {}", id, api_url);

        let response = self
            .fetcher
            .fetch(&api_url, cancel)
            .await?
            .ensure_ok(&api_url)?;

        self.parse_content(url, &response.body)
    }

    fn name(&self) -> &'static str {
        STRATEGY_NAME
    }
}

fn scalar_at(value: &Value, pointer: &str) -> Option<String> {
    match value.pointer(pointer)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Lenient string lookup: missing or non-scalar values yield ""
fn string_at(value: &Value, pointer: &str) -> String {
    scalar_at(value, pointer).unwrap_or_default()
}

/// Collect `pointer` from every element of `array`, in order.
/// Elements without a value at `pointer` are skipped.
fn names(array: &Value, pointer: &str) -> Vec<String> {
    array
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| scalar_at(item, pointer))
                .collect()
        })
        .unwrap_or_default()
}
