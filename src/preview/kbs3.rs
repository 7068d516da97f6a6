// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! KbS3 post strategy
//!
//! Scrapes post pages (`ss.kb10uy.org/posts/<id>`) whose metadata lives in a
//! `div.post-info` block rather than in meta tags.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::fetcher::Fetcher;
use super::strategy::ExtractionStrategy;
use super::types::{Material, ResolveError};

/// Content-rating markers that are not useful as tags
const RATING_TAGS: &[&str] = &["R-15", "R-18"];

const STRATEGY_NAME: &str = "kbs3";

/// KbS3 structured-markup strategy
pub struct KbS3Strategy {
    fetcher: Arc<dyn Fetcher>,
}

impl KbS3Strategy {
    /// Create a new KbS3 strategy
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl ExtractionStrategy for KbS3Strategy {
    async fn resolve(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<Material, ResolveError> {
        let response = self.fetcher.fetch(url, cancel).await?.ensure_ok(url)?;
        parse_post(url, &response.body)
    }

    fn name(&self) -> &'static str {
        STRATEGY_NAME
    }
}

/// Parse a KbS3 post page
///
/// Declines with `UnsupportedContent` when the page has no `div.post-info`.
pub fn parse_post(url: &str, html: &str) -> Result<Material, ResolveError> {
    let document = Html::parse_document(html);

    let info = document
        .select(&selector("div.post-info")?)
        .next()
        .ok_or_else(|| ResolveError::UnsupportedContent {
            strategy: STRATEGY_NAME,
            reason: "post-info block not found".to_string(),
        })?;

    let title = first_text(&info, "h1")?.unwrap_or_default();
    let description = first_text(&info, "p.summary")?
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    let tags = info
        .select(&selector("ul.tags > li.tag > a")?)
        .map(|a| a.text().collect::<String>())
        .filter(|t| !RATING_TAGS.contains(&t.as_str()))
        .collect();

    Ok(Material {
        url: url.to_string(),
        title,
        description,
        image: String::new(),
        tags,
    })
}

fn selector(source: &str) -> Result<Selector, ResolveError> {
    Selector::parse(source).map_err(|e| ResolveError::MalformedResponse {
        strategy: STRATEGY_NAME,
        message: format!("bad selector {}: {:?}", source, e),
    })
}

fn first_text(root: &ElementRef, source: &str) -> Result<Option<String>, ResolveError> {
    Ok(root
        .select(&selector(source)?)
        .next()
        .map(|el| el.text().collect::<String>()))
}
