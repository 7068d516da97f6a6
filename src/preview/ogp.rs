// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generic metadata strategy
//!
//! Reads Open Graph and Twitter card meta tags from any HTML page. Serves as
//! the catch-all rule, so it never declines content.

use async_trait::async_trait;
use scraper::{Html, Selector};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::fetcher::Fetcher;
use super::strategy::ExtractionStrategy;
use super::types::{Material, ResolveError};

const TITLE_SELECTORS: &[&str] = &[
    r#"meta[property="og:title"]"#,
    r#"meta[property="twitter:title"]"#,
    r#"meta[name="twitter:title"]"#,
];

const DESCRIPTION_SELECTORS: &[&str] = &[
    r#"meta[property="og:description"]"#,
    r#"meta[property="twitter:description"]"#,
    r#"meta[name="twitter:description"]"#,
    r#"meta[name="description"]"#,
];

const IMAGE_SELECTORS: &[&str] = &[
    r#"meta[property="og:image"]"#,
    r#"meta[property="twitter:image"]"#,
    r#"meta[name="twitter:image"]"#,
];

/// Open Graph / Twitter card strategy
pub struct OgpStrategy {
    fetcher: Arc<dyn Fetcher>,
}

impl OgpStrategy {
    /// Create a new generic metadata strategy
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl ExtractionStrategy for OgpStrategy {
    async fn resolve(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<Material, ResolveError> {
        let response = self.fetcher.fetch(url, cancel).await?.ensure_ok(url)?;

        let material = extract_metadata(url, &response.body);
        debug!(
            "OGP extracted title={:?} image={:?} from {}",
            material.title, material.image, url
        );

        Ok(material)
    }

    fn name(&self) -> &'static str {
        "ogp"
    }
}

/// Extract preview metadata from an HTML document
///
/// Per field, the first meta tag with a non-empty `content` wins. The title
/// falls back to the `<title>` element.
pub fn extract_metadata(url: &str, html: &str) -> Material {
    let document = Html::parse_document(html);

    let title = first_meta_content(&document, TITLE_SELECTORS)
        .or_else(|| document_title(&document))
        .unwrap_or_default();

    Material {
        url: url.to_string(),
        title,
        description: first_meta_content(&document, DESCRIPTION_SELECTORS).unwrap_or_default(),
        image: first_meta_content(&document, IMAGE_SELECTORS).unwrap_or_default(),
        tags: Vec::new(),
    }
}

fn first_meta_content(document: &Html, selectors: &[&str]) -> Option<String> {
    for selector_str in selectors {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        let content = document
            .select(&selector)
            .filter_map(|el| el.value().attr("content"))
            .find(|c| !c.trim().is_empty());
        if let Some(content) = content {
            return Some(content.to_string());
        }
    }
    None
}

fn document_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;

    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}
