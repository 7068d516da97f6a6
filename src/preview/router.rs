// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Pattern-based strategy dispatch
//!
//! Rules are tried in registration order. The first strategy that produces a
//! material wins; a strategy that declines the content hands over to the next
//! matching rule, and any other error ends the resolution.

use regex::Regex;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::config::ResolverConfig;
use super::fetcher::{Fetcher, HttpFetcher};
use super::kbs3::KbS3Strategy;
use super::komiflo::KomifloStrategy;
use super::ogp::OgpStrategy;
use super::strategy::ExtractionStrategy;
use super::types::{Material, ResolveError};

/// Router pattern for Komiflo comic pages
pub const KOMIFLO_RULE: &str = r"komiflo\.com(/#!)?/comics/(\d+)";
/// Router pattern for KbS3 posts
pub const KBS3_RULE: &str = r"ss\.kb10uy\.org/posts/\d+$";
/// Catch-all pattern
pub const CATCH_ALL_RULE: &str = ".*";

/// A URL pattern bound to the strategy that handles it
pub struct Rule {
    pattern: Regex,
    strategy: Arc<dyn ExtractionStrategy>,
}

impl Rule {
    /// Compile `pattern` and bind it to `strategy`
    pub fn new(pattern: &str, strategy: Arc<dyn ExtractionStrategy>) -> Result<Self, ResolveError> {
        let pattern = Regex::new(pattern).map_err(|e| ResolveError::InvalidRule {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { pattern, strategy })
    }

    /// Whether this rule applies to `url`
    pub fn matches(&self, url: &str) -> bool {
        self.pattern.is_match(url)
    }

    /// Pattern source
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Name of the bound strategy
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }
}

/// Ordered rule list
pub struct Router {
    rules: Vec<Rule>,
}

impl Router {
    /// Create a router from an ordered rule list
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Start building a router
    pub fn builder() -> RouterBuilder {
        RouterBuilder::default()
    }

    /// Default rule set backed by a real HTTP fetcher
    pub fn with_defaults(config: &ResolverConfig) -> Result<Self, ResolveError> {
        let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new(config)?);
        Self::with_fetcher(config, fetcher)
    }

    /// Default rule set on top of an arbitrary fetcher
    ///
    /// Site-specific rules come first; the generic metadata strategy is the
    /// catch-all.
    pub fn with_fetcher(
        config: &ResolverConfig,
        fetcher: Arc<dyn Fetcher>,
    ) -> Result<Self, ResolveError> {
        Self::builder()
            .rule(
                KOMIFLO_RULE,
                Arc::new(KomifloStrategy::new(fetcher.clone(), config)?),
            )
            .rule(KBS3_RULE, Arc::new(KbS3Strategy::new(fetcher.clone())))
            .rule(CATCH_ALL_RULE, Arc::new(OgpStrategy::new(fetcher)))
            .build()
    }

    /// Resolve `url` through the first rule that produces a material
    pub async fn resolve(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<Material, ResolveError> {
        let start = Instant::now();

        for rule in self.rules.iter().filter(|r| r.matches(url)) {
            debug!("Trying strategy {} for {}", rule.strategy_name(), url);

            match rule.strategy.resolve(url, cancel).await {
                Ok(material) => {
                    info!(
                        "Resolved {} via {} in {}ms",
                        url,
                        rule.strategy_name(),
                        start.elapsed().as_millis()
                    );
                    return Ok(material);
                }
                Err(e) if e.is_unsupported_content() => {
                    debug!(
                        "Strategy {} declined {}: {}, trying next",
                        rule.strategy_name(),
                        url,
                        e
                    );
                    continue;
                }
                Err(e) => return Err(e),
            }
        }

        Err(ResolveError::UnsupportedUrl {
            url: url.to_string(),
        })
    }

    /// Registered rules in dispatch order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// Builder for [`Router`]
#[derive(Default)]
pub struct RouterBuilder {
    rules: Vec<(String, Arc<dyn ExtractionStrategy>)>,
}

impl RouterBuilder {
    /// Append a rule; earlier rules take precedence
    pub fn rule(mut self, pattern: &str, strategy: Arc<dyn ExtractionStrategy>) -> Self {
        self.rules.push((pattern.to_string(), strategy));
        self
    }

    /// Compile all patterns
    pub fn build(self) -> Result<Router, ResolveError> {
        let rules = self
            .rules
            .into_iter()
            .map(|(pattern, strategy)| Rule::new(&pattern, strategy))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Router::new(rules))
    }
}
