// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for link preview resolution

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Resolved preview payload for a single URL
///
/// Empty fields are valid: a page without a description still resolves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    /// The URL exactly as supplied by the caller
    pub url: String,
    /// Page title
    pub title: String,
    /// Short description or summary
    pub description: String,
    /// Absolute URL of a representative image
    pub image: String,
    /// Tags in the order the strategy produced them
    pub tags: Vec<String>,
}

impl Material {
    /// Create an empty material for `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

/// Errors that can occur while resolving a URL
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No rule produced a material for this URL
    #[error("unsupported url: {url}")]
    UnsupportedUrl {
        /// The URL that could not be resolved
        url: String,
    },

    /// The strategy matched the URL but the content has an unexpected shape.
    /// The router moves on to the next matching rule.
    #[error("{strategy}: unsupported content: {reason}")]
    UnsupportedContent {
        /// Strategy that declined
        strategy: &'static str,
        /// Why the content was rejected
        reason: String,
    },

    /// The strategy's own id pattern did not match the URL
    #[error("{strategy}: unmatched URL pattern: {url}")]
    PatternMismatch {
        /// Strategy that rejected the URL
        strategy: &'static str,
        /// The offending URL
        url: String,
    },

    /// Transport-level failure talking to the remote host
    #[error("fetch failed for {url}: {message}")]
    FetchFailure {
        /// Requested URL
        url: String,
        /// Underlying error message
        message: String,
    },

    /// The outbound request exceeded the configured timeout
    #[error("fetch timed out for {url}")]
    Timeout {
        /// Requested URL
        url: String,
    },

    /// The caller cancelled the resolution
    #[error("resolution cancelled")]
    Cancelled,

    /// Remote host answered with something other than 200
    #[error("status code error: {status} for {url}")]
    BadStatus {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Response body could not be parsed into the expected shape
    #[error("{strategy}: malformed response: {message}")]
    MalformedResponse {
        /// Strategy that failed to parse
        strategy: &'static str,
        /// Parser error
        message: String,
    },

    /// A routing rule pattern failed to compile
    #[error("invalid rule pattern {pattern:?}: {message}")]
    InvalidRule {
        /// Pattern source
        pattern: String,
        /// Regex compiler error
        message: String,
    },
}

impl ResolveError {
    /// Whether the router should try the next matching rule
    pub fn is_unsupported_content(&self) -> bool {
        matches!(self, Self::UnsupportedContent { .. })
    }

    /// Whether this error is the caller's fault (bad input URL)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::UnsupportedUrl { .. })
    }
}
