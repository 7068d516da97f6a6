// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Preview API request types

use serde::{Deserialize, Serialize};
use url::Url;

/// Query parameters for GET /
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewApiRequest {
    /// URL to resolve (required, http or https)
    #[serde(default)]
    pub url: Option<String>,
}

impl PreviewApiRequest {
    /// Build from raw query pairs; the first `url` value wins
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let url = pairs
            .into_iter()
            .find(|(key, _)| key == "url")
            .map(|(_, value)| value);
        Self { url }
    }

    /// Validate the request and return the target URL unchanged
    pub fn validate(&self) -> Result<&str, String> {
        let target = match self.url.as_deref() {
            Some(u) if !u.is_empty() => u,
            _ => return Err("parameter url is required".to_string()),
        };

        let parsed = Url::parse(target).map_err(|_| "url is invalid URL".to_string())?;

        match parsed.scheme() {
            "http" | "https" => Ok(target),
            _ => Err("url has invalid scheme, must be http or https".to_string()),
        }
    }
}
