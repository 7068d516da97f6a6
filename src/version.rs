// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for teaser

/// Semantic version number
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Default User-Agent for outbound requests
pub fn user_agent() -> String {
    format!("{}/{}", NAME, VERSION)
}
