// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Extraction strategy trait definition

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::types::{Material, ResolveError};

/// Trait for implementing extraction strategies
///
/// A strategy turns a URL into a [`Material`]. It is registered with the
/// router behind a URL pattern; when the pattern matches but the fetched
/// content is not what the strategy expects, it returns
/// [`ResolveError::UnsupportedContent`] so the router can try the next rule.
/// Any other error is terminal for the resolution.
///
/// Strategies hold no mutable state, so one instance serves all requests.
#[async_trait]
pub trait ExtractionStrategy: Send + Sync {
    /// Resolve `url` into preview material
    ///
    /// # Arguments
    /// * `url` - The URL as supplied by the caller
    /// * `cancel` - Fires when the caller gives up on the resolution
    async fn resolve(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<Material, ResolveError>;

    /// Strategy name for logging and rule introspection
    fn name(&self) -> &'static str;
}
