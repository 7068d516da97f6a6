// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod preview;
pub mod version;

// Re-export main types
pub use preview::{
    ExtractionStrategy, Fetcher, Material, PreviewService, ResolveError, ResolverConfig, Router,
};
