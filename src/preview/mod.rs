// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Link preview resolution
//!
//! Turns a URL into [`Material`] (title, description, image, tags):
//!
//! ```text
//! URL → MaterialCache ─hit──────────────────────────────→ Material
//!          │ miss
//!          ↓
//!        Router → rule 1 (komiflo) ─declined→ rule 2 (kbs3) ─declined→ rule 3 (ogp)
//!          ↓
//!        Material (cached) or terminal error (not cached)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let service = PreviewService::new(&ResolverConfig::from_env())?;
//! let material = service.resolve_url("https://example.com/").await?;
//! ```

pub mod cache;
pub mod config;
pub mod fetcher;
pub mod kbs3;
pub mod komiflo;
pub mod ogp;
pub mod router;
pub mod service;
pub mod strategy;
pub mod types;

// Re-export commonly used types
pub use cache::{CacheStats, MaterialCache};
pub use config::ResolverConfig;
pub use fetcher::{FetchResponse, Fetcher, HttpFetcher};
pub use router::{Router, RouterBuilder, Rule};
pub use service::PreviewService;
pub use strategy::ExtractionStrategy;
pub use types::{Material, ResolveError};
