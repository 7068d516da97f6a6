// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Preview API endpoint
//!
//! Provides the `GET /?url=` HTTP endpoint for link previews.

pub mod handler;
pub mod request;

pub use handler::preview_handler;
pub use request::PreviewApiRequest;
