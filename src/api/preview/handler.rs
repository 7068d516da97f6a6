// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Preview API endpoint handler

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use tracing::{debug, warn};

use super::request::PreviewApiRequest;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::preview::Material;

/// GET /?url=<url> - Resolve preview material
///
/// Repeated `url` parameters are allowed; the first one is used.
///
/// # Response
/// The resolved material: `url`, `title`, `description`, `image`, `tags`
///
/// # Errors
/// - 400 Bad Request: missing, invalid or unsupported URL
/// - 500 Internal Server Error: resolution failed
pub async fn preview_handler(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Material>, ApiError> {
    let Query(pairs) = query.map_err(|e| {
        warn!("Preview query rejected: {}", e);
        ApiError::InvalidRequest(e.body_text())
    })?;
    let request = PreviewApiRequest::from_pairs(pairs);

    let target = request.validate().map_err(|e| {
        warn!("Preview validation failed: {}", e);
        ApiError::InvalidRequest(e)
    })?;

    debug!("Preview request: {}", target);

    // Aborted when the server shuts down
    let cancel = state.shutdown.child_token();

    let material = state.service.resolve(target, &cancel).await?;

    Ok(Json(material))
}
