// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use teaser::api::{build_router, AppState};
use teaser::preview::{MaterialCache, PreviewService, ResolverConfig, Router as PreviewRouter};
use tower::ServiceExt;

use super::support::MapFetcher;

fn app(fetcher: MapFetcher) -> Router {
    let service =
        PreviewService::with_fetcher(&ResolverConfig::default(), Arc::new(fetcher)).unwrap();
    build_router(AppState::new(service))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_preview_success() {
    let fetcher = MapFetcher::new().page(
        "https://example.com/",
        200,
        r#"<meta property="og:title" content="Example"><meta property="og:image" content="https://example.com/i.png">"#,
    );

    let (status, body) = get(app(fetcher), "/?url=https://example.com/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "url": "https://example.com/",
            "title": "Example",
            "description": "",
            "image": "https://example.com/i.png",
            "tags": []
        })
    );
}

#[tokio::test]
async fn test_preview_percent_encoded_url() {
    let fetcher = MapFetcher::new().page(
        "https://api.komiflo.com/content/id/5",
        200,
        super::support::KOMIFLO_CONTENT,
    );

    let (status, body) = get(
        app(fetcher),
        "/?url=https%3A%2F%2Fkomiflo.com%2F%23%21%2Fcomics%2F5",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "https://komiflo.com/#!/comics/5");
    assert_eq!(body["tags"], json!(["B", "A", "alpha", "zeta"]));
}

#[tokio::test]
async fn test_preview_repeated_url_uses_first() {
    let fetcher = Arc::new(
        MapFetcher::new()
            .page("https://a.example/", 200, "<title>First</title>")
            .page("https://b.example/", 200, "<title>Second</title>"),
    );
    let service =
        PreviewService::with_fetcher(&ResolverConfig::default(), fetcher.clone()).unwrap();
    let app = build_router(AppState::new(service));

    let (status, body) = get(app, "/?url=https://a.example/&url=https://b.example/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "First");
    assert_eq!(fetcher.requested(), vec!["https://a.example/"]);
}

#[tokio::test]
async fn test_preview_missing_url() {
    let (status, body) = get(app(MapFetcher::new()), "/").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "parameter url is required"}));
}

#[tokio::test]
async fn test_preview_invalid_url() {
    let (status, body) = get(app(MapFetcher::new()), "/?url=nope").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "url is invalid URL"}));
}

#[tokio::test]
async fn test_preview_invalid_scheme() {
    let (status, body) = get(app(MapFetcher::new()), "/?url=ftp://example.com/").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"error": "url has invalid scheme, must be http or https"})
    );
}

#[tokio::test]
async fn test_preview_upstream_failure_is_internal_error() {
    let fetcher = MapFetcher::new().page("https://example.com/", 502, "");

    let (status, body) = get(app(fetcher), "/?url=https://example.com/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "internal error"}));
}

#[tokio::test]
async fn test_preview_unsupported_url_is_client_error() {
    // A router without a catch-all rule
    let router = PreviewRouter::builder().build().unwrap();
    let service = PreviewService::with_router(router, MaterialCache::unbounded());
    let app = build_router(AppState::new(service));

    let (status, body) = get(app, "/?url=https://example.com/").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("unsupported url"));
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let (status, body) = get(app(MapFetcher::new()), "/v1/other").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "not found"}));
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(app(MapFetcher::new()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], teaser::version::VERSION);
    assert_eq!(body["cached"], 0);
}
