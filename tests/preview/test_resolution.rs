// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::sync::Arc;
use std::time::Duration;
use teaser::preview::{Material, PreviewService, ResolveError, ResolverConfig};
use tokio_util::sync::CancellationToken;

use super::support::{HangingFetcher, MapFetcher, KBS3_POST, KOMIFLO_CONTENT};

fn service(fetcher: Arc<MapFetcher>) -> PreviewService {
    PreviewService::with_fetcher(&ResolverConfig::default(), fetcher).unwrap()
}

#[tokio::test]
async fn test_example_com_scenario() {
    let url = "https://example.com/";
    let fetcher = Arc::new(MapFetcher::new().page(
        url,
        200,
        r#"<html><head><meta property="og:title" content="Example"></head><body></body></html>"#,
    ));
    let service = service(fetcher);

    let material = service.resolve_url(url).await.unwrap();

    assert_eq!(
        material,
        Material {
            url: "https://example.com/".to_string(),
            title: "Example".to_string(),
            description: String::new(),
            image: String::new(),
            tags: vec![],
        }
    );
}

#[tokio::test]
async fn test_komiflo_resolution_through_api() {
    let url = "https://komiflo.com/#!/comics/4242";
    let fetcher = Arc::new(MapFetcher::new().page(
        "https://api.komiflo.com/content/id/4242",
        200,
        KOMIFLO_CONTENT,
    ));
    let service = service(fetcher.clone());

    let material = service.resolve_url(url).await.unwrap();

    assert_eq!(material.url, url);
    assert_eq!(material.title, "Sample Comic");
    assert_eq!(material.description, "B - Comic Monthly");
    assert_eq!(material.image, "https://t.komiflo.com/564_mobile_large_3x/c.jpg");
    assert_eq!(material.tags, vec!["B", "A", "alpha", "zeta"]);
    assert_eq!(
        fetcher.requested(),
        vec!["https://api.komiflo.com/content/id/4242"]
    );
}

#[tokio::test]
async fn test_kbs3_resolution() {
    let url = "https://ss.kb10uy.org/posts/7";
    let fetcher = Arc::new(MapFetcher::new().page(url, 200, KBS3_POST));
    let service = service(fetcher);

    let material = service.resolve_url(url).await.unwrap();

    assert_eq!(material.title, "Story");
    assert_eq!(material.description, "Once upon a time.");
    assert_eq!(material.tags, vec!["Action", "Comedy"]);
}

#[tokio::test]
async fn test_catch_all_never_unsupported_url() {
    let urls = [
        "https://example.com/",
        "http://example.org/a/b?c=d",
        "https://ss.kb10uy.org/users/1",
        "https://komiflo.com/magazines/3",
    ];
    let fetcher = urls
        .iter()
        .fold(MapFetcher::new(), |f, u| f.page(u, 200, "<html></html>"));
    let service = service(Arc::new(fetcher));

    for url in urls {
        let result = service.resolve_url(url).await;
        assert!(
            !matches!(result, Err(ResolveError::UnsupportedUrl { .. })),
            "{} was unsupported",
            url
        );
    }
}

#[tokio::test]
async fn test_second_resolution_does_not_fetch() {
    let url = "https://example.com/";
    let fetcher = Arc::new(MapFetcher::new().page(url, 200, "<title>Hello</title>"));
    let service = service(fetcher.clone());

    let first = service.resolve_url(url).await.unwrap();
    let second = service.resolve_url(url).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.title, "Hello");
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn test_failures_are_terminal_and_never_cached() {
    let cases = [
        // OGP, non-200
        ("https://example.com/gone", "https://example.com/gone", 404, "gone"),
        // Komiflo, non-JSON body
        (
            "https://komiflo.com/comics/1",
            "https://api.komiflo.com/content/id/1",
            200,
            "<html>maintenance</html>",
        ),
        // KbS3, non-200
        ("https://ss.kb10uy.org/posts/9", "https://ss.kb10uy.org/posts/9", 503, ""),
    ];

    for (url, fetched, status, body) in cases {
        let fetcher = Arc::new(MapFetcher::new().page(fetched, status, body));
        let service = service(fetcher.clone());

        let result = service.resolve_url(url).await;
        assert!(result.is_err(), "{} should fail", url);
        assert!(!matches!(result, Err(ResolveError::UnsupportedUrl { .. })));
        assert!(!service.is_cached(url));

        // Retried because it was never cached
        let _ = service.resolve_url(url).await;
        assert_eq!(fetcher.calls(), 2, "{} should be fetched twice", url);
    }
}

#[tokio::test]
async fn test_komiflo_error_does_not_fall_back_to_ogp() {
    let url = "https://komiflo.com/comics/1";
    // The page itself would scrape fine, but the API is down
    let fetcher = Arc::new(
        MapFetcher::new()
            .page("https://api.komiflo.com/content/id/1", 500, "")
            .page(url, 200, r#"<meta property="og:title" content="Komiflo">"#),
    );
    let service = service(fetcher.clone());

    let result = service.resolve_url(url).await;

    assert!(matches!(
        result,
        Err(ResolveError::BadStatus { status: 500, .. })
    ));
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn test_cancellation_surfaces_unchanged() {
    let service =
        PreviewService::with_fetcher(&ResolverConfig::default(), Arc::new(HangingFetcher))
            .unwrap();
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let result = service.resolve("https://example.com/slow", &cancel).await;

    assert!(matches!(result, Err(ResolveError::Cancelled)));
    assert!(!service.is_cached("https://example.com/slow"));
}
