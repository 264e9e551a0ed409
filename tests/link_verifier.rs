//! Link verification ordering and timeouts.

mod common;

use std::time::Duration;

use httpmock::prelude::*;
use httpmock::Method::HEAD;
use kinolink::verify::LinkVerifier;

use common::client;

fn verifier(timeout_ms: u64) -> LinkVerifier {
    LinkVerifier::new(client(), Duration::from_millis(timeout_ms))
}

#[tokio::test]
async fn earlier_candidate_wins_even_when_slower() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(HEAD).path("/slow");
            then.status(200).delay(Duration::from_millis(300));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(HEAD).path("/fast");
            then.status(200);
        })
        .await;

    let urls = vec![server.url("/slow"), server.url("/fast")];
    let found = verifier(2000).first_reachable(&urls).await;

    assert_eq!(found, Some(server.url("/slow")));
}

#[tokio::test]
async fn unreachable_candidates_are_skipped() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(HEAD).path("/gone");
            then.status(404);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(HEAD).path("/moved");
            then.status(301).header("location", "/live");
        })
        .await;
    let live = server
        .mock_async(|when, then| {
            when.method(HEAD).path("/live");
            then.status(200);
        })
        .await;

    let urls = vec![server.url("/gone"), server.url("/moved"), server.url("/live")];
    let found = verifier(1000).first_reachable(&urls).await;

    assert_eq!(found, Some(server.url("/live")));
    // Only the direct check; the redirect from /moved is not followed.
    live.assert_hits_async(1).await;
}

#[tokio::test]
async fn redirect_to_live_page_is_not_reachable() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(HEAD).path("/old-mirror");
            then.status(301).header("location", "/parked");
        })
        .await;
    let parked = server
        .mock_async(|when, then| {
            when.method(HEAD).path("/parked");
            then.status(200);
        })
        .await;

    let urls = vec![server.url("/old-mirror")];
    assert_eq!(verifier(1000).first_reachable(&urls).await, None);
    assert_eq!(parked.hits_async().await, 0);
}

#[tokio::test]
async fn timed_out_check_counts_as_unreachable() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(HEAD).path("/hang");
            then.status(200).delay(Duration::from_secs(3));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(HEAD).path("/ok");
            then.status(200);
        })
        .await;

    let verifier = verifier(150);

    let only_hanging = vec![server.url("/hang")];
    assert_eq!(verifier.first_reachable(&only_hanging).await, None);

    let urls = vec![server.url("/hang"), server.url("/ok")];
    assert_eq!(verifier.first_reachable(&urls).await, Some(server.url("/ok")));
}

#[tokio::test]
async fn checks_run_concurrently() {
    let server = MockServer::start_async().await;
    for path in ["/a", "/b", "/c"] {
        server
            .mock_async(|when, then| {
                when.method(HEAD).path(path);
                then.status(404).delay(Duration::from_millis(600));
            })
            .await;
    }

    let urls = vec![server.url("/a"), server.url("/b"), server.url("/c")];
    let started = std::time::Instant::now();
    assert_eq!(verifier(2000).first_reachable(&urls).await, None);

    // Sequential checks would take at least 1.8s.
    assert!(started.elapsed() < Duration::from_millis(1500));
}

#[tokio::test]
async fn capped_concurrency_keeps_priority() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(HEAD).path("/first");
            then.status(503);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(HEAD).path("/second");
            then.status(200).delay(Duration::from_millis(100));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(HEAD).path("/third");
            then.status(200);
        })
        .await;

    let urls = vec![
        server.url("/first"),
        server.url("/second"),
        server.url("/third"),
    ];
    let found = verifier(1000)
        .with_max_concurrent(Some(1))
        .first_reachable(&urls)
        .await;

    assert_eq!(found, Some(server.url("/second")));
}

#[tokio::test]
async fn empty_candidate_list_is_absent() {
    assert_eq!(verifier(100).first_reachable(&[]).await, None);
}
