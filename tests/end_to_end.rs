//! Resolve a film and find its links with every upstream mocked.

mod common;

use httpmock::prelude::*;
use httpmock::Method::HEAD;
use kinolink::engine::{FilmFinder, FilmQuery, FoundLinks};
use kinolink::render::film_card;
use serde_json::json;

use common::{client, search_page, settings_for, zona_page};

async fn mock_inception_metadata(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/movie/search")
                .query_param("query", "Inception");
            then.status(200).json_body(json!({
                "docs": [{
                    "id": 447301,
                    "name": "Inception",
                    "year": 2010,
                    "rating": {"kp": 8.7},
                    "votes": {"kp": 900000},
                    "description": "A thief who steals corporate secrets"
                }]
            }));
        })
        .await;
}

async fn mock_lordfilm(server: &MockServer) -> String {
    let dead = server.url("/lordfilm-dead/inception");
    let live = server.url("/lordfilm.tv/inception-2010");
    let page = search_page(&[dead, live.clone()]);

    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/search")
                .query_param("q", "Inception 2010 lordfilm");
            then.status(200).body(page);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(HEAD).path("/lordfilm-dead/inception");
            then.status(404);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(HEAD).path("/lordfilm.tv/inception-2010");
            then.status(200);
        })
        .await;

    live
}

#[tokio::test]
async fn finds_links_on_both_sources() {
    let server = MockServer::start_async().await;
    mock_inception_metadata(&server).await;
    let lordfilm = mock_lordfilm(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path_contains("/zona/search/Inception");
            then.status(200)
                .body(zona_page(&[("2010", "/watch/55"), ("2011", "/watch/56")]));
        })
        .await;

    let finder = FilmFinder::new(&settings_for(&server), client());
    let film = finder
        .resolve(&FilmQuery::ByName("Inception".to_string()))
        .await
        .expect("film should resolve");
    assert_eq!(film.year, Some(2010));

    let links = finder.find_links(&film).await;
    assert_eq!(
        links,
        FoundLinks {
            lordfilm: Some(lordfilm.clone()),
            zona: Some(format!("{}/watch/55", server.url("/zona"))),
        }
    );

    let card = film_card(&film, &links);
    assert!(card.starts_with("Inception (2010)"));
    assert!(card.contains("Kinopoisk rating: 8.7/10"));
    assert!(card.contains(&format!("Lordfilm: {}", lordfilm)));
}

#[tokio::test]
async fn failing_source_does_not_affect_the_other() {
    let server = MockServer::start_async().await;
    mock_inception_metadata(&server).await;
    let lordfilm = mock_lordfilm(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path_contains("/zona/search/");
            then.status(500);
        })
        .await;

    let finder = FilmFinder::new(&settings_for(&server), client());
    let film = finder
        .resolve(&FilmQuery::ByName("Inception".to_string()))
        .await
        .expect("film should resolve");

    let links = finder.find_links(&film).await;
    assert_eq!(links.lordfilm, Some(lordfilm));
    assert_eq!(links.zona, None);
}

#[tokio::test]
async fn untitled_record_is_not_resolved() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/movie/random");
            then.status(200)
                .json_body(json!({"id": 1, "name": null, "year": 2010}));
        })
        .await;

    let finder = FilmFinder::new(&settings_for(&server), client());
    assert_eq!(finder.resolve(&FilmQuery::Random).await, None);
}

#[tokio::test]
async fn unknown_title_is_not_resolved() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/movie/search");
            then.status(200).json_body(json!({"docs": []}));
        })
        .await;

    let finder = FilmFinder::new(&settings_for(&server), client());
    assert_eq!(
        finder
            .resolve(&FilmQuery::ByName("zzqxv".to_string()))
            .await,
        None
    );
}
