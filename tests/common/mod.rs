//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;

use httpmock::MockServer;
use kinolink::config::Settings;
use kinolink::http_client::HttpClient;
use kinolink::models::{CanonicalFilm, DEFAULT_POSTER_URL};

pub const TOKEN: &str = "test-token";

/// Settings pointing every upstream at the mock server.
///
/// The mock server speaks plain HTTP, so the LordFilm scheme filter is relaxed
/// to `http://`.
pub fn settings_for(server: &MockServer) -> Settings {
    let mut settings = Settings {
        api_url: server.base_url(),
        api_token: TOKEN.to_string(),
        search_url: server.url("/search"),
        zona_url: Some(server.url("/zona")),
        verify_timeout_ms: 500,
        page_timeout_secs: 2,
        api_timeout_secs: 2,
        ..Default::default()
    };
    settings.lordfilm.scheme_prefix = "http://".to_string();
    settings
}

pub fn client() -> HttpClient {
    HttpClient::builder()
        .build()
        .expect("failed to build HTTP client")
}

/// Search engine result page with one organic anchor per href.
pub fn search_page(hrefs: &[String]) -> String {
    let results: String = hrefs
        .iter()
        .map(|href| {
            format!(
                r#"<div class="g"><div><a jsname="UWckNb" href="{}"><br><h3>Watch online</h3></a></div></div>"#,
                href
            )
        })
        .collect();
    format!(
        r#"<!doctype html><html><head><title>results</title></head><body><div id="rso">{}</div></body></html>"#,
        results
    )
}

/// Zona search page with `(year, href)` result items.
pub fn zona_page(items: &[(&str, &str)]) -> String {
    let items: String = items
        .iter()
        .map(|(year, href)| {
            format!(
                r#"<li class="results-item-wrap"><a class="results-item" href="{}"><div class="results-item-title">Film</div></a><span class="results-item-year">{}</span></li>"#,
                href, year
            )
        })
        .collect();
    format!(
        r#"<html><body><ul class="results-list">{}</ul></body></html>"#,
        items
    )
}

/// Resolved film with just a title and year.
pub fn film(name: &str, year: Option<i32>) -> CanonicalFilm {
    CanonicalFilm {
        id: None,
        name: Some(name.to_string()),
        alternative_name: None,
        year,
        rating: BTreeMap::new(),
        votes: BTreeMap::new(),
        description: None,
        poster_url: DEFAULT_POSTER_URL.to_string(),
    }
}
