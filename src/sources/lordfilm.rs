//! LordFilm, found through a general-purpose search engine.
//!
//! LordFilm runs on a rotating set of mirror domains with no search of its
//! own that is worth scraping, so the lookup asks the search engine for
//! `"{name} {year} lordfilm"` and verifies the top organic hits.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::{LinkSource, SourceError};
use crate::config::Settings;
use crate::extract::{search_result_candidates, SearchResultFilter};
use crate::http_client::{FetchRequest, HttpClient};
use crate::models::CanonicalFilm;
use crate::verify::LinkVerifier;

/// Link source backed by search engine results.
pub struct LordFilmSource {
    client: HttpClient,
    verifier: LinkVerifier,
    search_url: String,
    filter: SearchResultFilter,
    timeout: Duration,
}

impl LordFilmSource {
    pub fn new(settings: &Settings, client: HttpClient, verifier: LinkVerifier) -> Self {
        Self {
            client,
            verifier,
            search_url: settings.search_url.clone(),
            filter: SearchResultFilter::from(&settings.lordfilm),
            timeout: settings.page_timeout(),
        }
    }

    /// Search engine query for a film.
    pub fn query_for(&self, film: &CanonicalFilm) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(3);
        if let Some(title) = film.title() {
            parts.push(title.to_string());
        }
        if let Some(year) = film.year {
            parts.push(year.to_string());
        }
        parts.push(self.filter.marker.clone());
        parts.join(" ")
    }
}

#[async_trait]
impl LinkSource for LordFilmSource {
    fn name(&self) -> &str {
        "lordfilm"
    }

    async fn search(&self, film: &CanonicalFilm) -> Result<Option<String>, SourceError> {
        let query = self.query_for(film);
        debug!("LordFilm search: {}", query);

        let request = FetchRequest::get(&self.search_url)
            .query("q", query)
            .timeout(self.timeout);
        let html = self.client.get_text(request).await?;

        let candidates = search_result_candidates(&html, &self.filter)?;
        let urls: Vec<String> = candidates.into_iter().map(|c| c.url).collect();

        Ok(self.verifier.first_reachable(&urls).await)
    }
}
