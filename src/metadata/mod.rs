//! Film metadata resolution against the Kinopoisk API.
//!
//! Both entry points normalize through [`film_from_page`]. The `try_*`
//! variants report why nothing was resolved; the plain variants collapse every
//! failure into `None`, so callers cannot tell "not found" from "API
//! unreachable".

mod normalize;

pub use normalize::film_from_page;

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::http_client::{FetchError, FetchRequest, HttpClient};
use crate::models::CanonicalFilm;

/// Vote-count window for random picks, keeping obscure titles out.
pub const RANDOM_VOTES_RANGE: &str = "2000-6666666";

/// Error type for metadata resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no film matched the query")]
    NotFound,

    #[error("movie-data API request failed: {0}")]
    Upstream(#[from] FetchError),

    #[error("malformed film document: {0}")]
    Malformed(String),
}

/// Resolves queries into canonical film records.
#[derive(Clone)]
pub struct MetadataResolver {
    client: HttpClient,
    api_url: String,
    token: String,
    timeout: Duration,
    poster_placeholder: String,
}

impl MetadataResolver {
    pub fn new(settings: &Settings, client: HttpClient) -> Self {
        Self {
            client,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            token: settings.api_token.clone(),
            timeout: settings.api_timeout(),
            poster_placeholder: settings.poster_placeholder.clone(),
        }
    }

    fn request(&self, path: &str) -> FetchRequest {
        FetchRequest::get(format!("{}{}", self.api_url, path))
            .header("X-API-KEY", self.token.as_str())
            .timeout(self.timeout)
    }

    /// Pick a random, reasonably well-known film with a description.
    pub async fn try_resolve_random(&self) -> Result<CanonicalFilm, ResolveError> {
        let request = self
            .request("/movie/random")
            .query("votes.kp", RANDOM_VOTES_RANGE)
            .query("notNullFields", "description");

        let page: Value = self.client.get_json(request).await?;
        film_from_page(&page, &self.poster_placeholder)
    }

    /// Search by free text and take the first result as canonical.
    pub async fn try_resolve_by_name(&self, query: &str) -> Result<CanonicalFilm, ResolveError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ResolveError::NotFound);
        }

        let request = self.request("/movie/search").query("query", query);
        let response: Value = self.client.get_json(request).await?;

        let first = response
            .get("docs")
            .and_then(Value::as_array)
            .and_then(|docs| docs.first())
            .ok_or(ResolveError::NotFound)?;

        debug!("Search for '{}' returned a result, using the first one", query);
        film_from_page(first, &self.poster_placeholder)
    }

    pub async fn resolve_random(&self) -> Option<CanonicalFilm> {
        collapse("random film", self.try_resolve_random().await)
    }

    pub async fn resolve_by_name(&self, query: &str) -> Option<CanonicalFilm> {
        collapse(query, self.try_resolve_by_name(query).await)
    }
}

fn collapse(what: &str, result: Result<CanonicalFilm, ResolveError>) -> Option<CanonicalFilm> {
    match result {
        Ok(film) => {
            info!(
                "Resolved {} -> {:?} ({:?})",
                what,
                film.name.as_deref().unwrap_or("<unnamed>"),
                film.year
            );
            Some(film)
        }
        Err(ResolveError::NotFound) => {
            warn!("Movie not found: {}", what);
            None
        }
        Err(e) => {
            warn!("Failed to resolve {}: {}", what, e);
            None
        }
    }
}
