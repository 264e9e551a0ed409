//! Zona, found through the site's own search page.
//!
//! A single request: the year match on the result page is taken as proof
//! enough, so links are not verified.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use super::{LinkSource, SourceError};
use crate::config::Settings;
use crate::extract::year_matched_candidates;
use crate::http_client::{FetchRequest, HttpClient};
use crate::models::CanonicalFilm;

/// Link source backed by Zona's search page.
pub struct ZonaSource {
    client: HttpClient,
    base_url: Option<String>,
    timeout: Duration,
}

impl ZonaSource {
    pub fn new(settings: &Settings, client: HttpClient) -> Self {
        Self {
            client,
            base_url: settings
                .zona_url
                .as_ref()
                .map(|u| u.trim_end_matches('/').to_string()),
            timeout: settings.page_timeout(),
        }
    }

    /// Zona search URL for a title. The trailing encoded space is what the
    /// site's own search box sends.
    pub fn search_url(base_url: &str, title: &str) -> String {
        format!("{}/search/{}%20", base_url, urlencoding::encode(title))
    }
}

#[async_trait]
impl LinkSource for ZonaSource {
    fn name(&self) -> &str {
        "zona"
    }

    async fn search(&self, film: &CanonicalFilm) -> Result<Option<String>, SourceError> {
        let Some(base_url) = self.base_url.as_deref() else {
            return Err(SourceError::NotConfigured("zona_url is not set".to_string()));
        };
        let (Some(title), Some(year)) = (film.title(), film.year) else {
            debug!("Zona lookup needs both a title and a year");
            return Ok(None);
        };

        let url = Self::search_url(base_url, title);
        debug!("Zona search: {}", url);

        let fetched = self
            .client
            .fetch(FetchRequest::get(url).timeout(self.timeout))
            .await?;
        let Some(html) = fetched.text() else {
            return Ok(None);
        };

        let link = year_matched_candidates(html, year, base_url)?
            .into_iter()
            .next()
            .map(|c| c.url);

        if let Some(ref link) = link {
            info!("Found Zona link: {}", link);
        }
        Ok(link)
    }
}
