//! Link sources: one adapter per third-party site.
//!
//! Each source turns a [`CanonicalFilm`] into at most one link. Failures stay
//! inside the source and surface as `None`, so one broken site never affects
//! another.

pub mod lordfilm;
pub mod zona;

pub use lordfilm::LordFilmSource;
pub use zona::ZonaSource;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::extract::ExtractError;
use crate::http_client::{log_fetch_error, FetchError};
use crate::models::CanonicalFilm;

/// Error type for a single source lookup.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] FetchError),

    #[error("Failed to parse page: {0}")]
    Parse(#[from] ExtractError),

    #[error("Source not configured: {0}")]
    NotConfigured(String),
}

/// A site that can be searched for a watch link.
#[async_trait]
pub trait LinkSource: Send + Sync {
    /// Short identifier used in logs and output (e.g., "lordfilm").
    fn name(&self) -> &str;

    /// Search the site for `film`.
    ///
    /// `Ok(None)` means the search ran and found nothing usable.
    async fn search(&self, film: &CanonicalFilm) -> Result<Option<String>, SourceError>;

    /// Find a link for `film`, collapsing every failure into `None`.
    async fn find_link(&self, film: &CanonicalFilm) -> Option<String> {
        if !film.is_resolved() {
            return None;
        }

        match self.search(film).await {
            Ok(link) => link,
            Err(SourceError::Http(e)) => {
                log_fetch_error(&format!("{} lookup failed", self.name()), &e);
                None
            }
            Err(SourceError::NotConfigured(reason)) => {
                debug!("{} skipped: {}", self.name(), reason);
                None
            }
            Err(e) => {
                warn!("{} lookup failed: {}", self.name(), e);
                None
            }
        }
    }
}
