//! The two operations front-ends call: resolve a film, then find its links.

use serde::Serialize;
use tracing::debug;

use crate::config::Settings;
use crate::http_client::HttpClient;
use crate::metadata::MetadataResolver;
use crate::models::CanonicalFilm;
use crate::sources::{LinkSource, LordFilmSource, ZonaSource};
use crate::verify::LinkVerifier;

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilmQuery {
    Random,
    ByName(String),
}

/// One optional link per source. Sources are looked up independently and
/// never cross-checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FoundLinks {
    pub lordfilm: Option<String>,
    pub zona: Option<String>,
}

impl FoundLinks {
    /// Present links with their display labels, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [("Lordfilm", &self.lordfilm), ("Zona", &self.zona)]
            .into_iter()
            .filter_map(|(label, url)| url.as_deref().map(|u| (label, u)))
    }

    pub fn is_empty(&self) -> bool {
        self.lordfilm.is_none() && self.zona.is_none()
    }
}

/// Film lookup engine sharing one HTTP transport across all its parts.
pub struct FilmFinder {
    resolver: MetadataResolver,
    lordfilm: LordFilmSource,
    zona: ZonaSource,
}

impl FilmFinder {
    pub fn new(settings: &Settings, client: HttpClient) -> Self {
        let verifier = LinkVerifier::new(client.clone(), settings.verify_timeout())
            .with_max_concurrent(settings.verify_limit());

        Self {
            resolver: MetadataResolver::new(settings, client.clone()),
            lordfilm: LordFilmSource::new(settings, client.clone(), verifier),
            zona: ZonaSource::new(settings, client),
        }
    }

    /// Resolve a query into a film record.
    ///
    /// `None` covers "not found", "API unavailable" and "record without a
    /// title" alike.
    pub async fn resolve(&self, query: &FilmQuery) -> Option<CanonicalFilm> {
        let film = match query {
            FilmQuery::Random => self.resolver.resolve_random().await,
            FilmQuery::ByName(name) => self.resolver.resolve_by_name(name).await,
        }?;

        if !film.is_resolved() {
            debug!("Resolved record has no title, treating as not found");
            return None;
        }
        Some(film)
    }

    /// Look the film up on every source concurrently and wait for all of them.
    pub async fn find_links(&self, film: &CanonicalFilm) -> FoundLinks {
        let (lordfilm, zona) =
            tokio::join!(self.lordfilm.find_link(film), self.zona.find_link(film));

        debug!(
            "Links for {:?}: lordfilm={:?} zona={:?}",
            film.title(),
            lordfilm,
            zona
        );
        FoundLinks { lordfilm, zona }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iter_skips_missing_links() {
        let links = FoundLinks {
            lordfilm: None,
            zona: Some("https://zona.example/watch/55".to_string()),
        };
        let present: Vec<_> = links.iter().collect();
        assert_eq!(present, vec![("Zona", "https://zona.example/watch/55")]);
        assert!(!links.is_empty());
        assert!(FoundLinks::default().is_empty());
    }
}
