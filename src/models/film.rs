//! Canonical film record.

use std::collections::BTreeMap;

use serde::Serialize;

/// Poster shown when the API has no usable poster URL.
pub const DEFAULT_POSTER_URL: &str = "https://imgur.com/eEmOQBt";

/// Normalized film metadata resolved from the movie-data API.
///
/// Built once per resolution from a single upstream document and never
/// mutated afterwards. Only `poster_url` is guaranteed to be populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalFilm {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub alternative_name: Option<String>,
    pub year: Option<i32>,
    /// Rating source (`kp`, `imdb`, ...) to score.
    pub rating: BTreeMap<String, Option<f64>>,
    /// Rating source to number of votes.
    pub votes: BTreeMap<String, Option<f64>>,
    pub description: Option<String>,
    pub poster_url: String,
}

impl CanonicalFilm {
    /// Whether the record carries a usable title.
    ///
    /// A record without one is treated as a failed resolution everywhere.
    pub fn is_resolved(&self) -> bool {
        self.title().is_some()
    }

    /// Trimmed display title, if any.
    pub fn title(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Rating and vote count for one rating source, when both are present.
    pub fn score(&self, source: &str) -> Option<(f64, f64)> {
        let rating = self.rating.get(source).copied().flatten()?;
        let votes = self.votes.get(source).copied().flatten()?;
        Some((rating, votes))
    }
}

#[cfg(test)]
pub(crate) fn sample_film(name: &str, year: Option<i32>) -> CanonicalFilm {
    CanonicalFilm {
        id: Some(447301),
        name: Some(name.to_string()),
        alternative_name: None,
        year,
        rating: BTreeMap::new(),
        votes: BTreeMap::new(),
        description: None,
        poster_url: DEFAULT_POSTER_URL.to_string(),
    }
}
