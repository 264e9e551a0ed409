//! Search engine result page extraction.

use scraper::Html;
use tracing::debug;

use super::{selector, ExtractError};
use crate::config::LordFilmConfig;
use crate::models::{LinkCandidate, MatchSignal};

/// Organic results are anchors carrying this `jsname`. Internal to the search
/// engine's markup and liable to change.
pub const ORGANIC_RESULT_SELECTOR: &str = r#"a[jsname="UWckNb"]"#;

/// Which organic results are worth verifying.
#[derive(Debug, Clone)]
pub struct SearchResultFilter {
    /// Substring the link must contain.
    pub marker: String,
    /// Prefix the link must start with.
    pub scheme_prefix: String,
    /// Number of organic results considered, counted before filtering.
    pub max_results: usize,
}

impl From<&LordFilmConfig> for SearchResultFilter {
    fn from(config: &LordFilmConfig) -> Self {
        Self {
            marker: config.marker.clone(),
            scheme_prefix: config.scheme_prefix.clone(),
            max_results: config.max_results,
        }
    }
}

impl SearchResultFilter {
    fn accepts(&self, href: &str) -> bool {
        href.contains(&self.marker) && href.starts_with(&self.scheme_prefix)
    }
}

/// Pull candidate links out of a search result page, in page order.
pub fn search_result_candidates(
    html: &str,
    filter: &SearchResultFilter,
) -> Result<Vec<LinkCandidate>, ExtractError> {
    let document = Html::parse_document(html);
    let organic = selector(ORGANIC_RESULT_SELECTOR)?;

    let candidates: Vec<LinkCandidate> = document
        .select(&organic)
        .take(filter.max_results)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| filter.accepts(href))
        .map(|href| LinkCandidate::new(href, MatchSignal::SiteMarker(filter.marker.clone())))
        .collect();

    debug!(
        "Search results yielded {} candidate(s) for marker '{}'",
        candidates.len(),
        filter.marker
    );
    Ok(candidates)
}
