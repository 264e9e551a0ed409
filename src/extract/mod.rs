//! HTML to link-candidate extraction for the scraped sources.
//!
//! Everything that knows about third-party markup lives here. The pages are
//! unversioned and drift without notice, so extraction is best-effort: a
//! malformed item is skipped, and a page without any recognizable structure
//! simply yields no candidates.

mod search_results;
mod site_results;

pub use search_results::{search_result_candidates, SearchResultFilter, ORGANIC_RESULT_SELECTOR};
pub use site_results::{
    year_matched_candidates, RESULT_ITEM_SELECTOR, RESULT_LINK_SELECTOR, RESULT_YEAR_SELECTOR,
};

use scraper::Selector;

/// Error type for extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid selector `{selector}`: {message}")]
    Selector {
        selector: &'static str,
        message: String,
    },
}

fn selector(css: &'static str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        selector: css,
        message: format!("{:?}", e),
    })
}

/// Join a possibly relative link onto a site's base URL.
///
/// Absolute links are returned unchanged and protocol-relative ones get
/// `https:`. Relative links are appended to the base with exactly one `/`
/// between them, keeping any path the base already has.
pub fn join_url(base_url: &str, href: &str) -> String {
    let href = href.trim();
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    if href.starts_with("//") {
        return format!("https:{}", href);
    }

    let base = base_url.trim_end_matches('/');
    if href.starts_with('/') {
        format!("{}{}", base, href)
    } else {
        format!("{}/{}", base, href)
    }
}
