//! Link candidates extracted from scraped markup.

/// Why a candidate was picked out of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchSignal {
    /// The link contains the expected site marker.
    SiteMarker(String),
    /// The result item's year equals the film's year.
    YearMatch(i32),
}

/// A URL pulled from markup that has not been confirmed reachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCandidate {
    pub url: String,
    pub signal: MatchSignal,
}

impl LinkCandidate {
    pub fn new(url: impl Into<String>, signal: MatchSignal) -> Self {
        Self {
            url: url.into(),
            signal,
        }
    }
}
