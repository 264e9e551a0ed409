//! User agent handling for HTTP requests.

/// Desktop Chrome user agent sent when nothing else is configured.
///
/// Both scraped sites and the search engine serve degraded or blocked pages to
/// obvious bots, so the default looks like an ordinary browser.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Real browser user agents for impersonate mode.
pub const IMPERSONATE_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.1 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36 Edg/131.0.0.0",
];

/// How the `User-Agent` header is chosen, parsed from the config value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAgentChoice {
    /// The fixed desktop Chrome string.
    Default,
    /// One of [`IMPERSONATE_USER_AGENTS`], picked once per client.
    Impersonate,
    /// Sent verbatim.
    Custom(String),
}

impl UserAgentChoice {
    pub fn from_config(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Self::Default,
            Some(v) if v.eq_ignore_ascii_case("impersonate") => Self::Impersonate,
            Some(v) => Self::Custom(v.to_string()),
        }
    }

    pub fn header_value(&self) -> String {
        match self {
            Self::Default => USER_AGENT.to_string(),
            Self::Impersonate => random_user_agent().to_string(),
            Self::Custom(ua) => ua.clone(),
        }
    }
}

/// Pick one of the impersonation user agents.
///
/// `RandomState` is seeded per instance, which is all the randomness a
/// header rotation needs.
pub fn random_user_agent() -> &'static str {
    use std::hash::{BuildHasher, Hasher};

    let seed = std::collections::hash_map::RandomState::new()
        .build_hasher()
        .finish();
    IMPERSONATE_USER_AGENTS[(seed % IMPERSONATE_USER_AGENTS.len() as u64) as usize]
}

/// User agent header for a config value (see [`UserAgentChoice`]).
pub fn resolve_user_agent(config: Option<&str>) -> String {
    UserAgentChoice::from_config(config).header_value()
}
