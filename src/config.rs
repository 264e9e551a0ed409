//! Configuration management for kinolink using the prefer crate.
//!
//! Resolution order: explicit `--config` path, then a file discovered by
//! `prefer` in the standard locations, then built-in defaults. Environment
//! variables are applied last and win over anything read from a file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::DEFAULT_POSTER_URL;

/// Name used for config file discovery (`kinolink.toml`, `kinolink.yaml`, ...).
pub const CONFIG_NAME: &str = "kinolink";

/// Environment variable holding the movie-data API key.
pub const ENV_API_TOKEN: &str = "TOKEN_KINOPOISK";
/// Environment variable holding the Zona base URL.
pub const ENV_ZONA_URL: &str = "ZONA_URL";
/// Environment variable overriding the user agent.
pub const ENV_USER_AGENT: &str = "KINOLINK_USER_AGENT";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("no API token configured (set {ENV_API_TOKEN} or `api_token`)")]
    MissingToken,

    #[error("invalid URL for `{key}`: {value}")]
    InvalidUrl { key: &'static str, value: String },
}

/// Settings for the search-engine-backed LordFilm lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LordFilmConfig {
    /// Substring a result link must contain.
    pub marker: String,
    /// Prefix a result link must start with.
    pub scheme_prefix: String,
    /// How many organic results to look at before filtering.
    pub max_results: usize,
}

impl Default for LordFilmConfig {
    fn default() -> Self {
        Self {
            marker: "lordfilm".to_string(),
            scheme_prefix: "https:/".to_string(),
            max_results: 3,
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the movie-data API.
    pub api_url: String,
    /// API key sent as `X-API-KEY`.
    pub api_token: String,
    /// Search engine result page URL.
    pub search_url: String,
    /// Zona base URL. Zona lookups are skipped when unset.
    pub zona_url: Option<String>,
    /// User agent override (`"impersonate"` picks a random real browser).
    pub user_agent: Option<String>,
    /// Timeout for movie-data API calls, in seconds.
    pub api_timeout_secs: u64,
    /// Timeout for scraped page fetches, in seconds.
    pub page_timeout_secs: u64,
    /// Timeout for each link verification HEAD, in milliseconds.
    pub verify_timeout_ms: u64,
    /// Cap on concurrent verification checks (0 = one per candidate).
    pub verify_concurrency: usize,
    /// Poster used when the API has none.
    pub poster_placeholder: String,
    pub lordfilm: LordFilmConfig,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "https://api.kinopoisk.dev/v1.4".to_string(),
            api_token: String::new(),
            search_url: "https://www.google.com/search".to_string(),
            zona_url: None,
            user_agent: None,
            api_timeout_secs: 30,
            page_timeout_secs: 5,
            verify_timeout_ms: 1000,
            verify_concurrency: 0,
            poster_placeholder: DEFAULT_POSTER_URL.to_string(),
            lordfilm: LordFilmConfig::default(),
            source_path: None,
        }
    }
}

/// Options controlling where settings come from.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file; skips discovery.
    pub config_path: Option<PathBuf>,
}

impl Settings {
    /// Load settings from the configured sources and apply env overrides.
    pub async fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut settings = match options.config_path {
            Some(path) => Self::load_from_path(&path).await?,
            None => Self::discover().await?,
        };
        settings.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Use prefer for file discovery, then parse with serde.
    async fn discover() -> Result<Self, ConfigError> {
        match prefer::load(CONFIG_NAME).await {
            Ok(pref_config) => match pref_config.source_path() {
                Some(path) => Self::load_from_path(path).await,
                None => Ok(Self::default()),
            },
            Err(_) => {
                tracing::debug!("No {} config file found, using defaults", CONFIG_NAME);
                Ok(Self::default())
            }
        }
    }

    /// Load settings from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let parse_error = |message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        };

        let mut settings: Settings = match ext {
            "toml" => toml::from_str(&contents).map_err(|e| parse_error(e.to_string()))?,
            "yaml" | "yml" => {
                serde_yaml::from_str(&contents).map_err(|e| parse_error(e.to_string()))?
            }
            _ => serde_json::from_str(&contents).map_err(|e| parse_error(e.to_string()))?,
        };

        tracing::debug!("Loaded settings from {}", path.display());
        settings.source_path = Some(path.to_path_buf());
        Ok(settings)
    }

    /// Apply environment overrides. Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = lookup(ENV_API_TOKEN) {
            self.api_token = token;
        }
        if let Some(zona) = lookup(ENV_ZONA_URL) {
            tracing::debug!("Using {} from environment: {}", ENV_ZONA_URL, zona);
            self.zona_url = Some(zona);
        }
        if let Some(ua) = lookup(ENV_USER_AGENT) {
            self.user_agent = Some(ua);
        }
    }

    /// Check that the settings are usable before any network call is made.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        check_url("api_url", &self.api_url)?;
        check_url("search_url", &self.search_url)?;
        if let Some(ref zona) = self.zona_url {
            check_url("zona_url", zona)?;
        }
        Ok(())
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    pub fn verify_timeout(&self) -> Duration {
        Duration::from_millis(self.verify_timeout_ms)
    }

    /// Verification concurrency cap, `None` meaning unbounded.
    pub fn verify_limit(&self) -> Option<usize> {
        (self.verify_concurrency > 0).then_some(self.verify_concurrency)
    }
}

fn check_url(key: &'static str, value: &str) -> Result<(), ConfigError> {
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|_| ConfigError::InvalidUrl {
            key,
            value: value.to_string(),
        })
}
