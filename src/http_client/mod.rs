//! Shared HTTP transport with browser-like headers and per-request timeouts.
//!
//! One [`HttpClient`] is built at startup and handed to every component that
//! talks to the network. Clones share the same connection pool; the pool is
//! released by [`HttpClient::shutdown`] once the last handle goes away.
//!
//! Every failure is classified into a [`FetchError`] value. Nothing above this
//! layer has to inspect `reqwest` errors.

mod response;
mod user_agent;

pub use response::{FetchRequest, Fetched, Method};
pub use user_agent::{resolve_user_agent, UserAgentChoice, IMPERSONATE_USER_AGENTS, USER_AGENT};

use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, CONNECTION};
use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Error type for transport operations.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("connection to {url} failed: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}")]
    Status { url: String, status: StatusCode },

    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid JSON from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    fn classify(url: &str, err: reqwest::Error) -> Self {
        let url = url.to_string();
        if err.is_timeout() {
            FetchError::Timeout { url }
        } else if err.is_connect() {
            FetchError::Connect { url, source: err }
        } else if err.is_body() || err.is_decode() {
            FetchError::Body { url, source: err }
        } else {
            FetchError::Request { url, source: err }
        }
    }

    /// HTTP status for non-200 responses.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout { .. })
    }
}

/// Headers sent with every request so the scraped pages render as they would
/// for an ordinary browser session.
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        ),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9,ru;q=0.8"),
    );
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers
}

/// Builder for constructing an [`HttpClient`].
pub struct HttpClientBuilder {
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl HttpClientBuilder {
    /// Set the user agent string.
    /// - `"impersonate"`: Use random real browser user agent
    /// - Any other string: Use as-is
    /// - Not called: Use the default desktop Chrome user agent
    pub fn user_agent(mut self, ua: &str) -> Self {
        self.user_agent = Some(ua.to_string());
        self
    }

    /// Client-wide timeout, applied when a request carries none of its own.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client and its connection pools.
    ///
    /// Two pools share the same settings: one follows redirects, the other
    /// hands 3xx responses back unchanged for reachability checks.
    pub fn build(self) -> Result<HttpClient, reqwest::Error> {
        let user_agent = resolve_user_agent(self.user_agent.as_deref());

        let client = self.client_builder(&user_agent).build()?;
        let direct = self
            .client_builder(&user_agent)
            .redirect(Policy::none())
            .build()?;

        debug!("HTTP transport ready (user agent: {})", user_agent);

        Ok(HttpClient { client, direct })
    }

    fn client_builder(&self, user_agent: &str) -> ClientBuilder {
        let builder = Client::builder()
            .user_agent(user_agent)
            .default_headers(browser_headers())
            .gzip(true)
            .brotli(true);
        match self.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        }
    }
}

/// Process-wide HTTP transport.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    direct: Client,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder {
            user_agent: None,
            timeout: None,
        }
    }

    /// Issue a request. Only HTTP 200 counts as success; any other status is
    /// reported as [`FetchError::Status`] and the body is discarded.
    pub async fn fetch(&self, request: FetchRequest) -> Result<Fetched, FetchError> {
        let client = if request.follow_redirects {
            &self.client
        } else {
            &self.direct
        };
        let mut builder = match request.method {
            Method::Get => client.get(&request.url),
            Method::Head => client.head(&request.url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let start = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|e| FetchError::classify(&request.url, e))?;
        let status = response.status();

        debug!(
            "{:?} {} -> {} in {:?}",
            request.method,
            request.url,
            status,
            start.elapsed()
        );

        if status != StatusCode::OK {
            return Err(FetchError::Status {
                url: request.url,
                status,
            });
        }

        let body = match request.method {
            Method::Head => None,
            Method::Get => Some(
                response
                    .text()
                    .await
                    .map_err(|e| FetchError::classify(&request.url, e))?,
            ),
        };

        Ok(Fetched { status, body })
    }

    /// GET a page and return its text.
    pub async fn get_text(&self, request: FetchRequest) -> Result<String, FetchError> {
        let fetched = self.fetch(request).await?;
        Ok(fetched.body.unwrap_or_default())
    }

    /// GET a JSON document and decode it.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        request: FetchRequest,
    ) -> Result<T, FetchError> {
        let url = request.url.clone();
        let text = self.get_text(request).await?;
        serde_json::from_str(&text).map_err(|source| FetchError::Json { url, source })
    }

    /// HEAD the URL; true only when it answers 200 within `timeout`.
    /// Redirects are not followed.
    pub async fn is_reachable(&self, url: &str, timeout: Duration) -> bool {
        let request = FetchRequest::head(url).timeout(timeout).no_redirects();
        match self.fetch(request).await {
            Ok(_) => true,
            Err(e) => {
                debug!("{} not reachable: {}", url, e);
                false
            }
        }
    }

    /// Release this handle on the shared connection pool.
    ///
    /// Called once at shutdown by whoever built the client. Idle connections
    /// are closed when the last clone is dropped.
    pub fn shutdown(self) {
        debug!("HTTP transport shutting down");
        drop(self.client);
        drop(self.direct);
    }
}

/// Log a transport failure that is about to be collapsed into "nothing found".
pub(crate) fn log_fetch_error(context: &str, err: &FetchError) {
    match err {
        FetchError::Timeout { .. } => debug!("{}: {}", context, err),
        _ => warn!("{}: {}", context, err),
    }
}
