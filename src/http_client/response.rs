//! Request descriptions and fetch results.

use std::time::Duration;

use reqwest::StatusCode;

/// HTTP method supported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
}

/// A single request to issue through [`super::HttpClient::fetch`].
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub url: String,
    pub method: Method,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    /// Per-request timeout. `None` leaves the request unbounded.
    pub timeout: Option<Duration>,
    /// Whether 3xx responses are followed. When off, a redirect is returned
    /// as-is and fails the 200 check.
    pub follow_redirects: bool,
}

impl FetchRequest {
    /// Describe a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url, Method::Get)
    }

    /// Describe a HEAD request.
    pub fn head(url: impl Into<String>) -> Self {
        Self::new(url, Method::Head)
    }

    fn new(url: impl Into<String>, method: Method) -> Self {
        Self {
            url: url.into(),
            method,
            query: Vec::new(),
            headers: Vec::new(),
            timeout: None,
            follow_redirects: true,
        }
    }

    /// Append a query parameter. Repeating a key sends it multiple times.
    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// Add a header on top of the browser defaults.
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn no_redirects(mut self) -> Self {
        self.follow_redirects = false;
        self
    }
}

/// Successful (HTTP 200) response.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub status: StatusCode,
    /// Response body. Always `None` for HEAD.
    pub body: Option<String>,
}

impl Fetched {
    /// Body text, treating an empty body as absent.
    pub fn text(&self) -> Option<&str> {
        self.body.as_deref().filter(|b| !b.trim().is_empty())
    }
}
