//! Reachability checks for candidate links.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use crate::http_client::HttpClient;

/// Picks the highest-priority candidate that answers a HEAD with 200.
#[derive(Clone)]
pub struct LinkVerifier {
    client: HttpClient,
    timeout: Duration,
    max_concurrent: Option<usize>,
}

impl LinkVerifier {
    pub fn new(client: HttpClient, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            max_concurrent: None,
        }
    }

    /// Cap the number of checks in flight. Without a cap every candidate is
    /// checked at once.
    pub fn with_max_concurrent(mut self, limit: Option<usize>) -> Self {
        self.max_concurrent = limit.filter(|n| *n > 0);
        self
    }

    /// Return the earliest URL in `urls` that is reachable.
    ///
    /// Checks run concurrently, each under its own timeout, but the winner is
    /// chosen by position in `urls`, not by which check finished first. A
    /// check that times out counts as unreachable.
    pub async fn first_reachable(&self, urls: &[String]) -> Option<String> {
        if urls.is_empty() {
            return None;
        }

        let limit = self.max_concurrent.unwrap_or(urls.len());
        // `buffered` yields results in input order regardless of completion order.
        let checks: Vec<_> = urls
            .iter()
            .map(|url| self.client.is_reachable(url, self.timeout))
            .collect();
        let results: Vec<bool> = stream::iter(checks)
            .buffered(limit)
            .collect()
            .await;

        let winner = urls
            .iter()
            .zip(results)
            .find_map(|(url, reachable)| reachable.then(|| url.clone()));

        match &winner {
            Some(url) => info!("Verified link {}", url),
            None => debug!("None of {} candidate(s) reachable", urls.len()),
        }
        winner
    }
}
