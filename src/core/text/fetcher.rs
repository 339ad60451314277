//! Page fetching.
//!
//! The crawler only depends on the `Fetcher` trait so tests can serve
//! pages from memory. `HttpFetcher` is the network implementation.

use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, LOCATION};
use reqwest::redirect::Policy;
use reqwest::{StatusCode, Url};
use std::time::Duration;

use crate::core::error::{Result, StemdexError};

/// Fetches the HTML body of a page
pub trait Fetcher: Send + Sync {
    /// Return the page HTML, or `None` if the page could not be fetched
    /// as a successful HTML response
    fn fetch(&self, url: &Url) -> Option<String>;
}

/// Blocking HTTP fetcher with a bounded number of attempts
///
/// Every request counts as one attempt, whether it failed at the
/// transport level or answered with a redirect. Redirects are followed
/// manually so they share the same budget.
pub struct HttpFetcher {
    client: Client,
    max_attempts: usize,
}

impl HttpFetcher {
    /// Create a new fetcher
    ///
    /// # Arguments
    ///
    /// * `max_attempts` - Maximum number of requests per fetch
    /// * `timeout` - Per-request timeout
    /// * `user_agent` - Value of the `User-Agent` header
    pub fn new(max_attempts: usize, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| StemdexError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            max_attempts: max_attempts.max(1),
        })
    }

    /// Maximum number of requests per fetch
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    fn is_html(response: &reqwest::blocking::Response) -> bool {
        response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim_start().to_ascii_lowercase().starts_with("text/html"))
            .unwrap_or(false)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> Option<String> {
        let mut current = url.clone();

        for attempt in 1..=self.max_attempts {
            let response = match self.client.get(current.clone()).send() {
                Ok(response) => response,
                Err(e) => {
                    tracing::debug!(
                        "Fetch attempt {}/{} for {} failed: {}",
                        attempt,
                        self.max_attempts,
                        current,
                        e
                    );
                    continue;
                }
            };

            let status = response.status();

            if status.is_redirection() {
                let next = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|location| current.join(location).ok());

                match next {
                    Some(next) => {
                        tracing::debug!("Following redirect {} -> {}", current, next);
                        current = next;
                        continue;
                    }
                    None => {
                        tracing::debug!("Redirect without usable Location from {}", current);
                        return None;
                    }
                }
            }

            if status != StatusCode::OK || !Self::is_html(&response) {
                tracing::debug!("Skipping {} (status {}, not HTML or not OK)", current, status);
                return None;
            }

            return match response.text() {
                Ok(body) => Some(body),
                Err(e) => {
                    tracing::warn!("Failed to read body of {}: {}", current, e);
                    None
                }
            };
        }

        tracing::warn!(
            "Giving up on {} after {} attempts",
            url,
            self.max_attempts
        );
        None
    }
}
