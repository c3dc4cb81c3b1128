//! Mock GitHub transport for testing
//!
//! Serves canned responses keyed by absolute URL and records every request,
//! so tests can assert exactly which network calls the data-access layer made.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use async_trait::async_trait;
use serde_json::Value;

use super::{GithubTransport, RawResponse};
use crate::error::TransportError;

/// Mock transport for testing.
///
/// # Example
/// ```ignore
/// let mock = MockTransport::new()
///     .with_json("https://api.test/users/octocat", json!({ "login": "octocat" }));
///
/// let response = mock.get("https://api.test/users/octocat").await?;
/// assert_eq!(mock.count("https://api.test/users/octocat"), 1);
/// ```
#[derive(Default)]
pub struct MockTransport {
    /// Responses served for each URL
    routes: Arc<Mutex<HashMap<String, RawResponse>>>,
    /// Errors to return per URL, consumed one per request before the route
    failures: Arc<Mutex<HashMap<String, VecDeque<TransportError>>>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// A captured request for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// Absolute URL requested
    pub url: String,
    /// When the request reached the transport
    pub at: Instant,
}

impl MockTransport {
    /// Create a new mock with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    pub fn with_json(self, url: &str, body: Value) -> Self {
        self.with_response(
            url,
            RawResponse {
                link: None,
                body: Some(body),
            },
        )
    }

    /// Serve `body` with a `Link` header for `url`.
    pub fn with_link(self, url: &str, body: Value, link: &str) -> Self {
        self.with_response(
            url,
            RawResponse {
                link: Some(link.to_string()),
                body: Some(body),
            },
        )
    }

    /// Serve an empty body for `url`.
    pub fn with_empty(self, url: &str) -> Self {
        self.with_response(url, RawResponse::default())
    }

    /// Serve an arbitrary response for `url`.
    pub fn with_response(self, url: &str, response: RawResponse) -> Self {
        lock(&self.routes).insert(url.to_string(), response);
        self
    }

    /// Fail the next request to `url` with `error`. Queued errors are consumed in order.
    pub fn with_error(self, url: &str, error: TransportError) -> Self {
        lock(&self.failures)
            .entry(url.to_string())
            .or_default()
            .push_back(error);
        self
    }

    /// Fail the next request to `url` with an HTTP status.
    pub fn with_status(self, url: &str, status: u16) -> Self {
        self.with_error(
            url,
            TransportError::Status {
                status,
                message: format!("mock status {}", status),
            },
        )
    }

    /// All captured requests, in arrival order.
    pub fn captured_requests(&self) -> Vec<CapturedRequest> {
        lock(&self.captured_requests).clone()
    }

    /// URLs requested, in arrival order.
    pub fn requested_urls(&self) -> Vec<String> {
        self.captured_requests()
            .into_iter()
            .map(|req| req.url)
            .collect()
    }

    /// Number of requests made to `url`.
    pub fn count(&self, url: &str) -> usize {
        lock(&self.captured_requests)
            .iter()
            .filter(|req| req.url == url)
            .count()
    }

    /// Total number of requests made.
    pub fn total_calls(&self) -> usize {
        lock(&self.captured_requests).len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl GithubTransport for MockTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        lock(&self.captured_requests).push(CapturedRequest {
            url: url.to_string(),
            at: Instant::now(),
        });

        if let Some(error) = lock(&self.failures)
            .get_mut(url)
            .and_then(VecDeque::pop_front)
        {
            return Err(error);
        }

        lock(&self.routes)
            .get(url)
            .cloned()
            .ok_or_else(|| TransportError::Status {
                status: 404,
                message: format!("no mock route for {}", url),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const URL: &str = "https://api.test/users/octocat";

    #[tokio::test]
    async fn test_mock_serves_route() {
        let mock = MockTransport::new().with_json(URL, json!({ "login": "octocat" }));

        let response = mock.get(URL).await.unwrap();
        assert_eq!(response.body, Some(json!({ "login": "octocat" })));
        assert_eq!(mock.count(URL), 1);
    }

    #[tokio::test]
    async fn test_mock_unknown_route_is_not_found() {
        let mock = MockTransport::new();

        let err = mock.get(URL).await.unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 404, .. }));
        assert_eq!(mock.total_calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_error_consumed_once() {
        let mock = MockTransport::new()
            .with_json(URL, json!({ "login": "octocat" }))
            .with_status(URL, 500);

        assert!(mock.get(URL).await.is_err());
        assert!(mock.get(URL).await.is_ok());
        assert_eq!(mock.count(URL), 2);
    }

    #[tokio::test]
    async fn test_mock_captures_in_order() {
        let mock = MockTransport::new()
            .with_empty("https://api.test/a")
            .with_empty("https://api.test/b");

        mock.get("https://api.test/b").await.unwrap();
        mock.get("https://api.test/a").await.unwrap();

        assert_eq!(
            mock.requested_urls(),
            vec!["https://api.test/b", "https://api.test/a"]
        );
    }
}
