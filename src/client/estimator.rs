//! Total item count estimation from pagination headers
//!
//! The estimate is `last_page × items_in_probe`. Probing with `per_page=1`
//! makes the last page number equal the item count; a partially filled last
//! page would overcount with larger probe sizes. Without a `rel="last"` link
//! there is only one page, so the probe body is the whole collection.

use std::sync::Arc;

use log::debug;

use super::pagination::last_page;
use super::{GithubTransport, RawResponse};

/// Derives approximate totals with a single probe request
#[derive(Clone)]
pub struct TotalCountEstimator {
    transport: Arc<dyn GithubTransport>,
}

impl TotalCountEstimator {
    pub fn new(transport: Arc<dyn GithubTransport>) -> Self {
        Self { transport }
    }

    /// Estimate the total behind `probe_url`.
    ///
    /// Never fails: transport errors and absent bodies yield 0.
    pub async fn estimate(&self, probe_url: &str) -> usize {
        match self.transport.get(probe_url).await {
            Ok(response) => {
                let total = estimate_from_response(&response);
                debug!("Estimated {} items from {}", total, probe_url);
                total
            }
            Err(err) => {
                debug!("Count probe {} failed ({}); assuming 0", probe_url, err);
                0
            }
        }
    }
}

/// Apply the estimation rule to an already received probe response.
pub fn estimate_from_response(response: &RawResponse) -> usize {
    let Some(len) = response.body_len() else {
        return 0;
    };

    match response.link.as_deref().and_then(last_page) {
        // The page number comes straight from an upstream header.
        Some(last) => last.saturating_mul(len),
        None => len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockTransport;
    use crate::error::TransportError;
    use serde_json::json;

    const PROBE: &str = "https://api.test/users/octocat/repos?per_page=1";

    fn last_link(page: usize) -> String {
        format!(
            "<https://api.test/user/1/repos?per_page=1&page=2>; rel=\"next\", \
             <https://api.test/user/1/repos?per_page=1&page={}>; rel=\"last\"",
            page
        )
    }

    fn setup(mock: MockTransport) -> (TotalCountEstimator, Arc<MockTransport>) {
        let mock = Arc::new(mock);
        (TotalCountEstimator::new(mock.clone()), mock)
    }

    #[tokio::test]
    async fn test_estimate_with_last_link() {
        let (estimator, mock) =
            setup(MockTransport::new().with_link(PROBE, json!([{ "id": 1 }]), &last_link(25)));

        assert_eq!(estimator.estimate(PROBE).await, 25);
        assert_eq!(mock.count(PROBE), 1);
    }

    #[tokio::test]
    async fn test_estimate_multiplies_by_body_length() {
        let (estimator, _) = setup(MockTransport::new().with_link(
            PROBE,
            json!([{ "id": 1 }, { "id": 2 }]),
            &last_link(5),
        ));

        assert_eq!(estimator.estimate(PROBE).await, 10);
    }

    #[tokio::test]
    async fn test_estimate_without_link_uses_body_length() {
        let body = json!([{ "id": 1 }, { "id": 2 }, { "id": 3 }, { "id": 4 }, { "id": 5 }]);
        let (estimator, _) = setup(MockTransport::new().with_json(PROBE, body));

        assert_eq!(estimator.estimate(PROBE).await, 5);
    }

    #[tokio::test]
    async fn test_estimate_ignores_link_without_last() {
        let next_only = "<https://api.test/user/1/repos?per_page=1&page=2>; rel=\"next\"";
        let (estimator, _) =
            setup(MockTransport::new().with_link(PROBE, json!([{ "id": 1 }]), next_only));

        assert_eq!(estimator.estimate(PROBE).await, 1);
    }

    #[tokio::test]
    async fn test_estimate_is_zero_on_error() {
        let (estimator, _) = setup(MockTransport::new().with_error(
            PROBE,
            TransportError::Network("Connection refused".to_string()),
        ));

        assert_eq!(estimator.estimate(PROBE).await, 0);
    }

    #[tokio::test]
    async fn test_estimate_is_zero_on_error_status() {
        let (estimator, _) = setup(MockTransport::new().with_status(PROBE, 403));

        assert_eq!(estimator.estimate(PROBE).await, 0);
    }

    #[tokio::test]
    async fn test_estimate_is_zero_without_body() {
        let (estimator, _) = setup(MockTransport::new().with_empty(PROBE));

        assert_eq!(estimator.estimate(PROBE).await, 0);
    }

    #[test]
    fn test_estimate_from_response_with_link_but_no_body() {
        let response = RawResponse {
            link: Some(last_link(7)),
            body: None,
        };
        assert_eq!(estimate_from_response(&response), 0);
    }

    #[test]
    fn test_estimate_from_response_saturates_huge_last_page() {
        let response = RawResponse {
            link: Some(last_link(usize::MAX)),
            body: Some(json!([{ "id": 1 }, { "id": 2 }])),
        };
        assert_eq!(estimate_from_response(&response), usize::MAX);
    }
}
