//! GitHub data-access layer
//!
//! The [`GithubService`] owns the response cache and the request scheduler and
//! answers the two questions the presentation layer asks: "who is this user"
//! and "what is on page P of their repositories".

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::{Result, TransportError};
use models::{PageResult, ProfileSummary};

pub mod estimator;
pub mod github;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;
pub mod rate_limit;
pub mod service;

pub use github::HttpTransport;
pub use service::{GithubService, ServiceSettings};

/// Upstream API root used when no host is configured
pub const DEFAULT_API_HOST: &str = "https://api.github.com";

/// Successful response of a single GET
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    /// Raw `Link` pagination header, if the server sent one
    pub link: Option<String>,

    /// Decoded JSON body; `None` when the body was empty or `null`
    pub body: Option<serde_json::Value>,
}

impl RawResponse {
    /// Number of elements when the body is a JSON array.
    pub fn body_len(&self) -> Option<usize> {
        match &self.body {
            Some(serde_json::Value::Array(items)) => Some(items.len()),
            _ => None,
        }
    }

    /// Deserialize the body, keeping an absent body as `None`.
    pub fn json<T: DeserializeOwned>(self) -> std::result::Result<Option<T>, TransportError> {
        self.body
            .map(|value| {
                serde_json::from_value(value).map_err(|e| {
                    TransportError::InvalidResponse(format!("Failed to parse response: {}", e))
                })
            })
            .transpose()
    }
}

/// A single authenticated GET against the upstream API.
///
/// Non-2xx statuses are reported as [`TransportError::Status`].
#[async_trait]
pub trait GithubTransport: Send + Sync {
    async fn get(&self, url: &str) -> std::result::Result<RawResponse, TransportError>;
}

/// Read-only operations exposed to the presentation layer
#[async_trait]
pub trait GithubData: Send + Sync {
    /// Fetch one page of a user's repositories together with the estimated total.
    ///
    /// A blank username resolves to an empty page without touching the network.
    async fn get_repositories(
        &self,
        username: &str,
        page: usize,
        page_size: usize,
    ) -> Result<PageResult>;

    /// Fetch the profile summary for a user.
    async fn get_user_details(&self, username: &str) -> Result<ProfileSummary>;
}
