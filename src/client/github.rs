//! reqwest-backed transport for the GitHub REST API

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, LINK, USER_AGENT};
use reqwest::{Client as HttpClient, StatusCode};

use super::{GithubTransport, RawResponse};
use crate::error::{ConfigError, Result, TransportError};

const GITHUB_API_VERSION: &str = "2022-11-28";

/// HTTP transport carrying the configured token on every request
pub struct HttpTransport {
    http: HttpClient,
}

impl HttpTransport {
    /// Create a transport; without a token requests are sent anonymously.
    pub fn new(token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("token {}", token)).map_err(|e| {
                ConfigError::Invalid(format!("token is not a valid header: {}", e))
            })?;
            headers.insert(AUTHORIZATION, value);
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("octolist/", env!("CARGO_PKG_VERSION"))),
        );

        let http = HttpClient::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(TransportError::from)?;

        Ok(Self { http })
    }
}

#[async_trait]
impl GithubTransport for HttpTransport {
    async fn get(&self, url: &str) -> std::result::Result<RawResponse, TransportError> {
        debug!("GET {}", url);
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .ok()
                .filter(|body| !body.trim().is_empty())
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unexpected status")
                        .to_string()
                });
            debug!("GET {} failed with {}", url, status);
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let link = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if status == StatusCode::NO_CONTENT {
            return Ok(RawResponse { link, body: None });
        }

        let text = response.text().await?;
        let body = if text.trim().is_empty() {
            None
        } else {
            match serde_json::from_str(&text) {
                Ok(serde_json::Value::Null) => None,
                Ok(value) => Some(value),
                Err(e) => {
                    return Err(TransportError::InvalidResponse(format!(
                        "Failed to parse response: {}",
                        e
                    )));
                }
            }
        };

        Ok(RawResponse { link, body })
    }
}
