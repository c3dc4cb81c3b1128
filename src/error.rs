//! Error types for octolist
//!
//! Network failures arrive as a raw [`TransportError`] and are classified
//! exactly once, inside the scheduler's dispatch, into an [`ApiError`].

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for octolist operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Classified API failure surfaced to callers of the data-access layer.
///
/// `Clone` because a failed page fetch is replayed to every caller awaiting
/// the same memoized entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("API rate limit exceeded. Please try again later.")]
    RateLimitExceeded,

    #[error("An error occurred. Please try again.")]
    RequestFailed,
}

impl ApiError {
    /// Map a raw transport failure onto the domain error kinds.
    ///
    /// 403 is how the upstream signals an exhausted quota; 429 is its
    /// secondary-limit form. Everything else is a generic failure.
    pub fn classify(err: &TransportError) -> Self {
        match err {
            TransportError::Status { status, .. }
                if *status == StatusCode::FORBIDDEN.as_u16()
                    || *status == StatusCode::TOO_MANY_REQUESTS.as_u16() =>
            {
                ApiError::RateLimitExceeded
            }
            _ => ApiError::RequestFailed,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::classify(&err)
    }
}

/// Unclassified failure of a single HTTP exchange
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            TransportError::Network("Failed to connect to API".to_string())
        } else if err.is_decode() {
            TransportError::InvalidResponse(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
