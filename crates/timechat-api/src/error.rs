use reqwest::StatusCode;
use thiserror::Error;

/// Errors that abort a streaming turn.
///
/// Only stream-level failures surface here. Malformed individual events,
/// unparseable tool-call arguments, and reference-upload failures are
/// recovered locally and reflected as degraded output instead.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The inference endpoint answered 429.
    #[error("rate limit exceeded")]
    RateLimited,

    /// Any other non-success HTTP status from the inference endpoint.
    #[error("request failed with status {0}")]
    Status(StatusCode),

    /// Network-level failure while sending the request or reading the body.
    #[error("streaming failed: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    /// True when the UI should show a rate-limit specific message.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, ApiError::RateLimited)
    }
}
