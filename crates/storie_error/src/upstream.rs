//! Errors returned by external generative APIs.

use crate::RetryableError;

/// A non-2xx response from an external API (text completion, image generation,
/// hosted backend).
///
/// # Examples
///
/// ```
/// use storie_error::{RetryableError, UpstreamError};
///
/// let err = UpstreamError::new("wavespeed", 429, "Too many requests");
/// assert!(err.is_rate_limited());
/// assert!(err.is_retryable());
///
/// let err = UpstreamError::new("wavespeed", 500, "Internal error");
/// assert!(!err.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display(
    "Upstream Error: {} returned HTTP {}: {} at line {} in {}",
    service,
    status,
    message,
    line,
    file
)]
pub struct UpstreamError {
    /// Name of the external service (e.g. "openai", "wavespeed")
    pub service: String,
    /// HTTP status code
    pub status: u16,
    /// Response body or error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl UpstreamError {
    /// Create a new UpstreamError at the current location.
    #[track_caller]
    pub fn new(service: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            service: service.into(),
            status,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether the upstream rejected the request for rate limiting (HTTP 429).
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }
}

impl RetryableError for UpstreamError {
    fn is_retryable(&self) -> bool {
        self.is_rate_limited()
    }
}

/// A 2xx response whose body is missing expected fields or is malformed.
///
/// # Examples
///
/// ```
/// use storie_error::InvalidResponseError;
///
/// let err = InvalidResponseError::new("wavespeed", "outputs is not an array");
/// assert!(format!("{}", err).contains("outputs"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Invalid Response: {} sent {} at line {} in {}", service, message, line, file)]
pub struct InvalidResponseError {
    /// Name of the external service
    pub service: String,
    /// What was wrong with the response
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl InvalidResponseError {
    /// Create a new InvalidResponseError at the current location.
    #[track_caller]
    pub fn new(service: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            service: service.into(),
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
