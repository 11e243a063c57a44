//! Retry classification.

use crate::{HttpError, StorieError, StorieErrorKind};

/// Trait for errors that support retry logic.
///
/// The image client consults this to decide between a transient retry and an
/// immediate failure.
///
/// # Examples
///
/// ```
/// use storie_error::{HttpError, RetryableError, UpstreamError};
///
/// assert!(UpstreamError::new("wavespeed", 429, "slow down").is_retryable());
/// assert!(!UpstreamError::new("wavespeed", 401, "bad key").is_retryable());
/// assert!(HttpError::new("connection reset").is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for HttpError {
    fn is_retryable(&self) -> bool {
        true
    }
}

impl RetryableError for StorieError {
    fn is_retryable(&self) -> bool {
        match self.kind() {
            StorieErrorKind::Upstream(e) => e.is_retryable(),
            StorieErrorKind::Http(e) => e.is_retryable(),
            _ => false,
        }
    }
}
