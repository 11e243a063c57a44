//! Top-level error wrapper types.

use crate::{
    BuilderError, ConfigError, HttpError, InvalidResponseError, JsonError, ParseError,
    PersistenceError, StorageError, UpstreamError,
};

/// Every error condition the storybook generator can report.
///
/// # Examples
///
/// ```
/// use storie_error::{StorieError, StorieErrorKind, UpstreamError};
///
/// let err: StorieError = UpstreamError::new("openai", 500, "boom").into();
/// assert!(matches!(err.kind(), StorieErrorKind::Upstream(_)));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StorieErrorKind {
    /// Transport failure
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Object storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Non-2xx response from an external API
    #[from(UpstreamError)]
    Upstream(UpstreamError),
    /// Malformed 2xx response from an external API
    #[from(InvalidResponseError)]
    InvalidResponse(InvalidResponseError),
    /// Story structure extraction failed
    #[from(ParseError)]
    Parse(ParseError),
    /// Database operation failed
    #[from(PersistenceError)]
    Persistence(PersistenceError),
}

/// Storie error with kind discrimination.
///
/// # Examples
///
/// ```
/// use storie_error::{ConfigError, StorieResult};
///
/// fn might_fail() -> StorieResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storie Error: {}", _0)]
pub struct StorieError(Box<StorieErrorKind>);

impl StorieError {
    /// Create a new error from a kind.
    pub fn new(kind: StorieErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StorieErrorKind {
        &self.0
    }

    /// Consume the wrapper and return the kind.
    pub fn into_kind(self) -> StorieErrorKind {
        *self.0
    }
}

// Generic From implementation for any type that converts to StorieErrorKind
impl<T> From<T> for StorieError
where
    T: Into<StorieErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Storie operations.
pub type StorieResult<T> = std::result::Result<T, StorieError>;
