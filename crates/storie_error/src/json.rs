//! JSON conversion errors.

/// Direction of a failed JSON conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum JsonDirection {
    /// Rust value to JSON
    #[display("encode")]
    Encode,
    /// JSON to Rust value
    #[display("decode")]
    Decode,
}

/// A value could not be converted to or from JSON.
///
/// # Examples
///
/// ```
/// use storie_error::{JsonDirection, JsonError};
///
/// let err = JsonError::encode("chat request", "key must be a string");
/// assert_eq!(err.direction, JsonDirection::Encode);
/// assert!(err.to_string().starts_with("Failed to encode chat request"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Failed to {} {}: {} at line {} in {}", direction, subject, message, line, file)]
pub struct JsonError {
    /// Encode or decode
    pub direction: JsonDirection,
    /// What was being converted (e.g. "row", "chat request")
    pub subject: String,
    /// Message from serde
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    #[track_caller]
    fn located(direction: JsonDirection, subject: String, message: String) -> Self {
        let location = std::panic::Location::caller();
        Self {
            direction,
            subject,
            message,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Serializing `subject` failed.
    #[track_caller]
    pub fn encode(subject: impl Into<String>, message: impl ToString) -> Self {
        Self::located(JsonDirection::Encode, subject.into(), message.to_string())
    }

    /// Deserializing `subject` failed.
    #[track_caller]
    pub fn decode(subject: impl Into<String>, message: impl ToString) -> Self {
        Self::located(JsonDirection::Decode, subject.into(), message.to_string())
    }
}
