//! Persistence gateway error types.

/// Specific persistence failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PersistenceErrorKind {
    /// Inserting rows failed
    #[display("Insert into '{}' failed: {}", table, message)]
    Insert {
        /// Target table
        table: String,
        /// Backend message
        message: String,
    },
    /// Selecting rows failed
    #[display("Select from '{}' failed: {}", table, message)]
    Select {
        /// Target table
        table: String,
        /// Backend message
        message: String,
    },
    /// Updating rows failed
    #[display("Update of '{}' failed: {}", table, message)]
    Update {
        /// Target table
        table: String,
        /// Backend message
        message: String,
    },
    /// Deleting rows failed
    #[display("Delete from '{}' failed: {}", table, message)]
    Delete {
        /// Target table
        table: String,
        /// Backend message
        message: String,
    },
    /// No row matched the requested id
    #[display("No row in '{}' with id {}", table, id)]
    NotFound {
        /// Target table
        table: String,
        /// Requested id
        id: String,
    },
    /// A row could not be converted to or from its typed form
    #[display("Row conversion failed for '{}': {}", table, message)]
    RowConversion {
        /// Target table
        table: String,
        /// Conversion message
        message: String,
    },
    /// The backend rejected the session or credentials
    #[display("Unauthorized: {}", _0)]
    Unauthorized(String),
}

/// Error raised when a database operation fails.
///
/// # Examples
///
/// ```
/// use storie_error::{PersistenceError, PersistenceErrorKind};
///
/// let err = PersistenceError::new(PersistenceErrorKind::NotFound {
///     table: "storybooks".to_string(),
///     id: "42".to_string(),
/// });
/// assert!(format!("{}", err).contains("storybooks"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Persistence Error: {} at line {} in {}", kind, line, file)]
pub struct PersistenceError {
    /// The specific error condition
    pub kind: PersistenceErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PersistenceError {
    /// Create a new PersistenceError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PersistenceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
