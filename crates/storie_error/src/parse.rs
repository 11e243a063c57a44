//! Story structure parsing errors.

/// Specific reasons a story structure could not be extracted from a completion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ParseErrorKind {
    /// The completion text contains no JSON object
    #[display("No JSON object found in completion (length: {})", _0)]
    NoJson(usize),
    /// A JSON object was found but does not deserialize into a story structure
    #[display("Malformed story JSON: {}", _0)]
    Malformed(String),
    /// The story title is empty or whitespace
    #[display("Story title is blank")]
    BlankTitle,
    /// The structure does not carry exactly four acts
    #[display("Expected 4 acts, found {}", _0)]
    ActCount(usize),
    /// An act is missing its scene description or page text
    #[display("Act {} is incomplete: {}", act, field)]
    IncompleteAct {
        /// One-based act position
        act: usize,
        /// Name of the empty field
        field: &'static str,
    },
}

/// Error raised when the structure generator's JSON extraction fails.
///
/// # Examples
///
/// ```
/// use storie_error::{ParseError, ParseErrorKind};
///
/// let err = ParseError::new(ParseErrorKind::ActCount(3));
/// assert!(format!("{}", err).contains("Expected 4 acts"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Parse Error: {} at line {} in {}", kind, line, file)]
pub struct ParseError {
    /// The specific error condition
    pub kind: ParseErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ParseError {
    /// Create a new ParseError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ParseErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
