//! Errors assembling request DTOs through their builders.

/// Why a request could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BuilderErrorKind {
    /// A required field was never set
    #[display("{} is missing '{}'", request, field)]
    MissingField {
        /// Request type being built
        request: &'static str,
        /// Unset field
        field: String,
    },

    /// The builder rejected the supplied values
    #[display("{} rejected: {}", request, reason)]
    Rejected {
        /// Request type being built
        request: &'static str,
        /// Builder's explanation
        reason: String,
    },
}

/// Request builder failure with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Builder Error: {} at line {} in {}", kind, line, file)]
pub struct BuilderError {
    kind: BuilderErrorKind,
    line: u32,
    file: &'static str,
}

impl BuilderError {
    /// Wrap a kind, capturing the caller's location.
    #[track_caller]
    pub fn new(kind: BuilderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for [`BuilderErrorKind::Rejected`].
    #[track_caller]
    pub fn rejected(request: &'static str, reason: impl ToString) -> Self {
        Self::new(BuilderErrorKind::Rejected {
            request,
            reason: reason.to_string(),
        })
    }

    /// The failure kind.
    pub fn kind(&self) -> &BuilderErrorKind {
        &self.kind
    }
}
