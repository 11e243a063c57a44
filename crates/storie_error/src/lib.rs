//! Error types for the Storie storybook generator.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind (or a message) with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! The generation pipeline distinguishes four failure families:
//!
//! - [`UpstreamError`]: an external API answered with a non-2xx status
//! - [`InvalidResponseError`]: a 2xx answer was missing expected fields
//! - [`ParseError`]: the story outline could not be extracted from a completion
//! - [`PersistenceError`]: a database operation failed
//!
//! # Examples
//!
//! ```
//! use storie_error::{StorieResult, UpstreamError};
//!
//! fn complete() -> StorieResult<String> {
//!     Err(UpstreamError::new("openai", 503, "overloaded"))?
//! }
//!
//! assert!(complete().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod http;
mod json;
mod parse;
mod persistence;
mod retry;
mod storage;
mod upstream;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{StorieError, StorieErrorKind, StorieResult};
pub use http::HttpError;
pub use json::{JsonDirection, JsonError};
pub use parse::{ParseError, ParseErrorKind};
pub use persistence::{PersistenceError, PersistenceErrorKind};
pub use retry::RetryableError;
pub use storage::{StorageError, StorageErrorKind};
pub use upstream::{InvalidResponseError, UpstreamError};
