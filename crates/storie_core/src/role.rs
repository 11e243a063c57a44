//! Role types for chat participants.

use serde::{Deserialize, Serialize};

/// Chat completion roles.
///
/// # Examples
///
/// ```
/// use storie_core::Role;
///
/// assert_eq!(Role::System.as_str(), "system");
/// assert_eq!(format!("{}", Role::User), "User");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System messages carry the writer instructions
    System,
    /// User messages carry the story premise
    User,
    /// Assistant messages are model output
    Assistant,
}

impl Role {
    /// Wire name used by OpenAI-compatible APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}
