//! Chat messages.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A single text message in a completion request.
///
/// # Examples
///
/// ```
/// use storie_core::{Message, Role};
///
/// let message = Message::system("You are a children's storybook writer.");
/// assert_eq!(message.role, Role::System);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender
    pub role: Role,
    /// Message text
    pub content: String,
}

impl Message {
    /// Create a message with an explicit role.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system instruction.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }
}
