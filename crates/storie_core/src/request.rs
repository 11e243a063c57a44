//! Request and response types for text completion.

use crate::Message;
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Provider-neutral completion request.
///
/// # Examples
///
/// ```
/// use storie_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::user("Hello!")])
///     .temperature(0.7)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages().len(), 1);
/// assert_eq!(*request.temperature(), Some(0.7));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, Builder, Getters)]
#[builder(setter(into))]
pub struct GenerateRequest {
    /// The conversation messages to send
    messages: Vec<Message>,
    /// Maximum number of tokens to generate
    #[builder(default)]
    max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(default)]
    temperature: Option<f32>,
    /// Model identifier overriding the driver default
    #[builder(default)]
    model: Option<String>,
}

impl GenerateRequest {
    /// Creates a new builder for GenerateRequest.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// Token accounting reported by the provider, when available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt
    pub input_tokens: u64,
    /// Tokens in the completion
    pub output_tokens: u64,
    /// Total tokens billed
    pub total_tokens: u64,
}

/// Completion result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct GenerateResponse {
    /// The raw completion text (untrimmed)
    text: String,
    /// Token usage, if reported
    usage: Option<TokenUsage>,
}

impl GenerateResponse {
    /// Create a response from completion text.
    pub fn new(text: impl Into<String>, usage: Option<TokenUsage>) -> Self {
        Self {
            text: text.into(),
            usage,
        }
    }

    /// Consume the response and return the completion text.
    pub fn into_text(self) -> String {
        self.text
    }
}
