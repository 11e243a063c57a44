//! Image generation request and payload types.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Body sent to the image generation endpoint.
///
/// Synchronous mode with inline base64 output is always requested so the
/// caller receives the image in the same response.
///
/// # Examples
///
/// ```
/// use storie_core::ImageRequest;
///
/// let request = ImageRequest::builder()
///     .prompt("a sleepy fox under the moon")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.output_format(), "png");
/// assert!(*request.enable_base64_output());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ImageRequest {
    /// Full prompt including the safety preamble
    prompt: String,
    /// Output resolution (e.g. "1k")
    #[builder(default = "\"1k\".to_string()")]
    resolution: String,
    /// Encoded image format
    #[builder(default = "\"png\".to_string()")]
    output_format: String,
    /// Wait for the image instead of returning a job handle
    #[builder(default = "true")]
    enable_sync_mode: bool,
    /// Return the image inline as base64
    #[builder(default = "true")]
    enable_base64_output: bool,
}

impl ImageRequest {
    /// Creates a new builder for ImageRequest.
    pub fn builder() -> ImageRequestBuilder {
        ImageRequestBuilder::default()
    }
}

/// Images returned by a successful generation call.
///
/// Each entry is a base64 string, optionally prefixed with a
/// `data:image/*;base64,` URI header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    /// Inline image strings in the order the provider returned them
    pub outputs: Vec<String>,
}
