//! Model provider traits.

use async_trait::async_trait;
use storie_core::{GenerateRequest, GenerateResponse, ImagePayload, ImageRequest};
use storie_error::StorieResult;

/// Chat-completion provider.
#[async_trait]
pub trait TextDriver: Send + Sync {
    /// Run one completion.
    async fn generate(&self, req: &GenerateRequest) -> StorieResult<GenerateResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-4o-mini").
    fn model_name(&self) -> &str;
}

/// Image-generation provider.
///
/// Implementations own their retry policy; a returned error is final.
#[async_trait]
pub trait ImageDriver: Send + Sync {
    /// Generate one or more inline images for the request.
    async fn generate_image(&self, req: &ImageRequest) -> StorieResult<ImagePayload>;

    /// Provider name (e.g., "wavespeed").
    fn provider_name(&self) -> &'static str;
}
