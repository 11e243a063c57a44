//! Illustration generation and upload.

use crate::prompts;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::sync::Arc;
use storie_core::{ImageRequest, VisualStyle};
use storie_error::{BuilderError, InvalidResponseError, StorieResult};
use storie_interface::{BlobStore, ImageDriver};
use tracing::{debug, info, instrument};

/// Content type of every uploaded illustration.
pub const IMAGE_CONTENT_TYPE: &str = "image/png";

/// Decode an inline image, stripping an optional `data:image/*;base64,` header.
///
/// # Errors
///
/// Returns an `InvalidResponseError` when the payload is empty or not valid
/// base64.
///
/// # Examples
///
/// ```
/// use storie_generation::decode_image_payload;
///
/// let plain = decode_image_payload("aGVsbG8=").unwrap();
/// let prefixed = decode_image_payload("data:image/png;base64,aGVsbG8=").unwrap();
/// assert_eq!(plain, prefixed);
/// assert_eq!(plain, b"hello");
/// ```
pub fn decode_image_payload(payload: &str) -> Result<Vec<u8>, InvalidResponseError> {
    let raw = strip_data_uri(payload.trim());
    if raw.is_empty() {
        return Err(InvalidResponseError::new("image", "no image generated"));
    }
    STANDARD
        .decode(raw)
        .map_err(|e| InvalidResponseError::new("image", format!("invalid base64 image: {}", e)))
}

fn strip_data_uri(payload: &str) -> &str {
    payload
        .strip_prefix("data:image/")
        .and_then(|rest| rest.split_once(";base64,"))
        .filter(|(subtype, _)| {
            !subtype.is_empty()
                && subtype
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
        .map_or(payload, |(_, data)| data)
}

/// Generates illustrations and uploads them to object storage.
#[derive(Clone)]
pub struct ImageGenerator {
    driver: Arc<dyn ImageDriver>,
    blobs: Arc<dyn BlobStore>,
    bucket: String,
    resolution: String,
    output_format: String,
}

impl std::fmt::Debug for ImageGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageGenerator")
            .field("provider", &self.driver.provider_name())
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}

impl ImageGenerator {
    /// Generator uploading into `bucket`, requesting 1k PNG images.
    pub fn new(
        driver: Arc<dyn ImageDriver>,
        blobs: Arc<dyn BlobStore>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            driver,
            blobs,
            bucket: bucket.into(),
            resolution: "1k".to_string(),
            output_format: "png".to_string(),
        }
    }

    /// Override the requested resolution and output format.
    pub fn with_format(
        mut self,
        resolution: impl Into<String>,
        output_format: impl Into<String>,
    ) -> Self {
        self.resolution = resolution.into();
        self.output_format = output_format.into();
        self
    }

    /// Illustrate a scene and return the public URL of the uploaded image.
    #[instrument(skip(self, scene_description), fields(style = %style))]
    pub async fn generate_image(
        &self,
        scene_description: &str,
        style: VisualStyle,
    ) -> StorieResult<String> {
        self.render(prompts::image_prompt(style, scene_description))
            .await
    }

    /// Illustrate a scene again, steering the model with user feedback.
    #[instrument(skip(self, original_prompt, feedback), fields(style = %style))]
    pub async fn regenerate_image_with_feedback(
        &self,
        original_prompt: &str,
        style: VisualStyle,
        feedback: &str,
    ) -> StorieResult<String> {
        self.render(prompts::image_prompt_with_feedback(
            style,
            original_prompt,
            feedback,
        ))
        .await
    }

    async fn render(&self, prompt: String) -> StorieResult<String> {
        debug!(prompt_len = prompt.len(), "Requesting illustration");
        let request = ImageRequest::builder()
            .prompt(prompt)
            .resolution(self.resolution.clone())
            .output_format(self.output_format.clone())
            .build()
            .map_err(|e| BuilderError::rejected("ImageRequest", e))?;

        let payload = self.driver.generate_image(&request).await?;
        let first = payload.outputs.first().ok_or_else(|| {
            InvalidResponseError::new(self.driver.provider_name(), "no image generated")
        })?;
        let bytes = decode_image_payload(first)?;

        let blob = self
            .blobs
            .upload(&self.bucket, &bytes, IMAGE_CONTENT_TYPE)
            .await?;
        info!(url = %blob.url, size = bytes.len(), "Illustration uploaded");
        Ok(blob.url)
    }
}
