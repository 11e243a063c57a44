//! Storybook generation for Storie.
//!
//! Turns a short story prompt into a four-page illustrated storybook:
//!
//! 1. [`TextGenerator`] asks the text model for a titled four-act outline
//!    and [`parse_structure`] validates it
//! 2. [`ImageGenerator`] illustrates each act and uploads the PNG
//! 3. [`StorybookPipeline`] sequences the two and reports progress to a
//!    [`GenerationObserver`](storie_interface::GenerationObserver)
//! 4. [`StorybookService`] persists the result and handles per-page
//!    regeneration
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use storie_backend::{InMemoryBackend, StorybookRepository};
//! use storie_core::{StorieConfig, StoryRequest, VisualStyle};
//! use storie_generation::{
//!     ImageGenerator, StorybookPipeline, StorybookService, TextGenerator, TracingObserver,
//! };
//! # use storie_interface::{ImageDriver, TextDriver};
//! # async fn run(text: Arc<dyn TextDriver>, image: Arc<dyn ImageDriver>) -> storie_error::StorieResult<()> {
//! let config = StorieConfig::default();
//! let backend = Arc::new(InMemoryBackend::new());
//! let pipeline = StorybookPipeline::new(
//!     TextGenerator::new(text),
//!     ImageGenerator::new(image, backend.clone(), config.backend.bucket.clone()),
//! );
//! let service = StorybookService::new(
//!     pipeline,
//!     StorybookRepository::new(backend),
//!     &config.storybook,
//! );
//!
//! let user = service.current_user().await?;
//! let request = StoryRequest {
//!     prompt: "A brave little turtle learns to swim".into(),
//!     child_name: "Maya".into(),
//!     visual_style: VisualStyle::Watercolor,
//! };
//! let outcome = service.create_and_generate(user, &request, &TracingObserver).await?;
//! println!("{} ({} pages)", outcome.storybook.title, outcome.pages.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extraction;
mod image;
mod observer;
mod pipeline;
pub mod prompts;
mod service;
mod text;

pub use extraction::{extract_json, parse_structure};
pub use image::{IMAGE_CONTENT_TYPE, ImageGenerator, decode_image_payload};
pub use observer::{ChannelObserver, NoopObserver, TracingObserver};
pub use pipeline::{PipelineOutput, StorybookPipeline};
pub use service::{GenerationOutcome, PageIssue, StorybookService};
pub use text::TextGenerator;
