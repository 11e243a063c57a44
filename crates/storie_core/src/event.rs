//! Stage-transition events emitted by the generation pipeline.

use crate::NewStoryPage;
use serde::{Deserialize, Serialize};

/// A typed progress notification from a generation job.
///
/// Events are purely observational: no observer can change the outcome of a
/// job. A job emits `Structuring` first and then exactly one of `Finished`
/// or `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GenerationEvent {
    /// The story outline is being requested
    #[display("Crafting your story...")]
    Structuring,
    /// The outline arrived and passed validation
    #[display("Story \"{}\" outlined with {} acts", title, act_count)]
    StructureReady {
        /// Generated title
        title: String,
        /// Number of acts in the outline
        act_count: usize,
    },
    /// Illustration of a page has started
    #[display("Creating page {} of 4...", page_number)]
    PageStarted {
        /// One-based page number
        page_number: u8,
    },
    /// A page was illustrated and uploaded
    #[display("Page {} of 4 complete!", page.page_number)]
    PageDone {
        /// The assembled page, with its image URL
        page: NewStoryPage,
    },
    /// A page's illustration failed; the page keeps its text without an image
    #[display("Failed to generate page {}: {}", page_number, reason)]
    PageFailed {
        /// One-based page number
        page_number: u8,
        /// Error message
        reason: String,
    },
    /// Pages are being written to the database
    #[display("Saving your storybook...")]
    Persisting,
    /// The job completed; some pages may lack an image
    #[display("Complete! ({} pages without an image)", failed_pages)]
    Finished {
        /// Generated title
        title: String,
        /// Count of pages whose illustration failed
        failed_pages: usize,
    },
    /// The job aborted as a whole
    #[display("Story generation failed: {}", reason)]
    Failed {
        /// Error message
        reason: String,
    },
}

impl GenerationEvent {
    /// Whether this event ends the job.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GenerationEvent::Finished { .. } | GenerationEvent::Failed { .. }
        )
    }
}
