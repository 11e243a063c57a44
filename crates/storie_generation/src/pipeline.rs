//! The storybook generation pipeline.
//!
//! One job: outline the story, then illustrate its four acts strictly one
//! after another. An illustration failure costs only that page's image;
//! an outline failure fails the job.

use crate::{ImageGenerator, TextGenerator};
use serde::{Deserialize, Serialize};
use storie_core::{GenerationEvent, NewStoryPage, StoryRequest};
use storie_error::StorieResult;
use storie_interface::GenerationObserver;
use tracing::{info, instrument};
use uuid::Uuid;

/// Result of a pipeline run: the generated title and four pages in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOutput {
    /// Generated story title
    pub title: String,
    /// Pages 1..=4; `image_url` is `None` where illustration failed
    pub pages: Vec<NewStoryPage>,
}

impl PipelineOutput {
    /// Number of pages without an illustration.
    pub fn failed_pages(&self) -> usize {
        self.pages.iter().filter(|p| p.is_missing_image()).count()
    }

    /// The terminal event describing this output.
    pub fn finished_event(&self) -> GenerationEvent {
        GenerationEvent::Finished {
            title: self.title.clone(),
            failed_pages: self.failed_pages(),
        }
    }
}

/// Sequences the text and image generators for one storybook.
#[derive(Debug, Clone)]
pub struct StorybookPipeline {
    text: TextGenerator,
    image: ImageGenerator,
}

impl StorybookPipeline {
    /// Build a pipeline from its generators.
    pub fn new(text: TextGenerator, image: ImageGenerator) -> Self {
        Self { text, image }
    }

    /// The text generator.
    pub fn text(&self) -> &TextGenerator {
        &self.text
    }

    /// The image generator.
    pub fn image(&self) -> &ImageGenerator {
        &self.image
    }

    /// Run the pipeline for `storybook_id`.
    ///
    /// Emits `Structuring`, `StructureReady`, then `PageStarted` and one of
    /// `PageDone`/`PageFailed` per act. On outline failure emits `Failed` and
    /// returns the error. The terminal `Finished` event is left to the caller,
    /// which may still have pages to persist.
    #[instrument(skip(self, request, observer), fields(style = %request.visual_style))]
    pub async fn run(
        &self,
        storybook_id: Uuid,
        request: &StoryRequest,
        observer: &dyn GenerationObserver,
    ) -> StorieResult<PipelineOutput> {
        observer.on_event(&GenerationEvent::Structuring);

        let structure = match self
            .text
            .generate_story_structure(&request.prompt, &request.child_name)
            .await
        {
            Ok(structure) => structure,
            Err(e) => {
                observer.on_event(&GenerationEvent::Failed {
                    reason: e.to_string(),
                });
                return Err(e);
            }
        };

        observer.on_event(&GenerationEvent::StructureReady {
            title: structure.title.clone(),
            act_count: structure.acts.len(),
        });

        let mut pages = Vec::with_capacity(structure.acts.len());
        for act in structure.acts {
            observer.on_event(&GenerationEvent::PageStarted {
                page_number: act.act_number,
            });

            let image_url = match self
                .image
                .generate_image(&act.scene_description, request.visual_style)
                .await
            {
                Ok(url) => Some(url),
                Err(e) => {
                    observer.on_event(&GenerationEvent::PageFailed {
                        page_number: act.act_number,
                        reason: e.to_string(),
                    });
                    None
                }
            };

            let page = NewStoryPage {
                storybook_id,
                page_number: act.act_number,
                act_title: act.act_title,
                text_content: act.text_content,
                image_url,
                image_prompt: act.scene_description,
            };
            if !page.is_missing_image() {
                observer.on_event(&GenerationEvent::PageDone { page: page.clone() });
            }
            pages.push(page);
        }

        let output = PipelineOutput {
            title: structure.title,
            pages,
        };
        info!(
            storybook_id = %storybook_id,
            failed_pages = output.failed_pages(),
            "Pipeline complete"
        );
        Ok(output)
    }
}
