//! End-to-end storybook lifecycle: create, generate, persist, regenerate.

use crate::{PipelineOutput, StorybookPipeline};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use storie_backend::StorybookRepository;
use storie_core::{
    GenerationEvent, NewStorybook, PageUpdate, StoryPage, StoryRequest, Storybook,
    StorybookConfig, StorybookStatus, StorybookUpdate,
};
use storie_error::{PersistenceError, PersistenceErrorKind, StorieResult};
use storie_interface::GenerationObserver;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// What to regenerate on a single page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "lowercase")]
pub enum PageIssue {
    /// Redraw the illustration from the stored scene description
    Image {
        /// Optional guidance appended to the image prompt
        feedback: Option<String>,
    },
    /// Rewrite the page text
    Text {
        /// Optional guidance; without it the paragraph is written afresh
        feedback: Option<String>,
    },
}

impl PageIssue {
    fn feedback(&self) -> Option<&str> {
        let feedback = match self {
            PageIssue::Image { feedback } | PageIssue::Text { feedback } => feedback.as_deref(),
        };
        feedback.map(str::trim).filter(|f| !f.is_empty())
    }
}

/// A finished generation job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// The storybook row after its final update
    pub storybook: Storybook,
    /// Persisted pages in reading order
    pub pages: Vec<StoryPage>,
    /// Pages persisted without an illustration
    pub failed_pages: usize,
}

/// Runs the pipeline and keeps the database in step with it.
///
/// A storybook is inserted as `generating`. After the pipeline returns, its
/// pages are inserted in one batch and the storybook takes the generated
/// title and status `ready`, even when some pages lack an image. If the
/// outline or the page insert fails, the status becomes `error`.
#[derive(Debug, Clone)]
pub struct StorybookService {
    pipeline: StorybookPipeline,
    repository: StorybookRepository,
    title_max_chars: usize,
    poll_interval: Duration,
}

impl StorybookService {
    /// Build a service.
    pub fn new(
        pipeline: StorybookPipeline,
        repository: StorybookRepository,
        config: &StorybookConfig,
    ) -> Self {
        Self {
            pipeline,
            repository,
            title_max_chars: config.title_max_chars,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }

    /// The underlying repository.
    pub fn repository(&self) -> &StorybookRepository {
        &self.repository
    }

    /// The underlying pipeline.
    pub fn pipeline(&self) -> &StorybookPipeline {
        &self.pipeline
    }

    /// Insert a `generating` storybook for the request.
    #[instrument(skip(self, request))]
    pub async fn create_storybook(
        &self,
        user_id: Uuid,
        request: &StoryRequest,
    ) -> StorieResult<Storybook> {
        let book = NewStorybook::from_request(user_id, request, self.title_max_chars);
        self.repository.create_storybook(&book).await
    }

    /// The signed-in user's id, or an `Unauthorized` error.
    pub async fn current_user(&self) -> StorieResult<Uuid> {
        self.repository
            .backend()
            .current_session()
            .await?
            .map(|session| session.user_id)
            .ok_or_else(|| {
                PersistenceError::new(PersistenceErrorKind::Unauthorized(
                    "no signed-in user".to_string(),
                ))
                .into()
            })
    }

    /// Generate and persist the pages of an existing `generating` storybook.
    #[instrument(skip(self, storybook, observer), fields(storybook_id = %storybook.id))]
    pub async fn generate(
        &self,
        storybook: &Storybook,
        observer: &dyn GenerationObserver,
    ) -> StorieResult<GenerationOutcome> {
        let request = StoryRequest {
            prompt: storybook.original_prompt.clone(),
            child_name: storybook.child_name.clone(),
            visual_style: storybook.visual_style,
        };

        let output = match self.pipeline.run(storybook.id, &request, observer).await {
            Ok(output) => output,
            Err(e) => {
                self.mark_error(storybook.id).await;
                return Err(e);
            }
        };

        match self.persist(storybook.id, &output, observer).await {
            Ok(outcome) => {
                observer.on_event(&output.finished_event());
                info!(
                    title = %outcome.storybook.title,
                    failed_pages = outcome.failed_pages,
                    "Storybook ready"
                );
                Ok(outcome)
            }
            Err(e) => {
                observer.on_event(&GenerationEvent::Failed {
                    reason: e.to_string(),
                });
                self.mark_error(storybook.id).await;
                Err(e)
            }
        }
    }

    /// Create a storybook and generate it in one call.
    pub async fn create_and_generate(
        &self,
        user_id: Uuid,
        request: &StoryRequest,
        observer: &dyn GenerationObserver,
    ) -> StorieResult<GenerationOutcome> {
        let storybook = self.create_storybook(user_id, request).await?;
        self.generate(&storybook, observer).await
    }

    /// Regenerate one page's image or text and persist only that field.
    #[instrument(skip(self))]
    pub async fn regenerate_page(&self, page_id: Uuid, issue: &PageIssue) -> StorieResult<StoryPage> {
        let page = self.repository.get_page(page_id).await?;
        let storybook = self
            .repository
            .find_storybook(page.storybook_id)
            .await?
            .ok_or_else(|| {
                PersistenceError::new(PersistenceErrorKind::NotFound {
                    table: storie_backend::STORYBOOKS_TABLE.to_string(),
                    id: page.storybook_id.to_string(),
                })
            })?;

        let update = match (issue, issue.feedback()) {
            (PageIssue::Image { .. }, None) => PageUpdate::image(
                self.pipeline
                    .image()
                    .generate_image(&page.image_prompt, storybook.visual_style)
                    .await?,
            ),
            (PageIssue::Image { .. }, Some(feedback)) => PageUpdate::image(
                self.pipeline
                    .image()
                    .regenerate_image_with_feedback(
                        &page.image_prompt,
                        storybook.visual_style,
                        feedback,
                    )
                    .await?,
            ),
            (PageIssue::Text { .. }, None) => PageUpdate::text(
                self.pipeline
                    .text()
                    .generate_act_text(
                        &storybook.original_prompt,
                        &storybook.child_name,
                        &page.act_title,
                        page.page_number,
                    )
                    .await?,
            ),
            (PageIssue::Text { .. }, Some(feedback)) => PageUpdate::text(
                self.pipeline
                    .text()
                    .regenerate_act_text(
                        &storybook.original_prompt,
                        &storybook.child_name,
                        &page.act_title,
                        page.page_number,
                        &page.text_content,
                        feedback,
                    )
                    .await?,
            ),
        };

        let updated = self.repository.update_page(page_id, &update).await?;
        info!(page_number = updated.page_number, "Page regenerated");
        Ok(updated)
    }

    /// Poll until the storybook leaves `generating`, then return it.
    #[instrument(skip(self))]
    pub async fn wait_until_settled(&self, id: Uuid) -> StorieResult<Storybook> {
        loop {
            let storybook = self.repository.find_storybook(id).await?.ok_or_else(|| {
                PersistenceError::new(PersistenceErrorKind::NotFound {
                    table: storie_backend::STORYBOOKS_TABLE.to_string(),
                    id: id.to_string(),
                })
            })?;

            if storybook.status.is_settled() {
                return Ok(storybook);
            }
            debug!(interval_ms = self.poll_interval.as_millis() as u64, "Still generating");
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn persist(
        &self,
        storybook_id: Uuid,
        output: &PipelineOutput,
        observer: &dyn GenerationObserver,
    ) -> StorieResult<GenerationOutcome> {
        observer.on_event(&GenerationEvent::Persisting);
        let mut pages = self.repository.create_pages(&output.pages).await?;
        pages.sort_by_key(|p| p.page_number);

        let storybook = self
            .repository
            .update_storybook(
                storybook_id,
                &StorybookUpdate::finished(output.title.clone(), StorybookStatus::Ready),
            )
            .await?;

        Ok(GenerationOutcome {
            storybook,
            pages,
            failed_pages: output.failed_pages(),
        })
    }

    async fn mark_error(&self, storybook_id: Uuid) {
        if let Err(e) = self
            .repository
            .update_status(storybook_id, StorybookStatus::Error)
            .await
        {
            error!(error = %e, "Failed to mark storybook as errored");
        } else {
            warn!(storybook_id = %storybook_id, "Storybook marked as errored");
        }
    }
}

