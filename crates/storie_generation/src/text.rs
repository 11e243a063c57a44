//! Story text generation.

use crate::extraction::parse_structure;
use crate::prompts;
use std::sync::Arc;
use storie_core::{GenerateRequest, Message, StoryStructure};
use storie_error::{BuilderError, StorieResult};
use storie_interface::TextDriver;
use tracing::{debug, info, instrument};

/// Produces story outlines and single-act prose through a [`TextDriver`].
#[derive(Clone)]
pub struct TextGenerator {
    driver: Arc<dyn TextDriver>,
}

impl std::fmt::Debug for TextGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextGenerator")
            .field("provider", &self.driver.provider_name())
            .field("model", &self.driver.model_name())
            .finish()
    }
}

impl TextGenerator {
    /// Wrap a text driver.
    pub fn new(driver: Arc<dyn TextDriver>) -> Self {
        Self { driver }
    }

    /// Generate a title and exactly four acts for the premise.
    ///
    /// # Errors
    ///
    /// `UpstreamError`/`InvalidResponseError` from the completion call, or
    /// `ParseError` when the completion holds no valid four-act outline.
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    pub async fn generate_story_structure(
        &self,
        prompt: &str,
        child_name: &str,
    ) -> StorieResult<StoryStructure> {
        let text = self
            .complete(vec![
                Message::system(prompts::structure_system_prompt(child_name)),
                Message::user(prompts::structure_user_prompt(prompt, child_name)),
            ])
            .await?;

        let structure = parse_structure(&text)?;
        info!(title = %structure.title, acts = structure.acts.len(), "Story structure generated");
        Ok(structure)
    }

    /// Write a fresh paragraph for one act.
    #[instrument(skip(self, prompt))]
    pub async fn generate_act_text(
        &self,
        prompt: &str,
        child_name: &str,
        act_title: &str,
        act_number: u8,
    ) -> StorieResult<String> {
        let text = self
            .complete(vec![
                Message::system(prompts::act_text_system_prompt(
                    child_name, act_title, act_number,
                )),
                Message::user(prompts::act_text_user_prompt(prompt, act_title)),
            ])
            .await?;
        Ok(text.trim().to_string())
    }

    /// Rewrite one act's paragraph, applying free-form feedback.
    #[instrument(skip(self, prompt, current_text, feedback))]
    pub async fn regenerate_act_text(
        &self,
        prompt: &str,
        child_name: &str,
        act_title: &str,
        act_number: u8,
        current_text: &str,
        feedback: &str,
    ) -> StorieResult<String> {
        let text = self
            .complete(vec![
                Message::system(prompts::rewrite_system_prompt(
                    child_name, act_title, act_number,
                )),
                Message::user(prompts::rewrite_user_prompt(prompt, current_text, feedback)),
            ])
            .await?;
        Ok(text.trim().to_string())
    }

    async fn complete(&self, messages: Vec<Message>) -> StorieResult<String> {
        let request = GenerateRequest::builder()
            .messages(messages)
            .build()
            .map_err(|e| BuilderError::rejected("GenerateRequest", e))?;

        let response = self.driver.generate(&request).await?;
        debug!(
            provider = self.driver.provider_name(),
            length = response.text().len(),
            "Completion received"
        );
        Ok(response.into_text())
    }
}
