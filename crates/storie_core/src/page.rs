//! Story page records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted page row (`story_pages` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryPage {
    /// Row id
    pub id: Uuid,
    /// Owning storybook
    pub storybook_id: Uuid,
    /// Position in the book, 1..=4
    pub page_number: u8,
    /// Title of the act this page illustrates
    pub act_title: String,
    /// Page prose
    pub text_content: String,
    /// Public URL of the uploaded illustration; `None` when generation failed
    pub image_url: Option<String>,
    /// Scene description the illustration was generated from
    pub image_prompt: String,
    /// Insert timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Insert form of a page, as assembled by the generation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NewStoryPage {
    /// Owning storybook
    pub storybook_id: Uuid,
    /// Position in the book, 1..=4
    pub page_number: u8,
    /// Title of the act this page illustrates
    pub act_title: String,
    /// Page prose
    pub text_content: String,
    /// Public URL of the uploaded illustration; `None` when generation failed
    pub image_url: Option<String>,
    /// Scene description the illustration was generated from
    pub image_prompt: String,
}

impl NewStoryPage {
    /// Whether the illustration for this page is missing.
    pub fn is_missing_image(&self) -> bool {
        self.image_url.is_none()
    }
}

/// Partial update of a page; only the populated field is written.
///
/// # Examples
///
/// ```
/// use storie_core::PageUpdate;
///
/// let update = PageUpdate::text("Once upon a time...");
/// let json = serde_json::to_value(&update).unwrap();
/// assert!(json.get("image_url").is_none());
/// assert_eq!(json["text_content"], "Once upon a time...");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PageUpdate {
    /// Replacement prose
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
    /// Replacement illustration URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl PageUpdate {
    /// Update only the page text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text_content: Some(text.into()),
            image_url: None,
        }
    }

    /// Update only the page illustration.
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            text_content: None,
            image_url: Some(url.into()),
        }
    }
}
