//! Storybook records.

use crate::StoryPage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a storybook.
///
/// A storybook is inserted as `Generating`; the generation job moves it to
/// `Ready` (even when some pages lack an image) or to `Error` when the job
/// aborted as a whole.
///
/// # Examples
///
/// ```
/// use storie_core::StorybookStatus;
///
/// assert_eq!(StorybookStatus::Generating.to_string(), "generating");
/// assert_eq!("ready".parse::<StorybookStatus>().unwrap(), StorybookStatus::Ready);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StorybookStatus {
    /// The generation job is still running
    Generating,
    /// All four pages were persisted
    Ready,
    /// The generation job failed as a whole
    Error,
}

impl StorybookStatus {
    /// Whether the status will no longer change without user action.
    pub fn is_settled(&self) -> bool {
        !matches!(self, StorybookStatus::Generating)
    }
}

/// Illustration styles offered to the user.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VisualStyle {
    /// Soft watercolor washes
    Watercolor,
    /// Stop-motion clay figures
    Claymation,
    /// Pastel illustration
    Pastel,
    /// Flat cartoon
    Cartoon,
    /// Painterly digital art
    DigitalArt,
}

impl VisualStyle {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            VisualStyle::Watercolor => "Watercolor",
            VisualStyle::Claymation => "Claymation",
            VisualStyle::Pastel => "Pastel Illustration",
            VisualStyle::Cartoon => "Cartoon",
            VisualStyle::DigitalArt => "Digital Art",
        }
    }

    /// Phrase inserted before "style" in image prompts.
    ///
    /// # Examples
    ///
    /// ```
    /// use storie_core::VisualStyle;
    ///
    /// assert_eq!(VisualStyle::DigitalArt.prompt_name(), "digital art");
    /// ```
    pub fn prompt_name(&self) -> &'static str {
        match self {
            VisualStyle::Watercolor => "watercolor",
            VisualStyle::Claymation => "claymation",
            VisualStyle::Pastel => "pastel illustration",
            VisualStyle::Cartoon => "cartoon",
            VisualStyle::DigitalArt => "digital art",
        }
    }
}

/// A persisted storybook row (`storybooks` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Storybook {
    /// Row id
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Story title
    pub title: String,
    /// Name of the child the story is written for
    pub child_name: String,
    /// Prompt the user submitted
    pub original_prompt: String,
    /// Illustration style
    pub visual_style: VisualStyle,
    /// Generation status
    pub status: StorybookStatus,
    /// Insert timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Insert form of a storybook; the backend assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStorybook {
    /// Owning user
    pub user_id: Uuid,
    /// Provisional title
    pub title: String,
    /// Name of the child the story is written for
    pub child_name: String,
    /// Prompt the user submitted
    pub original_prompt: String,
    /// Illustration style
    pub visual_style: VisualStyle,
    /// Always `Generating` for a fresh row
    pub status: StorybookStatus,
}

impl NewStorybook {
    /// Build the insert form for a freshly submitted prompt.
    ///
    /// The title is provisional (derived from the prompt) until the generated
    /// title replaces it.
    pub fn from_request(user_id: Uuid, request: &StoryRequest, title_max_chars: usize) -> Self {
        Self {
            user_id,
            title: provisional_title(&request.prompt, title_max_chars),
            child_name: request.child_name.clone(),
            original_prompt: request.prompt.clone(),
            visual_style: request.visual_style,
            status: StorybookStatus::Generating,
        }
    }
}

/// What the user submits to create a storybook.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoryRequest {
    /// Story premise
    pub prompt: String,
    /// Name of the child
    pub child_name: String,
    /// Illustration style
    pub visual_style: VisualStyle,
}

/// A storybook together with its pages, sorted by page number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorybookWithPages {
    /// The storybook row
    pub storybook: Storybook,
    /// Its pages in reading order
    pub pages: Vec<StoryPage>,
}

/// Derive a title from the prompt: the prompt itself when short, otherwise
/// its first `max_chars` characters followed by an ellipsis.
///
/// # Examples
///
/// ```
/// use storie_core::provisional_title;
///
/// assert_eq!(provisional_title("A bunny who loves carrots", 50), "A bunny who loves carrots");
/// assert_eq!(provisional_title("abcdefgh", 4), "abcd...");
/// ```
pub fn provisional_title(prompt: &str, max_chars: usize) -> String {
    let prompt = prompt.trim();
    if prompt.chars().count() > max_chars {
        let head: String = prompt.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        prompt.to_string()
    }
}

/// Partial update of a storybook row; only populated fields are written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StorybookUpdate {
    /// Replacement title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StorybookStatus>,
}

impl StorybookUpdate {
    /// Change only the status.
    pub fn status(status: StorybookStatus) -> Self {
        Self {
            title: None,
            status: Some(status),
        }
    }

    /// Replace the title and set the status together.
    pub fn finished(title: impl Into<String>, status: StorybookStatus) -> Self {
        Self {
            title: Some(title.into()),
            status: Some(status),
        }
    }
}
