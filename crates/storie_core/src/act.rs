//! Story outline types returned by the text generator.

use serde::{Deserialize, Serialize};

/// Number of acts (and therefore pages) in every storybook.
pub const PAGE_COUNT: usize = 4;

/// Fixed act titles, in reading order.
pub const ACT_TITLES: [&str; PAGE_COUNT] = [
    "Introduction",
    "The Journey",
    "The Gentle Conflict",
    "The Sleepy Resolution",
];

/// One narrative beat of a generated story. Not persisted; each act becomes
/// one page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Act {
    /// One-based act number
    pub act_number: u8,
    /// Act title
    pub act_title: String,
    /// Purely visual description used as the image prompt
    pub scene_description: String,
    /// Page prose (50-80 words)
    pub text_content: String,
}

/// The outline produced by a single structure completion.
///
/// # Examples
///
/// ```
/// use storie_core::StoryStructure;
///
/// let json = r#"{"title": "Milo and the Moon", "acts": []}"#;
/// let structure: StoryStructure = serde_json::from_str(json).unwrap();
/// assert_eq!(structure.title, "Milo and the Moon");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoryStructure {
    /// Story title
    pub title: String,
    /// Acts in reading order
    pub acts: Vec<Act>,
}
