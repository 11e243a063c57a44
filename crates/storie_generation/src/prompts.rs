//! Prompt text sent to the text and image providers.

use storie_core::{ACT_TITLES, VisualStyle};

/// Preamble keeping every illustration gentle and toddler-safe.
pub const SAFETY_PROMPT_PREFIX: &str = "Illustration for children's storybook, soft lighting, friendly and gentle, no scary elements, toddler-safe, warm colors";

/// Suffix forbidding rendered text in illustrations.
pub const NO_TEXT_INSTRUCTION: &str = "The image must contain no readable text of any kind: no words, letters, numbers, titles, signs, labels or speech bubbles.";

/// System instruction for the four-act outline.
pub fn structure_system_prompt(child_name: &str) -> String {
    format!(
        r#"You are a children's storybook writer. Create a 4-act story structure based on the given idea. The story is for a toddler named {child_name}.

Output ONLY valid JSON with this exact structure:
{{
  "title": "Story title",
  "acts": [
    {{
      "actNumber": 1,
      "actTitle": "Introduction",
      "sceneDescription": "Brief visual scene description for image generation. CRITICAL: Describe ONLY visual elements like characters, colors, objects, setting, mood, and composition. NEVER mention text, words, letters, titles, speech bubbles, or anything readable. The image must be purely visual artwork.",
      "textContent": "The story text for this page (50-80 words, simple language, gentle rhythm)"
    }},
    ... (4 acts total)
  ]
}}

Act titles must be: {titles}.
Keep language simple, warm, and suitable for bedtime stories. Include {child_name} in the story naturally."#,
        child_name = child_name,
        titles = ACT_TITLES.join(", "),
    )
}

/// User message for the four-act outline.
pub fn structure_user_prompt(prompt: &str, child_name: &str) -> String {
    format!(
        "Create a bedtime story for a child named {child_name} based on: {prompt}. Remember, the child's name is {child_name} - use it throughout the story."
    )
}

/// System instruction for writing one act from scratch.
pub fn act_text_system_prompt(child_name: &str, act_title: &str, act_number: u8) -> String {
    format!(
        "You are a children's storybook writer. Write a single paragraph (50-80 words) for act {act_number} ({act_title}) of a bedtime story for {child_name}. Use simple, warm language with gentle rhythm. Do not include act titles or labels, just the story text."
    )
}

/// User message for writing one act from scratch.
pub fn act_text_user_prompt(prompt: &str, act_title: &str) -> String {
    format!("Story premise: {prompt}\n\nWrite the {act_title} act.")
}

/// System instruction for rewriting one act with feedback.
pub fn rewrite_system_prompt(child_name: &str, act_title: &str, act_number: u8) -> String {
    format!(
        "You are a children's storybook writer. Rewrite the following paragraph for act {act_number} ({act_title}) of a bedtime story for {child_name}. Use simple, warm language with gentle rhythm. Apply the user's feedback to improve it. Do not include act titles or labels."
    )
}

/// User message for rewriting one act with feedback.
pub fn rewrite_user_prompt(prompt: &str, current_text: &str, feedback: &str) -> String {
    format!(
        "Story premise: {prompt}\n\nCurrent text: {current_text}\n\nUser feedback: {feedback}\n\nRewrite the text addressing the feedback."
    )
}

/// Full illustration prompt for a scene.
///
/// # Examples
///
/// ```
/// use storie_core::VisualStyle;
/// use storie_generation::prompts::{SAFETY_PROMPT_PREFIX, image_prompt};
///
/// let prompt = image_prompt(VisualStyle::Watercolor, "a fox in a meadow");
/// assert!(prompt.starts_with(SAFETY_PROMPT_PREFIX));
/// assert!(prompt.contains("watercolor style, a fox in a meadow."));
/// ```
pub fn image_prompt(style: VisualStyle, scene_description: &str) -> String {
    format!(
        "{}, {} style, {}. {}",
        SAFETY_PROMPT_PREFIX,
        style.prompt_name(),
        scene_description.trim(),
        NO_TEXT_INSTRUCTION
    )
}

/// Illustration prompt with user feedback appended.
pub fn image_prompt_with_feedback(
    style: VisualStyle,
    scene_description: &str,
    feedback: &str,
) -> String {
    format!(
        "{} User feedback for improvement: {}",
        image_prompt(style, scene_description),
        feedback.trim()
    )
}
