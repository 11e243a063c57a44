//! Extracting the story outline from a completion.
//!
//! Completions often wrap JSON in markdown fences or surround it with prose.
//! Extraction prefers a fenced ```json block and falls back to the first
//! balanced `{ ... }` object.

use serde::Deserialize;
use storie_core::{ACT_TITLES, Act, PAGE_COUNT, StoryStructure};
use storie_error::{ParseError, ParseErrorKind, StorieResult};

/// Outline as the model writes it. Only the page content is required; act
/// numbers and titles are replaced by position.
#[derive(Deserialize)]
struct RawStructure {
    #[serde(default)]
    title: String,
    acts: Vec<RawAct>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAct {
    #[serde(default, rename = "actNumber")]
    _act_number: Option<serde_json::Value>,
    #[serde(default, rename = "actTitle")]
    _act_title: Option<serde_json::Value>,
    scene_description: String,
    text_content: String,
}

/// Extract the first JSON object from a completion.
///
/// # Errors
///
/// Returns a `ParseError` when no object is found.
///
/// # Examples
///
/// ```
/// use storie_generation::extract_json;
///
/// let response = "Here is your story:\n```json\n{\"title\": \"Moon\"}\n```\nSweet dreams!";
/// assert_eq!(extract_json(response).unwrap(), "{\"title\": \"Moon\"}");
/// ```
pub fn extract_json(response: &str) -> StorieResult<String> {
    if let Some(json) = extract_from_code_block(response, "json") {
        if json.starts_with('{') {
            return Ok(json);
        }
    }

    if let Some(json) = extract_balanced(response, '{', '}') {
        return Ok(json);
    }

    tracing::error!(
        response_length = response.len(),
        "No JSON object found in completion"
    );
    Err(ParseError::new(ParseErrorKind::NoJson(response.len())).into())
}

/// Extract, parse and validate a four-act outline.
///
/// Act numbers and titles are assigned by position, so the returned acts are
/// always numbered 1..=4 with the fixed titles in order. Whatever the model
/// wrote for `actNumber` and `actTitle` is ignored, including missing or
/// mistyped values.
///
/// # Errors
///
/// Returns a `ParseError` if no JSON object is found, it does not parse as
/// an outline, the title is blank, it has a number of acts other than four,
/// or an act is missing its scene description or text.
pub fn parse_structure(response: &str) -> StorieResult<StoryStructure> {
    let json = extract_json(response)?;
    let parsed: RawStructure = serde_json::from_str(&json).map_err(|e| {
        let preview = json.chars().take(100).collect::<String>();
        tracing::error!(error = %e, json_preview = %preview, "Story JSON parsing failed");
        ParseError::new(ParseErrorKind::Malformed(e.to_string()))
    })?;

    let title = parsed.title.trim();
    if title.is_empty() {
        return Err(ParseError::new(ParseErrorKind::BlankTitle).into());
    }

    if parsed.acts.len() != PAGE_COUNT {
        return Err(ParseError::new(ParseErrorKind::ActCount(parsed.acts.len())).into());
    }

    let acts = parsed
        .acts
        .into_iter()
        .zip(ACT_TITLES)
        .enumerate()
        .map(|(index, (act, act_title))| canonical_act(index + 1, act_title, act))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(StoryStructure {
        title: title.to_string(),
        acts,
    })
}

fn canonical_act(number: usize, title: &str, act: RawAct) -> Result<Act, ParseError> {
    let scene_description = act.scene_description.trim().to_string();
    let text_content = act.text_content.trim().to_string();

    if scene_description.is_empty() {
        return Err(ParseError::new(ParseErrorKind::IncompleteAct {
            act: number,
            field: "sceneDescription",
        }));
    }
    if text_content.is_empty() {
        return Err(ParseError::new(ParseErrorKind::IncompleteAct {
            act: number,
            field: "textContent",
        }));
    }

    Ok(Act {
        act_number: number as u8,
        act_title: title.to_string(),
        scene_description,
        text_content,
    })
}

fn extract_from_code_block(response: &str, language: &str) -> Option<String> {
    let pattern = format!("```{}", language);
    let start = response.find(&pattern)?;
    let content_start = start + pattern.len();
    match response[content_start..].find("```") {
        Some(end) => Some(response[content_start..content_start + end].trim().to_string()),
        // Truncated completion: take everything after the fence
        None => Some(response[content_start..].trim().to_string()),
    }
}

/// First `open ... close` span with balanced nesting, ignoring delimiters
/// inside string literals.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + i + c.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use storie_error::{StorieError, StorieErrorKind};

    fn act(number: serde_json::Value, title: &str, scene: &str, text: &str) -> serde_json::Value {
        json!({
            "actNumber": number,
            "actTitle": title,
            "sceneDescription": scene,
            "textContent": text,
        })
    }

    fn outline(acts: Vec<serde_json::Value>) -> String {
        json!({ "title": "The Moon Fox", "acts": acts }).to_string()
    }

    fn four_acts() -> Vec<serde_json::Value> {
        (1..=4)
            .map(|n| act(json!(n), "Chapter", &format!("scene {}", n), &format!("text {}", n)))
            .collect()
    }

    fn parse_kind(err: StorieError) -> ParseErrorKind {
        match err.kind() {
            StorieErrorKind::Parse(e) => e.kind.clone(),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn balanced_ignores_braces_in_strings() {
        let text = r#"prefix {"a": "}{", "b": {"c": 1}} suffix {"d": 2}"#;
        assert_eq!(
            extract_balanced(text, '{', '}').as_deref(),
            Some(r#"{"a": "}{", "b": {"c": 1}}"#)
        );
    }

    #[test]
    fn unterminated_object_is_not_extracted() {
        assert!(extract_balanced(r#"{"title": "half"#, '{', '}').is_none());
    }

    #[test]
    fn truncated_fence_takes_the_rest() {
        assert_eq!(
            extract_from_code_block("```json\n{\"a\": 1}", "json").as_deref(),
            Some("{\"a\": 1}")
        );
    }

    #[test]
    fn acts_are_renumbered_and_retitled_by_position() {
        let acts = (1..=4)
            .rev()
            .map(|n| act(json!(n), &format!("Chapter {}", n), "scene", "text"))
            .collect();
        let structure = parse_structure(&outline(acts)).unwrap();

        let numbered: Vec<(u8, &str)> = structure
            .acts
            .iter()
            .map(|a| (a.act_number, a.act_title.as_str()))
            .collect();
        assert_eq!(
            numbered,
            vec![
                (1, "Introduction"),
                (2, "The Journey"),
                (3, "The Gentle Conflict"),
                (4, "The Sleepy Resolution"),
            ]
        );
    }

    #[test]
    fn missing_act_title_and_string_act_number_are_accepted() {
        let acts = vec![
            json!({ "actNumber": "1", "sceneDescription": "a fox", "textContent": "Once." }),
            json!({ "sceneDescription": "a river", "textContent": "Then." }),
            act(json!(null), "Middle", "a storm", "Oh no."),
            act(json!(4.0), "End", "a den", "Goodnight."),
        ];
        let structure = parse_structure(&outline(acts)).unwrap();

        assert_eq!(structure.title, "The Moon Fox");
        assert_eq!(structure.acts[0].act_number, 1);
        assert_eq!(structure.acts[1].act_title, "The Journey");
        assert_eq!(structure.acts[3].text_content, "Goodnight.");
    }

    #[test]
    fn wrong_act_count_is_rejected() {
        for count in [3, 5] {
            let acts = (1..=count)
                .map(|n| act(json!(n), "Chapter", "scene", "text"))
                .collect();
            let err = parse_structure(&outline(acts)).unwrap_err();
            assert_eq!(parse_kind(err), ParseErrorKind::ActCount(count));
        }
    }

    #[test]
    fn empty_scene_or_text_is_rejected() {
        let mut acts = four_acts();
        acts[1] = act(json!(2), "Chapter", "   ", "text");
        let err = parse_structure(&outline(acts)).unwrap_err();
        assert_eq!(
            parse_kind(err),
            ParseErrorKind::IncompleteAct {
                act: 2,
                field: "sceneDescription"
            }
        );

        let mut acts = four_acts();
        acts[3] = act(json!(4), "Chapter", "scene", "");
        let err = parse_structure(&outline(acts)).unwrap_err();
        assert_eq!(
            parse_kind(err),
            ParseErrorKind::IncompleteAct {
                act: 4,
                field: "textContent"
            }
        );
    }

    #[test]
    fn object_that_is_not_an_outline_is_malformed() {
        let err = parse_structure(r#"{"title": "x", "acts": "nope"}"#).unwrap_err();
        assert!(matches!(parse_kind(err), ParseErrorKind::Malformed(_)));
    }

    #[test]
    fn blank_title_is_rejected() {
        let json = json!({ "title": "  ", "acts": four_acts() }).to_string();
        let err = parse_structure(&json).unwrap_err();
        assert_eq!(parse_kind(err), ParseErrorKind::BlankTitle);

        let json = json!({ "acts": four_acts() }).to_string();
        let err = parse_structure(&json).unwrap_err();
        assert_eq!(parse_kind(err), ParseErrorKind::BlankTitle);
    }

    #[test]
    fn unfenced_outline_inside_prose_is_extracted() {
        let response = format!(
            "Of course! Here is a gentle story.\n{}\nI hope it helps them sleep.",
            outline(four_acts())
        );
        let structure = parse_structure(&response).unwrap();
        assert_eq!(structure.acts.len(), 4);
        assert_eq!(structure.acts[2].scene_description, "scene 3");
    }
}
