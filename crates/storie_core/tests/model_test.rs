use std::str::FromStr;
use storie_core::{
    ACT_TITLES, GenerationEvent, NewStoryPage, NewStorybook, StoryRequest, StoryStructure,
    StorybookStatus, VisualStyle, provisional_title,
};
use strum::IntoEnumIterator;
use uuid::Uuid;

#[test]
fn status_round_trips_through_strings() {
    for status in StorybookStatus::iter() {
        let text = status.to_string();
        assert_eq!(StorybookStatus::from_str(&text).unwrap(), status);
        assert_eq!(serde_json::to_value(status).unwrap(), text.as_str());
    }
    assert!(StorybookStatus::from_str("published").is_err());
}

#[test]
fn only_generating_is_unsettled() {
    assert!(!StorybookStatus::Generating.is_settled());
    assert!(StorybookStatus::Ready.is_settled());
    assert!(StorybookStatus::Error.is_settled());
}

#[test]
fn visual_styles_use_snake_case_ids() {
    assert_eq!(VisualStyle::DigitalArt.to_string(), "digital_art");
    assert_eq!(
        VisualStyle::from_str("digital_art").unwrap(),
        VisualStyle::DigitalArt
    );
    assert_eq!(
        serde_json::to_value(VisualStyle::Pastel).unwrap(),
        "pastel"
    );
    assert_eq!(VisualStyle::Pastel.label(), "Pastel Illustration");
    assert_eq!(VisualStyle::iter().count(), 5);
}

#[test]
fn long_prompts_are_truncated_for_the_title() {
    let prompt = "A little dragon who is afraid of the dark learns that stars are friends";
    let title = provisional_title(prompt, 50);
    assert!(title.ends_with("..."));
    assert_eq!(title.chars().count(), 53);

    let exact = "x".repeat(50);
    assert_eq!(provisional_title(&exact, 50), exact);
}

#[test]
fn new_storybook_starts_generating() {
    let request = StoryRequest {
        prompt: "A bunny who bakes moon cakes".to_string(),
        child_name: "Ava".to_string(),
        visual_style: VisualStyle::Watercolor,
    };
    let book = NewStorybook::from_request(Uuid::new_v4(), &request, 50);

    assert_eq!(book.status, StorybookStatus::Generating);
    assert_eq!(book.title, "A bunny who bakes moon cakes");
    assert_eq!(book.child_name, "Ava");
}

#[test]
fn structure_uses_camel_case_fields() {
    let json = r#"{
        "title": "Milo's Moonlight Walk",
        "acts": [
            {"actNumber": 1, "actTitle": "Introduction", "sceneDescription": "a boy in pajamas", "textContent": "Milo yawned."}
        ]
    }"#;
    let structure: StoryStructure = serde_json::from_str(json).unwrap();
    assert_eq!(structure.acts[0].act_title, ACT_TITLES[0]);
    assert_eq!(structure.acts[0].scene_description, "a boy in pajamas");
}

#[test]
fn events_serialize_with_a_tag() {
    let event = GenerationEvent::PageFailed {
        page_number: 3,
        reason: "rate limited".to_string(),
    };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["event"], "page_failed");
    assert_eq!(json["page_number"], 3);
    assert!(!event.is_terminal());

    let done = GenerationEvent::PageDone {
        page: NewStoryPage {
            storybook_id: Uuid::new_v4(),
            page_number: 2,
            act_title: ACT_TITLES[1].to_string(),
            text_content: "They set off.".to_string(),
            image_url: Some("https://cdn.example/a.png".to_string()),
            image_prompt: "a path through the woods".to_string(),
        },
    };
    assert_eq!(done.to_string(), "Page 2 of 4 complete!");

    assert!(
        GenerationEvent::Finished {
            title: "t".to_string(),
            failed_pages: 0
        }
        .is_terminal()
    );
}
