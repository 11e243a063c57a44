//! StorybookPipeline against stub drivers and the in-memory backend.

mod test_utils;

use std::sync::Arc;
use storie_backend::InMemoryBackend;
use storie_core::{ACT_TITLES, GenerationEvent, StoryRequest, VisualStyle};
use storie_error::StorieErrorKind;
use storie_generation::prompts::NO_TEXT_INSTRUCTION;
use storie_generation::{ChannelObserver, ImageGenerator, StorybookPipeline, TextGenerator};
use test_utils::{StubImageDriver, StubTextDriver, outline_response};
use tokio::sync::mpsc::UnboundedReceiver;
use uuid::Uuid;

fn request() -> StoryRequest {
    StoryRequest {
        prompt: "A bunny who is afraid of the dark".to_string(),
        child_name: "Leo".to_string(),
        visual_style: VisualStyle::Claymation,
    }
}

fn pipeline(
    text: Arc<StubTextDriver>,
    image: Arc<StubImageDriver>,
    backend: Arc<InMemoryBackend>,
) -> StorybookPipeline {
    StorybookPipeline::new(
        TextGenerator::new(text),
        ImageGenerator::new(image, backend, "story-images"),
    )
}

fn drain(receiver: &mut UnboundedReceiver<GenerationEvent>) -> Vec<GenerationEvent> {
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn four_pages_in_act_order() -> anyhow::Result<()> {
    let text = Arc::new(StubTextDriver::new(outline_response("Bunny and the Moon")));
    let image = Arc::new(StubImageDriver::new());
    let backend = Arc::new(InMemoryBackend::new());
    let (observer, mut events) = ChannelObserver::channel();
    let id = Uuid::new_v4();

    let output = pipeline(text.clone(), image.clone(), backend.clone())
        .run(id, &request(), &observer)
        .await?;

    assert_eq!(output.title, "Bunny and the Moon");
    assert_eq!(output.pages.len(), 4);
    for (i, page) in output.pages.iter().enumerate() {
        assert_eq!(page.storybook_id, id);
        assert_eq!(page.page_number as usize, i + 1);
        assert_eq!(page.act_title, ACT_TITLES[i]);
        assert_eq!(page.image_prompt, format!("Scene {} of Bunny and the Moon", i + 1));
        assert!(page.image_url.as_deref().unwrap().starts_with("memory://story-images/"));
    }
    assert_eq!(output.failed_pages(), 0);
    assert_eq!(text.call_count(), 1);

    let events = drain(&mut events);
    assert_eq!(events.first(), Some(&GenerationEvent::Structuring));
    assert_eq!(
        events[1],
        GenerationEvent::StructureReady {
            title: "Bunny and the Moon".to_string(),
            act_count: 4,
        }
    );
    let done = events
        .iter()
        .filter(|e| matches!(e, GenerationEvent::PageDone { .. }))
        .count();
    assert_eq!(done, 4);
    assert!(!events.iter().any(|e| e.is_terminal()));
    Ok(())
}

#[tokio::test]
async fn images_are_illustrated_sequentially_with_style() -> anyhow::Result<()> {
    let text = Arc::new(StubTextDriver::new(outline_response("Night Lights")));
    let image = Arc::new(StubImageDriver::new());
    let backend = Arc::new(InMemoryBackend::new());

    pipeline(text, image.clone(), backend)
        .run(Uuid::new_v4(), &request(), &storie_generation::NoopObserver)
        .await?;

    let prompts = image.prompts();
    assert_eq!(prompts.len(), 4);
    for (i, prompt) in prompts.iter().enumerate() {
        assert!(prompt.contains("claymation style"));
        assert!(prompt.contains(&format!("Scene {} of Night Lights", i + 1)));
        assert!(prompt.ends_with(NO_TEXT_INSTRUCTION));
    }
    Ok(())
}

#[tokio::test]
async fn outline_without_json_fails_before_any_page() {
    let text = Arc::new(StubTextDriver::new("Once upon a time there was no JSON."));
    let image = Arc::new(StubImageDriver::new());
    let backend = Arc::new(InMemoryBackend::new());
    let (observer, mut events) = ChannelObserver::channel();

    let err = pipeline(text, image.clone(), backend)
        .run(Uuid::new_v4(), &request(), &observer)
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), StorieErrorKind::Parse(_)));
    assert!(image.prompts().is_empty());

    let events = drain(&mut events);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], GenerationEvent::Structuring);
    assert!(matches!(events[1], GenerationEvent::Failed { .. }));
}

#[tokio::test]
async fn image_failure_on_act_three_keeps_the_page() -> anyhow::Result<()> {
    let text = Arc::new(StubTextDriver::new(outline_response("Leo's Lantern")));
    let image = Arc::new(StubImageDriver::failing_on(&[3]));
    let backend = Arc::new(InMemoryBackend::new());
    let (observer, mut events) = ChannelObserver::channel();

    let output = pipeline(text, image.clone(), backend)
        .run(Uuid::new_v4(), &request(), &observer)
        .await?;

    assert_eq!(output.pages.len(), 4);
    assert!(output.pages[2].image_url.is_none());
    assert_eq!(output.pages[2].text_content, "Page 3 text.");
    assert_eq!(output.pages[2].act_title, "The Gentle Conflict");
    for i in [0, 1, 3] {
        assert!(output.pages[i].image_url.is_some());
    }
    assert_eq!(output.failed_pages(), 1);
    assert_eq!(image.prompts().len(), 4);
    assert_eq!(
        output.finished_event(),
        GenerationEvent::Finished {
            title: "Leo's Lantern".to_string(),
            failed_pages: 1,
        }
    );

    let failures: Vec<_> = drain(&mut events)
        .into_iter()
        .filter_map(|e| match e {
            GenerationEvent::PageFailed { page_number, .. } => Some(page_number),
            _ => None,
        })
        .collect();
    assert_eq!(failures, vec![3]);
    Ok(())
}

#[tokio::test]
async fn uploaded_images_hold_decoded_bytes() -> anyhow::Result<()> {
    let text = Arc::new(StubTextDriver::new(outline_response("Bytes")));
    let image = Arc::new(StubImageDriver::new());
    let backend = Arc::new(InMemoryBackend::new());

    let output = pipeline(text, image, backend.clone())
        .run(Uuid::new_v4(), &request(), &storie_generation::NoopObserver)
        .await?;

    let url = output.pages[0].image_url.clone().unwrap();
    let key = url.trim_start_matches("memory://story-images/");
    assert_eq!(backend.blob("story-images", key).await, Some(b"hello".to_vec()));
    Ok(())
}
