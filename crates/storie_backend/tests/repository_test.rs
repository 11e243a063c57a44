//! StorybookRepository against the in-memory backend.

use std::sync::Arc;
use storie_backend::{InMemoryBackend, PAGES_TABLE, StorybookRepository};
use storie_core::{
    ACT_TITLES, NewStoryPage, NewStorybook, PageUpdate, StoryRequest, StorybookStatus,
    StorybookUpdate, VisualStyle,
};
use storie_error::{PersistenceErrorKind, StorieErrorKind};
use uuid::Uuid;

fn new_book(user_id: Uuid, prompt: &str) -> NewStorybook {
    let request = StoryRequest {
        prompt: prompt.to_string(),
        child_name: "Ava".to_string(),
        visual_style: VisualStyle::Watercolor,
    };
    NewStorybook::from_request(user_id, &request, 50)
}

fn pages(storybook_id: Uuid) -> Vec<NewStoryPage> {
    // Inserted out of order to exercise sorting
    [3u8, 1, 4, 2]
        .into_iter()
        .map(|n| NewStoryPage {
            storybook_id,
            page_number: n,
            act_title: ACT_TITLES[n as usize - 1].to_string(),
            text_content: format!("Text for page {}", n),
            image_url: (n != 3).then(|| format!("memory://story-images/{}.png", n)),
            image_prompt: format!("Scene {}", n),
        })
        .collect()
}

#[tokio::test]
async fn create_and_get_with_sorted_pages() -> anyhow::Result<()> {
    let backend = Arc::new(InMemoryBackend::new());
    let repo = StorybookRepository::new(backend.clone());
    let user = Uuid::new_v4();

    let book = repo.create_storybook(&new_book(user, "A fox who counts stars")).await?;
    assert_eq!(book.status, StorybookStatus::Generating);
    assert_eq!(book.user_id, user);
    assert_eq!(book.created_at, book.updated_at);

    let stored = repo.create_pages(&pages(book.id)).await?;
    assert_eq!(stored.len(), 4);

    let full = repo.get_storybook(book.id).await?;
    let numbers: Vec<u8> = full.pages.iter().map(|p| p.page_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);
    assert_eq!(full.pages[0].act_title, "Introduction");
    assert!(full.pages[2].image_url.is_none());
    assert_eq!(backend.row_count(PAGES_TABLE).await, 4);
    Ok(())
}

#[tokio::test]
async fn list_is_newest_first_and_scoped_to_user() -> anyhow::Result<()> {
    let repo = StorybookRepository::new(Arc::new(InMemoryBackend::new()));
    let user = Uuid::new_v4();
    let other = Uuid::new_v4();

    let first = repo.create_storybook(&new_book(user, "first")).await?;
    let second = repo.create_storybook(&new_book(user, "second")).await?;
    repo.create_storybook(&new_book(other, "someone else")).await?;

    let mine = repo.list_storybooks(Some(user)).await?;
    let ids: Vec<Uuid> = mine.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    assert_eq!(repo.list_storybooks(None).await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn status_and_title_updates() -> anyhow::Result<()> {
    let repo = StorybookRepository::new(Arc::new(InMemoryBackend::new()));
    let book = repo
        .create_storybook(&new_book(Uuid::new_v4(), "A very sleepy bear"))
        .await?;

    let updated = repo
        .update_storybook(
            book.id,
            &StorybookUpdate::finished("Bear's Big Yawn", StorybookStatus::Ready),
        )
        .await?;
    assert_eq!(updated.title, "Bear's Big Yawn");
    assert_eq!(updated.status, StorybookStatus::Ready);
    assert!(updated.updated_at >= book.updated_at);

    let errored = repo.update_status(book.id, StorybookStatus::Error).await?;
    assert_eq!(errored.title, "Bear's Big Yawn");
    assert_eq!(errored.status, StorybookStatus::Error);
    Ok(())
}

#[tokio::test]
async fn page_update_changes_only_the_given_field() -> anyhow::Result<()> {
    let repo = StorybookRepository::new(Arc::new(InMemoryBackend::new()));
    let book = repo.create_storybook(&new_book(Uuid::new_v4(), "owls")).await?;
    let stored = repo.create_pages(&pages(book.id)).await?;
    let page = stored.iter().find(|p| p.page_number == 2).unwrap().clone();

    let updated = repo
        .update_page(page.id, &PageUpdate::text("A brand new paragraph."))
        .await?;
    assert_eq!(updated.text_content, "A brand new paragraph.");
    assert_eq!(updated.image_url, page.image_url);
    assert_eq!(updated.image_prompt, page.image_prompt);
    assert_eq!(updated.act_title, page.act_title);

    let updated = repo
        .update_page(page.id, &PageUpdate::image("memory://story-images/new.png"))
        .await?;
    assert_eq!(updated.text_content, "A brand new paragraph.");
    assert_eq!(
        updated.image_url.as_deref(),
        Some("memory://story-images/new.png")
    );
    Ok(())
}

#[tokio::test]
async fn delete_removes_pages_too() -> anyhow::Result<()> {
    let backend = Arc::new(InMemoryBackend::new());
    let repo = StorybookRepository::new(backend.clone());
    let book = repo.create_storybook(&new_book(Uuid::new_v4(), "ducks")).await?;
    repo.create_pages(&pages(book.id)).await?;

    repo.delete_storybook(book.id).await?;

    assert!(repo.find_storybook(book.id).await?.is_none());
    assert_eq!(backend.row_count(PAGES_TABLE).await, 0);
    Ok(())
}

#[tokio::test]
async fn missing_rows_are_not_found() {
    let repo = StorybookRepository::new(Arc::new(InMemoryBackend::new()));
    let id = Uuid::new_v4();

    for err in [
        repo.get_storybook(id).await.unwrap_err(),
        repo.delete_storybook(id).await.unwrap_err(),
        repo.update_page(id, &PageUpdate::text("x")).await.unwrap_err(),
    ] {
        match err.kind() {
            StorieErrorKind::Persistence(e) => {
                assert!(matches!(e.kind, PersistenceErrorKind::NotFound { .. }))
            }
            other => panic!("expected not found, got {}", other),
        }
    }
}
