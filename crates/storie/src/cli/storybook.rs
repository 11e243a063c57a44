//! Storybook command handlers against the hosted backend.

use super::commands::{OutputFormat, RegenerateTarget, StoryArgs};
use storie::{
    ChannelObserver, GenerationEvent, JsonError, PageIssue, Storybook, StorybookService,
    StorybookWithPages, StorieResult, StoryRequest, TracingObserver, VisualStyle,
};
use strum::IntoEnumIterator;
use tracing::{error, info};
use uuid::Uuid;

impl From<&StoryArgs> for StoryRequest {
    fn from(args: &StoryArgs) -> Self {
        StoryRequest {
            prompt: args.prompt.clone(),
            child_name: args.child_name.clone(),
            visual_style: args.style,
        }
    }
}

/// Create a storybook and generate it.
///
/// Progress is streamed as it happens, or with `wait` the job runs in the
/// background while the status is polled.
pub async fn create(service: &StorybookService, story: &StoryArgs, wait: bool) -> StorieResult<()> {
    let user = service.current_user().await?;
    let storybook = service.create_storybook(user, &story.into()).await?;
    println!("Created storybook {}", storybook.id);

    if wait {
        let job_service = service.clone();
        let job_book = storybook.clone();
        tokio::spawn(async move {
            if let Err(e) = job_service.generate(&job_book, &TracingObserver).await {
                error!(error = %e, "Generation failed");
            }
        });
        let settled = service.wait_until_settled(storybook.id).await?;
        println!("Storybook {} is {}", settled.id, settled.status);
        return Ok(());
    }

    let (observer, mut events) = ChannelObserver::channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            print_event(&event);
        }
    });
    let result = service.generate(&storybook, &observer).await;
    drop(observer);
    let _ = printer.await;

    let outcome = result?;
    if outcome.failed_pages > 0 {
        println!(
            "{} page(s) have no illustration; use `storie regenerate <page-id> --image`",
            outcome.failed_pages
        );
    }
    Ok(())
}

fn print_event(event: &GenerationEvent) {
    match event {
        GenerationEvent::PageFailed { .. } | GenerationEvent::Failed { .. } => {
            eprintln!("{}", event)
        }
        _ => println!("{}", event),
    }
}

/// List the signed-in user's storybooks.
pub async fn list(service: &StorybookService, format: OutputFormat) -> StorieResult<()> {
    let user = service.current_user().await?;
    let books = service.repository().list_storybooks(Some(user)).await?;

    match format {
        OutputFormat::Json => println!("{}", to_json(&books)?),
        OutputFormat::Human => {
            for book in &books {
                print_summary(book);
            }
            println!("Total: {} storybooks", books.len());
        }
    }
    Ok(())
}

fn print_summary(book: &Storybook) {
    println!(
        "{}  {:<10} {:<20} {} (for {})",
        book.id,
        book.status.to_string(),
        book.visual_style.label(),
        book.title,
        book.child_name
    );
}

/// Storytime: print every page in reading order.
pub async fn show(service: &StorybookService, id: Uuid, format: OutputFormat) -> StorieResult<()> {
    let full = service.repository().get_storybook(id).await?;
    match format {
        OutputFormat::Json => println!("{}", to_json(&full)?),
        OutputFormat::Human => print_storytime(&full),
    }
    Ok(())
}

fn print_storytime(full: &StorybookWithPages) {
    let book = &full.storybook;
    println!("{}", book.title);
    println!("A {} story for {}", book.visual_style.label(), book.child_name);
    for page in &full.pages {
        println!("{:-<80}", "");
        println!("Page {} of {}: {}", page.page_number, full.pages.len(), page.act_title);
        println!();
        println!("{}", page.text_content);
        println!();
        match &page.image_url {
            Some(url) => println!("Illustration: {}", url),
            None => println!("Illustration missing (page id {})", page.id),
        }
    }
}

/// Director's Cut: regenerate one page.
pub async fn regenerate(
    service: &StorybookService,
    page_id: Uuid,
    target: RegenerateTarget,
    feedback: Option<String>,
) -> StorieResult<()> {
    let issue = if target.image {
        PageIssue::Image { feedback }
    } else {
        PageIssue::Text { feedback }
    };
    let page = service.regenerate_page(page_id, &issue).await?;

    println!("Page {} updated", page.page_number);
    if target.image {
        println!("Illustration: {}", page.image_url.as_deref().unwrap_or("none"));
    } else {
        println!("{}", page.text_content);
    }
    Ok(())
}

/// Delete a storybook.
pub async fn delete(service: &StorybookService, id: Uuid) -> StorieResult<()> {
    service.repository().delete_storybook(id).await?;
    info!(storybook_id = %id, "Storybook deleted");
    println!("Deleted storybook {}", id);
    Ok(())
}

/// Poll until the storybook settles, then print its status.
pub async fn wait(service: &StorybookService, id: Uuid) -> StorieResult<()> {
    let book = service.wait_until_settled(id).await?;
    println!("Storybook {} is {}", book.id, book.status);
    Ok(())
}

/// Print every visual style with its CLI id.
pub fn styles() {
    for style in VisualStyle::iter() {
        println!("{:<12} {}", style.to_string(), style.label());
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> StorieResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| JsonError::encode("output", e).into())
}

