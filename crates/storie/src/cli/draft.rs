//! Local drafting: run the pipeline without the hosted backend.

use super::commands::StoryArgs;
use std::path::Path;
use std::sync::Arc;
use storie::{
    FileSystemStorage, JsonError, StorieConfig, StorieResult, TracingObserver, build_pipeline,
};
use tracing::info;
use uuid::Uuid;

/// Generate a storybook into `out` and print it as JSON.
///
/// Illustrations land in a content-addressed tree under `out`; nothing is
/// persisted to the backend, so only the model API keys are required.
pub async fn draft(config: &StorieConfig, story: &StoryArgs, out: &Path) -> StorieResult<()> {
    let storage = Arc::new(FileSystemStorage::new(out)?);
    let pipeline = build_pipeline(config, storage)?;

    let draft_id = Uuid::new_v4();
    let output = pipeline.run(draft_id, &story.into(), &TracingObserver).await?;
    info!(
        draft_id = %draft_id,
        out = %out.display(),
        failed_pages = output.failed_pages(),
        "Draft complete"
    );

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| JsonError::encode("draft", e))?;
    println!("{}", json);
    Ok(())
}
