//! Test utilities for generation tests.
//!
//! - [`StubTextDriver`] answers outline, act and rewrite prompts
//!   deterministically
//! - [`StubImageDriver`] returns a fixed PNG payload, failing on chosen calls
//! - [`PageInsertFailure`] wraps the in-memory backend and rejects page inserts

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use storie_backend::{InMemoryBackend, PAGES_TABLE, StorybookRepository};
use storie_core::{
    ACT_TITLES, GenerateRequest, GenerateResponse, ImagePayload, ImageRequest, Role, Session,
    StorybookConfig,
};
use storie_error::{PersistenceError, PersistenceErrorKind, StorieResult, UpstreamError};
use storie_generation::{ImageGenerator, StorybookPipeline, StorybookService, TextGenerator};
use storie_interface::{
    Backend, BlobStore, Filter, ImageDriver, Query, RowStore, SessionStore, StoredBlob, TextDriver,
};

/// Base64 of the bytes `hello`, with a data URI header.
#[allow(dead_code)]
pub const IMAGE_PAYLOAD: &str = "data:image/png;base64,aGVsbG8=";

/// A well-formed outline for `title`, wrapped in prose and a json fence.
#[allow(dead_code)]
pub fn outline_response(title: &str) -> String {
    let acts: Vec<Value> = ACT_TITLES
        .iter()
        .enumerate()
        .map(|(i, act_title)| {
            json!({
                "actNumber": i + 1,
                "actTitle": act_title,
                "sceneDescription": format!("Scene {} of {}", i + 1, title),
                "textContent": format!("Page {} text.", i + 1),
            })
        })
        .collect();
    format!(
        "Here is your story!\n```json\n{}\n```\nEnjoy.",
        json!({ "title": title, "acts": acts })
    )
}

/// Text driver that answers by prompt kind and records every request.
pub struct StubTextDriver {
    outline: String,
    requests: Mutex<Vec<GenerateRequest>>,
}

#[allow(dead_code)]
impl StubTextDriver {
    pub fn new(outline: impl Into<String>) -> Self {
        Self {
            outline: outline.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// User messages of every request, in order.
    pub fn user_messages(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .flat_map(|r| r.messages().clone())
            .filter(|m| m.role == Role::User)
            .map(|m| m.content)
            .collect()
    }
}

#[async_trait]
impl TextDriver for StubTextDriver {
    async fn generate(&self, req: &GenerateRequest) -> StorieResult<GenerateResponse> {
        self.requests.lock().unwrap().push(req.clone());
        let system = req
            .messages()
            .iter()
            .find(|m| m.role == Role::System)
            .map(|m| m.content.clone())
            .unwrap_or_default();

        let text = if system.contains("4-act story structure") {
            self.outline.clone()
        } else if system.contains("Rewrite") {
            "  Rewritten with feedback.  ".to_string()
        } else {
            let act = ACT_TITLES
                .iter()
                .find(|t| system.contains(&format!("({})", t)))
                .copied()
                .unwrap_or("unknown");
            format!("\nFresh text for {}.\n", act)
        };
        Ok(GenerateResponse::new(text, None))
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }

    fn model_name(&self) -> &str {
        "stub-model"
    }
}

/// Image driver returning [`IMAGE_PAYLOAD`], except on the listed calls.
pub struct StubImageDriver {
    fail_on: HashSet<usize>,
    prompts: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl StubImageDriver {
    pub fn new() -> Self {
        Self::failing_on(&[])
    }

    /// Fail the given 1-based calls with an exhausted 429.
    pub fn failing_on(calls: &[usize]) -> Self {
        Self {
            fail_on: calls.iter().copied().collect(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageDriver for StubImageDriver {
    async fn generate_image(&self, req: &ImageRequest) -> StorieResult<ImagePayload> {
        let call = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(req.prompt().clone());
            prompts.len()
        };
        if self.fail_on.contains(&call) {
            return Err(UpstreamError::new("stub", 429, "rate limited").into());
        }
        Ok(ImagePayload {
            outputs: vec![IMAGE_PAYLOAD.to_string()],
        })
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }
}

/// In-memory backend whose page inserts always fail.
#[allow(dead_code)]
pub struct PageInsertFailure {
    inner: InMemoryBackend,
}

#[allow(dead_code)]
impl PageInsertFailure {
    pub fn new() -> Self {
        Self {
            inner: InMemoryBackend::new(),
        }
    }
}

#[async_trait]
impl SessionStore for PageInsertFailure {
    async fn current_session(&self) -> StorieResult<Option<Session>> {
        self.inner.current_session().await
    }
}

#[async_trait]
impl RowStore for PageInsertFailure {
    async fn insert(&self, table: &str, rows: Vec<Value>) -> StorieResult<Vec<Value>> {
        if table == PAGES_TABLE {
            return Err(PersistenceError::new(PersistenceErrorKind::Insert {
                table: table.to_string(),
                message: "connection reset".to_string(),
            })
            .into());
        }
        self.inner.insert(table, rows).await
    }

    async fn select(&self, table: &str, query: &Query) -> StorieResult<Vec<Value>> {
        self.inner.select(table, query).await
    }

    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        patch: Value,
    ) -> StorieResult<Vec<Value>> {
        self.inner.update(table, filters, patch).await
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> StorieResult<usize> {
        self.inner.delete(table, filters).await
    }
}

#[async_trait]
impl BlobStore for PageInsertFailure {
    async fn upload(
        &self,
        bucket: &str,
        data: &[u8],
        content_type: &str,
    ) -> StorieResult<StoredBlob> {
        self.inner.upload(bucket, data, content_type).await
    }
}

/// Service wired to the given drivers and backend.
#[allow(dead_code)]
pub fn service<B: Backend + 'static>(
    text: Arc<StubTextDriver>,
    image: Arc<StubImageDriver>,
    backend: Arc<B>,
) -> StorybookService {
    let pipeline = StorybookPipeline::new(
        TextGenerator::new(text),
        ImageGenerator::new(image, backend.clone(), "story-images"),
    );
    StorybookService::new(
        pipeline,
        StorybookRepository::new(backend),
        &StorybookConfig::default(),
    )
}
