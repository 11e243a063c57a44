//! Typed storybook and page operations.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use storie_core::{
    NewStoryPage, NewStorybook, PageUpdate, StoryPage, Storybook, StorybookStatus,
    StorybookUpdate, StorybookWithPages,
};
use storie_error::{JsonError, PersistenceError, PersistenceErrorKind, StorieResult};
use storie_interface::{Backend, Direction, Filter, Query};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Table holding storybook rows.
pub const STORYBOOKS_TABLE: &str = "storybooks";

/// Table holding page rows.
pub const PAGES_TABLE: &str = "story_pages";

/// Storybook persistence over any [`Backend`].
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use storie_backend::{InMemoryBackend, StorybookRepository};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let repo = StorybookRepository::new(Arc::new(InMemoryBackend::new()));
/// let books = repo.list_storybooks(None).await?;
/// assert!(books.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct StorybookRepository {
    backend: Arc<dyn Backend>,
}

impl std::fmt::Debug for StorybookRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorybookRepository").finish_non_exhaustive()
    }
}

impl StorybookRepository {
    /// Wrap a backend.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// The underlying backend.
    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    /// Insert a storybook and return the stored row.
    #[instrument(skip(self, book), fields(user_id = %book.user_id))]
    pub async fn create_storybook(&self, book: &NewStorybook) -> StorieResult<Storybook> {
        let rows = self
            .backend
            .insert(STORYBOOKS_TABLE, vec![to_row(book)?])
            .await?;
        let book: Storybook = single(STORYBOOKS_TABLE, rows, "new")?;
        info!(storybook_id = %book.id, "Created storybook");
        Ok(book)
    }

    /// Fetch a storybook row without its pages.
    #[instrument(skip(self))]
    pub async fn find_storybook(&self, id: Uuid) -> StorieResult<Option<Storybook>> {
        let rows = self
            .backend
            .select(STORYBOOKS_TABLE, &Query::new().eq("id", id).limit(1))
            .await?;
        rows.into_iter()
            .next()
            .map(|row| from_row(STORYBOOKS_TABLE, row))
            .transpose()
    }

    /// Fetch a storybook with its pages sorted by page number.
    #[instrument(skip(self))]
    pub async fn get_storybook(&self, id: Uuid) -> StorieResult<StorybookWithPages> {
        let storybook = self
            .find_storybook(id)
            .await?
            .ok_or_else(|| not_found(STORYBOOKS_TABLE, id))?;
        let pages = self.pages_for(id).await?;
        Ok(StorybookWithPages { storybook, pages })
    }

    /// Pages of a storybook, sorted by page number.
    #[instrument(skip(self))]
    pub async fn pages_for(&self, storybook_id: Uuid) -> StorieResult<Vec<StoryPage>> {
        let query = Query::new()
            .eq("storybook_id", storybook_id)
            .order_by("page_number", Direction::Asc);
        let rows = self.backend.select(PAGES_TABLE, &query).await?;
        let mut pages = rows
            .into_iter()
            .map(|row| from_row::<StoryPage>(PAGES_TABLE, row))
            .collect::<StorieResult<Vec<_>>>()?;
        pages.sort_by_key(|p| p.page_number);
        Ok(pages)
    }

    /// Storybooks, newest first; restricted to `user_id` when given.
    #[instrument(skip(self))]
    pub async fn list_storybooks(&self, user_id: Option<Uuid>) -> StorieResult<Vec<Storybook>> {
        let mut query = Query::new().order_by("created_at", Direction::Desc);
        if let Some(user_id) = user_id {
            query = query.eq("user_id", user_id);
        }
        let rows = self.backend.select(STORYBOOKS_TABLE, &query).await?;
        rows.into_iter()
            .map(|row| from_row(STORYBOOKS_TABLE, row))
            .collect()
    }

    /// Apply a partial update to a storybook and bump `updated_at`.
    #[instrument(skip(self, update))]
    pub async fn update_storybook(
        &self,
        id: Uuid,
        update: &StorybookUpdate,
    ) -> StorieResult<Storybook> {
        let rows = self
            .backend
            .update(STORYBOOKS_TABLE, &[eq_id(id)], with_timestamp(to_row(update)?))
            .await?;
        single(STORYBOOKS_TABLE, rows, id)
    }

    /// Set a storybook's status.
    pub async fn update_status(&self, id: Uuid, status: StorybookStatus) -> StorieResult<Storybook> {
        debug!(storybook_id = %id, %status, "Updating status");
        self.update_storybook(id, &StorybookUpdate::status(status))
            .await
    }

    /// Insert pages in one batch and return the stored rows.
    #[instrument(skip(self, pages), fields(count = pages.len()))]
    pub async fn create_pages(&self, pages: &[NewStoryPage]) -> StorieResult<Vec<StoryPage>> {
        let rows = pages.iter().map(to_row).collect::<StorieResult<Vec<_>>>()?;
        let stored = self.backend.insert(PAGES_TABLE, rows).await?;
        stored
            .into_iter()
            .map(|row| from_row(PAGES_TABLE, row))
            .collect()
    }

    /// Fetch a single page.
    #[instrument(skip(self))]
    pub async fn get_page(&self, page_id: Uuid) -> StorieResult<StoryPage> {
        let rows = self
            .backend
            .select(PAGES_TABLE, &Query::new().eq("id", page_id).limit(1))
            .await?;
        single(PAGES_TABLE, rows, page_id)
    }

    /// Apply a partial update to a page and bump `updated_at`.
    #[instrument(skip(self, update))]
    pub async fn update_page(&self, page_id: Uuid, update: &PageUpdate) -> StorieResult<StoryPage> {
        let rows = self
            .backend
            .update(PAGES_TABLE, &[eq_id(page_id)], with_timestamp(to_row(update)?))
            .await?;
        single(PAGES_TABLE, rows, page_id)
    }

    /// Delete a storybook and its pages.
    #[instrument(skip(self))]
    pub async fn delete_storybook(&self, id: Uuid) -> StorieResult<()> {
        let pages = self
            .backend
            .delete(PAGES_TABLE, &[Filter::Eq("storybook_id".to_string(), id.to_string())])
            .await?;
        let books = self.backend.delete(STORYBOOKS_TABLE, &[eq_id(id)]).await?;
        if books == 0 {
            return Err(not_found(STORYBOOKS_TABLE, id).into());
        }
        info!(storybook_id = %id, pages, "Deleted storybook");
        Ok(())
    }
}

fn eq_id(id: Uuid) -> Filter {
    Filter::Eq("id".to_string(), id.to_string())
}

#[track_caller]
fn not_found(table: &str, id: impl ToString) -> PersistenceError {
    PersistenceError::new(PersistenceErrorKind::NotFound {
        table: table.to_string(),
        id: id.to_string(),
    })
}

fn to_row<T: Serialize>(value: &T) -> StorieResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| JsonError::encode("row", e).into())
}

fn with_timestamp(mut patch: Value) -> Value {
    if let Value::Object(fields) = &mut patch {
        fields.insert(
            "updated_at".to_string(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)),
        );
    }
    patch
}

fn from_row<T: DeserializeOwned>(table: &str, row: Value) -> StorieResult<T> {
    serde_json::from_value(row).map_err(|e| {
        PersistenceError::new(PersistenceErrorKind::RowConversion {
            table: table.to_string(),
            message: e.to_string(),
        })
        .into()
    })
}

fn single<T: DeserializeOwned>(table: &str, rows: Vec<Value>, id: impl ToString) -> StorieResult<T> {
    let row = rows
        .into_iter()
        .next()
        .ok_or_else(|| not_found(table, id))?;
    from_row(table, row)
}
