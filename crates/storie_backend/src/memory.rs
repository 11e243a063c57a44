//! Process-local backend.

use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use storie_core::Session;
use storie_error::{
    PersistenceError, PersistenceErrorKind, StorageError, StorageErrorKind, StorieResult,
};
use storie_interface::{BlobStore, Direction, Filter, Query, RowStore, SessionStore, StoredBlob};
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

#[derive(Debug, Default)]
struct State {
    tables: HashMap<String, Vec<Value>>,
    blobs: HashMap<String, Vec<u8>>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl State {
    /// Strictly increasing timestamps, so `created_at` ordering is total.
    fn next_timestamp(&mut self) -> String {
        let mut now = Utc::now();
        if let Some(last) = self.last_timestamp {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        self.last_timestamp = Some(now);
        now.to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

/// Backend holding tables and blobs in memory.
///
/// Inserted rows get an `id` (UUID v4) and `created_at`/`updated_at`
/// (RFC 3339, microseconds) unless they already carry them. Blobs are
/// addressed as `memory://{bucket}/{key}`.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    state: RwLock<State>,
    session: Option<Session>,
}

impl InMemoryBackend {
    /// Empty backend with a signed-in anonymous user.
    pub fn new() -> Self {
        Self::default().with_session(Session {
            user_id: Uuid::new_v4(),
            email: None,
            access_token: None,
        })
    }

    /// Replace the reported session.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Report that nobody is signed in.
    pub fn without_session(mut self) -> Self {
        self.session = None;
        self
    }

    /// Bytes of an uploaded blob, if present.
    pub async fn blob(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.state
            .read()
            .await
            .blobs
            .get(&format!("{}/{}", bucket, key))
            .cloned()
    }

    /// Number of rows currently in `table`.
    pub async fn row_count(&self, table: &str) -> usize {
        self.state
            .read()
            .await
            .tables
            .get(table)
            .map_or(0, Vec::len)
    }
}

fn matches_all(filters: &[Filter], row: &Value) -> bool {
    filters.iter().all(|f| f.matches(row))
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        // Nulls sort last
        (None | Some(Value::Null), _) => Ordering::Greater,
        (_, None | Some(Value::Null)) => Ordering::Less,
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

#[async_trait]
impl SessionStore for InMemoryBackend {
    async fn current_session(&self) -> StorieResult<Option<Session>> {
        Ok(self.session.clone())
    }
}

#[async_trait]
impl RowStore for InMemoryBackend {
    #[instrument(skip(self, rows), fields(count = rows.len()))]
    async fn insert(&self, table: &str, rows: Vec<Value>) -> StorieResult<Vec<Value>> {
        let mut state = self.state.write().await;
        let mut inserted = Vec::with_capacity(rows.len());

        for row in rows {
            let Value::Object(mut fields) = row else {
                return Err(PersistenceError::new(PersistenceErrorKind::Insert {
                    table: table.to_string(),
                    message: "row is not a JSON object".to_string(),
                })
                .into());
            };

            let now = state.next_timestamp();
            fields
                .entry("id")
                .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
            fields
                .entry("created_at")
                .or_insert_with(|| Value::String(now.clone()));
            fields
                .entry("updated_at")
                .or_insert_with(|| Value::String(now));
            inserted.push(Value::Object(fields));
        }

        state
            .tables
            .entry(table.to_string())
            .or_default()
            .extend(inserted.iter().cloned());

        debug!(table, count = inserted.len(), "Inserted rows");
        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn select(&self, table: &str, query: &Query) -> StorieResult<Vec<Value>> {
        let state = self.state.read().await;
        let mut rows: Vec<Value> = state
            .tables
            .get(table)
            .map(|rows| rows.iter().filter(|r| query.matches(r)).cloned().collect())
            .unwrap_or_default();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ordering = compare_values(a.get(&order.column), b.get(&order.column));
                match order.direction {
                    Direction::Asc => ordering,
                    Direction::Desc => ordering.reverse(),
                }
            });
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    #[instrument(skip(self, patch))]
    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        patch: Value,
    ) -> StorieResult<Vec<Value>> {
        let Value::Object(patch) = patch else {
            return Err(PersistenceError::new(PersistenceErrorKind::Update {
                table: table.to_string(),
                message: "patch is not a JSON object".to_string(),
            })
            .into());
        };

        let mut state = self.state.write().await;
        let mut updated = Vec::new();
        if let Some(rows) = state.tables.get_mut(table) {
            for row in rows.iter_mut().filter(|r| matches_all(filters, r)) {
                if let Value::Object(fields) = row {
                    merge(fields, &patch);
                }
                updated.push(row.clone());
            }
        }

        debug!(table, count = updated.len(), "Updated rows");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, table: &str, filters: &[Filter]) -> StorieResult<usize> {
        let mut state = self.state.write().await;
        let removed = match state.tables.get_mut(table) {
            Some(rows) => {
                let before = rows.len();
                rows.retain(|r| !matches_all(filters, r));
                before - rows.len()
            }
            None => 0,
        };
        debug!(table, removed, "Deleted rows");
        Ok(removed)
    }
}

fn merge(fields: &mut Map<String, Value>, patch: &Map<String, Value>) {
    for (key, value) in patch {
        fields.insert(key.clone(), value.clone());
    }
}

#[async_trait]
impl BlobStore for InMemoryBackend {
    #[instrument(skip(self, data), fields(size = data.len()))]
    async fn upload(
        &self,
        bucket: &str,
        data: &[u8],
        content_type: &str,
    ) -> StorieResult<StoredBlob> {
        if data.is_empty() {
            return Err(StorageError::new(StorageErrorKind::UploadRejected(
                "refusing to store an empty blob".to_string(),
            ))
            .into());
        }

        let extension = content_type.rsplit('/').next().unwrap_or("bin");
        let key = format!("{}.{}", Uuid::new_v4(), extension);
        self.state
            .write()
            .await
            .blobs
            .insert(format!("{}/{}", bucket, key), data.to_vec());

        Ok(StoredBlob {
            url: format!("memory://{}/{}", bucket, key),
            key,
        })
    }
}
