//! Hosted backend capabilities.

use crate::{Filter, Query};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use storie_core::Session;
use storie_error::StorieResult;

/// Reports the signed-in user.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Current session, or `None` when nobody is signed in.
    async fn current_session(&self) -> StorieResult<Option<Session>>;
}

/// Row CRUD over named tables, with rows as JSON objects.
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Insert rows and return them as stored (with generated columns).
    async fn insert(&self, table: &str, rows: Vec<Value>) -> StorieResult<Vec<Value>>;

    /// Select rows matching the query.
    async fn select(&self, table: &str, query: &Query) -> StorieResult<Vec<Value>>;

    /// Merge `patch` into every row matching all filters; returns the updated rows.
    async fn update(&self, table: &str, filters: &[Filter], patch: Value)
    -> StorieResult<Vec<Value>>;

    /// Delete every row matching all filters; returns the number removed.
    async fn delete(&self, table: &str, filters: &[Filter]) -> StorieResult<usize>;
}

/// Location of an uploaded object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoredBlob {
    /// Public URL
    pub url: String,
    /// Storage key within the bucket
    pub key: String,
}

/// Object storage.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload bytes to `bucket` and return the public location.
    async fn upload(&self, bucket: &str, data: &[u8], content_type: &str)
    -> StorieResult<StoredBlob>;
}

/// A complete backend: sessions, rows and blobs.
pub trait Backend: SessionStore + RowStore + BlobStore {}

impl<T> Backend for T where T: SessionStore + RowStore + BlobStore {}
