//! Filesystem-based blob storage implementation.
//!
//! Blobs are stored by content hash, so uploading the same bytes twice
//! yields the same key and a single file on disk.

use crate::ContentType;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use storie_error::{StorageError, StorageErrorKind, StorieResult};
use storie_interface::{BlobStore, StoredBlob};

/// Filesystem blob store.
///
/// Layout: `{base_path}/{bucket}/{hash[0:2]}/{hash[2:4]}/{hash}.{ext}`
///
/// The returned key is the path below the bucket directory; the URL is the
/// public base joined with `{bucket}/{key}`. Without an explicit public base,
/// URLs use the `file://` scheme.
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    base_path: PathBuf,
    public_base: String,
}

impl FileSystemStorage {
    /// Create a new filesystem blob store.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> StorieResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem storage");
        let public_base = format!("file://{}", base_path.display());
        Ok(Self {
            base_path,
            public_base,
        })
    }

    /// Serve URLs from `public_base` (e.g. a static file server) instead of `file://`.
    pub fn with_public_base(mut self, public_base: impl Into<String>) -> Self {
        self.public_base = public_base.into();
        self
    }

    /// Root directory of the store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Read a stored blob back.
    #[tracing::instrument(skip(self))]
    pub async fn read(&self, bucket: &str, key: &str) -> StorieResult<Vec<u8>> {
        let path = self.base_path.join(bucket).join(key);
        let data = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(format!("{}/{}", bucket, key)))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;
        Ok(data)
    }

    fn compute_hash(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }

    fn key_for(hash: &str, content_type: ContentType) -> String {
        format!(
            "{}/{}/{}.{}",
            &hash[0..2],
            &hash[2..4],
            hash,
            content_type.extension()
        )
    }

    fn url_for(&self, bucket: &str, key: &str) -> String {
        format!("{}/{}/{}", self.public_base.trim_end_matches('/'), bucket, key)
    }
}

#[async_trait::async_trait]
impl BlobStore for FileSystemStorage {
    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
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

        let hash = Self::compute_hash(data);
        let key = Self::key_for(&hash, ContentType::from_mime(content_type));
        let path = self.base_path.join(bucket).join(&key);
        let blob = StoredBlob {
            url: self.url_for(bucket, &key),
            key,
        };

        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::debug!(hash = %hash, path = %path.display(), "Blob already stored");
            return Ok(blob);
        }

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        // Temp file + rename keeps readers from seeing partial writes
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::info!(
            hash = %hash,
            path = %path.display(),
            size = data.len(),
            content_type,
            "Stored blob"
        );

        Ok(blob)
    }
}
