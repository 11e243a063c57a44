//! Content-addressable local blob storage for Storie.
//!
//! [`FileSystemStorage`] implements [`storie_interface::BlobStore`] on the
//! local filesystem. It backs offline drafts and tests; production uploads go
//! to the hosted backend's storage API instead.
//!
//! # Example
//!
//! ```no_run
//! use storie_interface::BlobStore;
//! use storie_storage::FileSystemStorage;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = FileSystemStorage::new("/tmp/storie")?;
//! let blob = storage.upload("story-images", b"\x89PNG...", "image/png").await?;
//! println!("stored at {}", blob.url);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod content_type;
mod filesystem;

pub use content_type::ContentType;
pub use filesystem::FileSystemStorage;
