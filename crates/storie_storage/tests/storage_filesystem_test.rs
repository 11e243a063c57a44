//! Tests for the filesystem blob store.

use storie_error::{StorageErrorKind, StorieErrorKind};
use storie_interface::BlobStore;
use storie_storage::{ContentType, FileSystemStorage};
use tempfile::TempDir;

#[tokio::test]
async fn test_upload_and_read() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = FileSystemStorage::new(temp_dir.path())?;

    let data = b"\x89PNG fake image bytes";
    let blob = storage.upload("story-images", data, "image/png").await?;

    assert!(blob.key.ends_with(".png"));
    assert!(blob.url.starts_with("file://"));
    assert!(blob.url.ends_with(&format!("story-images/{}", blob.key)));

    let read = storage.read("story-images", &blob.key).await?;
    assert_eq!(read, data);
    Ok(())
}

#[tokio::test]
async fn test_deduplication() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = FileSystemStorage::new(temp_dir.path())?;

    let first = storage.upload("story-images", b"same", "image/png").await?;
    let second = storage.upload("story-images", b"same", "image/png").await?;
    assert_eq!(first, second);

    let other = storage.upload("story-images", b"different", "image/png").await?;
    assert_ne!(first.key, other.key);

    let path = temp_dir.path().join("story-images").join(&first.key);
    assert!(path.exists());
    assert!(!path.with_extension("tmp").exists());
    Ok(())
}

#[tokio::test]
async fn test_public_base_url() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let storage =
        FileSystemStorage::new(temp_dir.path())?.with_public_base("http://localhost:8080/");

    let blob = storage.upload("pages", b"img", "image/jpeg").await?;
    assert_eq!(blob.url, format!("http://localhost:8080/pages/{}", blob.key));
    assert!(blob.key.ends_with(".jpg"));
    Ok(())
}

#[tokio::test]
async fn test_empty_upload_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileSystemStorage::new(temp_dir.path()).unwrap();

    let err = storage.upload("story-images", b"", "image/png").await.unwrap_err();
    match err.kind() {
        StorieErrorKind::Storage(e) => {
            assert!(matches!(e.kind, StorageErrorKind::UploadRejected(_)))
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_read_missing_blob() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileSystemStorage::new(temp_dir.path()).unwrap();

    let err = storage.read("story-images", "ab/cd/nope.png").await.unwrap_err();
    match err.kind() {
        StorieErrorKind::Storage(e) => assert!(matches!(e.kind, StorageErrorKind::NotFound(_))),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_content_type_mapping() {
    assert_eq!(ContentType::from_mime("image/png"), ContentType::Png);
    assert_eq!(ContentType::from_mime("IMAGE/JPG"), ContentType::Jpeg);
    assert_eq!(ContentType::from_mime("text/plain"), ContentType::Binary);
    assert_eq!(ContentType::Png.to_string(), "image/png");
    assert_eq!(ContentType::Binary.extension(), "bin");
}
