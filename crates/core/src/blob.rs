//! Blob storage seam for uploaded design images.
//!
//! The engine needs `store(name, bytes) -> url` and `delete(key)` for blobs
//! whose database rows never got written. [`LocalBlobStore`] writes under a
//! media root and serves from a URL prefix.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{Datelike, Utc};

use crate::design::image_extension;

#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    #[error("Unsupported file type: {0}")]
    UnsupportedExtension(String),

    #[error("Blob storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where a stored blob ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    /// Path relative to the store root, with `/` separators.
    pub key: String,
    /// Publicly retrievable URL.
    pub url: String,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn store(&self, file_name: &str, bytes: &[u8]) -> Result<StoredBlob, BlobError>;

    /// Remove a stored blob. A key that is already gone is not an error.
    async fn delete(&self, key: &str) -> Result<(), BlobError>;
}

/// Filesystem-backed store: `<root>/designs/YYYY/MM/DD/<uuid>.<ext>`.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    base_url: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            root: root.into(),
            base_url,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_for(ext: &str) -> String {
        let today = Utc::now().date_naive();
        format!(
            "designs/{:04}/{:02}/{:02}/{}.{ext}",
            today.year(),
            today.month(),
            today.day(),
            uuid::Uuid::new_v4()
        )
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn store(&self, file_name: &str, bytes: &[u8]) -> Result<StoredBlob, BlobError> {
        let ext = image_extension(file_name)
            .map_err(|_| BlobError::UnsupportedExtension(file_name.to_string()))?;
        let key = Self::key_for(&ext);
        let path = self.root.join(&key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        Ok(StoredBlob {
            url: format!("{}/{key}", self.base_url),
            key,
        })
    }

    async fn delete(&self, key: &str) -> Result<(), BlobError> {
        match tokio::fs::remove_file(self.root.join(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
