//! File-backed document storage.
//!
//! Every document is a regular file directly under the store root. The
//! filesystem is the only source of truth: nothing is cached, so each call
//! observes the latest completed write.
//!
//! The store does not sanitize names. Callers must reject names carrying
//! path separators or `..` before handing them over.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Names of all visible documents under the root, sorted.
    ///
    /// Hidden entries (leading `.`) and anything that is not a regular file
    /// are skipped; in-flight writes use hidden temporary names.
    pub async fn list(&self) -> Result<Vec<String>, DocumentStoreError> {
        let mut entries = fs::read_dir(&self.root).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                tracing::warn!(path = ?entry.path(), "skipping non utf-8 document name");
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            if entry.file_type().await?.is_file() {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    pub async fn exists(&self, name: &str) -> Result<bool, DocumentStoreError> {
        match fs::metadata(self.path_for(name)).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn read(&self, name: &str) -> Result<Vec<u8>, DocumentStoreError> {
        fs::read(self.path_for(name))
            .await
            .map_err(|e| DocumentStoreError::from_io(name, e))
    }

    /// Create or replace a document with `contents`.
    ///
    /// The bytes land in a hidden sibling first and are renamed over the
    /// target, so readers see either the old or the new content. The staging
    /// name does not embed `name`, so any name the filesystem accepts works.
    pub async fn write(&self, name: &str, contents: &[u8]) -> Result<(), DocumentStoreError> {
        let target = self.path_for(name);
        let staging = self.root.join(format!(".{}.tmp", Uuid::new_v4()));

        if let Err(e) = fs::write(&staging, contents).await {
            let _ = fs::remove_file(&staging).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&staging, &target).await {
            let _ = fs::remove_file(&staging).await;
            return Err(e.into());
        }

        tracing::debug!(document = name, bytes = contents.len(), "document written");
        Ok(())
    }

    pub async fn delete(&self, name: &str) -> Result<(), DocumentStoreError> {
        fs::remove_file(self.path_for(name))
            .await
            .map_err(|e| DocumentStoreError::from_io(name, e))?;

        tracing::debug!(document = name, "document deleted");
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentStoreError {
    #[error("document not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl DocumentStoreError {
    fn from_io(name: &str, error: io::Error) -> Self {
        if error.kind() == io::ErrorKind::NotFound {
            Self::NotFound(name.to_string())
        } else {
            Self::Io(error)
        }
    }
}
