use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to create storage directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Per-request identifier keying both the stored upload and its artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UploadId(Uuid);

impl UploadId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UploadId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UploadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_hyphenated())
    }
}

/// The storage directory holding `<id>.pdf` uploads and `<id>.txt` artifacts.
///
/// Paths are derived from [`UploadId`] only, never from client input.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Open the storage directory, creating it (and parents) if absent.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| StorageError::CreateDir {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn upload_path(&self, id: UploadId) -> PathBuf {
        self.root.join(format!("{id}.pdf"))
    }

    pub fn artifact_path(&self, id: UploadId) -> PathBuf {
        self.root.join(format!("{id}.txt"))
    }

    /// Write the uploaded bytes verbatim, replacing any existing file.
    pub async fn save_upload(&self, id: UploadId, data: &[u8]) -> Result<PathBuf, StorageError> {
        let path = self.upload_path(id);
        write(&path, data).await?;
        Ok(path)
    }

    /// Write the extracted text as UTF-8, truncating any previous content.
    pub async fn write_artifact(&self, id: UploadId, text: &str) -> Result<PathBuf, StorageError> {
        let path = self.artifact_path(id);
        write(&path, text.as_bytes()).await?;
        Ok(path)
    }
}

async fn write(path: &Path, data: &[u8]) -> Result<(), StorageError> {
    tokio::fs::write(path, data)
        .await
        .map_err(|source| StorageError::Write {
            path: path.to_path_buf(),
            source,
        })
}
