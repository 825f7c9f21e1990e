//! Filesystem-based source store implementation

use async_trait::async_trait;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tokio::fs;

use crate::application::{ApplicationError, SourceStore};

/// Source store that reads and writes files on disk.
///
/// Writes go to a temporary file next to the target which then replaces it,
/// so an interrupted write never leaves a truncated target behind.
pub struct FileSystemSourceStore;

impl FileSystemSourceStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SourceStore for FileSystemSourceStore {
    async fn read_text(&self, path: &Path) -> Result<String, ApplicationError> {
        fs::read_to_string(path).await.map_err(|e| {
            ApplicationError::StorageError(format!("Failed to read {}: {}", path.display(), e))
        })
    }

    async fn write_text(&self, path: &Path, content: &str) -> Result<(), ApplicationError> {
        let path = path.to_path_buf();
        let content = content.to_string();

        tokio::task::spawn_blocking(move || {
            let directory = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => std::env::current_dir().map_err(|e| {
                    ApplicationError::StorageError(format!(
                        "Failed to get current directory: {e}"
                    ))
                })?,
            };

            let mut file = NamedTempFile::new_in(&directory).map_err(|e| {
                ApplicationError::StorageError(format!(
                    "Failed to create temporary file in {}: {}",
                    directory.display(),
                    e
                ))
            })?;

            file.write_all(content.as_bytes()).map_err(|e| {
                ApplicationError::StorageError(format!(
                    "Failed to write {}: {}",
                    path.display(),
                    e
                ))
            })?;

            // keep the permissions of the file being replaced
            if let Ok(metadata) = std::fs::metadata(&path) {
                let _ = file.as_file().set_permissions(metadata.permissions());
            }

            file.persist(&path).map_err(|e| {
                ApplicationError::StorageError(format!(
                    "Failed to replace {}: {}",
                    path.display(),
                    e.error
                ))
            })?;

            Ok(())
        })
        .await
        .map_err(|e| ApplicationError::StorageError(format!("Write task failed: {e}")))?
    }
}

impl Default for FileSystemSourceStore {
    fn default() -> Self {
        Self::new()
    }
}
