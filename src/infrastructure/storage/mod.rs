//! Source store implementations

pub mod filesystem_store;

pub use filesystem_store::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ApplicationError, SourceStore};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_filesystem_store_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileSystemSourceStore::new();
        let path = temp_dir.path().join("action.cpp");

        std::fs::write(&path, "int body;\n").expect("Failed to seed file");
        assert_eq!(store.read_text(&path).await.unwrap(), "int body;\n");

        store
            .write_text(&path, "int body;\n// Generated\n")
            .await
            .unwrap();
        let content = std::fs::read_to_string(&path).expect("Failed to read file");
        assert_eq!(content, "int body;\n// Generated\n");
    }

    #[tokio::test]
    async fn test_filesystem_store_missing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileSystemSourceStore::new();

        let result = store.read_text(&temp_dir.path().join("missing.hpp")).await;
        match result {
            Err(ApplicationError::StorageError(msg)) => assert!(msg.contains("missing.hpp")),
            other => panic!("Expected StorageError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_write_leaves_no_temporary_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileSystemSourceStore::new();
        let path = temp_dir.path().join("target.cpp");
        std::fs::write(&path, "old").unwrap();

        store.write_text(&path, "new").await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("target.cpp")]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_write_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileSystemSourceStore::new();
        let path = temp_dir.path().join("script.cpp");
        std::fs::write(&path, "old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();

        store.write_text(&path, "new").await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }
}
