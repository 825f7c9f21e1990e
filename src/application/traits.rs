//! Port interfaces for the application layer

use async_trait::async_trait;
use std::path::Path;

use crate::application::ApplicationError;

/// Reads pipeline inputs and writes the regenerated target
#[async_trait]
pub trait SourceStore: Send + Sync {
    /// Read a whole text file
    async fn read_text(&self, path: &Path) -> Result<String, ApplicationError>;

    /// Replace the whole content of a text file
    async fn write_text(&self, path: &Path, content: &str) -> Result<(), ApplicationError>;
}
