//! Data Transfer Objects for application layer

use serde::Serialize;
use std::path::PathBuf;

use crate::application::ValidationError;
use crate::core::config::{PipelineConfig, validate_marker};

/// What a pipeline does with the regenerated target content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Rewrite the target when its content changes
    Write,
    /// Fail when the target is not up to date, never write
    Check,
    /// Compute the result only
    DryRun,
}

/// Request to run one declarations -> target pipeline
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub declarations: PathBuf,
    pub usages: Vec<PathBuf>,
    pub target: PathBuf,
    pub marker: String,
    pub mode: WriteMode,
}

impl GenerateRequest {
    pub fn from_config(pipeline: PipelineConfig, marker: &str, mode: WriteMode) -> Self {
        Self {
            declarations: pipeline.declarations,
            usages: pipeline.usages,
            target: pipeline.target,
            marker: marker.to_string(),
            mode,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.declarations.as_os_str().is_empty() {
            return Err(ValidationError::MissingField(
                "declarations file path".to_string(),
            ));
        }
        if self.usages.is_empty() {
            return Err(ValidationError::MissingField(
                "at least one usage file".to_string(),
            ));
        }
        if self.target.as_os_str().is_empty() {
            return Err(ValidationError::MissingField("target file path".to_string()));
        }
        validate_marker(&self.marker)
            .map_err(|e| ValidationError::InvalidMarker(e.to_string()))?;
        Ok(())
    }
}

/// State of the target after a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetStatus {
    /// New content was written
    Updated,
    /// Content on disk already matched
    Unchanged,
    /// Content differs but was not written (check or dry run)
    OutOfDate,
}

/// Outcome of one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub target: PathBuf,
    pub signatures: usize,
    pub constants: usize,
    pub occurrences: usize,
    pub declarations: Vec<String>,
    pub status: TargetStatus,
}
