//! Pipeline configuration for templinst.
//!
//! A configuration lists one or more independent pipelines. Each pipeline
//! pairs a declarations file with the usage files that instantiate its
//! template classes and the target file that receives the generated block.
//! Configurations are read from `templinst.yaml`, `templinst.yml` or
//! `templinst.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{Error, Result};

/// Sentinel comment written at the start of the generated block
pub const DEFAULT_MARKER: &str = "// Generated with 'templinst'";

/// Configuration file names looked up in the root directory, in priority order
pub const CONFIG_FILE_NAMES: [&str; 3] = ["templinst.yaml", "templinst.yml", "templinst.toml"];

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Sentinel line text demarcating the generated block in every target
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Independent declarations -> target pipelines
    #[serde(default, rename = "pipeline", alias = "pipelines")]
    pub pipelines: Vec<PipelineConfig>,
}

/// One declarations file, its usage files, and the file that receives the block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// File declaring the template class signatures
    pub declarations: PathBuf,

    /// Files scanned for instantiations and constants
    pub usages: Vec<PathBuf>,

    /// File holding the template bodies; its trailing block is regenerated
    pub target: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            pipelines: Vec::new(),
        }
    }
}

impl PipelineConfig {
    /// Resolve relative paths against `root`
    pub fn resolved_against(&self, root: &Path) -> Self {
        Self {
            declarations: root.join(&self.declarations),
            usages: self.usages.iter().map(|p| root.join(p)).collect(),
            target: root.join(&self.target),
        }
    }

    fn validate(&self, index: usize) -> Result<()> {
        if self.declarations.as_os_str().is_empty() {
            return Err(Error::config(format!(
                "pipeline {index}: declarations path cannot be empty"
            )));
        }
        if self.usages.is_empty() {
            return Err(Error::config(format!(
                "pipeline {index}: at least one usage file is required"
            )));
        }
        if self.usages.iter().any(|p| p.as_os_str().is_empty()) {
            return Err(Error::config(format!(
                "pipeline {index}: usage paths cannot be empty"
            )));
        }
        if self.target.as_os_str().is_empty() {
            return Err(Error::config(format!(
                "pipeline {index}: target path cannot be empty"
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Parse a TOML configuration
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML configuration
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read, has an unknown extension,
    /// or fails validation.
    pub async fn load(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "Reading templinst configuration");
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::file(path, e))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            other => Err(Error::config(format!(
                "Unsupported configuration format {:?} for {}",
                other.unwrap_or(""),
                path.display()
            ))),
        }
    }

    /// Find and load the configuration file in `root`
    pub async fn discover(root: &Path) -> Result<(PathBuf, Self)> {
        for name in CONFIG_FILE_NAMES {
            let candidate = root.join(name);
            if tokio::fs::try_exists(&candidate).await? {
                let config = Self::load(&candidate).await?;
                return Ok((candidate, config));
            }
        }
        Err(Error::config(format!(
            "No configuration file found in {} (looked for {})",
            root.display(),
            CONFIG_FILE_NAMES.join(", ")
        )))
    }

    /// Check the configuration is usable before any file is touched
    pub fn validate(&self) -> Result<()> {
        validate_marker(&self.marker)?;
        if self.pipelines.is_empty() {
            return Err(Error::config("at least one pipeline must be configured"));
        }
        for (index, pipeline) in self.pipelines.iter().enumerate() {
            pipeline.validate(index)?;
            if let Some(first) = self.pipelines[..index]
                .iter()
                .position(|other| other.target == pipeline.target)
            {
                return Err(Error::config(format!(
                    "pipelines {first} and {index} both write {}",
                    pipeline.target.display()
                )));
            }
        }
        Ok(())
    }

    /// Pipelines with every path resolved against `root`
    pub fn resolved_pipelines(&self, root: &Path) -> Vec<PipelineConfig> {
        self.pipelines
            .iter()
            .map(|p| p.resolved_against(root))
            .collect()
    }
}

/// The marker must be a single `//` comment line
pub fn validate_marker(marker: &str) -> Result<()> {
    let trimmed = marker.trim();
    if !trimmed.starts_with("//") || trimmed.len() <= 2 {
        return Err(Error::config(format!(
            "marker must be a non-empty '//' comment, got {marker:?}"
        )));
    }
    if marker.contains('\n') {
        return Err(Error::config("marker must fit on a single line"));
    }
    Ok(())
}
