//! Value types produced by the scanning stage

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use serde::Serialize;

/// A template class declared in a declarations file.
///
/// Equality, hashing and ordering only look at the class name.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateSignature {
    name: String,
    min_parameter_count: usize,
}

impl TemplateSignature {
    pub fn new(name: impl Into<String>, min_parameter_count: usize) -> Self {
        Self {
            name: name.into(),
            min_parameter_count,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameters without a default value
    pub fn min_parameter_count(&self) -> usize {
        self.min_parameter_count
    }
}

impl PartialEq for TemplateSignature {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for TemplateSignature {}

impl Hash for TemplateSignature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for TemplateSignature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TemplateSignature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

/// Order signatures so that no name is searched before a longer one.
///
/// The sort is stable: equally long names keep their declaration order.
pub fn sort_longest_first(signatures: &mut [TemplateSignature]) {
    signatures.sort_by(|a, b| b.name.len().cmp(&a.name.len()));
}

/// Where a line came from, for error messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub path: PathBuf,
    pub line: usize,
}

impl SourceLocation {
    pub fn new(path: &Path, line: usize) -> Self {
        Self {
            path: path.to_path_buf(),
            line,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path.display(), self.line)
    }
}

/// An instantiation site whose argument text has not been resolved yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawInstantiation {
    pub signature: TemplateSignature,
    pub raw_arguments: String,
    pub location: SourceLocation,
}

impl RawInstantiation {
    pub fn new(
        signature: TemplateSignature,
        raw_arguments: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self {
            signature,
            raw_arguments: raw_arguments.into(),
            location,
        }
    }
}
