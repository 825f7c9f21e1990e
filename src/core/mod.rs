//! templinst core library
//!
//! Shared error type and pipeline configuration used by every stage of
//! explicit instantiation generation.

pub mod config;
pub mod error;

pub use config::{Config, PipelineConfig};
pub use error::{Error, Result};
