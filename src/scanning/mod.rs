//! Scanning domain module - the text-level front end of a pipeline
//!
//! Extracts template class signatures from a declarations file, then walks
//! usage files collecting named constants and raw instantiation sites. No
//! C++ parsing happens here: every stage works on comment-stripped lines.

pub mod constants;
pub mod definitions;
pub mod source;
pub mod types;
pub mod usages;

pub use constants::*;
pub use definitions::*;
pub use types::*;
pub use usages::*;
