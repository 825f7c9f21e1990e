//! templinst - explicit template class instantiation generator
//!
//! Keeps C++ template class bodies out of headers. A declarations file holds
//! the template class signatures; templinst scans the files that use those
//! classes, resolves the argument lists to literal values through the
//! macros, aliases and constants those files define, and regenerates a
//! delimited block of explicit instantiation declarations at the end of the
//! file holding the template bodies.
//!
//! ```
//! use templinst::emission::InstantiationEmitter;
//! use templinst::resolution::resolve_instantiations;
//! use templinst::scanning::{ConstantCollector, UsageScanner, scan_definitions, scan_usage_source};
//! use std::path::Path;
//!
//! let signatures = scan_definitions("template<typename T, int N> class Action;");
//! let scanner = UsageScanner::new(&signatures);
//! let mut constants = ConstantCollector::new();
//! let raw = scan_usage_source(
//!     Path::new("use.cpp"),
//!     "#define SIZE 5\nAction<int,SIZE+1> a;",
//!     &scanner,
//!     &mut constants,
//! )?;
//! let set = resolve_instantiations(&raw, constants.table())?;
//! let output = InstantiationEmitter::new("// Generated with 'templinst'").emit("", &set);
//! assert!(output.ends_with("template class Action<int,6>;\n"));
//! # Ok::<(), templinst::core::Error>(())
//! ```
#![deny(unsafe_code)]

pub mod application;
pub mod core;
pub mod emission;
pub mod infrastructure;
pub mod resolution;
pub mod scanning;
