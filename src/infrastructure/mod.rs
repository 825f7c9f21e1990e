//! Infrastructure layer - concrete implementations of application ports

pub mod storage;

pub use storage::*;
