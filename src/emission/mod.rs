//! Emission domain module - writes the generated explicit instantiation
//! block at the end of a target file

pub mod block;

pub use block::*;
