//! Extraction pipeline
//!
//! Stage traits, the runner that drives a document through them, observer
//! hooks and the crate's error type.

pub mod errors;
pub mod observer;
pub mod runner;
pub mod traits;
