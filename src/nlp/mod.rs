//! Natural Language Processing components
//!
//! This module provides part-of-speech tagging and token stream
//! normalization.

pub mod normalizer;
pub mod tagger;
