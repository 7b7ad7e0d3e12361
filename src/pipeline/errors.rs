//! Error types for the extraction pipeline.
//!
//! Extraction itself never fails on odd input; errors only come from the
//! edges: configuration, lexicon loading, and the tagger.

use thiserror::Error;

/// Boxed error returned by a [`Tagger`](crate::nlp::tagger::Tagger).
pub type TaggerError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T, E = ExtractError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid configuration at `{field}`: {message}")]
    InvalidConfig { field: &'static str, message: String },

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("invalid lexicon entry on line {line}: {message}")]
    InvalidLexicon { line: usize, message: String },

    #[error("tagger failed: {0}")]
    Tagger(#[source] TaggerError),
}

impl ExtractError {
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            message: message.into(),
        }
    }
}
