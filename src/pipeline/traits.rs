//! Stage trait definitions for the pipeline.
//!
//! The tagger sits outside this crate; the preprocessor is the seam between
//! whatever the tagger emits and what the phrase scanner expects.

use std::borrow::Cow;

use crate::types::{ExtractConfig, TokenStream};

// ============================================================================
// Preprocessor: text and token normalization around the tagger
// ============================================================================

/// Normalization stage wrapped around the tagger.
///
/// [`StreamNormalizer`](crate::nlp::normalizer::StreamNormalizer) is the
/// default; [`NoopPreprocessor`] passes everything through, for streams that
/// are already clean.
///
/// # Contract
///
/// - `prepare_text` runs on the raw document before tagging. Return
///   `Cow::Borrowed` when nothing changes.
/// - `preprocess` mutates the tagged stream in place.
/// - **Idempotent**: preprocessing a stream twice gives the same result as
///   preprocessing it once.
pub trait Preprocessor {
    /// Rewrite raw text before it reaches the tagger.
    fn prepare_text<'a>(&self, text: &'a str, _cfg: &ExtractConfig) -> Cow<'a, str> {
        Cow::Borrowed(text)
    }

    /// Preprocess the token stream in place.
    fn preprocess(&self, tokens: &mut TokenStream, cfg: &ExtractConfig);
}

/// No-op preprocessor.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPreprocessor;

impl Preprocessor for NoopPreprocessor {
    #[inline]
    fn preprocess(&self, _tokens: &mut TokenStream, _cfg: &ExtractConfig) {
        // Intentionally empty.
    }
}

impl<P: Preprocessor + ?Sized> Preprocessor for &P {
    fn prepare_text<'a>(&self, text: &'a str, cfg: &ExtractConfig) -> Cow<'a, str> {
        (**self).prepare_text(text, cfg)
    }

    fn preprocess(&self, tokens: &mut TokenStream, cfg: &ExtractConfig) {
        (**self).preprocess(tokens, cfg)
    }
}
