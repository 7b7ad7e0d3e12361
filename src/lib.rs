//! Noun and noun-phrase term extraction from part-of-speech tagged text.
//!
//! A document is tagged, normalized so sentence boundaries are explicit,
//! scanned for single nouns and multi-word noun phrases, and filtered by
//! frequency and phrase length. Shorter terms that are a prefix or suffix of
//! a longer surviving term can be collapsed into it.
//!
//! ```no_run
//! use term_extract::{ExtractConfig, LexiconTagger, TermExtractor};
//!
//! let tagger = LexiconTagger::new();
//! let extractor = TermExtractor::new(&tagger, ExtractConfig::default().with_min_occurance(2));
//! let terms = extractor.extract("Police shut the theatre. Police said ...")?;
//! for (term, value) in terms.iter() {
//!     println!("{term}: {}", value.occurrences());
//! }
//! # Ok::<(), term_extract::ExtractError>(())
//! ```

pub mod nlp;
pub mod phrase;
pub mod pipeline;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use nlp::normalizer::StreamNormalizer;
pub use nlp::tagger::{LexiconTagger, Tagger};
pub use phrase::filter::TermFilter;
pub use phrase::scanner::PhraseScanner;
pub use phrase::table::TermTable;
pub use pipeline::errors::{ExtractError, Result, TaggerError};
pub use pipeline::observer::{NoopObserver, PipelineObserver, StageReport, StageTimingObserver};
pub use pipeline::runner::TermExtractor;
pub use pipeline::traits::{NoopPreprocessor, Preprocessor};
pub use types::{
    ExtractConfig, TaggedToken, TermMap, TermRecord, TermTypes, TermValue, TokenStream,
};

/// Extract terms from `text` with the default configuration
pub fn extract<T: Tagger + ?Sized>(tagger: &T, text: &str) -> Result<TermMap> {
    extract_with(tagger, text, &ExtractConfig::default())
}

/// Extract terms from `text` with `config`
pub fn extract_with<T: Tagger + ?Sized>(
    tagger: &T,
    text: &str,
    config: &ExtractConfig,
) -> Result<TermMap> {
    TermExtractor::new(tagger, config.clone()).extract(text)
}
