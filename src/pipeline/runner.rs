//! Pipeline runner: orchestrates stage execution for one document.
//!
//! [`TermExtractor`] holds a tagger, a preprocessor and a configuration.
//! Calling [`TermExtractor::extract`] runs the stages in order, notifying an
//! optional [`PipelineObserver`] at each boundary:
//!
//! 1. Prepare raw text (period spacing)
//! 2. Tag
//! 3. Preprocess the tagged stream (period splitting, "of the" merging)
//! 4. Scan noun phrases into a fresh term table
//! 5. Filter and collapse into the final [`TermMap`]
//!
//! Every call owns its own term table, so one extractor can serve many
//! documents, including in parallel through [`TermExtractor::extract_batch`].

use rayon::prelude::*;

use crate::nlp::normalizer::StreamNormalizer;
use crate::nlp::tagger::Tagger;
use crate::phrase::filter::TermFilter;
use crate::phrase::scanner::PhraseScanner;
use crate::pipeline::errors::{ExtractError, Result};
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReport, STAGE_FILTER, STAGE_PREPARE,
    STAGE_PREPROCESS, STAGE_SCAN, STAGE_TAG,
};
use crate::pipeline::traits::Preprocessor;
use crate::types::{ExtractConfig, TermMap, TokenStream};

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

// ============================================================================
// TermExtractor
// ============================================================================

/// Term extractor bound to a tagger and a configuration.
///
/// The tagger may be owned or borrowed (`&T`, `Box<T>` and `Arc<T>` all
/// implement [`Tagger`]).
#[derive(Debug, Clone)]
pub struct TermExtractor<T, Pre = StreamNormalizer> {
    tagger: T,
    preprocessor: Pre,
    config: ExtractConfig,
}

impl<T: Tagger> TermExtractor<T> {
    pub fn new(tagger: T, config: ExtractConfig) -> Self {
        Self {
            tagger,
            preprocessor: StreamNormalizer,
            config,
        }
    }

    /// Extractor with the default configuration
    pub fn with_defaults(tagger: T) -> Self {
        Self::new(tagger, ExtractConfig::default())
    }
}

impl<T, Pre> TermExtractor<T, Pre> {
    /// Replace the preprocessor stage.
    pub fn preprocessor<P: Preprocessor>(self, preprocessor: P) -> TermExtractor<T, P> {
        TermExtractor {
            tagger: self.tagger,
            preprocessor,
            config: self.config,
        }
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    pub fn tagger(&self) -> &T {
        &self.tagger
    }
}

impl<T: Tagger, Pre: Preprocessor> TermExtractor<T, Pre> {
    /// Extract terms from one document
    pub fn extract(&self, text: &str) -> Result<TermMap> {
        self.extract_observed(text, &mut NoopObserver)
    }

    /// Extract terms, reporting each stage to `observer`
    pub fn extract_observed(
        &self,
        text: &str,
        observer: &mut impl PipelineObserver,
    ) -> Result<TermMap> {
        self.config.validate()?;
        let cfg = &self.config;

        // Stage 0: Prepare raw text
        trace_stage!(STAGE_PREPARE);
        observer.on_stage_start(STAGE_PREPARE);
        let clock = StageClock::start();
        let prepared = self.preprocessor.prepare_text(text, cfg);
        observer.on_stage_end(STAGE_PREPARE, &StageReport::new(clock.elapsed()));

        // Stage 1: Tag
        trace_stage!(STAGE_TAG);
        observer.on_stage_start(STAGE_TAG);
        let clock = StageClock::start();
        let tokens: TokenStream = self
            .tagger
            .tag(&prepared)
            .map_err(ExtractError::Tagger)?
            .into();
        let report = StageReport::new(clock.elapsed()).with_tokens(tokens.len());
        observer.on_stage_end(STAGE_TAG, &report);

        self.run_tagged(tokens, observer)
    }

    /// Extract terms from a stream that has already been tagged.
    ///
    /// Skips text preparation and tagging; the preprocessor still runs on the
    /// stream.
    pub fn extract_tokens(&self, tokens: TokenStream) -> Result<TermMap> {
        self.config.validate()?;
        self.run_tagged(tokens, &mut NoopObserver)
    }

    /// Extract terms from many documents in parallel.
    ///
    /// Results are in input order. The first failing document's error is
    /// returned.
    pub fn extract_batch(&self, texts: &[&str]) -> Result<Vec<TermMap>>
    where
        T: Sync,
        Pre: Sync,
    {
        self.config.validate()?;
        texts.par_iter().map(|text| self.extract(text)).collect()
    }

    fn run_tagged(
        &self,
        mut tokens: TokenStream,
        observer: &mut impl PipelineObserver,
    ) -> Result<TermMap> {
        let cfg = &self.config;

        // Stage 2: Preprocess
        trace_stage!(STAGE_PREPROCESS);
        observer.on_stage_start(STAGE_PREPROCESS);
        let clock = StageClock::start();
        self.preprocessor.preprocess(&mut tokens, cfg);
        let report = StageReport::new(clock.elapsed()).with_tokens(tokens.len());
        observer.on_stage_end(STAGE_PREPROCESS, &report);
        observer.on_tokens(&tokens);

        // Stage 3: Scan
        trace_stage!(STAGE_SCAN);
        observer.on_stage_start(STAGE_SCAN);
        let clock = StageClock::start();
        let table = PhraseScanner::from_config(cfg).scan(tokens.tokens());
        let report = StageReport::new(clock.elapsed()).with_terms(table.len());
        observer.on_stage_end(STAGE_SCAN, &report);
        observer.on_table(&table);

        // Stage 4: Filter
        trace_stage!(STAGE_FILTER);
        observer.on_stage_start(STAGE_FILTER);
        let clock = StageClock::start();
        let terms = TermFilter::from_config(cfg).apply(table);
        let report = StageReport::new(clock.elapsed()).with_terms(terms.len());
        observer.on_stage_end(STAGE_FILTER, &report);

        Ok(terms)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::nlp::tagger::LexiconTagger;
    use crate::phrase::filter::strength;
    use crate::phrase::table::TermTable;
    use crate::pipeline::errors::TaggerError;
    use crate::pipeline::observer::StageTimingObserver;
    use crate::pipeline::traits::NoopPreprocessor;
    use crate::types::{TaggedToken, TermTypes, TermValue};

    fn extractor(config: ExtractConfig) -> TermExtractor<LexiconTagger> {
        TermExtractor::new(fixtures::tagger(), config)
    }

    #[test]
    fn test_extracts_expected_terms() {
        let terms = extractor(ExtractConfig::default())
            .extract(fixtures::JERUSALEM_THEATRE)
            .unwrap();

        for term in fixtures::JERUSALEM_TERMS {
            assert!(terms.contains_key(term), "{term} not found");
        }
    }

    #[test]
    fn test_collapses_event_into_longer_term() {
        let terms = extractor(ExtractConfig::default())
            .extract(fixtures::JERUSALEM_THEATRE)
            .unwrap();

        // "event" occurs often enough on its own but sits at the end of
        // "Saturday's opening event"; "Jerusalem" likewise inside "East Jerusalem"
        assert!(!terms.contains_key("event"));
        assert!(!terms.contains_key("Jerusalem"));
        assert_eq!(terms.count("Israel"), Some(4));
    }

    #[test]
    fn test_possessive_phrase() {
        let terms = extractor(ExtractConfig::default())
            .extract(fixtures::STOCK_EXCHANGE)
            .unwrap();

        assert!(terms.contains_key("St Paul's Cathedral"));
    }

    #[test]
    fn test_document_ending_mid_phrase() {
        let terms = extractor(ExtractConfig::default())
            .extract(fixtures::STOCK_EXCHANGE)
            .unwrap();

        // The document has no final period; the open phrase is flushed
        assert!(terms.contains_key("City of London"));
    }

    #[test]
    fn test_bridging_prepositions() {
        let terms = extractor(ExtractConfig::default())
            .extract(fixtures::PARADES_COMMISSION)
            .unwrap();

        assert!(terms.contains_key("Secretary of State Owen Paterson"));
        assert!(terms.contains_key("Chair of the Parades Commission for Northern Ireland"));
        assert!(terms.contains_key("Peter Osborne"));
        assert!(!terms.contains_key("event"));
    }

    #[test]
    fn test_min_occurance() {
        let cfg = ExtractConfig::default().with_min_occurance(2);
        let terms = extractor(cfg).extract(fixtures::JERUSALEM_THEATRE).unwrap();

        assert!(terms.contains_key("Police"));
        assert_eq!(terms.get("Police"), Some(&TermValue::Count(2)));
    }

    #[test]
    fn test_min_terms() {
        let cfg = ExtractConfig::default().with_min_terms(3);
        let terms = extractor(cfg).extract(fixtures::JERUSALEM_THEATRE).unwrap();

        assert!(terms.contains_key("Saturday's opening event"));
        assert!(!terms.contains_key("court order"));
    }

    #[test]
    fn test_include_tags() {
        let cfg = ExtractConfig::default().with_include_tags(true);
        let terms = extractor(cfg).extract(fixtures::JERUSALEM_THEATRE).unwrap();

        assert!(!terms.is_empty());
        for (term, value) in terms.iter() {
            let tag = value.tag().unwrap_or_default();
            assert!(!tag.is_empty(), "{term} has no tag");
        }
    }

    #[test]
    fn test_common_nouns_only() {
        let cfg = ExtractConfig::default().with_types(TermTypes::Nn);
        let terms = extractor(cfg).extract(fixtures::JERUSALEM_THEATRE).unwrap();

        for term in [
            "court order",
            "literature festival",
            "peace accords",
            "police notice",
            "security minister",
        ] {
            assert!(terms.contains_key(term), "{term} not found");
        }
        for term in ["Israel", "East Jerusalem", "Police", "Palestinian Authority"] {
            assert!(!terms.contains_key(term), "{term} should be excluded");
        }
    }

    #[test]
    fn test_proper_nouns_only() {
        let cfg = ExtractConfig::default().with_types(TermTypes::Nnp);
        let terms = extractor(cfg).extract(fixtures::JERUSALEM_THEATRE).unwrap();

        assert!(terms.contains_key("East Jerusalem"));
        assert!(terms.contains_key("Palestinian Authority"));
        assert!(terms.contains_key("Mr Makepeace"));
        assert!(!terms.contains_key("court order"));
        assert!(!terms.contains_key("police notice"));
        assert!(!terms.contains_key("Israeli police"));
    }

    #[test]
    fn test_thresholds_hold_for_every_term() {
        for (min_occurance, min_terms) in [(1, 1), (2, 2), (3, 2), (4, 3)] {
            let cfg = ExtractConfig::default()
                .with_min_occurance(min_occurance)
                .with_min_terms(min_terms);
            let terms = extractor(cfg).extract(fixtures::JERUSALEM_THEATRE).unwrap();

            for (term, value) in terms.iter() {
                let words = strength(term);
                assert!(value.occurrences() > 0);
                assert!(
                    (words == 1 && value.occurrences() >= min_occurance)
                        || words >= min_terms,
                    "{term} violates thresholds"
                );
            }
        }
    }

    #[test]
    fn test_empty_input() {
        let ex = extractor(ExtractConfig::default());
        assert!(ex.extract("").unwrap().is_empty());
        assert!(ex.extract("  \n\t  ").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let ex = extractor(ExtractConfig::default().with_min_occurance(0));
        let err = ex.extract(fixtures::PARADES_COMMISSION).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidConfig { field: "min_occurance", .. }));
    }

    #[test]
    fn test_tagger_failure_propagates() {
        struct Broken;

        impl Tagger for Broken {
            fn tag(&self, _text: &str) -> std::result::Result<Vec<TaggedToken>, TaggerError> {
                Err("model not loaded".into())
            }
        }

        let err = TermExtractor::with_defaults(Broken).extract("text").unwrap_err();
        assert!(matches!(err, ExtractError::Tagger(_)));
        assert!(err.to_string().contains("model not loaded"));
    }

    #[test]
    fn test_borrowed_tagger_is_reusable() {
        let tagger = fixtures::tagger();
        let first = TermExtractor::with_defaults(&tagger)
            .extract(fixtures::PARADES_COMMISSION)
            .unwrap();
        let second = TermExtractor::with_defaults(&tagger)
            .extract(fixtures::PARADES_COMMISSION)
            .unwrap();

        // No state leaks between calls
        assert_eq!(first, second);
    }

    #[test]
    fn test_extract_batch_matches_sequential() {
        let ex = extractor(ExtractConfig::default());
        let docs = [
            fixtures::STOCK_EXCHANGE,
            fixtures::PARADES_COMMISSION,
            fixtures::JERUSALEM_THEATRE,
        ];

        let batch = ex.extract_batch(&docs).unwrap();
        assert_eq!(batch.len(), 3);
        for (doc, result) in docs.iter().zip(&batch) {
            assert_eq!(&ex.extract(doc).unwrap(), result);
        }
    }

    #[test]
    fn test_extract_tokens() {
        let tokens: TokenStream = [
            ("Secretary", "NNP"),
            ("of", "IN"),
            ("State", "NNP"),
            ("spoke.", "VBD"),
        ]
        .into_iter()
        .map(TaggedToken::from)
        .collect();

        let terms = extractor(ExtractConfig::default()).extract_tokens(tokens).unwrap();
        assert_eq!(terms.count("Secretary of State"), Some(1));
    }

    #[test]
    fn test_extractor_exposes_parts() {
        let ex = extractor(ExtractConfig::default().with_types(TermTypes::Nnp));
        assert_eq!(ex.config().types, TermTypes::Nnp);
        assert_eq!(ex.tagger().lookup("shut"), Some("VBD"));

        let mut tokens = TokenStream::new();
        for pair in [("Newcastle", "NNP"), ("United", "NNP"), ("won.", "VBD")] {
            tokens.push(pair.into());
        }
        let terms = ex.extract_tokens(tokens).unwrap();
        assert_eq!(terms.count("Newcastle United"), Some(1));
    }

    #[test]
    fn test_observer_sees_every_stage() {
        let mut observer = StageTimingObserver::new();
        extractor(ExtractConfig::default())
            .extract_observed(fixtures::PARADES_COMMISSION, &mut observer)
            .unwrap();

        let stages: Vec<_> = observer.reports().iter().map(|(s, _)| *s).collect();
        assert_eq!(
            stages,
            vec![STAGE_PREPARE, STAGE_TAG, STAGE_PREPROCESS, STAGE_SCAN, STAGE_FILTER]
        );
        assert!(observer.report(STAGE_TAG).unwrap().tokens.is_some());
        assert!(observer.report(STAGE_FILTER).unwrap().terms.is_some());
    }

    #[test]
    fn test_observer_sees_normalized_stream() {
        #[derive(Default)]
        struct Capture {
            tokens: TokenStream,
            raw_terms: usize,
        }

        impl PipelineObserver for Capture {
            fn on_tokens(&mut self, tokens: &TokenStream) {
                self.tokens = tokens.clone();
            }

            fn on_table(&mut self, table: &TermTable) {
                self.raw_terms = table.len();
            }
        }

        let mut capture = Capture::default();
        extractor(ExtractConfig::default())
            .extract_observed("Chair of the Board.Members met.", &mut capture)
            .unwrap();

        let texts: Vec<_> = capture.tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Chair", "of the", "Board", ".", "Members", "met", "."]);
        assert!(capture.raw_terms > 0);
    }

    #[test]
    fn test_noop_preprocessor_keeps_fused_periods() {
        let ex = extractor(ExtractConfig::default().with_min_occurance(1))
            .preprocessor(NoopPreprocessor);
        let terms = ex.extract("Owen Paterson.").unwrap();

        // Without period splitting the trailing period stays on the token
        assert!(terms.contains_key("Owen Paterson."));
    }
}
