//! Pipeline observer: hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic: timing stages, capturing the normalized stream or the raw
//! term table before filtering.

use std::time::{Duration, Instant};

use crate::phrase::table::TermTable;
use crate::types::TokenStream;

pub const STAGE_PREPARE: &str = "prepare";
pub const STAGE_TAG: &str = "tag";
pub const STAGE_PREPROCESS: &str = "preprocess";
pub const STAGE_SCAN: &str = "scan";
pub const STAGE_FILTER: &str = "filter";

/// Wall-clock timer for one stage
#[derive(Debug, Clone, Copy)]
pub struct StageClock(Instant);

impl StageClock {
    pub fn start() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

/// What a stage reports when it finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageReport {
    pub elapsed: Duration,
    /// Tokens in the stream after the stage, if it produces tokens
    pub tokens: Option<usize>,
    /// Terms held after the stage, if it produces terms
    pub terms: Option<usize>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            tokens: None,
            terms: None,
        }
    }

    pub fn with_tokens(mut self, tokens: usize) -> Self {
        self.tokens = Some(tokens);
        self
    }

    pub fn with_terms(mut self, terms: usize) -> Self {
        self.terms = Some(terms);
        self
    }
}

/// Stage-boundary callbacks. Every method defaults to a no-op.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    /// The token stream after preprocessing
    fn on_tokens(&mut self, _tokens: &TokenStream) {}

    /// The term table after scanning, before filtering
    fn on_table(&mut self, _table: &TermTable) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Records every stage report in order
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.reports
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, report)| report)
    }

    pub fn total(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.elapsed).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, *report));
    }
}
