//! Post-scan term filtering
//!
//! Drops terms that don't meet the occurrence/length thresholds, collapses
//! terms subsumed by longer ones, and shapes the final [`TermMap`].

use rustc_hash::FxHashSet;

use crate::phrase::table::TermTable;
use crate::types::{ExtractConfig, TermMap, TermRecord, TermValue};

/// Threshold and collapsing filter applied once per document
#[derive(Debug, Clone)]
pub struct TermFilter {
    min_occurance: u32,
    min_terms: usize,
    collapse_terms: bool,
    include_tags: bool,
}

impl Default for TermFilter {
    fn default() -> Self {
        Self::from_config(&ExtractConfig::default())
    }
}

impl TermFilter {
    pub fn from_config(config: &ExtractConfig) -> Self {
        Self {
            min_occurance: config.min_occurance,
            min_terms: config.min_terms,
            collapse_terms: config.collapse_terms,
            include_tags: config.include_tags,
        }
    }

    /// Filter a finished term table into the result map
    pub fn apply(&self, table: TermTable) -> TermMap {
        #[cfg(feature = "tracing")]
        let total = table.len();
        let survivors: Vec<_> = table
            .into_entries()
            .into_iter()
            .filter(|(term, record)| self.keep(term, record))
            .collect();

        let survivors = if self.collapse_terms {
            collapse(survivors)
        } else {
            survivors
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(total, kept = survivors.len(), "filtered terms");

        survivors
            .into_iter()
            .map(|(term, record)| {
                let value = if self.include_tags {
                    TermValue::Tagged(record)
                } else {
                    TermValue::Count(record.occurrences)
                };
                (term, value)
            })
            .collect()
    }

    /// Single words need `min_occurance` hits; phrases of `min_terms` words
    /// or more are kept even if seen once.
    fn keep(&self, term: &str, record: &TermRecord) -> bool {
        if record.occurrences == 0 {
            return false;
        }
        let strength = strength(term);
        (strength == 1 && record.occurrences >= self.min_occurance) || strength >= self.min_terms
    }
}

/// Number of space-separated words in a term
pub fn strength(term: &str) -> usize {
    term.split(' ').filter(|word| !word.is_empty()).count()
}

/// Whether `longer` starts or ends with `shorter` at a non-alphanumeric
/// boundary, e.g. "Richard Makepeace" subsumes "Makepeace".
pub fn subsumes(longer: &str, shorter: &str) -> bool {
    if shorter.is_empty() {
        return false;
    }

    let suffix_match = longer
        .strip_suffix(shorter)
        .and_then(|head| head.chars().next_back())
        .is_some_and(|c| !c.is_ascii_alphanumeric());

    suffix_match
        || longer
            .strip_prefix(shorter)
            .and_then(|tail| tail.chars().next())
            .is_some_and(|c| !c.is_ascii_alphanumeric())
}

/// Drop every term subsumed by a longer (in characters) term.
///
/// Every pair is judged against the full input set, so the outcome does not
/// depend on order. Occurrence counts are not compared: a frequent short term
/// still goes when a rarer longer term contains it.
fn collapse(terms: Vec<(String, TermRecord)>) -> Vec<(String, TermRecord)> {
    let lengths: Vec<usize> = terms.iter().map(|(term, _)| term.chars().count()).collect();

    let subsumed: FxHashSet<usize> = (0..terms.len())
        .filter(|&i| {
            (0..terms.len()).any(|j| lengths[j] > lengths[i] && subsumes(&terms[j].0, &terms[i].0))
        })
        .collect();

    terms
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !subsumed.contains(i))
        .map(|(_, entry)| entry)
        .collect()
}
