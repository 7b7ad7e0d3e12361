//! Term table with constant-time lookups
//!
//! Maps term text to a [`TermRecord`] using an FxHashMap index over a
//! vector of entries, so iteration follows first-insertion order.

use rustc_hash::FxHashMap;

use crate::types::TermRecord;

/// Mutable term bookkeeping for a single document scan.
///
/// Entries are only ever added or adjusted here; dropping terms is the
/// filter's job.
#[derive(Debug, Clone, Default)]
pub struct TermTable {
    /// Maps term text -> entry index
    term_to_id: FxHashMap<String, u32>,
    /// Entry storage in insertion order
    entries: Vec<(String, TermRecord)>,
}

impl TermTable {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            term_to_id: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Count one more occurrence of `term`, recording `tag` as its latest tag.
    ///
    /// A missing term is created with one occurrence.
    pub fn increment(&mut self, term: &str, tag: &str) {
        if let Some(&id) = self.term_to_id.get(term) {
            let record = &mut self.entries[id as usize].1;
            record.occurrences += 1;
            if record.tag != tag {
                record.tag = tag.to_string();
            }
            return;
        }

        let id = self.entries.len() as u32;
        self.term_to_id.insert(term.to_string(), id);
        self.entries.push((term.to_string(), TermRecord::new(tag)));
    }

    /// Take back one occurrence of `term`.
    ///
    /// No-op when the term is absent or already at zero.
    pub fn decrement(&mut self, term: &str) {
        if let Some(&id) = self.term_to_id.get(term) {
            let record = &mut self.entries[id as usize].1;
            record.occurrences = record.occurrences.saturating_sub(1);
        }
    }

    /// Get the record for a term
    pub fn get(&self, term: &str) -> Option<&TermRecord> {
        self.term_to_id
            .get(term)
            .map(|&id| &self.entries[id as usize].1)
    }

    /// Occurrence count for a term (0 if absent)
    pub fn occurrences(&self, term: &str) -> u32 {
        self.get(term).map_or(0, |r| r.occurrences)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.term_to_id.contains_key(term)
    }

    /// Number of distinct terms ever recorded
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TermRecord)> {
        self.entries.iter().map(|(term, rec)| (term.as_str(), rec))
    }

    /// Consume the table, yielding entries in first-insertion order
    pub fn into_entries(self) -> Vec<(String, TermRecord)> {
        self.entries
    }
}
