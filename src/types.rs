//! Core types shared across the extraction pipeline
//!
//! Tokens and token streams flow from the tagger into the scanner; term
//! records, configuration and the final [`TermMap`] describe what comes out.

use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::pipeline::errors::{ExtractError, Result};

/// Tag forced onto every finalized multiterm.
pub const MULTITERM_TAG: &str = "NNP";

/// A single token as produced by a tagger: surface text plus a
/// Penn-Treebank-style part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaggedToken {
    pub text: String,
    pub tag: String,
}

impl TaggedToken {
    pub fn new(text: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: tag.into(),
        }
    }
}

impl<T: Into<String>, U: Into<String>> From<(T, U)> for TaggedToken {
    fn from((text, tag): (T, U)) -> Self {
        Self::new(text, tag)
    }
}

pub(crate) fn is_proper_noun_tag(tag: &str) -> bool {
    tag == "NNP" || tag == "NNPS"
}

/// Ordered sequence of tagged tokens for one document.
///
/// Sentence boundaries are represented by standalone punctuation tokens once
/// the stream has been through the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<TaggedToken>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> &[TaggedToken] {
        &self.tokens
    }

    /// Mutable access for preprocessors that rewrite or splice tokens.
    pub fn tokens_mut(&mut self) -> &mut Vec<TaggedToken> {
        &mut self.tokens
    }

    pub fn push(&mut self, token: TaggedToken) {
        self.tokens.push(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaggedToken> {
        self.tokens.iter()
    }
}

impl From<Vec<TaggedToken>> for TokenStream {
    fn from(tokens: Vec<TaggedToken>) -> Self {
        Self { tokens }
    }
}

impl FromIterator<TaggedToken> for TokenStream {
    fn from_iter<I: IntoIterator<Item = TaggedToken>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

/// Bookkeeping for one term in the term table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRecord {
    /// Number of times the term was counted
    pub occurrences: u32,
    /// Tag assigned by the most recent increment
    pub tag: String,
}

impl TermRecord {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            occurrences: 1,
            tag: tag.into(),
        }
    }
}

/// Which noun tags count as terms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermTypes {
    /// Any tag starting with `NN`
    #[default]
    All,
    /// Common nouns only (NN, NNS)
    Nn,
    /// Proper nouns only (NNP, NNPS)
    Nnp,
}

impl TermTypes {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "nn" | "noun" | "nouns" | "common" => TermTypes::Nn,
            "nnp" | "proper" | "proper_nouns" => TermTypes::Nnp,
            _ => TermTypes::All,
        }
    }

    /// Whether `tag` is a noun tag under this selection
    pub fn matches(&self, tag: &str) -> bool {
        match self {
            TermTypes::All => tag.starts_with("NN"),
            TermTypes::Nn => tag == "NN" || tag == "NNS",
            TermTypes::Nnp => is_proper_noun_tag(tag),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TermTypes::All => "all",
            TermTypes::Nn => "nn",
            TermTypes::Nnp => "nnp",
        }
    }
}

impl FromStr for TermTypes {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Ok(TermTypes::parse(value))
    }
}

/// Configuration for a term extraction call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Minimum number of occurrences for a single-word term to be kept
    pub min_occurance: u32,
    /// Multi-word terms with at least this many words are always kept
    pub min_terms: usize,
    /// Noun tags that start and extend terms
    pub types: TermTypes,
    /// Report `{occurrences, tag}` records instead of bare counts
    pub include_tags: bool,
    /// Drop shorter terms contained at a word boundary in longer ones
    pub collapse_terms: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            min_occurance: 3,
            min_terms: 2,
            types: TermTypes::All,
            include_tags: false,
            collapse_terms: true,
        }
    }
}

impl ExtractConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_min_occurance(mut self, min_occurance: u32) -> Self {
        self.min_occurance = min_occurance;
        self
    }

    pub fn with_min_terms(mut self, min_terms: usize) -> Self {
        self.min_terms = min_terms;
        self
    }

    pub fn with_types(mut self, types: TermTypes) -> Self {
        self.types = types;
        self
    }

    pub fn with_include_tags(mut self, include_tags: bool) -> Self {
        self.include_tags = include_tags;
        self
    }

    pub fn with_collapse_terms(mut self, collapse_terms: bool) -> Self {
        self.collapse_terms = collapse_terms;
        self
    }

    /// Check that both thresholds are at least 1
    pub fn validate(&self) -> Result<()> {
        if self.min_occurance == 0 {
            return Err(ExtractError::invalid_config(
                "min_occurance",
                "must be at least 1",
            ));
        }
        if self.min_terms == 0 {
            return Err(ExtractError::invalid_config("min_terms", "must be at least 1"));
        }
        Ok(())
    }
}

/// Value reported for each extracted term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TermValue {
    Count(u32),
    Tagged(TermRecord),
}

impl TermValue {
    pub fn occurrences(&self) -> u32 {
        match self {
            TermValue::Count(n) => *n,
            TermValue::Tagged(record) => record.occurrences,
        }
    }

    /// The recorded tag, when tags were requested
    pub fn tag(&self) -> Option<&str> {
        match self {
            TermValue::Count(_) => None,
            TermValue::Tagged(record) => Some(record.tag.as_str()),
        }
    }
}

/// Final extraction result: term text to [`TermValue`].
///
/// Iteration follows the order in which terms were first seen in the
/// document. Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermMap {
    entries: Vec<(String, TermValue)>,
    index: FxHashMap<String, usize>,
}

impl TermMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the value for `term`.
    pub fn insert(&mut self, term: String, value: TermValue) {
        if let Some(&idx) = self.index.get(&term) {
            self.entries[idx].1 = value;
            return;
        }
        self.index.insert(term.clone(), self.entries.len());
        self.entries.push((term, value));
    }

    pub fn get(&self, term: &str) -> Option<&TermValue> {
        self.index.get(term).map(|&idx| &self.entries[idx].1)
    }

    pub fn contains_key(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    /// Occurrence count for `term`, if present
    pub fn count(&self, term: &str) -> Option<u32> {
        self.get(term).map(TermValue::occurrences)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(term, _)| term.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TermValue)> {
        self.entries.iter().map(|(term, value)| (term.as_str(), value))
    }
}

impl FromIterator<(String, TermValue)> for TermMap {
    fn from_iter<I: IntoIterator<Item = (String, TermValue)>>(iter: I) -> Self {
        let mut map = TermMap::new();
        for (term, value) in iter {
            map.insert(term, value);
        }
        map
    }
}

impl IntoIterator for TermMap {
    type Item = (String, TermValue);
    type IntoIter = std::vec::IntoIter<(String, TermValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for TermMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (term, value) in &self.entries {
            map.serialize_entry(term, value)?;
        }
        map.end()
    }
}
