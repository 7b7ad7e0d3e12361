//! Noun phrase scanning
//!
//! A two-state machine walks the normalized token stream, counting single
//! nouns as it goes and folding runs of nouns (joined by possessives and a
//! few bridging prepositions) into multi-word terms.

use std::sync::LazyLock;

use regex::Regex;

use crate::phrase::table::TermTable;
use crate::types::{is_proper_noun_tag, ExtractConfig, TaggedToken, TermTypes, MULTITERM_TAG};

/// Prepositions allowed inside a proper-noun phrase, e.g. "Secretary of State"
/// or "Newcastle upon Tyne".
///
/// Unanchored and case-insensitive, so any IN token containing one of these
/// bridges. Only applies directly after an NNP/NNPS token.
static BRIDGING_PREPOSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(of|for|on|of\sthe|&|d'|du|de)").expect("valid bridging pattern")
});

const POSSESSIVE_TAG: &str = "POS";
const PREPOSITION_TAG: &str = "IN";
const ADJECTIVE_TAG: &str = "JJ";

/// Scanner state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Looking for the start of a term
    Searching,
    /// Inside a term; tokens accumulate in the multiterm buffer
    InTerm,
}

/// Noun phrase scanner
#[derive(Debug, Clone, Default)]
pub struct PhraseScanner {
    types: TermTypes,
}

impl PhraseScanner {
    pub fn new(types: TermTypes) -> Self {
        Self { types }
    }

    pub fn from_config(config: &ExtractConfig) -> Self {
        Self::new(config.types)
    }

    pub fn types(&self) -> TermTypes {
        self.types
    }

    /// Scan `tokens` into a fresh term table
    pub fn scan(&self, tokens: &[TaggedToken]) -> TermTable {
        let mut table = TermTable::with_capacity(tokens.len() / 2);
        self.scan_into(tokens, &mut table);
        table
    }

    /// Scan `tokens`, recording terms into `table`
    pub fn scan_into(&self, tokens: &[TaggedToken], table: &mut TermTable) {
        let mut scan = Scan::new(self.types);
        for token in tokens {
            scan.step(token, table);
        }
        scan.finish(table);
    }
}

/// Per-document scan state. Borrows tokens from the stream being scanned.
struct Scan<'t> {
    types: TermTypes,
    state: ScanState,
    multiterm: Vec<&'t TaggedToken>,
    last_tag: &'t str,
}

impl<'t> Scan<'t> {
    fn new(types: TermTypes) -> Self {
        Self {
            types,
            state: ScanState::Searching,
            multiterm: Vec::new(),
            last_tag: "",
        }
    }

    fn step(&mut self, token: &'t TaggedToken, table: &mut TermTable) {
        let tag = token.tag.as_str();

        match self.state {
            ScanState::Searching => {
                if self.types.matches(tag) || is_capitalized_adjective(token) {
                    self.add_term(token, table);
                    self.state = ScanState::InTerm;
                }
            }
            ScanState::InTerm => {
                if tag == POSSESSIVE_TAG {
                    // "St Paul's Cathedral"
                    self.multiterm.push(token);
                } else if is_proper_noun_tag(self.last_tag)
                    && tag == PREPOSITION_TAG
                    && is_bridging_preposition(&token.text)
                {
                    // "Secretary of State"
                    self.multiterm.push(token);
                } else if self.types.matches(tag) {
                    self.add_term(token, table);
                } else {
                    self.state = ScanState::Searching;
                    if self.multiterm.len() > 1 {
                        add_multiterm(&self.multiterm, table);
                    }
                    self.multiterm.clear();
                }
            }
        }

        self.last_tag = tag;
    }

    /// Flush a term still open at the end of the stream.
    ///
    /// Unlike the in-stream boundary this does not require more than one
    /// buffered token: a document ending on a lone noun re-records it as a
    /// multiterm, which forces its tag to NNP.
    fn finish(self, table: &mut TermTable) {
        if self.types.matches(self.last_tag) && !self.multiterm.is_empty() {
            add_multiterm(&self.multiterm, table);
        }
    }

    fn add_term(&mut self, token: &'t TaggedToken, table: &mut TermTable) {
        self.multiterm.push(token);
        table.increment(&token.text, &token.tag);
    }
}

/// Record a finished multiterm.
///
/// The constituent words were each counted on their own while scanning, so
/// those counts are taken back before the phrase itself is counted.
fn add_multiterm(multiterm: &[&TaggedToken], table: &mut TermTable) {
    for token in multiterm {
        table.decrement(&token.text);
    }

    let phrase = multiterm_text(multiterm);
    if phrase.is_empty() {
        return;
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(phrase = %phrase, tokens = multiterm.len(), "multiterm");

    table.increment(&phrase, MULTITERM_TAG);
}

/// Join buffered tokens into phrase text.
///
/// A trailing possessive, preposition or adjective is dropped; possessives
/// attach to the previous word without a space.
pub fn multiterm_text(multiterm: &[&TaggedToken]) -> String {
    let last = multiterm.len().saturating_sub(1);
    let mut phrase = String::new();

    for (i, token) in multiterm.iter().enumerate() {
        let tag = token.tag.as_str();
        if i == last && matches!(tag, POSSESSIVE_TAG | PREPOSITION_TAG | ADJECTIVE_TAG) {
            continue;
        }
        if tag != POSSESSIVE_TAG {
            phrase.push(' ');
        }
        phrase.push_str(&token.text);
    }

    phrase.trim_start().to_string()
}

/// Whether a preposition may join two proper nouns into one term
pub fn is_bridging_preposition(text: &str) -> bool {
    BRIDGING_PREPOSITION.is_match(text)
}

/// Capitalized adjectives such as a sentence-initial "Good" may start a term
fn is_capitalized_adjective(token: &TaggedToken) -> bool {
    token.tag == ADJECTIVE_TAG && token.text.starts_with(|c: char| c.is_ascii_uppercase())
}
