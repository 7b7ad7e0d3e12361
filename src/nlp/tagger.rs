//! Part-of-speech tagging
//!
//! The [`Tagger`] trait is the contract the extractor consumes. Any tagger
//! that emits Penn-Treebank-style tags in document order will do.
//! [`LexiconTagger`] is a small deterministic implementation: a whitespace
//! tokenizer plus lexicon lookup with capitalization and suffix fallbacks.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::pipeline::errors::{ExtractError, Result, TaggerError};
use crate::types::TaggedToken;

/// Tags raw text into `(token, tag)` pairs.
///
/// Taggers are typically expensive to build; construct one and share it
/// read-only across extraction calls.
pub trait Tagger {
    fn tag(&self, text: &str) -> std::result::Result<Vec<TaggedToken>, TaggerError>;
}

impl<T: Tagger + ?Sized> Tagger for &T {
    fn tag(&self, text: &str) -> std::result::Result<Vec<TaggedToken>, TaggerError> {
        (**self).tag(text)
    }
}

impl<T: Tagger + ?Sized> Tagger for Box<T> {
    fn tag(&self, text: &str) -> std::result::Result<Vec<TaggedToken>, TaggerError> {
        (**self).tag(text)
    }
}

impl<T: Tagger + ?Sized> Tagger for Arc<T> {
    fn tag(&self, text: &str) -> std::result::Result<Vec<TaggedToken>, TaggerError> {
        (**self).tag(text)
    }
}

const POSSESSIVE_TAG: &str = "POS";

/// Punctuation split off the front of a word
const LEADING_PUNCT: &[char] = &['"', '(', '[', '{', '`', '\u{201c}'];
/// Punctuation split off the end of a word. The period is not here: it stays
/// attached for the normalizer to split.
const TRAILING_PUNCT: &[char] = &[',', ';', ':', '!', '?', '"', ')', ']', '}', '\u{201d}'];

/// Closed-class English words and a few very common verbs
const BUILTIN_LEXICON: &[(&str, &str)] = &[
    // Determiners
    ("the", "DT"), ("a", "DT"), ("an", "DT"), ("this", "DT"), ("that", "DT"),
    ("these", "DT"), ("those", "DT"), ("each", "DT"), ("every", "DT"), ("some", "DT"),
    ("any", "DT"), ("no", "DT"), ("all", "DT"), ("both", "DT"), ("another", "DT"),
    // Prepositions and subordinators
    ("of", "IN"), ("in", "IN"), ("on", "IN"), ("at", "IN"), ("by", "IN"), ("for", "IN"),
    ("with", "IN"), ("from", "IN"), ("into", "IN"), ("onto", "IN"), ("over", "IN"),
    ("under", "IN"), ("about", "IN"), ("after", "IN"), ("before", "IN"), ("between", "IN"),
    ("through", "IN"), ("during", "IN"), ("without", "IN"), ("within", "IN"),
    ("against", "IN"), ("among", "IN"), ("across", "IN"), ("along", "IN"), ("around", "IN"),
    ("behind", "IN"), ("beyond", "IN"), ("near", "IN"), ("since", "IN"), ("until", "IN"),
    ("upon", "IN"), ("via", "IN"), ("as", "IN"), ("than", "IN"), ("because", "IN"),
    ("although", "IN"), ("though", "IN"), ("while", "IN"), ("whether", "IN"), ("if", "IN"),
    ("de", "IN"), ("du", "IN"),
    ("to", "TO"),
    // Conjunctions
    ("and", "CC"), ("or", "CC"), ("but", "CC"), ("nor", "CC"), ("&", "CC"),
    // Pronouns
    ("i", "PRP"), ("you", "PRP"), ("he", "PRP"), ("she", "PRP"), ("it", "PRP"),
    ("we", "PRP"), ("they", "PRP"), ("me", "PRP"), ("him", "PRP"), ("us", "PRP"),
    ("them", "PRP"), ("my", "PRP$"), ("your", "PRP$"), ("his", "PRP$"), ("her", "PRP$"),
    ("its", "PRP$"), ("our", "PRP$"), ("their", "PRP$"),
    ("who", "WP"), ("what", "WP"), ("which", "WDT"), ("where", "WRB"), ("when", "WRB"),
    ("how", "WRB"), ("why", "WRB"), ("there", "EX"),
    // Auxiliaries and modals
    ("is", "VBZ"), ("are", "VBP"), ("was", "VBD"), ("were", "VBD"), ("be", "VB"),
    ("been", "VBN"), ("being", "VBG"), ("am", "VBP"), ("has", "VBZ"), ("have", "VBP"),
    ("had", "VBD"), ("do", "VBP"), ("does", "VBZ"), ("did", "VBD"), ("will", "MD"),
    ("would", "MD"), ("can", "MD"), ("could", "MD"), ("shall", "MD"), ("should", "MD"),
    ("may", "MD"), ("might", "MD"), ("must", "MD"),
    // Adverbs and common verbs
    ("not", "RB"), ("also", "RB"), ("very", "RB"), ("often", "RB"), ("so", "RB"),
    ("then", "RB"), ("too", "RB"), ("said", "VBD"), ("says", "VBZ"), ("say", "VBP"),
    // Detached possessives
    ("'s", "POS"), ("\u{2019}s", "POS"),
];

/// Deterministic lexicon-driven tagger.
///
/// Resolution order for a word:
/// 1. exact lexicon entry
/// 2. for a title-case word, the lowercase entry unless it is a noun
/// 3. punctuation tags itself, numbers are `CD`
/// 4. capitalized words are `NNP`
/// 5. suffix rules: `-ly` RB, `-ing` VBG, `-ed` VBD, `-s` NNS
/// 6. `NN`
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    lexicon: FxHashMap<String, String>,
}

impl Default for LexiconTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconTagger {
    /// Create a tagger with the built-in closed-class lexicon
    pub fn new() -> Self {
        let mut tagger = Self::empty();
        for &(word, tag) in BUILTIN_LEXICON {
            tagger.lexicon.insert(word.to_string(), tag.to_string());
        }
        tagger
    }

    /// Create a tagger with no lexicon; only the fallback rules apply
    pub fn empty() -> Self {
        Self {
            lexicon: FxHashMap::default(),
        }
    }

    /// Parse a Brill-style lexicon into an otherwise empty tagger.
    pub fn from_lexicon_str(lexicon: &str) -> Result<Self> {
        let mut tagger = Self::empty();
        tagger.load_lexicon(lexicon)?;
        Ok(tagger)
    }

    /// Add or replace a lexicon entry
    pub fn with_entry(mut self, word: &str, tag: &str) -> Self {
        self.add_entry(word, tag);
        self
    }

    /// Add or replace several lexicon entries
    pub fn with_entries(mut self, entries: &[(&str, &str)]) -> Self {
        for &(word, tag) in entries {
            self.add_entry(word, tag);
        }
        self
    }

    pub fn add_entry(&mut self, word: &str, tag: &str) {
        self.lexicon.insert(word.to_string(), tag.to_string());
    }

    /// Load entries in Brill lexicon format: `word TAG [TAG...]` per line,
    /// the first tag being the most likely. Blank lines and lines starting
    /// with `#` are skipped. Returns the number of entries loaded.
    pub fn load_lexicon(&mut self, lexicon: &str) -> Result<usize> {
        let mut loaded = 0;
        for (idx, line) in lexicon.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let (Some(word), Some(tag)) = (fields.next(), fields.next()) else {
                return Err(ExtractError::InvalidLexicon {
                    line: idx + 1,
                    message: format!("expected `word TAG`, found `{line}`"),
                });
            };
            self.add_entry(word, tag);
            loaded += 1;
        }
        Ok(loaded)
    }

    /// Look up a word in the lexicon
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.lexicon.get(word).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }

    /// Tag a single bare word (no attached punctuation)
    pub fn tag_word(&self, word: &str) -> String {
        if let Some(tag) = self.lookup(word) {
            return tag.to_string();
        }

        let capitalized = word.chars().next().is_some_and(char::is_uppercase);
        let title_case = capitalized && !word.chars().skip(1).any(char::is_uppercase);
        if title_case {
            if let Some(tag) = self.lookup(&word.to_lowercase()) {
                if !tag.starts_with("NN") {
                    return tag.to_string();
                }
            }
        }

        if let Some(tag) = punctuation_tag(word) {
            return tag.to_string();
        }
        if word.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            return "CD".to_string();
        }
        if capitalized {
            return "NNP".to_string();
        }

        let lower = word.to_lowercase();
        let tag = if lower.ends_with("ly") {
            "RB"
        } else if lower.ends_with("ing") {
            "VBG"
        } else if lower.ends_with("ed") {
            "VBD"
        } else if lower.len() > 3 && lower.ends_with('s') && !lower.ends_with("ss") {
            "NNS"
        } else {
            "NN"
        };
        tag.to_string()
    }
}

impl Tagger for LexiconTagger {
    fn tag(&self, text: &str) -> std::result::Result<Vec<TaggedToken>, TaggerError> {
        Ok(tokenize(text)
            .into_iter()
            .map(|piece| {
                let tag = match piece {
                    Piece::Possessive(_) => POSSESSIVE_TAG.to_string(),
                    Piece::Word(word) => self.tag_word(without_fused_period(word)),
                };
                TaggedToken::new(piece.text(), tag)
            })
            .collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'a> {
    Word(&'a str),
    Possessive(&'a str),
}

impl<'a> Piece<'a> {
    fn text(&self) -> &'a str {
        match *self {
            Piece::Word(text) | Piece::Possessive(text) => text,
        }
    }
}

/// Split text on whitespace, peel surrounding punctuation into separate
/// pieces, and split a trailing possessive off its word.
fn tokenize(text: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();

    for chunk in text.split_whitespace() {
        let mut word = chunk;

        while let Some(c) = word.chars().next().filter(|c| LEADING_PUNCT.contains(c)) {
            let (punct, rest) = word.split_at(c.len_utf8());
            pieces.push(Piece::Word(punct));
            word = rest;
        }

        let mut trailing = Vec::new();
        while let Some(c) = word.chars().next_back().filter(|c| TRAILING_PUNCT.contains(c)) {
            let (rest, punct) = word.split_at(word.len() - c.len_utf8());
            trailing.push(Piece::Word(punct));
            word = rest;
        }

        if !word.is_empty() {
            match split_possessive(word) {
                Some((stem, possessive)) => {
                    pieces.push(Piece::Word(stem));
                    pieces.push(Piece::Possessive(possessive));
                }
                None => pieces.push(Piece::Word(word)),
            }
        }

        pieces.extend(trailing.into_iter().rev());
    }

    pieces
}

/// "Paul's" -> ("Paul", "'s"), "Jones'" -> ("Jones", "'"). A period left
/// on the word stays with the possessive ("Paul's." -> "'s.").
fn split_possessive(word: &str) -> Option<(&str, &str)> {
    let bare = without_fused_period(word);
    let split_at = ["'s", "\u{2019}s"]
        .iter()
        .find(|suffix| bare.len() > suffix.len() && bare.ends_with(*suffix))
        .map(|suffix| bare.len() - suffix.len())
        .or_else(|| {
            (bare.len() > 2 && (bare.ends_with("s'") || bare.ends_with("s\u{2019}")))
                .then(|| bare.len() - bare.chars().next_back().map_or(1, char::len_utf8))
        })?;

    Some(word.split_at(split_at))
}

/// Strip one trailing period for lookup purposes ("Jerusalem." -> "Jerusalem")
fn without_fused_period(word: &str) -> &str {
    match word.strip_suffix('.') {
        Some(head) if !head.is_empty() && !head.ends_with('.') => head,
        _ => word,
    }
}

fn punctuation_tag(word: &str) -> Option<&'static str> {
    if word.chars().any(char::is_alphanumeric) {
        return None;
    }
    let tag = match word {
        "." | "!" | "?" => ".",
        "," => ",",
        ":" | ";" | "-" | "--" | "..." => ":",
        "(" | "[" | "{" => "(",
        ")" | "]" | "}" => ")",
        "\"" | "''" | "\u{201d}" => "''",
        "`" | "``" | "\u{201c}" => "``",
        "$" => "$",
        "#" => "#",
        "'" | "\u{2019}" => POSSESSIVE_TAG,
        _ => "SYM",
    };
    Some(tag)
}
