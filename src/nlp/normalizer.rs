//! Token stream normalization
//!
//! Taggers tend to fuse a sentence-final period onto the last word, which
//! would let a noun phrase run straight into the next sentence. The passes
//! here make every sentence boundary a standalone `.` token and glue
//! "of" + "the" into a single preposition so titles like "News of the World"
//! survive as one term.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::pipeline::traits::Preprocessor;
use crate::types::{ExtractConfig, TaggedToken, TokenStream};

/// A letter or digit directly followed by a period
static FUSED_PERIOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9]\.").expect("valid fused-period pattern"));

/// Default preprocessor: period spacing before tagging, then period
/// splitting and "of the" merging on the tagged stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamNormalizer;

impl Preprocessor for StreamNormalizer {
    fn prepare_text<'a>(&self, text: &'a str, _cfg: &ExtractConfig) -> Cow<'a, str> {
        space_fused_periods(text)
    }

    fn preprocess(&self, tokens: &mut TokenStream, _cfg: &ExtractConfig) {
        split_fused_periods(tokens.tokens_mut());
        merge_of_the(tokens.tokens_mut());
    }
}

/// Insert a space after any period that follows a letter or digit and is
/// itself followed by a non-whitespace character ("ends.Next" -> "ends. Next").
pub fn space_fused_periods(text: &str) -> Cow<'_, str> {
    let mut spaced: Option<String> = None;
    let mut copied = 0;

    for m in FUSED_PERIOD.find_iter(text) {
        let end = m.end();
        if text[end..].chars().next().is_some_and(|c| !c.is_whitespace()) {
            let buf = spaced.get_or_insert_with(|| String::with_capacity(text.len() + 16));
            buf.push_str(&text[copied..end]);
            buf.push(' ');
            copied = end;
        }
    }

    match spaced {
        None => Cow::Borrowed(text),
        Some(mut buf) => {
            buf.push_str(&text[copied..]);
            Cow::Owned(buf)
        }
    }
}

/// Split a trailing period off any token into its own `(".", ".")` token.
///
/// A lone "." and tokens ending in two periods ("...", "etc..") are left
/// alone, which keeps the pass idempotent.
pub fn split_fused_periods(tokens: &mut Vec<TaggedToken>) {
    if !tokens.iter().any(has_fused_period) {
        return;
    }

    let mut split = Vec::with_capacity(tokens.len() + tokens.len() / 8);
    for mut token in tokens.drain(..) {
        if has_fused_period(&token) {
            token.text.pop();
            split.push(token);
            split.push(TaggedToken::new(".", "."));
        } else {
            split.push(token);
        }
    }
    *tokens = split;
}

fn has_fused_period(token: &TaggedToken) -> bool {
    token
        .text
        .strip_suffix('.')
        .is_some_and(|head| !head.is_empty() && !head.ends_with('.'))
}

/// Merge "of" immediately followed by "the" into one "of the" token.
///
/// Single left-to-right pass; the merged token keeps the tag of "of" and is
/// not checked again.
pub fn merge_of_the(tokens: &mut Vec<TaggedToken>) {
    let mut merged = Vec::with_capacity(tokens.len());
    {
        let mut iter = tokens.drain(..).peekable();
        while let Some(mut token) = iter.next() {
            if token.text == "of" && iter.peek().is_some_and(|next| next.text == "the") {
                iter.next();
                token.text.push_str(" the");
            }
            merged.push(token);
        }
    }
    *tokens = merged;
}
