//! Query and field text normalization
//!
//! Everything the scorer compares passes through [`normalize`] first, so
//! "Propiédad", "PROPIEDAD" and "propiedad" are the same string to the engine.

use std::ops::RangeInclusive;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Combining diacritical mark blocks: base, extended, supplement, for symbols, half marks
const DIACRITICAL_BLOCKS: [RangeInclusive<char>; 5] = [
    '\u{0300}'..='\u{036F}',
    '\u{1AB0}'..='\u{1AFF}',
    '\u{1DC0}'..='\u{1DFF}',
    '\u{20D0}'..='\u{20FF}',
    '\u{FE20}'..='\u{FE2F}',
];

/// Accent-style combining mark
///
/// Vowel signs and other marks that carry meaning in Indic and similar
/// scripts are not diacritics and survive normalization.
pub fn is_diacritical_mark(c: char) -> bool {
    is_combining_mark(c) && DIACRITICAL_BLOCKS.iter().any(|block| block.contains(&c))
}

/// Fold text for comparison: lowercase, NFD-decompose, drop diacritical marks, trim
///
/// Stable under repeated application.
///
/// # Examples
/// ```
/// use omnisearch::search::normalize::normalize;
///
/// assert_eq!(normalize("  Propiédad "), "propiedad");
/// assert_eq!(normalize(&normalize("Ñandú")), normalize("Ñandú"));
/// ```
pub fn normalize(text: &str) -> String {
    // Lowercase before decomposing: some lowercase mappings ("İ") emit combining marks.
    let folded: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_diacritical_mark(*c))
        .collect();
    folded.trim().to_string()
}

/// Split text into normalized, non-empty whitespace-separated tokens
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(String::from)
        .collect()
}

/// A parsed search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub raw: String,
    pub normalized: String,
    pub tokens: Vec<String>,
}

impl SearchQuery {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = normalize(&raw);
        let tokens = normalized.split_whitespace().map(String::from).collect();
        Self {
            raw,
            normalized,
            tokens,
        }
    }

    /// Length of the normalized query in characters (not bytes)
    #[inline]
    pub fn char_len(&self) -> usize {
        self.normalized.chars().count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}
