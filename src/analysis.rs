//! Text normalization for index keys and query terms.
//!
//! All index vocabulary and query lookups operate on *folded* text:
//! lowercased, with Hungarian accented characters mapped to their base
//! forms (á→a, é→e, ő→o, ű→u, …). Display strings are never altered;
//! folding applies to keys only, so "Bézs kanapé" is still shown with
//! its accents while it is indexed under `bezs` and `kanape`.
//!
//! Tokenization splits on Unicode word boundaries (UAX #29) and drops
//! tokens shorter than [`MIN_TOKEN_LEN`] characters. Everything in this
//! module is a pure function: no state, no errors.

use unicode_segmentation::UnicodeSegmentation;

/// Minimum token length (in chars) kept by [`normalize`].
pub const MIN_TOKEN_LEN: usize = 2;

/// Map one character to its lowercased, accent-free form.
///
/// Covers the Hungarian alphabet's accented vowels in both cases. Other
/// characters pass through `to_lowercase`.
pub fn fold_char(c: char) -> char {
    match c {
        'á' | 'Á' => 'a',
        'é' | 'É' => 'e',
        'í' | 'Í' => 'i',
        'ó' | 'Ó' | 'ö' | 'Ö' | 'ő' | 'Ő' => 'o',
        'ú' | 'Ú' | 'ü' | 'Ü' | 'ű' | 'Ű' => 'u',
        _ => c.to_lowercase().next().unwrap_or(c),
    }
}

/// Lowercase a string and strip Hungarian diacritics.
pub fn fold_diacritics(text: &str) -> String {
    text.chars().map(fold_char).collect()
}

/// Split text into folded word tokens.
///
/// Uses Unicode word boundaries, keeps only segments containing at least
/// one alphanumeric character, folds each, and drops tokens shorter than
/// [`MIN_TOKEN_LEN`].
pub fn normalize(text: &str) -> Vec<String> {
    text.split_word_bounds()
        .filter(|word| word.chars().any(|c| c.is_alphanumeric()))
        .map(fold_diacritics)
        .filter(|token| token.chars().count() >= MIN_TOKEN_LEN)
        .collect()
}

/// Fold a string into a single space-joined key.
///
/// Used where whole phrases are compared as one unit, e.g. product-name
/// prefixes in autocomplete and rescue query assembly.
pub fn normalize_joined(text: &str) -> String {
    normalize(text).join(" ")
}
