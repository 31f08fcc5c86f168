//! Typo recovery against the index vocabulary and the lexicon.
//!
//! Invoked only for query tokens whose direct lookup yields zero
//! postings. Candidates are restricted to terms of similar length (the
//! index buckets its vocabulary by char length) so the full vocabulary
//! is never scanned; distances are computed with a bounded
//! optimal-string-alignment metric that exits early past the bound.

pub mod levenshtein;

pub use levenshtein::{damerau_levenshtein_threshold, levenshtein_distance};

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::index::SearchIndex;
use crate::lexicon::Lexicon;

/// Configuration for fuzzy correction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuzzyConfig {
    /// Maximum edit distance for a correction.
    pub max_distance: usize,
    /// Maximum number of corrections to return.
    pub max_candidates: usize,
    /// Candidate terms may differ in char length by at most this much.
    pub length_window: usize,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        FuzzyConfig {
            max_distance: 2,
            max_candidates: 5,
            length_window: 2,
        }
    }
}

/// One correction candidate for a misspelled token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// The corrected (folded) term.
    pub term: String,
    /// Edit distance from the original token.
    pub distance: usize,
    /// Posting-set size of the corrected term; zero for lexicon-only
    /// terms absent from the catalog.
    pub postings: usize,
}

/// Bounded edit-distance lookup over vocabulary and lexicon terms.
#[derive(Debug, Clone, Default)]
pub struct FuzzyMatcher {
    config: FuzzyConfig,
}

impl FuzzyMatcher {
    /// Create a matcher with default configuration.
    pub fn new() -> Self {
        FuzzyMatcher::default()
    }

    /// Create a matcher with custom configuration.
    pub fn with_config(config: FuzzyConfig) -> Self {
        FuzzyMatcher { config }
    }

    /// Suggest corrections for a folded token with zero postings.
    ///
    /// Results are ordered by ascending distance, ties broken by
    /// posting-set size descending (prefer the correction that yields
    /// more results), then lexicographically for determinism. Empty when
    /// nothing lies within the distance bound.
    pub fn suggest(&self, token: &str, index: &SearchIndex, lexicon: &Lexicon) -> Vec<Correction> {
        let token_len = token.chars().count();

        let mut candidates: AHashSet<&str> = index
            .terms_with_len_near(token_len, self.config.length_window)
            .collect();
        candidates.extend(
            lexicon
                .terms()
                .filter(|term| term.chars().count().abs_diff(token_len) <= self.config.length_window),
        );
        candidates.remove(token);

        let mut corrections: Vec<Correction> = candidates
            .into_iter()
            .filter_map(|candidate| {
                damerau_levenshtein_threshold(token, candidate, self.config.max_distance).map(
                    |distance| Correction {
                        term: candidate.to_string(),
                        distance,
                        postings: index.posting_count(candidate),
                    },
                )
            })
            .collect();

        corrections.sort_unstable_by(|a, b| {
            a.distance
                .cmp(&b.distance)
                .then(b.postings.cmp(&a.postings))
                .then(a.term.cmp(&b.term))
        });
        corrections.truncate(self.config.max_candidates);
        corrections
    }

    /// The best correction that would actually produce results.
    pub fn best_with_postings(
        &self,
        token: &str,
        index: &SearchIndex,
        lexicon: &Lexicon,
    ) -> Option<Correction> {
        self.suggest(token, index, lexicon)
            .into_iter()
            .find(|c| c.postings > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::index::IndexBuilder;

    fn sample_index() -> SearchIndex {
        let catalog = vec![
            Product {
                id: 1,
                name: "Kanapé".to_string(),
                category: "Nappali > Kanapé".to_string(),
                price: 95_000,
                sale_price: None,
                in_stock: true,
                description: String::new(),
            },
            Product {
                id: 2,
                name: "Kanapé ágy".to_string(),
                category: "Nappali > Kanapé".to_string(),
                price: 120_000,
                sale_price: None,
                in_stock: true,
                description: String::new(),
            },
            Product {
                id: 3,
                name: "Fotel".to_string(),
                category: "Nappali > Fotel".to_string(),
                price: 45_000,
                sale_price: None,
                in_stock: true,
                description: String::new(),
            },
        ];
        IndexBuilder::new().build(&catalog, 1)
    }

    #[test]
    fn test_typo_corrected_to_vocabulary_term() {
        let index = sample_index();
        let corrections = FuzzyMatcher::new().suggest("kanpe", &index, Lexicon::shared());
        assert_eq!(corrections[0].term, "kanape");
        assert_eq!(corrections[0].distance, 1);
        assert_eq!(corrections[0].postings, 2);
    }

    #[test]
    fn test_no_candidate_within_bound() {
        let index = sample_index();
        let corrections = FuzzyMatcher::new().suggest("xyzxyz", &index, Lexicon::shared());
        assert!(corrections.is_empty());
    }

    #[test]
    fn test_prefers_larger_posting_set_on_distance_tie() {
        let index = sample_index();
        // Both "kanape" (2 postings) and lexicon terms may tie on
        // distance; the vocabulary term with postings must sort first.
        let corrections = FuzzyMatcher::new().suggest("kanap", &index, Lexicon::shared());
        assert_eq!(corrections[0].term, "kanape");
        assert!(corrections[0].postings >= corrections.last().unwrap().postings);
    }

    #[test]
    fn test_best_with_postings_skips_empty_lexicon_terms() {
        let index = sample_index();
        // "sofa"-like typo: the lexicon knows "szofa" but the catalog has
        // no product carrying it, so the best *useful* correction differs.
        let best = FuzzyMatcher::new().best_with_postings("fotell", &index, Lexicon::shared());
        assert_eq!(best.unwrap().term, "fotel");
    }

    #[test]
    fn test_length_window_bounds_candidates() {
        let index = sample_index();
        let matcher = FuzzyMatcher::with_config(FuzzyConfig {
            max_distance: 2,
            max_candidates: 10,
            length_window: 0,
        });
        // With a zero-length window, a 5-char token never reaches the
        // 6-char "kanape".
        assert!(matcher.suggest("kanpe", &index, Lexicon::shared()).is_empty());
    }

    #[test]
    fn test_deterministic_ordering() {
        let index = sample_index();
        let matcher = FuzzyMatcher::new();
        let a = matcher.suggest("kanpe", &index, Lexicon::shared());
        let b = matcher.suggest("kanpe", &index, Lexicon::shared());
        assert_eq!(a, b);
    }
}
