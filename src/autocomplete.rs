//! Autocomplete suggestions for the search box.
//!
//! Runs on every keystroke (after the caller's debounce), so the path
//! only reads structures the index builder prepared up front: the
//! sorted folded-name table, the category set, and the sorted
//! vocabulary. Nothing here re-derives the lexicon or rescans the
//! catalog.
//!
//! Suggestion kinds are a tagged enum so consumers handle each shape
//! exhaustively instead of branching on a type string.

use std::sync::atomic::{AtomicUsize, Ordering};

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::analysis::normalize_joined;
use crate::index::SearchIndex;
use crate::lexicon::Lexicon;
use crate::prefs::PreferenceStore;

/// Static popular-query pool, rotated across calls. Also the fallback
/// source for rescue suggestions.
pub(crate) const POPULAR_QUERIES: &[&str] = &[
    "skandináv nappali",
    "kanapé akció",
    "étkezőasztal székekkel",
    "modern fotel",
    "franciaágy",
    "gyerekszoba bútor",
    "dohányzóasztal",
    "ruhásszekrény",
];

/// One autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Suggestion {
    /// A concrete product whose name matches the typed prefix.
    Product {
        id: u64,
        name: String,
        price: u64,
        sale_price: Option<u64>,
    },
    /// A category path match.
    Category { text: String },
    /// A vocabulary or lexicon term match.
    Synonym { text: String },
    /// An entry from the popular-query pool.
    Popular { text: String },
}

impl Suggestion {
    /// The display text of any suggestion kind.
    pub fn text(&self) -> &str {
        match self {
            Suggestion::Product { name, .. } => name,
            Suggestion::Category { text }
            | Suggestion::Synonym { text }
            | Suggestion::Popular { text } => text,
        }
    }
}

/// Generates prefix suggestions against the published index.
#[derive(Debug, Default)]
pub struct AutocompleteGenerator {
    /// Rotates the popular pool deterministically; no clock, no RNG.
    rotation: AtomicUsize,
}

impl AutocompleteGenerator {
    /// Create a generator with the rotation counter at zero.
    pub fn new() -> Self {
        AutocompleteGenerator::default()
    }

    /// Produce up to `limit` suggestions for a typed prefix, in priority
    /// order: product names, categories, vocabulary/synonyms, popular
    /// queries.
    pub fn suggest(
        &self,
        query: &str,
        limit: usize,
        index: &SearchIndex,
        lexicon: &Lexicon,
        prefs: &dyn PreferenceStore,
    ) -> Vec<Suggestion> {
        let folded = normalize_joined(query);
        let mut out: Vec<Suggestion> = Vec::new();
        let mut seen: AHashSet<String> = AHashSet::new();

        if !folded.is_empty() {
            self.product_matches(&folded, limit, index, &mut out, &mut seen);
            self.category_matches(&folded, limit, index, &mut out, &mut seen);
            self.term_matches(&folded, limit, index, lexicon, &mut out, &mut seen);
        }
        self.popular_entries(limit, prefs, &mut out, &mut seen);

        out.truncate(limit);
        out
    }

    fn product_matches(
        &self,
        folded: &str,
        limit: usize,
        index: &SearchIndex,
        out: &mut Vec<Suggestion>,
        seen: &mut AHashSet<String>,
    ) {
        for (name_key, product_id) in index.product_names_with_prefix(folded) {
            if out.len() >= limit {
                return;
            }
            let Some(summary) = index.summary(*product_id) else {
                continue;
            };
            if seen.insert(name_key.clone()) {
                out.push(Suggestion::Product {
                    id: *product_id,
                    name: summary.name.clone(),
                    price: summary.price,
                    sale_price: summary.sale_price,
                });
            }
        }
    }

    fn category_matches(
        &self,
        folded: &str,
        limit: usize,
        index: &SearchIndex,
        out: &mut Vec<Suggestion>,
        seen: &mut AHashSet<String>,
    ) {
        for category in index.categories() {
            if out.len() >= limit {
                return;
            }
            let key = normalize_joined(category);
            if key.contains(folded) && seen.insert(key) {
                out.push(Suggestion::Category {
                    text: category.clone(),
                });
            }
        }
    }

    fn term_matches(
        &self,
        folded: &str,
        limit: usize,
        index: &SearchIndex,
        lexicon: &Lexicon,
        out: &mut Vec<Suggestion>,
        seen: &mut AHashSet<String>,
    ) {
        // Complete the word being typed: the last token of the prefix.
        let Some(last) = folded.split(' ').next_back() else {
            return;
        };
        if last.is_empty() {
            return;
        }

        for term in index.terms_with_prefix(last) {
            if out.len() >= limit {
                return;
            }
            let display = lexicon.display_for(term).unwrap_or(term);
            if seen.insert(term.clone()) {
                out.push(Suggestion::Synonym {
                    text: display.to_string(),
                });
            }
        }

        let mut lexicon_terms: Vec<&str> = lexicon
            .terms()
            .filter(|term| term.starts_with(last))
            .collect();
        lexicon_terms.sort_unstable();
        for term in lexicon_terms {
            if out.len() >= limit {
                return;
            }
            let display = lexicon.display_for(term).unwrap_or(term);
            if seen.insert(term.to_string()) {
                out.push(Suggestion::Synonym {
                    text: display.to_string(),
                });
            }
        }
    }

    fn popular_entries(
        &self,
        limit: usize,
        prefs: &dyn PreferenceStore,
        out: &mut Vec<Suggestion>,
        seen: &mut AHashSet<String>,
    ) {
        if out.len() >= limit {
            return;
        }

        // Personalized entries first: the user's most viewed categories.
        for category in prefs.top_categories(2).unwrap_or_default() {
            if out.len() >= limit {
                return;
            }
            let leaf = category
                .rsplit('>')
                .next()
                .unwrap_or(category.as_str())
                .trim()
                .to_string();
            if !leaf.is_empty() && seen.insert(normalize_joined(&leaf)) {
                out.push(Suggestion::Popular { text: leaf });
            }
        }

        let offset = self.rotation.fetch_add(1, Ordering::Relaxed);
        for i in 0..POPULAR_QUERIES.len() {
            if out.len() >= limit {
                return;
            }
            let entry = POPULAR_QUERIES[(offset + i) % POPULAR_QUERIES.len()];
            if seen.insert(normalize_joined(entry)) {
                out.push(Suggestion::Popular {
                    text: entry.to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::index::IndexBuilder;
    use crate::prefs::NoPreferences;

    fn sample_index() -> SearchIndex {
        let catalog = vec![
            Product {
                id: 1,
                name: "Kanapé Oslo".to_string(),
                category: "Nappali > Kanapé".to_string(),
                price: 95_000,
                sale_price: None,
                in_stock: true,
                description: String::new(),
            },
            Product {
                id: 2,
                name: "Kanapéágy Bergen".to_string(),
                category: "Nappali > Kanapé".to_string(),
                price: 120_000,
                sale_price: Some(99_000),
                in_stock: true,
                description: String::new(),
            },
            Product {
                id: 3,
                name: "Fotel Turku".to_string(),
                category: "Nappali > Fotel".to_string(),
                price: 45_000,
                sale_price: None,
                in_stock: false,
                description: String::new(),
            },
        ];
        IndexBuilder::new().build(&catalog, 1)
    }

    #[test]
    fn test_product_prefix_matches_come_first() {
        let index = sample_index();
        let generator = AutocompleteGenerator::new();
        let suggestions =
            generator.suggest("kanap", 10, &index, Lexicon::shared(), &NoPreferences);

        match &suggestions[0] {
            Suggestion::Product { id, price, .. } => {
                assert_eq!(*id, 1);
                assert_eq!(*price, 95_000);
            }
            other => panic!("expected a product suggestion, got {other:?}"),
        }
        assert!(
            suggestions
                .iter()
                .any(|s| matches!(s, Suggestion::Category { text } if text == "Nappali > Kanapé"))
        );
    }

    #[test]
    fn test_limit_respected() {
        let index = sample_index();
        let generator = AutocompleteGenerator::new();
        let suggestions = generator.suggest("ka", 3, &index, Lexicon::shared(), &NoPreferences);
        assert!(suggestions.len() <= 3);
    }

    #[test]
    fn test_empty_prefix_yields_popular_pool() {
        let index = sample_index();
        let generator = AutocompleteGenerator::new();
        let suggestions = generator.suggest("", 4, &index, Lexicon::shared(), &NoPreferences);
        assert_eq!(suggestions.len(), 4);
        assert!(
            suggestions
                .iter()
                .all(|s| matches!(s, Suggestion::Popular { .. }))
        );
    }

    #[test]
    fn test_popular_pool_rotates_between_calls() {
        let index = sample_index();
        let generator = AutocompleteGenerator::new();
        let first = generator.suggest("", 1, &index, Lexicon::shared(), &NoPreferences);
        let second = generator.suggest("", 1, &index, Lexicon::shared(), &NoPreferences);
        assert_ne!(first[0].text(), second[0].text());
    }

    #[test]
    fn test_personalized_popular_entries() {
        struct Prefs;
        impl PreferenceStore for Prefs {
            fn top_categories(&self, _limit: usize) -> crate::error::Result<Vec<String>> {
                Ok(vec!["Nappali > Fotel".to_string()])
            }
        }

        let index = sample_index();
        let generator = AutocompleteGenerator::new();
        let suggestions = generator.suggest("", 3, &index, Lexicon::shared(), &Prefs);
        assert_eq!(
            suggestions[0],
            Suggestion::Popular {
                text: "Fotel".to_string()
            }
        );
    }

    #[test]
    fn test_synonym_suggestions_use_display_form() {
        let index = sample_index();
        let generator = AutocompleteGenerator::new();
        let suggestions =
            generator.suggest("skandi", 10, &index, Lexicon::shared(), &NoPreferences);
        assert!(
            suggestions
                .iter()
                .any(|s| matches!(s, Suggestion::Synonym { text } if text == "skandináv"))
        );
    }

    #[test]
    fn test_no_duplicate_texts() {
        let index = sample_index();
        let generator = AutocompleteGenerator::new();
        let suggestions =
            generator.suggest("kanape", 10, &index, Lexicon::shared(), &NoPreferences);
        let mut keys: Vec<String> = suggestions
            .iter()
            .map(|s| normalize_joined(s.text()))
            .collect();
        keys.sort();
        let before = keys.len();
        keys.dedup();
        assert_eq!(before, keys.len());
    }
}
