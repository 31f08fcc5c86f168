//! The in-memory search index: one immutable generation per build.
//!
//! A [`SearchIndex`] holds the inverted vocabulary (folded term →
//! posting set of product ids) and a denormalized summary per product so
//! scoring never re-touches full product records. Derived structures
//! (sorted terms for prefix lookup, length buckets for fuzzy candidates,
//! the folded name table for autocomplete) are computed once at build
//! time and never mutated afterwards.

pub mod builder;
pub mod store;

pub use builder::{BuildConfig, IndexBuilder};
pub use store::{IndexStore, RebuildOutcome};

use std::collections::BTreeSet;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogSignature;

/// Denormalized per-product record for cheap scoring.
///
/// Field membership for a matched term is decided against the token
/// sets: a term in the product's posting that is in neither `name_tokens`
/// nor `category_tokens` came from the description.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSummary {
    /// Display name, accents preserved.
    pub name: String,
    /// Display category path.
    pub category: String,
    /// Folded tokens of the name.
    pub name_tokens: AHashSet<String>,
    /// Folded tokens of the category path.
    pub category_tokens: AHashSet<String>,
    /// List price in forints.
    pub price: u64,
    /// Discounted price, if any.
    pub sale_price: Option<u64>,
    /// Whether the sale price is an actual reduction.
    pub discounted: bool,
    /// Stock flag.
    pub in_stock: bool,
}

impl ProductSummary {
    /// The price a buyer actually pays.
    pub fn effective_price(&self) -> u64 {
        self.sale_price.unwrap_or(self.price)
    }
}

/// Counts reported to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of indexed products.
    pub product_count: usize,
    /// Number of distinct vocabulary terms.
    pub word_count: usize,
    /// Generation counter of this index.
    pub generation: u64,
}

/// One fully-built, immutable index generation.
#[derive(Debug)]
pub struct SearchIndex {
    generation: u64,
    signature: CatalogSignature,
    /// Folded term → posting set.
    vocabulary: AHashMap<String, AHashSet<u64>>,
    /// Product id → summary.
    summaries: AHashMap<u64, ProductSummary>,
    /// All vocabulary terms, sorted, for prefix scans.
    sorted_terms: Vec<String>,
    /// Vocabulary terms bucketed by char length, for fuzzy candidates.
    terms_by_len: AHashMap<usize, Vec<String>>,
    /// Display-form category paths.
    categories: BTreeSet<String>,
    /// (folded product name, id), sorted, for autocomplete.
    name_prefixes: Vec<(String, u64)>,
}

impl SearchIndex {
    /// An empty but valid index. Searches against it return no matches.
    pub fn empty(generation: u64) -> Self {
        SearchIndex {
            generation,
            signature: CatalogSignature::default(),
            vocabulary: AHashMap::new(),
            summaries: AHashMap::new(),
            sorted_terms: Vec::new(),
            terms_by_len: AHashMap::new(),
            categories: BTreeSet::new(),
            name_prefixes: Vec::new(),
        }
    }

    /// Generation counter assigned at build time.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Signature of the catalog snapshot this index was built from.
    pub fn signature(&self) -> CatalogSignature {
        self.signature
    }

    /// Product and vocabulary counts.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            product_count: self.summaries.len(),
            word_count: self.vocabulary.len(),
            generation: self.generation,
        }
    }

    /// Whether the index contains no products.
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// The posting set for a folded term.
    pub fn postings(&self, term: &str) -> Option<&AHashSet<u64>> {
        self.vocabulary.get(term)
    }

    /// Posting-set size for a folded term; zero when absent.
    pub fn posting_count(&self, term: &str) -> usize {
        self.vocabulary.get(term).map_or(0, |s| s.len())
    }

    /// The summary for a product id.
    pub fn summary(&self, product_id: u64) -> Option<&ProductSummary> {
        self.summaries.get(&product_id)
    }

    /// Vocabulary terms starting with `prefix`, as a contiguous sorted
    /// slice.
    pub fn terms_with_prefix(&self, prefix: &str) -> &[String] {
        prefix_slice(&self.sorted_terms, prefix, |term| term.as_str())
    }

    /// Vocabulary terms whose char length is within `window` of `len`.
    pub fn terms_with_len_near(&self, len: usize, window: usize) -> impl Iterator<Item = &str> {
        let lo = len.saturating_sub(window);
        let hi = len + window;
        (lo..=hi)
            .filter_map(|l| self.terms_by_len.get(&l))
            .flatten()
            .map(String::as_str)
    }

    /// Products whose folded name starts with `prefix`, as a contiguous
    /// sorted slice of (folded name, id).
    pub fn product_names_with_prefix(&self, prefix: &str) -> &[(String, u64)] {
        prefix_slice(&self.name_prefixes, prefix, |(name, _)| name.as_str())
    }

    /// Display-form category paths, sorted.
    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    /// Content equality, ignoring the generation counter. Two idempotent
    /// rebuilds of the same catalog are `same_content` even though they
    /// are distinct generations.
    pub fn same_content(&self, other: &SearchIndex) -> bool {
        self.signature == other.signature
            && self.vocabulary == other.vocabulary
            && self.summaries == other.summaries
    }
}

/// Binary-search a sorted slice for the contiguous run of entries whose
/// key starts with `prefix`.
fn prefix_slice<'a, T>(sorted: &'a [T], prefix: &str, key: impl Fn(&T) -> &str) -> &'a [T] {
    if prefix.is_empty() {
        return &[];
    }
    let start = sorted.partition_point(|entry| key(entry) < prefix);
    let mut end = start;
    while end < sorted.len() && key(&sorted[end]).starts_with(prefix) {
        end += 1;
    }
    &sorted[start..end]
}
