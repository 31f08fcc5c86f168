//! One-pass catalog scan producing a [`SearchIndex`] generation.
//!
//! The scan is chunked: the catalog is partitioned into `batch_size`
//! slices which are indexed independently and merged. Small catalogs are
//! scanned on the calling thread; at or above `parallel_threshold` items
//! the chunks are distributed over the rayon pool and merged afterwards,
//! which keeps per-call time slices bounded on large catalogs. Merging
//! posting *sets* makes the result independent of chunk completion
//! order.

use std::collections::BTreeSet;

use ahash::{AHashMap, AHashSet};
use rayon::prelude::*;
use tracing::debug;

use crate::analysis::{normalize, normalize_joined};
use crate::catalog::{CatalogSignature, Product};
use crate::index::{ProductSummary, SearchIndex};

/// Tuning knobs for the index build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Products per chunk of the scan.
    pub batch_size: usize,
    /// Catalog size at which chunks move to the rayon pool.
    pub parallel_threshold: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            batch_size: 1024,
            parallel_threshold: 8192,
        }
    }
}

/// Vocabulary and summaries for one chunk of the catalog.
#[derive(Debug, Default)]
struct PartialIndex {
    vocabulary: AHashMap<String, AHashSet<u64>>,
    summaries: AHashMap<u64, ProductSummary>,
    categories: BTreeSet<String>,
}

impl PartialIndex {
    fn index_product(&mut self, product: &Product) {
        let name_tokens: AHashSet<String> = normalize(&product.name).into_iter().collect();
        let category_tokens: AHashSet<String> = normalize(&product.category).into_iter().collect();
        let description_tokens = normalize(&product.description);

        for token in name_tokens
            .iter()
            .chain(category_tokens.iter())
            .chain(description_tokens.iter())
        {
            self.vocabulary
                .entry(token.clone())
                .or_default()
                .insert(product.id);
        }

        self.categories.insert(product.category.clone());
        self.summaries.insert(
            product.id,
            ProductSummary {
                name: product.name.clone(),
                category: product.category.clone(),
                name_tokens,
                category_tokens,
                price: product.price,
                sale_price: product.sale_price,
                discounted: product.is_discounted(),
                in_stock: product.in_stock,
            },
        );
    }

    fn index_chunk(chunk: &[Product]) -> Self {
        let mut partial = PartialIndex::default();
        for product in chunk {
            partial.index_product(product);
        }
        partial
    }

    fn merge(mut self, other: PartialIndex) -> Self {
        for (term, ids) in other.vocabulary {
            self.vocabulary.entry(term).or_default().extend(ids);
        }
        self.summaries.extend(other.summaries);
        self.categories.extend(other.categories);
        self
    }
}

/// Builds immutable index generations from catalog snapshots.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    config: BuildConfig,
}

impl IndexBuilder {
    /// Create a builder with default configuration.
    pub fn new() -> Self {
        IndexBuilder::default()
    }

    /// Create a builder with custom configuration.
    pub fn with_config(config: BuildConfig) -> Self {
        IndexBuilder { config }
    }

    /// Scan a catalog snapshot into a new index generation.
    ///
    /// An empty catalog produces a valid empty index.
    pub fn build(&self, catalog: &[Product], generation: u64) -> SearchIndex {
        let signature = CatalogSignature::of(catalog);
        let batch = self.config.batch_size.max(1);

        let merged = if catalog.len() >= self.config.parallel_threshold {
            catalog
                .par_chunks(batch)
                .map(PartialIndex::index_chunk)
                .reduce(PartialIndex::default, PartialIndex::merge)
        } else {
            catalog
                .chunks(batch)
                .map(PartialIndex::index_chunk)
                .fold(PartialIndex::default(), PartialIndex::merge)
        };

        let index = Self::finish(merged, generation, signature);
        debug!(
            generation,
            products = index.stats().product_count,
            terms = index.stats().word_count,
            "index generation built"
        );
        index
    }

    /// Derive the prefix/length/name lookup structures and seal the
    /// generation.
    fn finish(partial: PartialIndex, generation: u64, signature: CatalogSignature) -> SearchIndex {
        let mut sorted_terms: Vec<String> = partial.vocabulary.keys().cloned().collect();
        sorted_terms.sort_unstable();

        let mut terms_by_len: AHashMap<usize, Vec<String>> = AHashMap::new();
        for term in &sorted_terms {
            terms_by_len
                .entry(term.chars().count())
                .or_default()
                .push(term.clone());
        }

        let mut name_prefixes: Vec<(String, u64)> = partial
            .summaries
            .iter()
            .map(|(&id, summary)| (normalize_joined(&summary.name), id))
            .collect();
        name_prefixes.sort_unstable();

        SearchIndex {
            generation,
            signature,
            vocabulary: partial.vocabulary,
            summaries: partial.summaries,
            sorted_terms,
            terms_by_len,
            categories: partial.categories,
            name_prefixes,
        }
    }
}
