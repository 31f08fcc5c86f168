//! Published-generation store with read-copy-update swaps.
//!
//! Readers clone an `Arc` of the current generation and run against it
//! without further coordination; generations are immutable once
//! published. One writer at a time rebuilds off to the side and swaps
//! the pointer. A rebuild request arriving while another is in flight
//! is coalesced into a silent no-op, and a request whose catalog
//! signature matches the published generation skips the scan entirely.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::info;

use crate::catalog::{CatalogSignature, Product};
use crate::index::{BuildConfig, IndexBuilder, SearchIndex};

/// What a rebuild request actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildOutcome {
    /// A new generation was built and published.
    Built,
    /// The catalog signature matched the published generation; nothing
    /// to do.
    Unchanged,
    /// Another rebuild was already in flight; this request was dropped.
    AlreadyInProgress,
}

/// Owns the currently published [`SearchIndex`] generation.
pub struct IndexStore {
    published: RwLock<Arc<SearchIndex>>,
    building: AtomicBool,
    generation: AtomicU64,
    builder: IndexBuilder,
}

impl IndexStore {
    /// Create a store holding an empty, unpublished index (generation 0).
    pub fn new(config: BuildConfig) -> Self {
        IndexStore {
            published: RwLock::new(Arc::new(SearchIndex::empty(0))),
            building: AtomicBool::new(false),
            generation: AtomicU64::new(0),
            builder: IndexBuilder::with_config(config),
        }
    }

    /// The current generation, for lock-free reading. The snapshot stays
    /// valid (and immutable) even if a newer generation is published
    /// while the caller holds it.
    pub fn snapshot(&self) -> Arc<SearchIndex> {
        self.published.read().clone()
    }

    /// Whether a generation has ever been published.
    pub fn is_ready(&self) -> bool {
        self.generation.load(Ordering::Acquire) > 0
    }

    /// Rebuild from a catalog snapshot if its signature differs from the
    /// published generation's.
    ///
    /// At most one rebuild runs at a time; a concurrent request returns
    /// [`RebuildOutcome::AlreadyInProgress`] without building or queuing.
    pub fn rebuild(&self, catalog: &[Product]) -> RebuildOutcome {
        if self.building.swap(true, Ordering::AcqRel) {
            return RebuildOutcome::AlreadyInProgress;
        }

        let outcome = self.rebuild_locked(catalog);
        self.building.store(false, Ordering::Release);
        outcome
    }

    fn rebuild_locked(&self, catalog: &[Product]) -> RebuildOutcome {
        let signature = CatalogSignature::of(catalog);
        if self.is_ready() && signature == self.snapshot().signature() {
            return RebuildOutcome::Unchanged;
        }

        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let index = self.builder.build(catalog, generation);
        let stats = index.stats();

        *self.published.write() = Arc::new(index);
        info!(
            generation,
            products = stats.product_count,
            terms = stats.word_count,
            "published index generation"
        );
        RebuildOutcome::Built
    }
}
