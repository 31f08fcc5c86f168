//! Catalog input records and rebuild-detection signatures.
//!
//! Products are owned by the storefront's catalog loader; the engine
//! treats a `&[Product]` slice as an immutable snapshot for the lifetime
//! of one index generation.

use std::hash::{BuildHasher, Hash, Hasher};

use serde::{Deserialize, Serialize};

/// One product record as supplied by the catalog loader.
///
/// `category` is a delimited path, e.g. `"Nappali > Kanapé"`. Prices are
/// in forints; `sale_price`, when present, is at or below `price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, stable product id.
    pub id: u64,
    /// Display name, accents preserved.
    pub name: String,
    /// Delimited category path.
    pub category: String,
    /// List price in forints.
    pub price: u64,
    /// Discounted price, if the product is on sale.
    pub sale_price: Option<u64>,
    /// Whether the product is currently in stock.
    pub in_stock: bool,
    /// Free-text description and parameters.
    pub description: String,
}

impl Product {
    /// The price a buyer actually pays: sale price when present.
    pub fn effective_price(&self) -> u64 {
        self.sale_price.unwrap_or(self.price)
    }

    /// Whether the product has an active discount.
    pub fn is_discounted(&self) -> bool {
        matches!(self.sale_price, Some(sale) if sale < self.price)
    }
}

// Fixed seeds so the same catalog content always folds to the same
// checksum within and across processes.
const SIGNATURE_SEEDS: (u64, u64, u64, u64) = (
    0x6d6f_6269_6c69_6131,
    0x6d6f_6269_6c69_6132,
    0x6d6f_6269_6c69_6133,
    0x6d6f_6269_6c69_6134,
);

/// Cheap signature of one catalog snapshot, used to decide whether a
/// rebuild is warranted.
///
/// Combines the item count, the largest id seen, and a content checksum
/// over the fields that affect search behavior. A price edit alone
/// changes the checksum even when the count is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogSignature {
    /// Number of products in the snapshot.
    pub item_count: usize,
    /// Largest product id in the snapshot.
    pub max_id: u64,
    /// Checksum over (id, price, sale_price, in_stock) per product.
    pub checksum: u64,
}

impl CatalogSignature {
    /// Derive the signature of a catalog snapshot in one pass.
    pub fn of(catalog: &[Product]) -> Self {
        let state = ahash::RandomState::with_seeds(
            SIGNATURE_SEEDS.0,
            SIGNATURE_SEEDS.1,
            SIGNATURE_SEEDS.2,
            SIGNATURE_SEEDS.3,
        );
        let mut hasher = state.build_hasher();
        let mut max_id = 0;

        for product in catalog {
            product.id.hash(&mut hasher);
            product.price.hash(&mut hasher);
            product.sale_price.hash(&mut hasher);
            product.in_stock.hash(&mut hasher);
            max_id = max_id.max(product.id);
        }

        CatalogSignature {
            item_count: catalog.len(),
            max_id,
            checksum: hasher.finish(),
        }
    }
}
