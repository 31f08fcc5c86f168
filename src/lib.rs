//! # Mobilia
//!
//! In-process catalog search and ranking engine for a Hungarian-language
//! furniture storefront.
//!
//! ## Features
//!
//! - Inverted index over product name, category, and description
//! - Diacritic-insensitive matching (á→a, ő→o, …) with accents preserved
//!   in display strings
//! - Intent parsing: furniture type, style, color, room, price phrases
//!   ("100e alatt"), sale-only queries
//! - Bounded edit-distance typo recovery with "did you mean"
//! - Additive ranking with personalization boosts from an external
//!   preference store
//! - Autocomplete over product names, categories, and vocabulary
//! - Read-copy-update index generations: rebuilds never block readers
//!
//! ## Example
//!
//! ```
//! use mobilia::{Product, SearchEngine, SearchOptions};
//!
//! let engine = SearchEngine::new();
//! engine.build_index(&[Product {
//!     id: 1,
//!     name: "Bézs kanapé".to_string(),
//!     category: "Nappali > Kanapé".to_string(),
//!     price: 95_000,
//!     sale_price: None,
//!     in_stock: true,
//!     description: "Háromszemélyes, kárpitozott".to_string(),
//! }]);
//!
//! let response = engine.smart_search("bézs kanapé 100e alatt", &SearchOptions::default());
//! assert_eq!(response.results[0].product_id, 1);
//! ```

pub mod analysis;
pub mod autocomplete;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod fuzzy;
pub mod index;
pub mod intent;
pub mod lexicon;
pub mod prefs;
pub mod scoring;

pub use autocomplete::Suggestion;
pub use catalog::{CatalogSignature, Product};
pub use engine::{
    DebugInfo, EngineConfig, ProactiveSuggestion, SearchEngine, SearchOptions, SearchResponse,
};
pub use error::{MobiliaError, Result};
pub use fuzzy::{Correction, FuzzyConfig};
pub use index::{BuildConfig, IndexStats, RebuildOutcome};
pub use intent::{ParsedIntent, PriceRange};
pub use lexicon::{FacetAxis, Lexicon};
pub use prefs::{NoPreferences, PreferenceStore};
pub use scoring::{ScoreWeights, ScoredMatch};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
