//! Query intent parsing.
//!
//! Turns a raw query string into structured facets: furniture types,
//! styles, colors, rooms, a price range, and a sale-only flag. Each
//! facet extractor is a pure function; [`IntentParser::parse`] composes
//! them. The parser also reports which tokens the price and sale
//! extractors consumed, so the orchestrator excludes them from term
//! lookup; "alatt" is not a product word.

mod price;

pub(crate) use price::extract_price_range;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::analysis::{fold_diacritics, normalize};
use crate::lexicon::{FacetAxis, Lexicon};

/// Folded sale keywords.
const SALE_TERMS: &[&str] = &["akcio", "akcios", "kedvezmeny", "kedvezmenyes"];

/// An extracted price bound. Absent bounds stay `None`; a query with no
/// price phrase produces no `PriceRange` at all, never `{0, ∞}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lower bound in forints ("felett"/"fölött").
    pub min: Option<u64>,
    /// Upper bound in forints ("alatt").
    pub max: Option<u64>,
}

impl PriceRange {
    /// Whether a price satisfies both bounds.
    pub fn contains(&self, price: u64) -> bool {
        self.min.is_none_or(|min| price >= min) && self.max.is_none_or(|max| price <= max)
    }
}

/// Structured facets extracted from one query. Derived, stateless,
/// recomputed per query; never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedIntent {
    /// Canonical furniture-type keys, folded.
    pub product_types: Vec<String>,
    /// Canonical style keys, folded.
    pub styles: Vec<String>,
    /// Canonical color keys, folded.
    pub colors: Vec<String>,
    /// Canonical room keys, folded.
    pub rooms: Vec<String>,
    /// Extracted price bounds, if a price phrase was present.
    pub price_range: Option<PriceRange>,
    /// Whether the query asks for discounted products only.
    pub on_sale: bool,
}

impl ParsedIntent {
    /// Whether any facet was extracted.
    pub fn has_facets(&self) -> bool {
        !self.product_types.is_empty()
            || !self.styles.is_empty()
            || !self.colors.is_empty()
            || !self.rooms.is_empty()
            || self.price_range.is_some()
            || self.on_sale
    }
}

/// Full analysis of one query: the intent plus bookkeeping the
/// orchestrator needs.
#[derive(Debug, Default)]
pub(crate) struct QueryAnalysis {
    pub intent: ParsedIntent,
    /// Tokens consumed by price/sale extraction, excluded from term
    /// lookup.
    pub consumed: AHashSet<String>,
    /// Char ranges of price phrases within the query.
    pub price_spans: Vec<(usize, usize)>,
}

/// Extracts [`ParsedIntent`] from query strings against a lexicon.
#[derive(Debug, Clone, Copy)]
pub struct IntentParser<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> IntentParser<'a> {
    /// Create a parser over the given lexicon.
    pub fn new(lexicon: &'a Lexicon) -> Self {
        IntentParser { lexicon }
    }

    /// Parse a query into structured facets.
    pub fn parse(&self, query: &str) -> ParsedIntent {
        self.analyze(query).intent
    }

    /// Parse a query, also reporting consumed tokens and price spans.
    pub(crate) fn analyze(&self, query: &str) -> QueryAnalysis {
        let folded = fold_diacritics(query);
        let tokens = normalize(query);

        let mut analysis = QueryAnalysis::default();

        // 1. Lexicon scan. A token may land on several axes; every match
        //    is kept.
        for token in &tokens {
            for facet in self.lexicon.matches(token) {
                let bucket = match facet.axis {
                    FacetAxis::FurnitureType => &mut analysis.intent.product_types,
                    FacetAxis::Style => &mut analysis.intent.styles,
                    FacetAxis::Color => &mut analysis.intent.colors,
                    FacetAxis::Room => &mut analysis.intent.rooms,
                };
                if !bucket.iter().any(|c| c == facet.canonical) {
                    bucket.push(facet.canonical.to_string());
                }
            }
        }

        // 2. Price phrases.
        let price = extract_price_range(&folded);
        analysis.intent.price_range = price.range;
        analysis.consumed = price.consumed;
        analysis.price_spans = price.spans;

        // 3. Sale keywords.
        for token in &tokens {
            if SALE_TERMS.contains(&token.as_str()) {
                analysis.intent.on_sale = true;
                analysis.consumed.insert(token.clone());
            }
        }

        analysis
    }
}
