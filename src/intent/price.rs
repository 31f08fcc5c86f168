//! Price-phrase extraction.
//!
//! Recognizes `<number> [ezer|e|k] [ft|forint] (alatt|felett|fölött)` in
//! folded query text. "ezer"/"e"/"k" multiply by 1000; "alatt" sets the
//! upper bound, "felett"/"fölött" the lower. A number with no adjacent
//! direction word is not a price: it stays an ordinary search term, so
//! model numbers are never misread as budgets.

use ahash::AHashSet;
use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::normalize;
use crate::intent::PriceRange;

lazy_static! {
    static ref PRICE_RE: Regex =
        Regex::new(r"\b(\d+)\s*(ezer|e|k)?\s*(?:ft|forint)?\s*\b(alatt|felett|folott)\b")
            .expect("price pattern is valid");
}

/// The result of scanning a folded query for price phrases.
#[derive(Debug, Default)]
pub(crate) struct PriceExtraction {
    /// Extracted bounds; `None` when no phrase was present.
    pub range: Option<PriceRange>,
    /// Folded tokens consumed by the phrases (numbers, units,
    /// direction words), excluded from term lookup.
    pub consumed: AHashSet<String>,
    /// Char ranges of the phrases within the query, for building
    /// price-stripped rescue variants.
    pub spans: Vec<(usize, usize)>,
}

/// Scan folded query text for price phrases.
pub(crate) fn extract_price_range(folded_query: &str) -> PriceExtraction {
    let mut extraction = PriceExtraction::default();
    let mut range = PriceRange::default();
    let mut found = false;

    for captures in PRICE_RE.captures_iter(folded_query) {
        let Ok(value) = captures[1].parse::<u64>() else {
            continue;
        };
        let multiplier = match captures.get(2).map(|m| m.as_str()) {
            Some("ezer") | Some("e") | Some("k") => 1000,
            _ => 1,
        };
        let amount = value.saturating_mul(multiplier);

        match &captures[3] {
            "alatt" => range.max = Some(amount),
            // "felett" and the folded form of "fölött".
            _ => range.min = Some(amount),
        }
        found = true;

        let whole = captures.get(0).expect("capture 0 always present");
        extraction.consumed.extend(normalize(whole.as_str()));
        extraction.spans.push((
            folded_query[..whole.start()].chars().count(),
            folded_query[..whole.end()].chars().count(),
        ));
    }

    if found {
        extraction.range = Some(range);
    }
    extraction
}
