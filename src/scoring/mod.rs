//! Ranking: additive field-weighted scoring with intent and
//! personalization boosts.
//!
//! Scoring works entirely off the index's denormalized summaries and
//! posting sets. Facet membership is resolved through the lexicon: a
//! product "matches the style skandináv" when it appears in the posting
//! of any expansion term of that group. Price-range violations and
//! missing discounts under a sale-only intent exclude the product
//! outright; everything else only shifts the score.
//!
//! Preference-store reads are best-effort: a store that errors
//! contributes zero boost and the search completes on relevance alone.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::index::SearchIndex;
use crate::intent::ParsedIntent;
use crate::lexicon::{FacetAxis, Lexicon};
use crate::prefs::PreferenceStore;

/// How many recently-viewed ids to pull for the viewed boost.
const VIEWED_LOOKBACK: usize = 50;

/// Additive scoring weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Per matched token found in the product name.
    pub name: f32,
    /// Per matched token found in the category path.
    pub category: f32,
    /// Per matched token found only in the description.
    pub description: f32,
    /// Per matched style/color/room facet.
    pub facet: f32,
    /// Effective price inside the requested range.
    pub price_fit: f32,
    /// Previously liked product.
    pub liked: f32,
    /// Previously disliked product. Negative: sinks below any
    /// positively-scored match.
    pub disliked: f32,
    /// Previously viewed product.
    pub viewed: f32,
    /// In-stock nudge, small enough to only break near-ties.
    pub in_stock: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            name: 15.0,
            category: 10.0,
            description: 3.0,
            facet: 5.0,
            price_fit: 5.0,
            liked: 8.0,
            disliked: -8.0,
            viewed: 2.0,
            in_stock: 1.0,
        }
    }
}

/// One ranked result row. Transient: discarded after response assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    /// Product id.
    pub product_id: u64,
    /// Combined relevance score.
    pub score: f32,
    /// Folded query terms this product matched.
    pub matched_terms: Vec<String>,
}

/// A ranked result set plus the pre-cap match count.
#[derive(Debug, Clone, Default)]
pub struct Ranked {
    /// Ranked rows, capped to the requested limit.
    pub matches: Vec<ScoredMatch>,
    /// Number of matches before the cap.
    pub total_matches: usize,
}

/// Scores candidate products for one query.
pub struct RankingScorer<'a> {
    index: &'a SearchIndex,
    lexicon: &'a Lexicon,
    prefs: &'a dyn PreferenceStore,
    weights: ScoreWeights,
}

impl<'a> RankingScorer<'a> {
    /// Create a scorer over one index generation.
    pub fn new(
        index: &'a SearchIndex,
        lexicon: &'a Lexicon,
        prefs: &'a dyn PreferenceStore,
        weights: ScoreWeights,
    ) -> Self {
        RankingScorer {
            index,
            lexicon,
            prefs,
            weights,
        }
    }

    /// Score and rank candidates, descending by score with product-id
    /// ascending as the deterministic tie-break.
    pub fn score(
        &self,
        tokens: &[String],
        intent: &ParsedIntent,
        candidates: &AHashSet<u64>,
        limit: usize,
    ) -> Ranked {
        let facet_sets = self.facet_posting_sets(intent);
        let viewed: AHashSet<u64> = self
            .prefs
            .viewed_ids(VIEWED_LOOKBACK)
            .unwrap_or_default()
            .into_iter()
            .collect();

        let mut matches: Vec<ScoredMatch> = Vec::new();

        for &product_id in candidates {
            let Some(summary) = self.index.summary(product_id) else {
                continue;
            };

            // Hard filters first.
            if let Some(range) = &intent.price_range {
                if !range.contains(summary.effective_price()) {
                    continue;
                }
            }
            if intent.on_sale && !summary.discounted {
                continue;
            }

            let mut score = 0.0;
            let mut matched_terms = Vec::new();

            for token in tokens {
                let in_posting = self
                    .index
                    .postings(token)
                    .is_some_and(|ids| ids.contains(&product_id));
                if !in_posting {
                    continue;
                }
                score += if summary.name_tokens.contains(token) {
                    self.weights.name
                } else if summary.category_tokens.contains(token) {
                    self.weights.category
                } else {
                    self.weights.description
                };
                matched_terms.push(token.clone());
            }

            if matched_terms.is_empty() {
                continue;
            }

            for facet_set in &facet_sets {
                if facet_set.contains(&product_id) {
                    score += self.weights.facet;
                }
            }
            if intent.price_range.is_some() {
                // Survived the hard filter, so the price fits.
                score += self.weights.price_fit;
            }

            score += self.preference_boost(product_id, &viewed);
            if summary.in_stock {
                score += self.weights.in_stock;
            }

            matches.push(ScoredMatch {
                product_id,
                score,
                matched_terms,
            });
        }

        matches.sort_unstable_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then(a.product_id.cmp(&b.product_id))
        });

        let total_matches = matches.len();
        matches.truncate(limit);
        Ranked {
            matches,
            total_matches,
        }
    }

    /// Union the postings of each requested style/color/room group's
    /// expansion terms into one membership set per facet.
    fn facet_posting_sets(&self, intent: &ParsedIntent) -> Vec<AHashSet<u64>> {
        let axes = [
            (FacetAxis::Style, &intent.styles),
            (FacetAxis::Color, &intent.colors),
            (FacetAxis::Room, &intent.rooms),
        ];

        let mut sets = Vec::new();
        for (axis, canonicals) in axes {
            for canonical in canonicals {
                let mut members = AHashSet::new();
                if let Some(expansions) = self.lexicon.expansions(axis, canonical) {
                    for term in expansions {
                        if let Some(ids) = self.index.postings(term) {
                            members.extend(ids);
                        }
                    }
                }
                sets.push(members);
            }
        }
        sets
    }

    /// Personalization boosts; a failing store contributes nothing.
    fn preference_boost(&self, product_id: u64, viewed: &AHashSet<u64>) -> f32 {
        let mut boost = 0.0;
        if self.prefs.is_liked(product_id).unwrap_or(false) {
            boost += self.weights.liked;
        }
        if self.prefs.is_disliked(product_id).unwrap_or(false) {
            boost += self.weights.disliked;
        }
        if viewed.contains(&product_id) {
            boost += self.weights.viewed;
        }
        boost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::index::IndexBuilder;
    use crate::intent::{IntentParser, PriceRange};
    use crate::prefs::NoPreferences;

    fn product(id: u64, name: &str, price: u64, sale_price: Option<u64>) -> Product {
        Product {
            id,
            name: name.to_string(),
            category: "Nappali > Kanapé".to_string(),
            price,
            sale_price,
            in_stock: true,
            description: "kárpitozott".to_string(),
        }
    }

    fn rank(catalog: &[Product], query: &str, limit: usize) -> Ranked {
        let index = IndexBuilder::new().build(catalog, 1);
        let lexicon = Lexicon::shared();
        let intent = IntentParser::new(lexicon).parse(query);
        let tokens = crate::analysis::normalize(query);

        let mut candidates = AHashSet::new();
        for token in &tokens {
            if let Some(ids) = index.postings(token) {
                candidates.extend(ids);
            }
        }

        let prefs = NoPreferences;
        RankingScorer::new(&index, lexicon, &prefs, ScoreWeights::default()).score(
            &tokens,
            &intent,
            &candidates,
            limit,
        )
    }

    #[test]
    fn test_name_match_outranks_description_match() {
        let catalog = vec![
            product(1, "Kanapé", 95_000, None),
            Product {
                id: 2,
                name: "Puff".to_string(),
                category: "Nappali > Puff".to_string(),
                price: 20_000,
                sale_price: None,
                in_stock: true,
                description: "kanapé mellé illő puff".to_string(),
            },
        ];
        let ranked = rank(&catalog, "kanapé", 10);
        assert_eq!(ranked.matches[0].product_id, 1);
        assert!(ranked.matches[0].score > ranked.matches[1].score);
    }

    #[test]
    fn test_price_violation_excludes_outright() {
        let catalog = vec![
            product(1, "Bézs kanapé", 95_000, None),
            product(2, "Bézs kanapé", 120_000, None),
        ];
        let ranked = rank(&catalog, "bézs kanapé 100e alatt", 10);
        assert_eq!(ranked.total_matches, 1);
        assert_eq!(ranked.matches[0].product_id, 1);
    }

    #[test]
    fn test_sale_price_used_for_price_filter() {
        // 120 000 list price but 90 000 on sale: passes "100e alatt".
        let catalog = vec![product(1, "Kanapé", 120_000, Some(90_000))];
        let ranked = rank(&catalog, "kanapé 100e alatt", 10);
        assert_eq!(ranked.total_matches, 1);
    }

    #[test]
    fn test_sale_only_excludes_undiscounted() {
        let catalog = vec![
            product(1, "Fotel", 45_000, Some(39_000)),
            product(2, "Fotel", 45_000, None),
        ];
        let ranked = rank(&catalog, "akciós fotel", 10);
        assert_eq!(ranked.total_matches, 1);
        assert_eq!(ranked.matches[0].product_id, 1);
    }

    #[test]
    fn test_no_duplicate_rows_for_multi_token_match() {
        let catalog = vec![product(1, "Bézs kanapé", 95_000, None)];
        let ranked = rank(&catalog, "bézs kanapé", 10);
        assert_eq!(ranked.matches.len(), 1);
        assert_eq!(ranked.matches[0].matched_terms, vec!["bezs", "kanape"]);
    }

    #[test]
    fn test_tie_breaks_by_ascending_id() {
        let catalog = vec![
            product(9, "Kanapé", 95_000, None),
            product(3, "Kanapé", 95_000, None),
        ];
        let ranked = rank(&catalog, "kanapé", 10);
        let ids: Vec<u64> = ranked.matches.iter().map(|m| m.product_id).collect();
        assert_eq!(ids, vec![3, 9]);
    }

    #[test]
    fn test_total_matches_counted_before_cap() {
        let catalog: Vec<Product> = (1..=5)
            .map(|id| product(id, "Kanapé", 95_000, None))
            .collect();
        let ranked = rank(&catalog, "kanapé", 2);
        assert_eq!(ranked.matches.len(), 2);
        assert_eq!(ranked.total_matches, 5);
    }

    #[test]
    fn test_liked_product_outranks_equal_match() {
        struct Liked(u64);
        impl PreferenceStore for Liked {
            fn is_liked(&self, id: u64) -> crate::error::Result<bool> {
                Ok(id == self.0)
            }
        }

        let catalog = vec![
            product(1, "Modern fotel", 45_000, None),
            product(2, "Modern fotel", 45_000, None),
        ];
        let index = IndexBuilder::new().build(&catalog, 1);
        let lexicon = Lexicon::shared();
        let intent = IntentParser::new(lexicon).parse("modern fotel");
        let tokens = crate::analysis::normalize("modern fotel");
        let candidates: AHashSet<u64> = [1, 2].into_iter().collect();

        let prefs = Liked(2);
        let ranked = RankingScorer::new(&index, lexicon, &prefs, ScoreWeights::default())
            .score(&tokens, &intent, &candidates, 10);
        assert_eq!(ranked.matches[0].product_id, 2);
    }

    #[test]
    fn test_failing_store_degrades_to_relevance_only() {
        struct Failing;
        impl PreferenceStore for Failing {
            fn is_liked(&self, _: u64) -> crate::error::Result<bool> {
                Err(crate::error::MobiliaError::preference("store offline"))
            }
            fn is_disliked(&self, _: u64) -> crate::error::Result<bool> {
                Err(crate::error::MobiliaError::preference("store offline"))
            }
            fn viewed_ids(&self, _: usize) -> crate::error::Result<Vec<u64>> {
                Err(crate::error::MobiliaError::preference("store offline"))
            }
        }

        let catalog = vec![product(1, "Kanapé", 95_000, None)];
        let index = IndexBuilder::new().build(&catalog, 1);
        let lexicon = Lexicon::shared();
        let intent = IntentParser::new(lexicon).parse("kanapé");
        let tokens = crate::analysis::normalize("kanapé");
        let candidates: AHashSet<u64> = [1].into_iter().collect();

        let prefs = Failing;
        let ranked = RankingScorer::new(&index, lexicon, &prefs, ScoreWeights::default())
            .score(&tokens, &intent, &candidates, 10);
        assert_eq!(ranked.total_matches, 1);
    }

    #[test]
    fn test_price_fit_bonus_applied() {
        let catalog = vec![product(1, "Kanapé", 95_000, None)];
        let with_range = rank(&catalog, "kanapé 100e alatt", 10);
        let without_range = rank(&catalog, "kanapé", 10);
        // +5 for fitting the requested range.
        assert!(with_range.matches[0].score > without_range.matches[0].score);
    }

    #[test]
    fn test_price_range_contains_boundary() {
        let range = PriceRange {
            min: None,
            max: Some(100_000),
        };
        assert!(range.contains(100_000));
        assert!(!range.contains(100_001));
    }
}
