//! The search orchestrator and public API surface.
//!
//! [`SearchEngine`] owns the published index generations, the lexicon,
//! and the preference-store handle, and sequences one query end to end:
//! normalize → parse intent → posting lookup with fuzzy fallback →
//! candidate union → ranking → response assembly. Per-query work is
//! synchronous and independent; concurrent searches share nothing but
//! the immutable index snapshot they clone out of the store.

use std::sync::Arc;
use std::time::Instant;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::normalize;
use crate::autocomplete::{AutocompleteGenerator, POPULAR_QUERIES, Suggestion};
use crate::catalog::Product;
use crate::fuzzy::{FuzzyConfig, FuzzyMatcher};
use crate::index::{BuildConfig, IndexStats, IndexStore, RebuildOutcome};
use crate::intent::{IntentParser, ParsedIntent, QueryAnalysis};
use crate::lexicon::Lexicon;
use crate::prefs::{NoPreferences, PreferenceStore};
use crate::scoring::{RankingScorer, ScoreWeights, ScoredMatch};

/// Most rescue variants offered on a zero-result search.
const MAX_RESCUE_SUGGESTIONS: usize = 4;

/// Engine-wide configuration.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Index build tuning.
    pub build: BuildConfig,
    /// Fuzzy correction tuning.
    pub fuzzy: FuzzyConfig,
    /// Ranking weights.
    pub weights: ScoreWeights,
}

/// Per-query options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Maximum number of result rows returned.
    pub limit: usize,
    /// Attach a [`DebugInfo`] block to the response.
    pub include_debug: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            limit: 20,
            include_debug: false,
        }
    }
}

/// Diagnostic details for the debug/telemetry surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugInfo {
    /// Folded tokens that went into term lookup, post-correction.
    pub folded_tokens: Vec<String>,
    /// (original, corrected) pairs applied by the fuzzy matcher.
    pub corrections: Vec<(String, String)>,
    /// Candidate ids unioned before filtering and ranking.
    pub candidates_considered: usize,
    /// Index generation the query ran against.
    pub generation: u64,
}

/// The response envelope for one search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Ranked matches, capped to the requested limit.
    pub results: Vec<ScoredMatch>,
    /// Structured intent extracted from the query.
    pub intent: ParsedIntent,
    /// Match count before the cap.
    pub total_matches: usize,
    /// Wall-clock time spent in the engine.
    pub search_time_ms: f64,
    /// Corrected query, when a fuzzy substitution changed the outcome.
    pub did_you_mean: Option<String>,
    /// Rescue query variants, populated only on zero results.
    pub suggestions: Option<Vec<String>>,
    /// Present when requested via [`SearchOptions::include_debug`].
    pub debug: Option<DebugInfo>,
}

/// A home-screen prompt derived from the user's preference signals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProactiveSuggestion {
    /// Short emoji icon for the card.
    pub icon: String,
    /// Prompt text.
    pub text: String,
}

/// The catalog search engine.
pub struct SearchEngine {
    lexicon: &'static Lexicon,
    store: IndexStore,
    prefs: Arc<dyn PreferenceStore>,
    fuzzy: FuzzyMatcher,
    autocomplete: AutocompleteGenerator,
    weights: ScoreWeights,
}

impl Default for SearchEngine {
    fn default() -> Self {
        SearchEngine::new()
    }
}

impl SearchEngine {
    /// Create an engine with default configuration and no
    /// personalization.
    pub fn new() -> Self {
        SearchEngine::with_config(EngineConfig::default(), Arc::new(NoPreferences))
    }

    /// Create an engine backed by the given preference store.
    pub fn with_preferences(prefs: Arc<dyn PreferenceStore>) -> Self {
        SearchEngine::with_config(EngineConfig::default(), prefs)
    }

    /// Create an engine with custom configuration.
    pub fn with_config(config: EngineConfig, prefs: Arc<dyn PreferenceStore>) -> Self {
        SearchEngine {
            lexicon: Lexicon::shared(),
            store: IndexStore::new(config.build),
            prefs,
            fuzzy: FuzzyMatcher::with_config(config.fuzzy),
            autocomplete: AutocompleteGenerator::new(),
            weights: config.weights,
        }
    }

    /// Build (or refresh) the index from a catalog snapshot.
    ///
    /// Skips the scan when the catalog signature is unchanged; coalesces
    /// with any rebuild already in flight. Searches keep running against
    /// the prior generation until the new one is published.
    pub fn build_index(&self, catalog: &[Product]) -> RebuildOutcome {
        self.store.rebuild(catalog)
    }

    /// Whether a generation has been published.
    pub fn is_index_ready(&self) -> bool {
        self.store.is_ready()
    }

    /// Product/vocabulary counts of the published generation.
    pub fn index_stats(&self) -> IndexStats {
        self.store.snapshot().stats()
    }

    /// Parse a query into structured facets without searching.
    pub fn parse_intent(&self, query: &str) -> ParsedIntent {
        IntentParser::new(self.lexicon).parse(query)
    }

    /// Execute one search end to end.
    pub fn smart_search(&self, query: &str, options: &SearchOptions) -> SearchResponse {
        let started = Instant::now();
        let index = self.store.snapshot();

        let analysis = IntentParser::new(self.lexicon).analyze(query);
        let tokens = self.search_tokens(query, &analysis);

        if tokens.is_empty() {
            // "No search", not an error: blank input or a query made
            // entirely of consumed phrases.
            return SearchResponse {
                results: Vec::new(),
                intent: analysis.intent,
                total_matches: 0,
                search_time_ms: elapsed_ms(started),
                did_you_mean: None,
                suggestions: None,
                debug: options.include_debug.then(|| DebugInfo {
                    folded_tokens: Vec::new(),
                    corrections: Vec::new(),
                    candidates_considered: 0,
                    generation: index.generation(),
                }),
            };
        }

        // Posting lookup with fuzzy fallback per token. Tokens are OR'd
        // for recall; the intent facets are AND'd as hard filters inside
        // the scorer.
        let mut resolved: Vec<String> = Vec::with_capacity(tokens.len());
        let mut corrections: Vec<(String, String)> = Vec::new();
        let mut candidates: AHashSet<u64> = AHashSet::new();

        for token in &tokens {
            if let Some(ids) = index.postings(token) {
                candidates.extend(ids);
                resolved.push(token.clone());
            } else if let Some(best) = self.fuzzy.best_with_postings(token, &index, self.lexicon) {
                if let Some(ids) = index.postings(&best.term) {
                    candidates.extend(ids);
                }
                corrections.push((token.clone(), best.term.clone()));
                resolved.push(best.term);
            } else {
                resolved.push(token.clone());
            }
        }
        let candidates_considered = candidates.len();

        let scorer = RankingScorer::new(&index, self.lexicon, self.prefs.as_ref(), self.weights);
        let ranked = scorer.score(&resolved, &analysis.intent, &candidates, options.limit);

        let did_you_mean = (!corrections.is_empty() && !ranked.matches.is_empty())
            .then(|| self.display_query(&resolved));
        let suggestions = ranked
            .matches
            .is_empty()
            .then(|| self.rescue_suggestions(query, &analysis, &tokens))
            .filter(|rescue| !rescue.is_empty());

        debug!(
            query,
            total = ranked.total_matches,
            corrected = !corrections.is_empty(),
            "smart search"
        );

        SearchResponse {
            results: ranked.matches,
            intent: analysis.intent,
            total_matches: ranked.total_matches,
            search_time_ms: elapsed_ms(started),
            did_you_mean,
            suggestions,
            debug: options.include_debug.then(|| DebugInfo {
                folded_tokens: resolved,
                corrections,
                candidates_considered,
                generation: index.generation(),
            }),
        }
    }

    /// Autocomplete suggestions for a typed prefix.
    pub fn autocomplete_suggestions(&self, query: &str, limit: usize) -> Vec<Suggestion> {
        let index = self.store.snapshot();
        self.autocomplete
            .suggest(query, limit, &index, self.lexicon, self.prefs.as_ref())
    }

    /// Home-screen prompts derived from preference signals, with a
    /// static fallback.
    pub fn proactive_suggestions(&self) -> Vec<ProactiveSuggestion> {
        let mut out = Vec::new();

        if let Ok(Some(style)) = self.prefs.style_affinity() {
            out.push(ProactiveSuggestion {
                icon: "✨".to_string(),
                text: format!("Új {style} bútorok érkeztek"),
            });
        }
        for category in self.prefs.top_categories(2).unwrap_or_default() {
            let leaf = category
                .rsplit('>')
                .next()
                .unwrap_or(category.as_str())
                .trim();
            if !leaf.is_empty() {
                out.push(ProactiveSuggestion {
                    icon: "🛋️".to_string(),
                    text: format!("Nézz körül: {leaf}"),
                });
            }
        }
        out.push(ProactiveSuggestion {
            icon: "🔥".to_string(),
            text: "Akciós termékek".to_string(),
        });
        out.push(ProactiveSuggestion {
            icon: "🆕".to_string(),
            text: "Újdonságok".to_string(),
        });

        out.truncate(4);
        out
    }

    /// Query tokens that survive intent extraction: consumed price/sale
    /// words never reach term lookup, and repeats are dropped.
    fn search_tokens(&self, query: &str, analysis: &QueryAnalysis) -> Vec<String> {
        let mut seen = AHashSet::new();
        normalize(query)
            .into_iter()
            .filter(|token| !analysis.consumed.contains(token))
            .filter(|token| seen.insert(token.clone()))
            .collect()
    }

    /// Accent-restoring display form of a resolved token sequence.
    fn display_query(&self, resolved: &[String]) -> String {
        resolved
            .iter()
            .map(|term| self.lexicon.display_for(term).unwrap_or(term).to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Rescue query variants offered when a search comes back empty.
    fn rescue_suggestions(
        &self,
        query: &str,
        analysis: &QueryAnalysis,
        tokens: &[String],
    ) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let mut push = |candidate: String, out: &mut Vec<String>| {
            let trimmed = candidate.trim().to_string();
            if !trimmed.is_empty() && !out.contains(&trimmed) {
                out.push(trimmed);
            }
        };

        // Price clause stripped: the most common rescue for an
        // over-constrained budget.
        if !analysis.price_spans.is_empty() {
            push(strip_char_spans(query, &analysis.price_spans), &mut out);
        }

        // Canonical display of extracted facets, broadest first.
        for canonical in analysis
            .intent
            .product_types
            .iter()
            .chain(analysis.intent.styles.iter())
            .chain(analysis.intent.rooms.iter())
        {
            if let Some(display) = self.lexicon.display_for(canonical) {
                push(display.to_string(), &mut out);
            }
        }

        // Broadened query: the first term alone.
        if tokens.len() > 1 {
            let first = &tokens[0];
            push(
                self.lexicon.display_for(first).unwrap_or(first).to_string(),
                &mut out,
            );
        }

        // Popular fallback keeps the list non-empty even for nonsense
        // input.
        push(POPULAR_QUERIES[0].to_string(), &mut out);

        out.truncate(MAX_RESCUE_SUGGESTIONS);
        out
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

/// Remove char ranges from a string, collapsing the leftover whitespace.
fn strip_char_spans(text: &str, spans: &[(usize, usize)]) -> String {
    let kept: String = text
        .chars()
        .enumerate()
        .filter(|(i, _)| !spans.iter().any(|&(start, end)| *i >= start && *i < end))
        .map(|(_, c)| c)
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}
