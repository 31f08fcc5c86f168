//! Read-only interface to the external user-preference store.
//!
//! The storefront's preference/telemetry collaborator records viewed,
//! liked, and disliked products and search history; the engine only
//! reads personalization signals from it. Every method is best-effort:
//! default implementations report "no data", and callers absorb errors
//! as zero boost, so an absent or failing store never fails a search.

use crate::error::Result;

/// Read accessors the engine consumes from the preference store.
///
/// Implementations wrap whatever persistence the host app uses; all
/// calls are synchronous reads against an in-memory snapshot.
pub trait PreferenceStore: Send + Sync {
    /// Whether the user liked this product.
    fn is_liked(&self, _product_id: u64) -> Result<bool> {
        Ok(false)
    }

    /// Whether the user disliked this product.
    fn is_disliked(&self, _product_id: u64) -> Result<bool> {
        Ok(false)
    }

    /// Recently viewed product ids, most recent first.
    fn viewed_ids(&self, _limit: usize) -> Result<Vec<u64>> {
        Ok(Vec::new())
    }

    /// The user's most viewed categories, display form.
    fn top_categories(&self, _limit: usize) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    /// The user's preferred furniture style, if one stands out.
    fn style_affinity(&self) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Null preference store: no signals, zero boosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPreferences;

impl PreferenceStore for NoPreferences {}
