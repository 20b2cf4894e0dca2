//! Core types for glossa-core.
//!
//! This module defines the record shared by every layer, [`TermRecord`], and
//! the [`MatchTier`] classification the search engine attaches to each hit.

use serde::Serialize;

/// One dictionary entry: a German source term and its English translation.
///
/// Records are immutable once built. The `id` is assigned by the loader,
/// unique within a [`TermStore`](crate::TermStore) and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TermRecord {
    /// Stable identifier. Opaque to consumers; do not assume contiguity.
    pub id: u32,
    /// First-language term, the only field the search engine matches against.
    pub source_term: String,
    /// Second-language term, returned with results but never matched.
    pub target_term: String,
}

impl TermRecord {
    pub fn new(id: u32, source_term: impl Into<String>, target_term: impl Into<String>) -> Self {
        Self {
            id,
            source_term: source_term.into(),
            target_term: target_term.into(),
        }
    }
}

/// Why a record ended up in a search result.
///
/// Tiers are listed in precedence order: a record matched by several tiers is
/// reported under the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "tier", rename_all = "lowercase")]
pub enum MatchTier {
    /// `source_term == query`.
    Exact,
    /// `source_term` contains `query`.
    Substring,
    /// Edit distance between `query` and `source_term` is within the threshold.
    Fuzzy { distance: usize },
}

impl MatchTier {
    /// Edit distance for fuzzy hits, `None` for the other tiers.
    pub fn distance(&self) -> Option<usize> {
        match self {
            MatchTier::Fuzzy { distance } => Some(*distance),
            _ => None,
        }
    }
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchTier::Exact => write!(f, "exact"),
            MatchTier::Substring => write!(f, "substring"),
            MatchTier::Fuzzy { distance } => write!(f, "fuzzy({distance})"),
        }
    }
}
