//! Search layer: three-tier query engine over a [`TermStore`].
//!
//! A query runs three independent scans of the store, always in this order:
//!
//! 1. **exact**: `source_term == query`
//! 2. **substring**: `source_term` contains `query`
//! 3. **fuzzy**: Levenshtein distance to `query` is at most the threshold,
//!    ordered by ascending distance (ties keep store order)
//!
//! The tiers are then merged: exact hits first, then substring hits not seen
//! yet, then fuzzy hits not seen yet. Deduplication is by record id only, so
//! two records with the same source term both appear.
//!
//! Only `source_term` is ever compared. Progress is reported at fixed
//! checkpoints (see [`checkpoint`]) and the cancel flag is polled before every
//! tier and before the merge. A cancelled search returns
//! [`SearchError::Cancelled`], never a partial result.

use crate::{
    cancel::CancelFlag,
    distance::distance_within,
    error::SearchError,
    progress::{Monotonic, ProgressSink},
    store::TermStore,
    types::{MatchTier, TermRecord},
};
use serde::Serialize;
use std::collections::HashSet;

/// Default maximum edit distance for the fuzzy tier.
pub const FUZZY_THRESHOLD: usize = 2;

/// The fuzzy scan polls the cancel flag once per this many records.
const CANCEL_POLL_INTERVAL: usize = 4096;

/// Progress values reported during a search, in emission order.
pub mod checkpoint {
    pub const START: u8 = 0;
    pub const EXACT: u8 = 10;
    pub const SUBSTRING: u8 = 20;
    pub const FUZZY: u8 = 30;
    pub const MERGE: u8 = 60;
    pub const DONE: u8 = 100;

    /// Every checkpoint of an uncancelled search.
    pub const ALL: [u8; 6] = [START, EXACT, SUBSTRING, FUZZY, MERGE, DONE];
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// One record in a search result, with the tier that admitted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub record: TermRecord,
    #[serde(flatten)]
    pub tier: MatchTier,
}

/// Ordered, duplicate-free list of hits. Owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchResult {
    hits: Vec<SearchHit>,
}

impl SearchResult {
    pub fn hits(&self) -> &[SearchHit] {
        &self.hits
    }

    pub fn into_hits(self) -> Vec<SearchHit> {
        self.hits
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchHit> {
        self.hits.iter()
    }

    /// Record ids in result order.
    pub fn ids(&self) -> Vec<u32> {
        self.hits.iter().map(|hit| hit.record.id).collect()
    }
}

impl<'a> IntoIterator for &'a SearchResult {
    type Item = &'a SearchHit;
    type IntoIter = std::slice::Iter<'a, SearchHit>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.iter()
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Stateless query engine. Cheap to copy; one instance can serve any number
/// of concurrent searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchEngine {
    fuzzy_threshold: usize,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self { fuzzy_threshold: FUZZY_THRESHOLD }
    }
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the maximum edit distance of the fuzzy tier.
    pub fn with_fuzzy_threshold(mut self, threshold: usize) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    pub fn fuzzy_threshold(&self) -> usize {
        self.fuzzy_threshold
    }

    /// Run `query` against `store`.
    ///
    /// Blocks for the whole scan; run it on a worker thread if the caller
    /// needs to stay responsive. `progress` sees `0, 10, 20, 30, 60, 100` for
    /// a search that completes.
    pub fn search<P, C>(
        &self,
        store: &TermStore,
        query: &str,
        progress: &P,
        cancel: &C,
    ) -> Result<SearchResult, SearchError>
    where
        P: ProgressSink + ?Sized,
        C: CancelFlag + ?Sized,
    {
        let mut progress = Monotonic::new(progress);
        progress.report(checkpoint::START);
        tracing::debug!(query, records = store.len(), "search: start");

        ensure_not_cancelled(cancel, "exact")?;
        let exact: Vec<&TermRecord> =
            store.iter().filter(|r| r.source_term == query).collect();
        progress.report(checkpoint::EXACT);

        ensure_not_cancelled(cancel, "substring")?;
        let substring: Vec<&TermRecord> = store
            .iter()
            .filter(|r| r.source_term.contains(query))
            .collect();
        progress.report(checkpoint::SUBSTRING);

        ensure_not_cancelled(cancel, "fuzzy")?;
        let fuzzy = self.fuzzy_tier(store, query, cancel)?;
        progress.report(checkpoint::FUZZY);

        tracing::trace!(
            exact = exact.len(),
            substring = substring.len(),
            fuzzy = fuzzy.len(),
            "search: tiers complete"
        );

        ensure_not_cancelled(cancel, "merge")?;
        let merged = merge(exact, substring, fuzzy);
        progress.report(checkpoint::MERGE);

        let hits: Vec<SearchHit> = merged
            .into_iter()
            .map(|(record, tier)| SearchHit { record: record.clone(), tier })
            .collect();
        progress.report(checkpoint::DONE);

        tracing::debug!(query, hits = hits.len(), "search: done");
        Ok(SearchResult { hits })
    }

    /// Records within the fuzzy threshold, sorted by ascending distance.
    /// `sort_by_key` is stable, so equal distances keep store order.
    fn fuzzy_tier<'s, C>(
        &self,
        store: &'s TermStore,
        query: &str,
        cancel: &C,
    ) -> Result<Vec<(&'s TermRecord, usize)>, SearchError>
    where
        C: CancelFlag + ?Sized,
    {
        let mut matches = Vec::new();
        for (i, record) in store.iter().enumerate() {
            if i > 0 && i % CANCEL_POLL_INTERVAL == 0 {
                ensure_not_cancelled(cancel, "fuzzy scan")?;
            }
            if let Some(d) = distance_within(query, &record.source_term, self.fuzzy_threshold) {
                matches.push((record, d));
            }
        }
        matches.sort_by_key(|&(_, d)| d);
        Ok(matches)
    }
}

fn ensure_not_cancelled<C: CancelFlag + ?Sized>(
    cancel: &C,
    stage: &'static str,
) -> Result<(), SearchError> {
    if cancel.is_cancelled() {
        tracing::debug!(stage, "search: cancelled");
        return Err(SearchError::Cancelled);
    }
    Ok(())
}

/// Concatenate the tiers in precedence order, keeping only the first
/// occurrence of each id.
fn merge<'s>(
    exact: Vec<&'s TermRecord>,
    substring: Vec<&'s TermRecord>,
    fuzzy: Vec<(&'s TermRecord, usize)>,
) -> Vec<(&'s TermRecord, MatchTier)> {
    let mut seen: HashSet<u32> = HashSet::new();
    let mut out = Vec::with_capacity(exact.len() + substring.len() + fuzzy.len());

    let tiers = exact
        .into_iter()
        .map(|r| (r, MatchTier::Exact))
        .chain(substring.into_iter().map(|r| (r, MatchTier::Substring)))
        .chain(
            fuzzy
                .into_iter()
                .map(|(r, distance)| (r, MatchTier::Fuzzy { distance })),
        );

    for (record, tier) in tiers {
        if seen.insert(record.id) {
            out.push((record, tier));
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
