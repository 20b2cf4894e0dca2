//! Domain-specific assertion macros for glossa harnesses.
//!
//! These add context-rich failure messages that make it clear *which* result
//! ordering rule was violated and *where* in the hit list it happened.

// ---------------------------------------------------------------------------
// Uniqueness
// ---------------------------------------------------------------------------

/// Assert that no record id occurs twice in a `SearchResult`.
#[macro_export]
macro_rules! assert_no_duplicate_ids {
    ($result:expr) => {{
        let result: &glossa_core::SearchResult = &$result;
        let mut seen = std::collections::HashSet::new();
        for (pos, hit) in result.iter().enumerate() {
            if !seen.insert(hit.record.id) {
                panic!(
                    "assert_no_duplicate_ids! failed: id {} repeated at position {}.\n  ids: {:?}",
                    hit.record.id,
                    pos,
                    result.ids()
                );
            }
        }
    }};
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Assert the tier blocks appear as exact, then substring, then fuzzy, and
/// that fuzzy hits are in non-decreasing distance order.
#[macro_export]
macro_rules! assert_tier_order {
    ($result:expr) => {{
        let result: &glossa_core::SearchResult = &$result;
        let rank = |tier: &glossa_core::MatchTier| match tier {
            glossa_core::MatchTier::Exact => (0usize, 0usize),
            glossa_core::MatchTier::Substring => (1, 0),
            glossa_core::MatchTier::Fuzzy { distance } => (2, *distance),
        };
        let hits = result.hits();
        for (pos, pair) in hits.windows(2).enumerate() {
            if rank(&pair[0].tier) > rank(&pair[1].tier) {
                panic!(
                    "assert_tier_order! failed at position {}: {} ({:?}) before {} ({:?})",
                    pos,
                    pair[0].tier,
                    pair[0].record.source_term,
                    pair[1].tier,
                    pair[1].record.source_term
                );
            }
        }
    }};
}

/// Assert the ids of a `SearchResult` equal the expected list.
#[macro_export]
macro_rules! assert_ids {
    ($result:expr, $expected:expr) => {{
        let result: &glossa_core::SearchResult = &$result;
        let expected: Vec<u32> = $expected.into_iter().collect();
        pretty_assertions::assert_eq!(result.ids(), expected, "result ids differ");
    }};
}
