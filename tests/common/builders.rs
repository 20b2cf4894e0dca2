//! Test builders: ergonomic constructors for `TermStore` and search calls.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use glossa_core::{
    NeverCancel, NoProgress, SearchEngine, SearchResult, TermRecord, TermStore,
};

// ---------------------------------------------------------------------------
// StoreBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`TermStore`] fixtures.
///
/// Ids are assigned in insertion order starting at `first_id` (default 0),
/// unless a record is added with an explicit id via [`StoreBuilder::record`].
///
/// # Example
///
/// ```rust
/// let store = StoreBuilder::new()
///     .first_id(1)
///     .term("Haus", "house")
///     .term("Maus", "mouse")
///     .build();
/// ```
#[derive(Default)]
pub struct StoreBuilder {
    next_id: u32,
    records: Vec<TermRecord>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_id(mut self, id: u32) -> Self {
        self.next_id = id;
        self
    }

    pub fn term(mut self, source: &str, target: &str) -> Self {
        self.records.push(TermRecord::new(self.next_id, source, target));
        self.next_id += 1;
        self
    }

    pub fn record(mut self, id: u32, source: &str, target: &str) -> Self {
        self.records.push(TermRecord::new(id, source, target));
        self.next_id = id + 1;
        self
    }

    /// Add every source term with a placeholder translation.
    pub fn sources(self, sources: &[&str]) -> Self {
        sources
            .iter()
            .fold(self, |b, s| b.term(s, &format!("{s} (en)")))
    }

    pub fn build(self) -> TermStore {
        TermStore::new(self.records).expect("builder produced duplicate ids")
    }
}

/// The canonical three-record store: 1 Haus, 2 Maus, 3 Baum.
pub fn haus_maus_baum() -> TermStore {
    StoreBuilder::new()
        .first_id(1)
        .term("Haus", "house")
        .term("Maus", "mouse")
        .term("Baum", "tree")
        .build()
}

// ---------------------------------------------------------------------------
// Search shortcuts
// ---------------------------------------------------------------------------

/// Run a full, uncancelled search with the default engine.
pub fn search(store: &TermStore, query: &str) -> SearchResult {
    search_with(SearchEngine::new(), store, query)
}

pub fn search_with(engine: SearchEngine, store: &TermStore, query: &str) -> SearchResult {
    engine
        .search(store, query, &NoProgress, &NeverCancel)
        .expect("uncancelled search cannot fail")
}
