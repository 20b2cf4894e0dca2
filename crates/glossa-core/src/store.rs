//! TermStore: the immutable, in-memory collection of [`TermRecord`] values.
//!
//! The store is a passive data holder: it exposes a count and restartable
//! iteration and nothing else. Matching lives in [`crate::search`].

use crate::{error::StoreError, types::TermRecord};
use std::collections::HashSet;

/// Ordered, read-only collection of term records.
///
/// Build it once, wrap it in an `Arc`, and share it between as many
/// concurrent searches as needed. Nothing ever mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermStore {
    records: Vec<TermRecord>,
}

impl TermStore {
    /// Build a store from already-numbered records, keeping their order.
    ///
    /// Fails with [`StoreError::DuplicateId`] if two records share an id.
    pub fn new(records: Vec<TermRecord>) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(StoreError::DuplicateId(record.id));
            }
        }
        Ok(Self { records })
    }

    /// Build a store from `(source, target)` pairs, assigning ids `0..n` in
    /// iteration order.
    pub fn from_pairs<I, S, T>(pairs: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let records = pairs
            .into_iter()
            .enumerate()
            .map(|(i, (source, target))| {
                let id = u32::try_from(i).map_err(|_| StoreError::TooManyRecords)?;
                Ok(TermRecord::new(id, source, target))
            })
            .collect::<Result<Vec<_>, StoreError>>()?;
        Ok(Self { records })
    }

    /// A store with no records. Searching it yields an empty result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Approximate heap footprint of the records in bytes: the record slots
    /// plus the text of both terms.
    pub fn approx_bytes(&self) -> usize {
        self.records.len() * std::mem::size_of::<TermRecord>()
            + self
                .records
                .iter()
                .map(|r| r.source_term.len() + r.target_term.len())
                .sum::<usize>()
    }

    /// Iterate records in insertion order. Each call starts a fresh pass.
    pub fn iter(&self) -> std::slice::Iter<'_, TermRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a TermStore {
    type Item = &'a TermRecord;
    type IntoIter = std::slice::Iter<'a, TermRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
