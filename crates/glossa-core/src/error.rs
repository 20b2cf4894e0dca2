//! Error types for glossa-core.
//!
//! Each layer gets its own enum so callers can match on exactly the failures
//! that layer can produce. Front ends wrap these in `anyhow` at their
//! boundaries.

use std::path::PathBuf;
use thiserror::Error;

/// Outcome of a search that did not produce a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The caller's cancel flag was set. Not a fault: there is simply no
    /// result this time.
    #[error("search cancelled")]
    Cancelled,
    /// A search was requested before the term store finished loading.
    #[error("term store is not loaded yet")]
    StoreUnavailable,
}

impl SearchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SearchError::Cancelled)
    }
}

/// Failure while reading or parsing a dataset file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read dataset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A non-blank, non-comment line without a field separator.
    #[error("line {line}: missing field separator in {content:?}")]
    MalformedLine { line: usize, content: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Violation of a [`TermStore`](crate::TermStore) construction invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("duplicate term id {0}")]
    DuplicateId(u32),
    #[error("store holds more than u32::MAX records")]
    TooManyRecords,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(SearchError::Cancelled.to_string(), "search cancelled");
        assert_eq!(StoreError::DuplicateId(7).to_string(), "duplicate term id 7");
        let err = LoadError::MalformedLine { line: 3, content: "Haus".into() };
        assert_eq!(err.to_string(), "line 3: missing field separator in \"Haus\"");
    }

    #[test]
    fn cancelled_is_distinct_from_unavailable() {
        assert!(SearchError::Cancelled.is_cancelled());
        assert!(!SearchError::StoreUnavailable.is_cancelled());
    }
}
