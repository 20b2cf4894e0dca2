//! glossa-core: term store, dataset loader and search engine for glossa.
//!
//! This crate holds everything with algorithmic content. Front ends (the TUI
//! and the headless CLI) only load a [`TermStore`], hand it to a
//! [`SearchEngine`] and render what comes back.
//!
//! # Architecture
//!
//! ```text
//! Loader ──► TermStore ──► SearchEngine ──► front end
//!                             │    ▲
//!                   ProgressSink  CancelFlag
//! ```
//!
//! The store is immutable once built and shared behind an `Arc`; every search
//! call owns its own progress sink and cancel flag.

pub mod cancel;
pub mod config;
pub mod distance;
pub mod error;
pub mod loader;
pub mod progress;
pub mod search;
pub mod store;
pub mod types;

pub use cancel::{CancelFlag, NeverCancel};
pub use error::{LoadError, SearchError, StoreError};
pub use progress::{NoProgress, ProgressCounter, ProgressSink};
pub use search::{SearchEngine, SearchHit, SearchResult, FUZZY_THRESHOLD};
pub use store::TermStore;
pub use types::{MatchTier, TermRecord};
