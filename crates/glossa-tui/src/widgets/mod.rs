//! Ratatui widgets for the glossa TUI.

pub mod help;
pub mod query_bar;
pub mod results;
pub mod status_bar;
