//! glossa TUI: ratatui application shell.

pub mod app;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use glossa_core::{config::Config, SearchEngine};
use std::path::PathBuf;

/// Start the TUI. The dataset at `data_path` is loaded in the background
/// while the window is already up.
pub fn run(config: Config, data_path: PathBuf, engine: SearchEngine) -> anyhow::Result<()> {
    let theme = theme::Theme::by_name(&config.ui.theme);
    App::new(config, theme, data_path, engine)?.run()
}
