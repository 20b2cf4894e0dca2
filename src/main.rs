use anyhow::Context;
use clap::Parser;
use glossa_core::{config::Config, loader::Loader, NeverCancel, NoProgress, SearchEngine, SearchHit};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "glossa", about = "Glossa: German to English term lookup")]
struct Cli {
    /// Dataset file of `german;english` lines. Overrides `data.path`.
    #[arg(long, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Search once, print the hits and exit instead of starting the TUI.
    #[arg(long, value_name = "TEXT")]
    query: Option<String>,

    /// Print headless results as a JSON array.
    #[arg(long, requires = "query")]
    json: bool,

    /// Print at most N hits in headless mode.
    #[arg(long, value_name = "N", requires = "query")]
    limit: Option<usize>,

    /// Maximum edit distance admitted by the fuzzy tier. Overrides
    /// `search.fuzzy_threshold`.
    #[arg(long, value_name = "N")]
    threshold: Option<usize>,

    /// Write debug logs to <tmp>/glossa-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        init_debug_log()?;
    }

    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "config unreadable, using defaults");
        Config::defaults()
    });

    let data_path = cli.data.clone().unwrap_or_else(|| config.data.path.clone());
    let engine = SearchEngine::new()
        .with_fuzzy_threshold(cli.threshold.unwrap_or(config.search.fuzzy_threshold));

    match cli.query.as_deref() {
        Some(query) => headless(&cli, &config, &data_path, engine, query),
        None => glossa_tui::run(config, data_path, engine),
    }
}

fn init_debug_log() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join("glossa-debug.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open debug log {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();
    tracing::info!(path = %path.display(), "glossa debug log started");
    Ok(())
}

/// Load the dataset, run one search and print the hits to stdout.
fn headless(
    cli: &Cli,
    config: &Config,
    data_path: &Path,
    engine: SearchEngine,
    query: &str,
) -> anyhow::Result<()> {
    let store = Loader::new()
        .with_separator(config.data.separator)
        .load_path(data_path, &NoProgress)
        .context("failed to load dataset")?;

    let result = engine.search(&store, query, &NoProgress, &NeverCancel)?;
    tracing::info!(query, hits = result.len(), "headless search done");

    let limit = cli.limit.unwrap_or(usize::MAX);
    let hits: Vec<&SearchHit> = result.iter().take(limit).collect();

    let mut out = std::io::stdout().lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &hits)?;
        writeln!(out)?;
    } else {
        for hit in hits {
            if config.ui.show_ids {
                write!(out, "{}\t", hit.record.id)?;
            }
            write!(out, "{} ; {}", hit.record.source_term, hit.record.target_term)?;
            if config.ui.show_tier {
                write!(out, "\t[{}]", hit.tier)?;
            }
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
