//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.
//!
//! Dataset loading and every search run on tokio's blocking pool. Workers
//! publish progress into a shared [`ProgressCounter`] that the render loop
//! reads each frame, and send their completion back over an mpsc channel
//! which the loop drains before drawing.

use crate::{
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        help::HelpPopup,
        query_bar::{QueryBar, QueryBarState},
        results::{ResultsState, ResultsTable},
        status_bar::{footprint, Status, StatusBar},
    },
};
use crossterm::{
    event as ct_event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use glossa_core::{
    config::Config, loader::Loader, ProgressCounter, SearchEngine, SearchError, SearchResult,
    TermStore,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Frame, Terminal,
};
use std::{
    io,
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::{
    runtime::Runtime,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
};
use tokio_util::sync::CancellationToken;

// ---------------------------------------------------------------------------
// Worker messages
// ---------------------------------------------------------------------------

/// Completion message sent from a blocking worker to the UI loop.
#[derive(Debug)]
pub enum WorkerEvent {
    Loaded {
        store: Arc<TermStore>,
        elapsed: Duration,
    },
    LoadFailed(String),
    SearchDone {
        outcome: Result<SearchResult, SearchError>,
        elapsed: Duration,
    },
}

/// Everything a search worker needs, handed out by [`AppState::handle`].
#[derive(Debug)]
pub struct SearchJob {
    pub store: Arc<TermStore>,
    pub query: String,
    pub cancel: CancellationToken,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum Phase {
    /// Dataset load in flight; the query bar is disabled.
    Loading,
    Ready,
    Searching { cancel: CancellationToken },
}

pub struct AppState {
    pub phase: Phase,
    /// `None` until the load worker reports back, and after a failed load.
    pub store: Option<Arc<TermStore>>,
    pub progress: Arc<ProgressCounter>,
    pub query: QueryBarState,
    pub results: ResultsState,
    pub status: Status,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub quit: bool,
}

impl AppState {
    pub fn new(config: Config, theme: Theme) -> Self {
        Self {
            phase: Phase::Loading,
            store: None,
            progress: Arc::new(ProgressCounter::new()),
            query: QueryBarState::default(),
            results: ResultsState::default(),
            status: Status::busy("Loading dataset…"),
            theme,
            config,
            show_help: false,
            quit: false,
        }
    }

    /// True while a load or a search is running.
    pub fn is_busy(&self) -> bool {
        !matches!(self.phase, Phase::Ready)
    }

    /// Size label for the status bar; `None` until a store is loaded.
    pub fn footprint(&self) -> Option<String> {
        self.store
            .as_ref()
            .map(|store| footprint(store.len(), store.approx_bytes()))
    }

    /// Fold a worker completion into the state.
    pub fn apply(&mut self, event: WorkerEvent) {
        match event {
            WorkerEvent::Loaded { store, elapsed } => {
                tracing::info!(records = store.len(), ms = elapsed.as_millis() as u64, "dataset ready");
                self.status = Status::ready(format!(
                    "Loaded {} entries in {} ms. Ready!",
                    store.len(),
                    elapsed.as_millis()
                ));
                self.store = Some(store);
                self.phase = Phase::Ready;
            }
            WorkerEvent::LoadFailed(msg) => {
                tracing::error!(error = %msg, "dataset load failed");
                self.status = Status::error(format!("An error has occurred: {msg}"));
                self.phase = Phase::Ready;
            }
            WorkerEvent::SearchDone { outcome, elapsed } => {
                self.phase = Phase::Ready;
                match outcome {
                    Ok(result) => {
                        tracing::debug!(hits = result.len(), ms = elapsed.as_millis() as u64, "search finished");
                        self.results.set_result(result);
                        self.status = Status::ready(format!("Ready! ({} ms)", elapsed.as_millis()));
                    }
                    Err(SearchError::Cancelled) => {
                        tracing::debug!("search cancelled by user");
                        self.progress.reset();
                        self.status = Status::ready("User cancelled");
                    }
                    Err(err) => {
                        self.status = Status::error(format!("An error has occurred: {err}"));
                    }
                }
                self.query.select_all();
            }
        }
    }

    /// Handle a key event. Returns a job when the event starts a search.
    pub fn handle(&mut self, event: AppEvent) -> Option<SearchJob> {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            match event {
                AppEvent::ToggleHelp | AppEvent::Escape => self.show_help = false,
                AppEvent::Quit => self.quit = true,
                _ => {}
            }
            return None;
        }

        match event {
            AppEvent::Quit => {
                tracing::debug!("quit");
                if let Phase::Searching { cancel } = &self.phase {
                    cancel.cancel();
                }
                self.quit = true;
            }
            AppEvent::ToggleHelp => self.show_help = true,
            AppEvent::Escape => match &self.phase {
                Phase::Searching { cancel } => {
                    tracing::debug!("cancelling search");
                    cancel.cancel();
                }
                Phase::Ready => self.query.clear(),
                Phase::Loading => {}
            },
            AppEvent::Submit => return self.submit(),
            AppEvent::Nav(_) | AppEvent::PageUp | AppEvent::PageDown => {
                self.results.handle(&event);
                self.query.handle(&event);
            }
            AppEvent::Resize(_, _) => {}
            other => {
                if !matches!(self.phase, Phase::Loading) {
                    self.query.handle(&other);
                }
            }
        }
        None
    }

    fn submit(&mut self) -> Option<SearchJob> {
        if self.is_busy() {
            tracing::debug!(phase = ?self.phase, "busy, ignoring submit");
            return None;
        }
        let Some(store) = self.store.clone() else {
            self.status = Status::error(format!(
                "An error has occurred: {}",
                SearchError::StoreUnavailable
            ));
            return None;
        };

        let cancel = CancellationToken::new();
        self.phase = Phase::Searching { cancel: cancel.clone() };
        self.progress.reset();
        self.status = Status::busy("Searching…");
        tracing::debug!(query = %self.query.query, "search submitted");

        Some(SearchJob {
            store,
            query: self.query.query.clone(),
            cancel,
        })
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    engine: SearchEngine,
    data_path: PathBuf,
    runtime: Runtime,
    tx: UnboundedSender<WorkerEvent>,
    rx: UnboundedReceiver<WorkerEvent>,
}

impl App {
    pub fn new(config: Config, theme: Theme, data_path: PathBuf, engine: SearchEngine) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .thread_name("glossa-worker")
            .build()?;
        let (tx, rx) = mpsc::unbounded_channel();
        Ok(Self {
            state: AppState::new(config, theme),
            engine,
            data_path,
            runtime,
            tx,
            rx,
        })
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        self.spawn_load();
        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            while let Ok(done) = self.rx.try_recv() {
                self.state.apply(done);
            }

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                if let Some(ev) = event::to_app_event(ct_event::read()?) {
                    tracing::trace!(event = ?ev, "key event");
                    if let Some(job) = self.state.handle(ev) {
                        self.spawn_search(job);
                    }
                }
            }
        }
        Ok(())
    }

    fn spawn_load(&self) {
        let path = self.data_path.clone();
        let loader = Loader::new().with_separator(self.state.config.data.separator);
        let progress = Arc::clone(&self.state.progress);
        let tx = self.tx.clone();

        self.runtime.spawn_blocking(move || {
            let started = Instant::now();
            let event = match loader.load_path(&path, &*progress) {
                Ok(store) => WorkerEvent::Loaded {
                    store: Arc::new(store),
                    elapsed: started.elapsed(),
                },
                Err(err) => WorkerEvent::LoadFailed(err.to_string()),
            };
            let _ = tx.send(event);
        });
    }

    fn spawn_search(&self, job: SearchJob) {
        let engine = self.engine;
        let progress = Arc::clone(&self.state.progress);
        let tx = self.tx.clone();

        self.runtime.spawn_blocking(move || {
            let started = Instant::now();
            let outcome = engine.search(&job.store, &job.query, &*progress, &job.cancel);
            let _ = tx.send(WorkerEvent::SearchDone {
                outcome,
                elapsed: started.elapsed(),
            });
        });
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 3-line query bar | results | 1-line status bar
    let [query_area, results_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let enabled = !matches!(state.phase, Phase::Loading);
    let query_bar = QueryBar::new(&state.query, enabled, &state.theme);
    let (cx, cy) = query_bar.cursor_position(query_area);
    frame.render_widget(query_bar, query_area);

    let ui = &state.config.ui;
    frame.render_widget(
        ResultsTable::new(&state.results, ui.show_ids, ui.show_tier, &state.theme),
        results_area,
    );
    frame.render_widget(
        StatusBar::new(&state.status, state.progress.get(), &state.theme)
            .footprint(state.footprint()),
        status_area,
    );

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
        return;
    }

    if enabled {
        frame.set_cursor_position((cx, cy));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
