//! Results table: German / English pairs of the last search.
//!
//! # Navigation
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `↓` | Move the selection one row |
//! | `PageUp` / `Ctrl+u` | Move the selection one page up |
//! | `PageDown` / `Ctrl+d` | Move the selection one page down |
//!
//! Rows are coloured by the tier that admitted them. The id column is hidden
//! unless `ui.show_ids` is set.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use glossa_core::{SearchHit, SearchResult};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::Line,
    widgets::{Block, Cell as TableCell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ResultsState {
    hits: Vec<SearchHit>,
    /// Index of the highlighted row, `None` when there are no hits.
    selected: Option<usize>,
    /// Cached from the last render so paging moves by one screenful.
    last_height: Cell<usize>,
}

impl Default for ResultsState {
    fn default() -> Self {
        Self {
            hits: Vec::new(),
            selected: None,
            last_height: Cell::new(20),
        }
    }
}

impl ResultsState {
    /// Replace the table contents with a fresh result, selecting the first row.
    pub fn set_result(&mut self, result: SearchResult) {
        self.hits = result.into_hits();
        self.selected = if self.hits.is_empty() { None } else { Some(0) };
    }

    pub fn hits(&self) -> &[SearchHit] {
        &self.hits
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn handle(&mut self, event: &AppEvent) {
        let Some(current) = self.selected else {
            return;
        };
        let last = self.hits.len() - 1;
        let page = self.last_height.get().max(1);

        let next = match event {
            AppEvent::Nav(Direction::Up) => current.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => (current + 1).min(last),
            AppEvent::PageUp => current.saturating_sub(page),
            AppEvent::PageDown => (current + page).min(last),
            _ => return,
        };
        self.selected = Some(next);
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ResultsTable<'a> {
    state: &'a ResultsState,
    show_ids: bool,
    show_tier: bool,
    theme: &'a Theme,
}

impl<'a> ResultsTable<'a> {
    pub fn new(state: &'a ResultsState, show_ids: bool, show_tier: bool, theme: &'a Theme) -> Self {
        Self { state, show_ids, show_tier, theme }
    }

    fn row(&self, hit: &SearchHit) -> Row<'static> {
        let mut cells = Vec::with_capacity(4);
        if self.show_ids {
            cells.push(TableCell::from(hit.record.id.to_string()));
        }
        cells.push(TableCell::from(hit.record.source_term.clone()));
        cells.push(TableCell::from(hit.record.target_term.clone()));
        if self.show_tier {
            cells.push(TableCell::from(hit.tier.to_string()));
        }
        Row::new(cells).style(self.theme.tier_style(hit.tier))
    }

    fn columns(&self) -> (Vec<&'static str>, Vec<Constraint>) {
        let mut header = Vec::with_capacity(4);
        let mut widths = Vec::with_capacity(4);
        if self.show_ids {
            header.push("Id");
            widths.push(Constraint::Length(8));
        }
        header.extend(["German", "English"]);
        widths.extend([Constraint::Fill(1), Constraint::Fill(1)]);
        if self.show_tier {
            header.push("Match");
            widths.push(Constraint::Length(12));
        }
        (header, widths)
    }
}

impl Widget for ResultsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" Results ({}) ", self.state.hits.len());
        let block = Block::bordered()
            .title(title)
            .border_style(self.theme.border_unfocused);

        // header row + 2 borders
        self.state
            .last_height
            .set((area.height as usize).saturating_sub(3));

        if self.state.hits.is_empty() {
            Paragraph::new(Line::from(" no entries"))
                .block(block)
                .render(area, buf);
            return;
        }

        let (header, widths) = self.columns();
        let rows: Vec<Row> = self.state.hits.iter().map(|hit| self.row(hit)).collect();

        let table = Table::new(rows, widths)
            .header(Row::new(header).style(self.theme.table_header))
            .block(block)
            .row_highlight_style(self.theme.table_selected)
            .highlight_symbol("▸ ");

        let mut table_state = TableState::default().with_selected(self.state.selected);
        StatefulWidget::render(table, area, buf, &mut table_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_core::{NeverCancel, NoProgress, SearchEngine, TermStore};

    fn result_with(n: usize) -> SearchResult {
        let store = TermStore::from_pairs((0..n).map(|i| (format!("Wort{i}"), format!("word{i}"))))
            .unwrap();
        SearchEngine::new()
            .search(&store, "Wort", &NoProgress, &NeverCancel)
            .unwrap()
    }

    #[test]
    fn new_result_selects_first_row() {
        let mut state = ResultsState::default();
        state.set_result(result_with(3));
        assert_eq!(state.selected(), Some(0));
        assert_eq!(state.hits().len(), 3);
    }

    #[test]
    fn empty_result_has_no_selection() {
        let mut state = ResultsState::default();
        state.set_result(SearchResult::default());
        assert_eq!(state.selected(), None);
        state.handle(&AppEvent::Nav(Direction::Down));
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn selection_is_clamped() {
        let mut state = ResultsState::default();
        state.set_result(result_with(3));
        state.handle(&AppEvent::Nav(Direction::Up));
        assert_eq!(state.selected(), Some(0));
        for _ in 0..5 {
            state.handle(&AppEvent::Nav(Direction::Down));
        }
        assert_eq!(state.selected(), Some(2));
    }

    #[test]
    fn paging_moves_by_last_rendered_height() {
        let mut state = ResultsState::default();
        state.set_result(result_with(50));
        state.last_height.set(10);
        state.handle(&AppEvent::PageDown);
        assert_eq!(state.selected(), Some(10));
        state.handle(&AppEvent::PageUp);
        assert_eq!(state.selected(), Some(0));
    }
}
