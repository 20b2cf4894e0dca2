//! Query bar widget: the single-line German term input at the top.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the cursor, `Home` / `End` jump.
//!
//! After a search the whole query is selected: the next typed character
//! replaces it, so a new term can be entered without clearing first.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct QueryBarState {
    /// The term typed by the user.
    pub query: String,
    /// Byte offset of the cursor within `query`.
    pub cursor: usize,
    /// When set, the next edit replaces the whole query.
    pub select_all: bool,
}

impl QueryBarState {
    /// Mark the whole query as selected and park the cursor at the end.
    pub fn select_all(&mut self) {
        self.select_all = !self.query.is_empty();
        self.cursor = self.query.len();
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
        self.select_all = false;
    }

    /// Handle a key event from the app shell. Non-editing events are ignored.
    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Char(c) => {
                if self.select_all {
                    self.clear();
                }
                self.query.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                tracing::trace!(query = %self.query, cursor = self.cursor, "query: char inserted");
            }
            AppEvent::Backspace => {
                if self.select_all {
                    self.clear();
                } else if self.cursor > 0 {
                    let prev = self.prev_boundary();
                    self.query.remove(prev);
                    self.cursor = prev;
                }
            }
            AppEvent::Nav(Direction::Left) => {
                self.select_all = false;
                self.cursor = self.prev_boundary();
            }
            AppEvent::Nav(Direction::Right) => {
                self.select_all = false;
                self.cursor = self.next_boundary();
            }
            AppEvent::Home => {
                self.select_all = false;
                self.cursor = 0;
            }
            AppEvent::End => {
                self.select_all = false;
                self.cursor = self.query.len();
            }
            _ => {}
        }
    }

    fn prev_boundary(&self) -> usize {
        self.query[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.query[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.query.len())
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct QueryBar<'a> {
    state: &'a QueryBarState,
    /// False while the dataset is still loading.
    enabled: bool,
    theme: &'a Theme,
}

impl<'a> QueryBar<'a> {
    pub fn new(state: &'a QueryBarState, enabled: bool, theme: &'a Theme) -> Self {
        Self { state, enabled, theme }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        // The block adds 1-cell borders; text starts at (area.x+1, area.y+1).
        let col = self.state.query[..self.state.cursor].chars().count() as u16;
        let x = (area.x + 1 + col).min(area.right().saturating_sub(2));
        (x, area.y + 1)
    }
}

impl Widget for QueryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.enabled {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered()
            .title(" German term (Enter to search) ")
            .border_style(border_style);

        let line = if !self.enabled {
            Line::from(Span::styled(
                "loading dataset…",
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else if self.state.select_all {
            Line::from(Span::styled(
                self.state.query.as_str(),
                Style::default().add_modifier(Modifier::REVERSED),
            ))
        } else {
            Line::from(self.state.query.as_str())
        };

        Paragraph::new(line).block(block).render(area, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> QueryBarState {
        let mut state = QueryBarState::default();
        for c in s.chars() {
            state.handle(&AppEvent::Char(c));
        }
        state
    }

    #[test]
    fn typing_appends() {
        let state = typed("Haus");
        assert_eq!(state.query, "Haus");
        assert_eq!(state.cursor, 4);
    }

    #[test]
    fn backspace_respects_multibyte_chars() {
        let mut state = typed("Bär");
        state.handle(&AppEvent::Nav(Direction::Left));
        state.handle(&AppEvent::Backspace);
        assert_eq!(state.query, "Br");
        assert_eq!(state.cursor, 1);
    }

    #[test]
    fn insert_in_the_middle() {
        let mut state = typed("Hs");
        state.handle(&AppEvent::Nav(Direction::Left));
        state.handle(&AppEvent::Char('a'));
        state.handle(&AppEvent::Char('u'));
        assert_eq!(state.query, "Haus");
    }

    #[test]
    fn select_all_is_replaced_by_next_char() {
        let mut state = typed("Haus");
        state.select_all();
        state.handle(&AppEvent::Char('B'));
        assert_eq!(state.query, "B");
        assert!(!state.select_all);
    }

    #[test]
    fn moving_the_cursor_keeps_the_selection_text() {
        let mut state = typed("Haus");
        state.select_all();
        state.handle(&AppEvent::Home);
        state.handle(&AppEvent::Char('R'));
        assert_eq!(state.query, "RHaus");
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut state = typed("a");
        state.handle(&AppEvent::Nav(Direction::Right));
        assert_eq!(state.cursor, 1);
        state.handle(&AppEvent::Home);
        state.handle(&AppEvent::Nav(Direction::Left));
        assert_eq!(state.cursor, 0);
    }
}
