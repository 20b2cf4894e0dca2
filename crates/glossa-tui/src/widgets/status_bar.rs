//! Status bar: progress gauge on the left, status message on the right.
//! Once a dataset is loaded the right edge also shows its size.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Gauge, Widget},
};

/// Colour class of the status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Ready,
    Busy,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

impl Status {
    pub fn ready(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Ready, text: text.into() }
    }

    pub fn busy(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Busy, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Error, text: text.into() }
    }
}

/// Record count and approximate size of the loaded store, e.g.
/// `30 entries, 2.4 KiB`.
pub fn footprint(entries: usize, bytes: usize) -> String {
    format!("{entries} entries, {}", human_bytes(bytes))
}

fn human_bytes(bytes: usize) -> String {
    const UNITS: [&str; 3] = ["KiB", "MiB", "GiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

pub struct StatusBar<'a> {
    status: &'a Status,
    percent: u8,
    footprint: Option<String>,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(status: &'a Status, percent: u8, theme: &'a Theme) -> Self {
        Self { status, percent, footprint: None, theme }
    }

    pub fn footprint(mut self, footprint: Option<String>) -> Self {
        self.footprint = footprint;
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [gauge_area, text_area] =
            Layout::horizontal([Constraint::Length(24), Constraint::Fill(1)]).areas(area);

        Gauge::default()
            .gauge_style(self.theme.gauge)
            .percent(u16::from(self.percent.min(100)))
            .render(gauge_area, buf);

        let style = match self.status.kind {
            StatusKind::Ready => self.theme.status_ready,
            StatusKind::Busy => self.theme.status_busy,
            StatusKind::Error => self.theme.status_error,
        };
        Line::from(vec![
            Span::raw(" "),
            Span::styled(self.status.text.as_str(), style),
        ])
        .render(text_area, buf);

        let hint = match &self.footprint {
            Some(size) => format!(" {size} | F1:help  Ctrl+q:quit "),
            None => " F1:help  Ctrl+q:quit ".to_string(),
        };
        let hint_x = area.right().saturating_sub(hint.chars().count() as u16);
        if hint_x > text_area.x + self.status.text.chars().count() as u16 + 1 {
            buf.set_string(hint_x, area.y, &hint, self.theme.border_unfocused);
        }
    }
}
