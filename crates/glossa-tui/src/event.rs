//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! The query box always owns the keyboard, so every printable character is
//! text. Navigation lives on keys that cannot be typed.
//!
//! | Key(s)                  | Event                      |
//! |-------------------------|----------------------------|
//! | `Ctrl+c`, `Ctrl+q`      | `Quit`                     |
//! | `Enter`                 | `Submit`                   |
//! | `Esc`                   | `Escape`                   |
//! | `F1`                    | `ToggleHelp`               |
//! | `↑` / `↓`               | `Nav(Up)` / `Nav(Down)`    |
//! | `←` / `→`               | `Nav(Left)` / `Nav(Right)` |
//! | `Home` / `End`          | `Home` / `End`             |
//! | `PageUp`, `Ctrl+u`      | `PageUp`                   |
//! | `PageDown`, `Ctrl+d`    | `PageDown`                 |
//! | printable char          | `Char(c)`                  |
//! | `Backspace`             | `Backspace`                |
//! | terminal resize         | `Resize(w, h)`             |

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Cardinal direction for list selection and text-cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Exit the application.
    Quit,
    /// Run the current query.
    Submit,
    /// Cancel a running search. When idle, clear the query; over the help
    /// popup, close it.
    Escape,
    /// Show or hide the keybinding popup.
    ToggleHelp,
    /// Move the result selection (Up/Down) or the text cursor (Left/Right).
    Nav(Direction),
    /// Text cursor to the start of the query.
    Home,
    /// Text cursor to the end of the query.
    End,
    /// Scroll the result table one page up.
    PageUp,
    /// Scroll the result table one page down.
    PageDown,
    /// A printable character for the query box.
    Char(char),
    /// Delete the character before the cursor.
    Backspace,
    /// The terminal was resized to the given (width, height).
    Resize(u16, u16),
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`].
///
/// Returns `None` for events without meaning for the application (mouse
/// events, key releases on terminals that report them, unbound keys).
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) if key.kind != KeyEventKind::Release => map_key(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('c') | Char('q') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),
        Char('u') if key.modifiers == Mod::CONTROL => Some(AppEvent::PageUp),
        Char('d') if key.modifiers == Mod::CONTROL => Some(AppEvent::PageDown),

        Enter => Some(AppEvent::Submit),
        Esc => Some(AppEvent::Escape),
        F(1) => Some(AppEvent::ToggleHelp),

        Up => Some(AppEvent::Nav(Direction::Up)),
        Down => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),
        Home => Some(AppEvent::Home),
        End => Some(AppEvent::End),
        PageUp => Some(AppEvent::PageUp),
        PageDown => Some(AppEvent::PageDown),

        // Shifted characters (capitals, umlauts on some layouts) are text too.
        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }
        Backspace => Some(AppEvent::Backspace),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn press(code: KeyCode) -> Event {
        key(code, KeyModifiers::NONE)
    }

    fn ctrl(code: KeyCode) -> Event {
        key(code, KeyModifiers::CONTROL)
    }

    #[test]
    fn quit_keys() {
        assert_eq!(to_app_event(ctrl(KeyCode::Char('c'))), Some(AppEvent::Quit));
        assert_eq!(to_app_event(ctrl(KeyCode::Char('q'))), Some(AppEvent::Quit));
    }

    #[test]
    fn plain_q_is_text() {
        // the query box always has focus, so q must be typeable
        assert_eq!(to_app_event(press(KeyCode::Char('q'))), Some(AppEvent::Char('q')));
    }

    #[test]
    fn submit_and_escape() {
        assert_eq!(to_app_event(press(KeyCode::Enter)), Some(AppEvent::Submit));
        assert_eq!(to_app_event(press(KeyCode::Esc)), Some(AppEvent::Escape));
    }

    #[test]
    fn help_key() {
        assert_eq!(to_app_event(press(KeyCode::F(1))), Some(AppEvent::ToggleHelp));
    }

    #[test]
    fn arrows_navigate() {
        assert_eq!(to_app_event(press(KeyCode::Up)), Some(AppEvent::Nav(Direction::Up)));
        assert_eq!(
            to_app_event(press(KeyCode::Down)),
            Some(AppEvent::Nav(Direction::Down))
        );
        assert_eq!(
            to_app_event(press(KeyCode::Left)),
            Some(AppEvent::Nav(Direction::Left))
        );
        assert_eq!(
            to_app_event(press(KeyCode::Right)),
            Some(AppEvent::Nav(Direction::Right))
        );
    }

    #[test]
    fn paging() {
        assert_eq!(to_app_event(press(KeyCode::PageUp)), Some(AppEvent::PageUp));
        assert_eq!(to_app_event(press(KeyCode::PageDown)), Some(AppEvent::PageDown));
        assert_eq!(to_app_event(ctrl(KeyCode::Char('u'))), Some(AppEvent::PageUp));
        assert_eq!(to_app_event(ctrl(KeyCode::Char('d'))), Some(AppEvent::PageDown));
    }

    #[test]
    fn char_forwarding() {
        assert_eq!(to_app_event(press(KeyCode::Char('ä'))), Some(AppEvent::Char('ä')));
        assert_eq!(
            to_app_event(key(KeyCode::Char('H'), KeyModifiers::SHIFT)),
            Some(AppEvent::Char('H'))
        );
    }

    #[test]
    fn key_release_is_ignored() {
        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert_eq!(to_app_event(release), None);
    }

    #[test]
    fn resize_event() {
        assert_eq!(to_app_event(Event::Resize(120, 40)), Some(AppEvent::Resize(120, 40)));
    }

    #[test]
    fn unbound_key_returns_none() {
        assert_eq!(to_app_event(press(KeyCode::F(5))), None);
    }
}
