//! Terminal events delivered to components

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

/// The event payload components receive
#[derive(Debug, Clone)]
pub enum EventKind {
    /// Keyboard event
    Key(KeyEvent),
    /// Mouse event
    Mouse(MouseEvent),
    /// Scroll event with position and delta
    Scroll { column: u16, row: u16, delta: isize },
    /// Terminal resize
    Resize(u16, u16),
}

impl EventKind {
    /// Ctrl+C / Ctrl+Q, which end the app regardless of focus
    pub fn is_quit(&self) -> bool {
        match self {
            EventKind::Key(key) => {
                key.modifiers.contains(KeyModifiers::CONTROL)
                    && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
            }
            _ => false,
        }
    }

    /// The key event, if this is one
    pub fn as_key(&self) -> Option<&KeyEvent> {
        match self {
            EventKind::Key(key) => Some(key),
            _ => None,
        }
    }
}
