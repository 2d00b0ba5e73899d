//! Test utilities for dashboard components and views
//!
//! - [`key`]: Create `KeyEvent` from string (e.g., `key("ctrl+p")`)
//! - [`RenderHarness`]: Render into an in-memory terminal and read it back as text
//! - [`drain`]: Collect everything currently queued on a channel
//! - Assertion macros for verifying emitted messages
//!
//! # Example
//!
//! ```ignore
//! use dashboard_core::testing::{key, RenderHarness};
//!
//! let mut render = RenderHarness::new(40, 5);
//! let output = render.render_to_string_plain(|frame| {
//!     input.render(frame, frame.area(), props);
//! });
//! assert!(output.contains("hello"));
//! ```

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;

use crate::event::EventKind;

/// Parse a key string such as `"q"`, `"enter"`, `"ctrl+u"` or `"shift+tab"`.
pub fn parse_key_string(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim();
    if key_str.is_empty() {
        return None;
    }

    let lower = key_str.to_lowercase();
    if lower == "shift+tab" || lower == "backtab" {
        return Some(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
    }

    let mut parts: Vec<&str> = key_str.split('+').collect();
    // A lone "+" splits into two empty parts
    if key_str.ends_with('+') && parts.len() >= 2 {
        parts.pop();
        let last = parts.len() - 1;
        parts[last] = "+";
    }
    let key_part = parts.pop()?.trim();

    let mut modifiers = KeyModifiers::empty();
    for part in parts {
        match part.trim().to_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => {}
        }
    }

    let code = match key_part.to_lowercase().as_str() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "space" => KeyCode::Char(' '),
        _ => {
            let mut chars = key_part.chars();
            let ch = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            // Keep the case the caller wrote: "L" is a distinct binding from "l"
            KeyCode::Char(if modifiers.contains(KeyModifiers::CONTROL) {
                ch.to_ascii_lowercase()
            } else {
                ch
            })
        }
    };

    Some(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

/// Create a `KeyEvent` from a key string.
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key_string(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// Create an `EventKind::Key` from a key string.
pub fn key_event(s: &str) -> EventKind {
    EventKind::Key(key(s))
}

/// Drain every message currently queued on `rx` without waiting.
pub fn drain<M>(rx: &mut mpsc::UnboundedReceiver<M>) -> Vec<M> {
    let mut out = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        out.push(msg);
    }
    out
}

/// Renders into a `TestBackend` and exposes the buffer as text
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// Create a harness with a terminal of the given size.
    ///
    /// # Panics
    ///
    /// Panics if the test backend cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("test backend terminal");
        Self { terminal }
    }

    /// Render one frame and return the resulting buffer.
    pub fn render<F>(&mut self, render_fn: F) -> &Buffer
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render_fn).expect("draw to test backend");
        self.terminal.backend().buffer()
    }

    /// Render one frame and return its symbols, one line per row, without styles.
    pub fn render_to_string_plain<F>(&mut self, render_fn: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        let buffer = self.render(render_fn);
        buffer_to_string_plain(buffer)
    }
}

/// Convert a buffer to plain text, trimming trailing spaces on each row.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.y..area.y + area.height {
        let mut line = String::new();
        for x in area.x..area.x + area.width {
            line.push_str(buffer[(x, y)].symbol());
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Assert that a message matching a pattern was emitted.
///
/// ```ignore
/// let msgs = drain(&mut rx);
/// assert_emitted!(msgs, Msg::UserDidChange(_));
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected message matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that no message matching a pattern was emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected message matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_key_simple() {
        let k = key("q");
        assert_eq!(k.code, KeyCode::Char('q'));
        assert_eq!(k.modifiers, KeyModifiers::empty());
    }

    #[test]
    fn test_key_preserves_case() {
        assert_eq!(key("L").code, KeyCode::Char('L'));
        assert_eq!(key("ctrl+U").code, KeyCode::Char('u'));
    }

    #[test]
    fn test_key_with_ctrl() {
        let k = key("ctrl+p");
        assert_eq!(k.code, KeyCode::Char('p'));
        assert!(k.modifiers.contains(KeyModifiers::CONTROL));
    }

    #[test]
    fn test_key_special() {
        assert_eq!(key("esc").code, KeyCode::Esc);
        assert_eq!(key("enter").code, KeyCode::Enter);
        assert_eq!(key("shift+tab").code, KeyCode::BackTab);
        assert!(parse_key_string("").is_none());
        assert!(parse_key_string("nope").is_none());
    }

    #[test]
    fn test_drain_collects_queued() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(1).unwrap();
        tx.send(2).unwrap();

        assert_eq!(drain(&mut rx), vec![1, 2]);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_render_harness_plain() {
        let mut render = RenderHarness::new(10, 2);
        let output = render.render_to_string_plain(|frame| {
            frame.render_widget(Paragraph::new("hi"), frame.area());
        });

        assert_eq!(output, "hi\n\n");
    }

    #[test]
    fn test_assert_macros() {
        #[derive(Debug)]
        enum Msg {
            Foo,
            Bar(i32),
        }

        let msgs = vec![Msg::Foo, Msg::Bar(42)];
        assert_emitted!(msgs, Msg::Foo);
        assert_emitted!(msgs, Msg::Bar(n) if *n == 42);
        assert_not_emitted!(msgs, Msg::Bar(99));
    }
}
