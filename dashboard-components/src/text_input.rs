//! Single-line labelled text input

use crossterm::event::{KeyCode, KeyModifiers};
use dashboard_core::{Component, EventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct TextInputProps<'a, A> {
    pub value: &'a str,
    /// Shown in the border
    pub label: &'a str,
    /// Shown dimmed while `value` is empty
    pub placeholder: &'a str,
    pub is_focused: bool,
    /// Receives the whole edited value
    pub on_change: fn(String) -> A,
    /// Enter
    pub on_submit: fn(String) -> A,
}

/// Labelled one-line editor
///
/// The value lives with the owner; the input only tracks where the cursor
/// sits, counted in characters. Every edit emits `on_change` with the whole
/// new value.
#[derive(Default)]
pub struct TextInput {
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put the cursor after the last character of `value`
    pub fn move_to_end(&mut self, value: &str) {
        self.cursor = value.chars().count();
    }

    fn byte_offset(value: &str, chars: usize) -> usize {
        value
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(value.len())
    }

    fn insert(&mut self, value: &str, c: char) -> String {
        let at = Self::byte_offset(value, self.cursor);
        let mut next = String::with_capacity(value.len() + c.len_utf8());
        next.push_str(&value[..at]);
        next.push(c);
        next.push_str(&value[at..]);
        self.cursor += 1;
        next
    }

    /// Remove the character at char index `idx`
    fn remove(value: &str, idx: usize) -> String {
        value
            .chars()
            .enumerate()
            .filter_map(|(i, c)| (i != idx).then_some(c))
            .collect()
    }

    fn edit(&mut self, value: &str, code: KeyCode) -> Option<String> {
        let len = value.chars().count();
        match code {
            KeyCode::Char(c) => Some(self.insert(value, c)),
            KeyCode::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                Some(Self::remove(value, self.cursor))
            }
            KeyCode::Delete if self.cursor < len => Some(Self::remove(value, self.cursor)),
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(len);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = len;
                None
            }
            _ => None,
        }
    }
}

impl<A> Component<A> for TextInput {
    type Props<'a> = TextInputProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        let EventKind::Key(key) = event else {
            return None;
        };
        if !props.is_focused {
            return None;
        }

        // Value may have been replaced from outside (e.g. cleared)
        self.cursor = self.cursor.min(props.value.chars().count());

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    None
                }
                KeyCode::Char('e') => {
                    self.move_to_end(props.value);
                    None
                }
                KeyCode::Char('u') => {
                    self.cursor = 0;
                    Some((props.on_change)(String::new()))
                }
                _ => None,
            };
        }

        if key.code == KeyCode::Enter {
            return Some((props.on_submit)(props.value.to_string()));
        }

        self.edit(props.value, key.code).map(props.on_change)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.cursor = self.cursor.min(props.value.chars().count());

        let (text, style) = if props.value.is_empty() {
            (props.placeholder, Style::default().fg(Color::DarkGray))
        } else {
            (props.value, Style::default())
        };

        let border = if props.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .title(format!(" {} ", props.label))
            .borders(Borders::ALL)
            .border_style(border);

        frame.render_widget(Paragraph::new(text).style(style).block(block), area);

        if props.is_focused && area.width > 2 && area.height > 2 {
            let x = area.x + 1 + self.cursor as u16;
            if x < area.x + area.width - 1 {
                frame.set_cursor_position((x, area.y + 1));
            }
        }
    }
}
