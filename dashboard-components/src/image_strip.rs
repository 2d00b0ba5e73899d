//! Selectable list of images

use std::sync::Arc;

use crossterm::event::KeyCode;
use dashboard_core::{Component, EventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::gallery::ImageDescriptor;

/// Props for ImageStrip component
pub struct ImageStripProps<'a, A> {
    pub images: &'a [Arc<ImageDescriptor>],
    /// Currently selected index
    pub selected: usize,
    pub title: &'a str,
    pub is_focused: bool,
    /// Callback to create a message when the selection moves
    pub on_select: fn(usize) -> A,
}

/// A scrollable image list with keyboard navigation
///
/// Handles j/k/up/down/home/end. Each row shows the file name and, when
/// present, the description.
#[derive(Default)]
pub struct ImageStrip {
    scroll_offset: usize,
}

impl ImageStrip {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_visible(&mut self, selected: usize, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }
        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        } else if selected >= self.scroll_offset + viewport_height {
            self.scroll_offset = selected + 1 - viewport_height;
        }
    }
}

impl<A> Component<A> for ImageStrip {
    type Props<'a> = ImageStripProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        let (Some(last), Some(key)) = (props.images.len().checked_sub(1), event.as_key()) else {
            return None;
        };
        if !props.is_focused {
            return None;
        }

        let target = match key.code {
            KeyCode::Char('j') | KeyCode::Down => (props.selected + 1).min(last),
            KeyCode::Char('k') | KeyCode::Up => props.selected.saturating_sub(1),
            KeyCode::Home => 0,
            KeyCode::End => last,
            _ => return None,
        };

        (target != props.selected).then(|| (props.on_select)(target))
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let viewport_height = area.height.saturating_sub(2) as usize;
        self.ensure_visible(props.selected, viewport_height);

        let items: Vec<ListItem> = props
            .images
            .iter()
            .map(|image| {
                let mut spans = vec![Span::raw(image.label().to_string())];
                if let Some(text) = &image.description {
                    spans.push(Span::styled(
                        format!("  {}", text),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let border = if props.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let list = List::new(items)
            .block(
                Block::default()
                    .title(format!(" {} ({}) ", props.title, props.images.len()))
                    .borders(Borders::ALL)
                    .border_style(border),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD),
            );

        let selected = (!props.images.is_empty()).then_some(props.selected);
        let mut state = ListState::default().with_selected(selected);
        *state.offset_mut() = self.scroll_offset;

        frame.render_stateful_widget(list, area, &mut state);
    }
}
