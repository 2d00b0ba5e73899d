//! Modal overlay with background dimming
//!
//! Dims whatever was rendered so far and clears the modal area, so modal
//! content can be drawn on top each frame.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
    Frame,
};

/// How the overlay looks
pub struct ModalStyle {
    /// Foreground applied to the dimmed background
    pub dim_fg: Color,
    /// Background color for the modal area (None = cleared to default)
    pub bg_color: Option<Color>,
}

impl Default for ModalStyle {
    fn default() -> Self {
        Self {
            dim_fg: Color::DarkGray,
            bg_color: None,
        }
    }
}

impl ModalStyle {
    pub fn with_bg(bg_color: Color) -> Self {
        Self {
            bg_color: Some(bg_color),
            ..Default::default()
        }
    }
}

/// Dim the frame rendered so far and blank `area` for the modal body
///
/// Call it after the background and before the modal content.
pub fn render_modal(frame: &mut Frame, area: Rect, style: &ModalStyle) {
    dim_buffer(frame.buffer_mut(), style.dim_fg);
    frame.render_widget(Fill(style.bg_color), area);
}

fn dim_buffer(buf: &mut Buffer, fg: Color) {
    let dimmed = Style::default()
        .fg(fg)
        .add_modifier(Modifier::DIM)
        .remove_modifier(Modifier::BOLD);
    for position in buf.area.positions() {
        buf[position].set_style(dimmed);
    }
}

/// Clears an area, optionally painting a background color
struct Fill(Option<Color>);

impl Widget for Fill {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for position in area.intersection(buf.area).positions() {
            let cell = &mut buf[position];
            cell.reset();
            if let Some(bg) = self.0 {
                cell.set_bg(bg);
            }
        }
    }
}

/// `width` x `height` centered in `area`, shrunk to leave a one-cell margin
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
