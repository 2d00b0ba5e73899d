//! Key hints for the focused area

use dashboard_core::Component;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::view::ViewMsg;

pub struct HelpBarProps<'a> {
    /// (key, what it does)
    pub hints: &'a [(&'a str, &'a str)],
}

#[derive(Default)]
pub struct HelpBar;

impl Component<ViewMsg> for HelpBar {
    type Props<'a> = HelpBarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let mut spans = Vec::with_capacity(props.hints.len() * 2);
        for (key, text) in props.hints {
            spans.push(Span::styled(format!(" {} ", key), Style::default().fg(Color::Cyan)));
            spans.push(Span::styled(format!("{} ", text), Style::default().fg(Color::DarkGray)));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
