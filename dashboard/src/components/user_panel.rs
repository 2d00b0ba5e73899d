//! Signed-in user summary with greeting and status line

use dashboard_core::Component;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::state::User;
use crate::view::ViewMsg;

pub struct UserPanelProps<'a> {
    pub user: Option<&'a User>,
    pub greeting: Option<&'a str>,
    /// Last failed operation, if any
    pub status: Option<&'a str>,
}

#[derive(Default)]
pub struct UserPanel;

impl Component<ViewMsg> for UserPanel {
    type Props<'a> = UserPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let who = match props.user {
            Some(user) => Line::from(vec![
                Span::styled("Signed in as ", Style::default().fg(Color::DarkGray)),
                Span::styled(user.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!(" <{}> #{}", user.email, user.id),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            None => Line::from(Span::styled("Signed out", Style::default().fg(Color::Yellow))),
        };

        let mut lines = vec![who];
        if let Some(greeting) = props.greeting {
            lines.push(Line::from(Span::styled(
                greeting.to_string(),
                Style::default().fg(Color::Green),
            )));
        }
        if let Some(status) = props.status {
            lines.push(Line::from(Span::styled(
                status.to_string(),
                Style::default().fg(Color::Red),
            )));
        }

        let block = Block::default()
            .title(" Dashboard ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::testing::RenderHarness;

    #[test]
    fn test_signed_in_and_greeting() {
        let user = User {
            id: 4,
            name: "Ada".into(),
            email: "ada@example.com".into(),
        };
        let mut render = RenderHarness::new(60, 5);

        let output = render.render_to_string_plain(|frame| {
            let props = UserPanelProps {
                user: Some(&user),
                greeting: Some("Hello, Ada!"),
                status: None,
            };
            UserPanel.render(frame, frame.area(), props);
        });

        assert!(output.contains("Signed in as Ada <ada@example.com> #4"));
        assert!(output.contains("Hello, Ada!"));
    }

    #[test]
    fn test_signed_out_with_status() {
        let mut render = RenderHarness::new(60, 5);

        let output = render.render_to_string_plain(|frame| {
            let props = UserPanelProps {
                user: None,
                greeting: None,
                status: Some("user not loaded"),
            };
            UserPanel.render(frame, frame.area(), props);
        });

        assert!(output.contains("Signed out"));
        assert!(output.contains("user not loaded"));
    }
}
