//! The `Component` trait

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A widget driven entirely by its props
///
/// Whatever a component shows comes in through `Props`; whatever it wants to
/// change goes out as messages from `handle_event`. The component itself
/// keeps only presentation state such as a cursor or scroll offset.
///
/// ```ignore
/// struct Badge;
///
/// struct BadgeProps<'a> {
///     name: &'a str,
///     is_focused: bool,
/// }
///
/// impl Component<Msg> for Badge {
///     type Props<'a> = BadgeProps<'a>;
///
///     fn handle_event(
///         &mut self,
///         event: &EventKind,
///         props: Self::Props<'_>,
///     ) -> impl IntoIterator<Item = Msg> {
///         let Some(key) = event.as_key() else { return None };
///         (props.is_focused && key.code == KeyCode::Delete).then_some(Msg::NameClear)
///     }
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
///         frame.render_widget(Paragraph::new(props.name), area);
///     }
/// }
/// ```
pub trait Component<A> {
    type Props<'a>;

    /// Map an event to messages
    ///
    /// Return `None`, `Some(msg)` or a `Vec`. Render-only components keep
    /// the default, which emits nothing.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
