//! Modal image gallery
//!
//! The gallery shows one image of an ordered sequence at a time and reports
//! what happens to it through [`GalleryEvent`]s: the owner decides what an
//! event means (update an index, close the modal, log it). Which image is
//! visible and whether the modal is open live in the owner's
//! [`ModalViewState`], passed back in through props.

use std::fmt;
use std::sync::Arc;

use crossterm::event::KeyCode;
use dashboard_core::{Component, EventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::modal::{centered_rect, render_modal, ModalStyle};

/// One displayable image and its metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub source_url: String,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
    pub external_url: Option<String>,
}

impl ImageDescriptor {
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            thumbnail_url: None,
            description: None,
            external_url: None,
        }
    }

    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn with_external_url(mut self, url: impl Into<String>) -> Self {
        self.external_url = Some(url.into());
        self
    }

    /// File name of the source, for lists and titles
    pub fn label(&self) -> &str {
        self.source_url
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.source_url)
    }
}

/// What a gallery event reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GalleryAction {
    /// Images were handed to the gallery
    Loaded,
    /// A different image became visible
    VisibleIndex,
    /// The first image was reached
    FirstImage,
    /// The last image was reached
    LastImage,
    /// The gallery asked to be closed
    Close,
}

impl GalleryAction {
    pub fn as_str(self) -> &'static str {
        match self {
            GalleryAction::Loaded => "LOADED",
            GalleryAction::VisibleIndex => "VISIBLE_INDEX",
            GalleryAction::FirstImage => "FIRST_IMAGE",
            GalleryAction::LastImage => "LAST_IMAGE",
            GalleryAction::Close => "CLOSE",
        }
    }
}

impl fmt::Display for GalleryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a gallery event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryResult {
    /// Number of images loaded
    Count(usize),
    /// Index of the image the event is about
    Index(usize),
}

impl fmt::Display for GalleryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GalleryResult::Count(n) | GalleryResult::Index(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryEvent {
    pub action: GalleryAction,
    pub result: GalleryResult,
}

impl GalleryEvent {
    pub fn loaded(count: usize) -> Self {
        Self {
            action: GalleryAction::Loaded,
            result: GalleryResult::Count(count),
        }
    }

    pub fn at(action: GalleryAction, index: usize) -> Self {
        Self {
            action,
            result: GalleryResult::Index(index),
        }
    }

    /// The index carried by the event, if any
    pub fn index(&self) -> Option<usize> {
        match self.result {
            GalleryResult::Index(i) => Some(i),
            GalleryResult::Count(_) => None,
        }
    }
}

/// Open/closed status and visible image of one gallery instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModalViewState {
    pub is_open: bool,
    pub current_index: usize,
}

impl ModalViewState {
    pub fn open(&mut self, index: usize) {
        self.is_open = true;
        self.current_index = index;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }
}

/// Caption settings for the visible image
///
/// Without a custom full description the caption reads
/// `"{image_text}{n}{number_separator}{total}"`, followed by
/// `"{before_text_description}{description}"` when the image has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub image_text: String,
    pub number_separator: String,
    pub before_text_description: String,
    /// Replaces the generated caption entirely when set
    pub custom_full_description: Option<String>,
}

impl Default for Description {
    fn default() -> Self {
        Self {
            image_text: "Image ".into(),
            number_separator: "/".into(),
            before_text_description: " - ".into(),
            custom_full_description: None,
        }
    }
}

impl Description {
    pub fn render(&self, index: usize, total: usize, image_description: Option<&str>) -> String {
        if let Some(custom) = &self.custom_full_description {
            return custom.clone();
        }
        let mut caption = format!(
            "{}{}{}{}",
            self.image_text,
            index + 1,
            self.number_separator,
            total
        );
        if let Some(text) = image_description {
            caption.push_str(&self.before_text_description);
            caption.push_str(text);
        }
        caption
    }
}

/// Props for GalleryModal component
pub struct GalleryModalProps<'a, A> {
    pub images: &'a [Arc<ImageDescriptor>],
    /// Index of the visible image
    pub index: usize,
    pub description: &'a Description,
    /// Shown in the modal border
    pub title: &'a str,
    pub is_focused: bool,
    pub on_event: fn(GalleryEvent) -> A,
}

/// Modal carousel over a sequence of images
///
/// Left/h and Right/l step through the images, Home/End jump to the edges,
/// Esc/q request closing.
#[derive(Default)]
pub struct GalleryModal;

impl GalleryModal {
    pub fn new() -> Self {
        Self
    }

    /// Events a freshly opened gallery reports for `index` out of `len` images
    pub fn opened(len: usize, index: usize) -> Vec<GalleryEvent> {
        let mut events = vec![GalleryEvent::loaded(len)];
        if len > 0 {
            events.extend(Self::arrived(len, index));
        }
        events
    }

    fn arrived(len: usize, index: usize) -> Vec<GalleryEvent> {
        let mut events = vec![GalleryEvent::at(GalleryAction::VisibleIndex, index)];
        if index == 0 {
            events.push(GalleryEvent::at(GalleryAction::FirstImage, index));
        }
        if index + 1 == len {
            events.push(GalleryEvent::at(GalleryAction::LastImage, index));
        }
        events
    }
}

impl<A> Component<A> for GalleryModal {
    type Props<'a> = GalleryModalProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        let len = props.images.len();
        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        if !props.is_focused {
            return Vec::new();
        }

        let current = props.index.min(len.saturating_sub(1));
        let target = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                return vec![(props.on_event)(GalleryEvent::at(GalleryAction::Close, current))];
            }
            _ if len == 0 => return Vec::new(),
            KeyCode::Right | KeyCode::Char('l') => (current + 1).min(len - 1),
            KeyCode::Left | KeyCode::Char('h') => current.saturating_sub(1),
            KeyCode::Home => 0,
            KeyCode::End => len - 1,
            _ => return Vec::new(),
        };

        if target == current {
            return Vec::new();
        }
        Self::arrived(len, target)
            .into_iter()
            .map(props.on_event)
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let modal_area = centered_rect(area.width.saturating_mul(3) / 4, 12, area);
        render_modal(frame, modal_area, &ModalStyle::with_bg(Color::Rgb(24, 24, 32)));

        let block = Block::default()
            .title(format!(" {} ", props.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta));
        let inner = block.inner(modal_area);
        frame.render_widget(block, modal_area);

        let Some(image) = props.images.get(props.index) else {
            frame.render_widget(
                Paragraph::new("No images").style(Style::default().fg(Color::DarkGray)),
                inner,
            );
            return;
        };

        let [body, caption, hint] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .areas(inner);

        let field = |name: &'static str, value: Option<&str>| {
            Line::from(vec![
                Span::styled(format!("{:>7} ", name), Style::default().fg(Color::DarkGray)),
                Span::raw(value.unwrap_or("-").to_string()),
            ])
        };
        let lines = vec![
            Line::from(Span::styled(
                format!("[ {} ]", image.label()),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            field("source", Some(image.source_url.as_str())),
            field("thumb", image.thumbnail_url.as_deref()),
            field("link", image.external_url.as_deref()),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), body);

        let text = props.description.render(
            props.index,
            props.images.len(),
            image.description.as_deref(),
        );
        frame.render_widget(
            Paragraph::new(text)
                .style(Style::default().fg(Color::Yellow))
                .wrap(Wrap { trim: true }),
            caption,
        );

        frame.render_widget(
            Paragraph::new("h/← prev  l/→ next  esc close")
                .style(Style::default().fg(Color::DarkGray)),
            hint,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::testing::{key, RenderHarness};

    fn images(n: usize) -> Vec<Arc<ImageDescriptor>> {
        (1..=n)
            .map(|i| {
                Arc::new(
                    ImageDescriptor::new(format!("assets/img{}.jpg", i))
                        .with_description(format!("Description {}", i)),
                )
            })
            .collect()
    }

    fn send(images: &[Arc<ImageDescriptor>], index: usize, k: &str) -> Vec<GalleryEvent> {
        let description = Description::default();
        let props = GalleryModalProps {
            images,
            index,
            description: &description,
            title: "Gallery",
            is_focused: true,
            on_event: |e| e,
        };
        GalleryModal::new()
            .handle_event(&EventKind::Key(key(k)), props)
            .into_iter()
            .collect()
    }

    #[test]
    fn test_label_is_file_name() {
        assert_eq!(ImageDescriptor::new("a/b/img2.png").label(), "img2.png");
        assert_eq!(ImageDescriptor::new("plain").label(), "plain");
    }

    #[test]
    fn test_opened_in_the_middle() {
        assert_eq!(
            GalleryModal::opened(5, 2),
            vec![
                GalleryEvent::loaded(5),
                GalleryEvent::at(GalleryAction::VisibleIndex, 2),
            ]
        );
    }

    #[test]
    fn test_opened_single_image_is_first_and_last() {
        let actions: Vec<_> = GalleryModal::opened(1, 0)
            .into_iter()
            .map(|e| e.action)
            .collect();

        assert_eq!(
            actions,
            vec![
                GalleryAction::Loaded,
                GalleryAction::VisibleIndex,
                GalleryAction::FirstImage,
                GalleryAction::LastImage,
            ]
        );
    }

    #[test]
    fn test_next_reaches_last() {
        let images = images(3);

        assert_eq!(
            send(&images, 1, "l"),
            vec![
                GalleryEvent::at(GalleryAction::VisibleIndex, 2),
                GalleryEvent::at(GalleryAction::LastImage, 2),
            ]
        );
        // Already at the end
        assert!(send(&images, 2, "right").is_empty());
    }

    #[test]
    fn test_prev_reaches_first() {
        let images = images(3);

        assert_eq!(
            send(&images, 1, "left"),
            vec![
                GalleryEvent::at(GalleryAction::VisibleIndex, 0),
                GalleryEvent::at(GalleryAction::FirstImage, 0),
            ]
        );
    }

    #[test]
    fn test_escape_closes_at_current_index() {
        let images = images(3);

        assert_eq!(
            send(&images, 2, "esc"),
            vec![GalleryEvent::at(GalleryAction::Close, 2)]
        );
    }

    #[test]
    fn test_description_caption() {
        let custom = Description {
            image_text: "Look this image ".into(),
            number_separator: " of ".into(),
            before_text_description: " => ".into(),
            custom_full_description: None,
        };

        assert_eq!(
            custom.render(1, 5, Some("Description 2")),
            "Look this image 2 of 5 => Description 2"
        );
        assert_eq!(custom.render(0, 5, None), "Look this image 1 of 5");

        let full = Description {
            custom_full_description: Some("Custom".into()),
            ..custom
        };
        assert_eq!(full.render(3, 5, Some("ignored")), "Custom");
    }

    #[test]
    fn test_modal_state_transitions() {
        let mut state = ModalViewState::default();
        state.open(3);
        assert_eq!(
            state,
            ModalViewState {
                is_open: true,
                current_index: 3
            }
        );

        state.close();
        assert!(!state.is_open);
    }

    #[test]
    fn test_render_shows_caption() {
        let images = images(2);
        let description = Description::default();
        let mut render = RenderHarness::new(80, 20);

        let output = render.render_to_string_plain(|frame| {
            let props = GalleryModalProps {
                images: &images,
                index: 1,
                description: &description,
                title: "Gallery",
                is_focused: true,
                on_event: |e| e,
            };
            GalleryModal::new().render(frame, frame.area(), props);
        });

        assert!(output.contains("img2.jpg"));
        assert!(output.contains("Image 2/2 - Description 2"));
    }
}
