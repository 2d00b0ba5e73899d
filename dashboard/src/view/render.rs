//! Rendering and key handling for the dashboard view

use crossterm::event::KeyCode;
use dashboard_components::{
    GalleryEvent, GalleryModal, GalleryModalProps, ImageStrip, ImageStripProps, TextInput,
    TextInputProps,
};
use dashboard_core::{Component, EventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{DashboardView, Focus, GalleryInstance, ViewMsg};
use crate::components::{HelpBar, HelpBarProps, UserPanel, UserPanelProps};

const FORM_HINTS: &[(&str, &str)] = &[
    ("enter", "save"),
    ("tab", "images"),
    ("ctrl+q", "quit"),
];

const IMAGE_HINTS: &[(&str, &str)] = &[
    ("enter", "open"),
    ("o", "open delayed"),
    ("a", "add random"),
    ("c", "clear name"),
    ("s", "save"),
    ("L", "logout"),
    ("tab", "form"),
    ("q", "quit"),
];

/// Widget instances owned by the view
#[derive(Default)]
pub struct DashboardUi {
    pub(super) name_input: TextInput,
    strip: ImageStrip,
    subscribed: ImageStrip,
    gallery: GalleryModal,
    panel: UserPanel,
    help: HelpBar,
}

impl DashboardView {
    /// Map a terminal event to view messages
    pub fn handle_event(&mut self, event: &EventKind) -> Vec<ViewMsg> {
        if self.is_destroyed() {
            return Vec::new();
        }

        // The observable gallery draws on top, so it takes keys first
        if self.modal_observable.is_open {
            return self.gallery_event(GalleryInstance::Observable, event);
        }
        if self.modal.is_open {
            return self.gallery_event(GalleryInstance::Direct, event);
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            return vec![ViewMsg::FocusNext];
        }

        match self.focus {
            Focus::NameInput => {
                if key.code == KeyCode::Esc {
                    return vec![ViewMsg::FocusNext];
                }
                let props = TextInputProps {
                    value: self.form.value(&self.config.name_field).unwrap_or_default(),
                    label: &self.config.name_label,
                    placeholder: "Your name",
                    is_focused: true,
                    on_change: ViewMsg::NameChange,
                    on_submit: |_| ViewMsg::StateSubmit,
                };
                self.ui
                    .name_input
                    .handle_event(event, props)
                    .into_iter()
                    .collect()
            }
            Focus::Images => {
                let msg = match key.code {
                    KeyCode::Enter => Some(ViewMsg::ImageOpen),
                    KeyCode::Char('o') => Some(ViewMsg::ImageOpenObservable),
                    KeyCode::Char('a') => Some(ViewMsg::ImageAddRandom),
                    KeyCode::Char('c') => Some(ViewMsg::NameClear),
                    KeyCode::Char('s') => Some(ViewMsg::StateSubmit),
                    KeyCode::Char('L') => Some(ViewMsg::Logout),
                    KeyCode::Char('q') => Some(ViewMsg::Quit),
                    _ => None,
                };
                if let Some(msg) = msg {
                    return vec![msg];
                }

                let props = ImageStripProps {
                    images: &self.images,
                    selected: self.selected,
                    title: "Images",
                    is_focused: true,
                    on_select: ViewMsg::ImageSelect,
                };
                self.ui
                    .strip
                    .handle_event(event, props)
                    .into_iter()
                    .collect()
            }
        }
    }

    fn gallery_event(&mut self, instance: GalleryInstance, event: &EventKind) -> Vec<ViewMsg> {
        let on_event: fn(GalleryEvent) -> ViewMsg = match instance {
            GalleryInstance::Direct => ViewMsg::direct_gallery,
            GalleryInstance::Observable => ViewMsg::observable_gallery,
        };
        let (state, description) = match instance {
            GalleryInstance::Direct => (self.modal, &self.description),
            GalleryInstance::Observable => (self.modal_observable, &self.full_description),
        };
        let props = GalleryModalProps {
            images: &self.images,
            index: state.current_index,
            description,
            title: "Gallery",
            is_focused: true,
            on_event,
        };
        self.ui
            .gallery
            .handle_event(event, props)
            .into_iter()
            .collect()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [panel_area, input_area, strips_area, featured_area, help_area] = Layout::vertical([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(area);

        let panel = UserPanelProps {
            user: self.user.as_ref(),
            greeting: self.greeting.as_deref(),
            status: self.status.as_deref(),
        };
        self.ui.panel.render(frame, panel_area, panel);

        let input = TextInputProps {
            value: self.form.value(&self.config.name_field).unwrap_or_default(),
            label: &self.config.name_label,
            placeholder: "Your name",
            is_focused: self.focus == Focus::NameInput,
            on_change: ViewMsg::NameChange,
            on_submit: |_| ViewMsg::StateSubmit,
        };
        self.ui.name_input.render(frame, input_area, input);

        let [images_area, subscribed_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(strips_area);

        let strip = ImageStripProps {
            images: &self.images,
            selected: self.selected,
            title: "Images",
            is_focused: self.focus == Focus::Images,
            on_select: ViewMsg::ImageSelect,
        };
        self.ui.strip.render(frame, images_area, strip);

        // Same sequence as the owned strip, shown once the delayed load fires
        let subscribed = self.subscribed_loaded.then_some(self.images.as_slice());
        match subscribed {
            Some(images) => {
                let subscribed = ImageStripProps {
                    images,
                    selected: 0,
                    title: "Subscribed",
                    is_focused: false,
                    on_select: ViewMsg::ImageSelect,
                };
                self.ui.subscribed.render(frame, subscribed_area, subscribed);
            }
            None => {
                let loading = Paragraph::new("Loading...")
                    .style(Style::default().fg(Color::DarkGray))
                    .block(
                        Block::default()
                            .title(" Subscribed ")
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(Color::DarkGray)),
                    );
                frame.render_widget(loading, subscribed_area);
            }
        }

        self.render_featured(frame, featured_area);

        let hints = match self.focus {
            Focus::NameInput => FORM_HINTS,
            Focus::Images => IMAGE_HINTS,
        };
        self.ui.help.render(frame, help_area, HelpBarProps { hints });

        if self.modal.is_open {
            let props = GalleryModalProps {
                images: &self.images,
                index: self.modal.current_index,
                description: &self.description,
                title: "Gallery",
                is_focused: !self.modal_observable.is_open,
                on_event: ViewMsg::direct_gallery,
            };
            self.ui.gallery.render(frame, area, props);
        }
        if self.modal_observable.is_open {
            let props = GalleryModalProps {
                images: &self.images,
                index: self.modal_observable.current_index,
                description: &self.full_description,
                title: "Gallery (delayed)",
                is_focused: true,
                on_event: ViewMsg::observable_gallery,
            };
            self.ui.gallery.render(frame, area, props);
        }
    }

    fn render_featured(&self, frame: &mut Frame, area: Rect) {
        let line = match self.featured.first() {
            Some(image) => {
                let mut spans = vec![Span::raw(image.label().to_string())];
                if let Some(text) = &image.description {
                    spans.push(Span::styled(
                        format!("  {}", text),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                Line::from(spans)
            }
            None => Line::from("-"),
        };
        let block = Block::default()
            .title(" Featured ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}
