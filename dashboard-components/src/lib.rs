//! UI components for the dashboard
//!
//! Components implement the `Component<A>` trait from `dashboard-core` and emit
//! messages via callback functions passed through Props.
//!
//! # Components
//!
//! - [`TextInput`] - Single-line labelled text input with cursor
//! - [`ImageStrip`] - Scrollable list of images
//! - [`GalleryModal`] - Modal image carousel reporting [`GalleryEvent`]s
//! - [`render_modal`] - Overlay with dimmed background
//!
//! # Example
//!
//! ```ignore
//! use dashboard_components::{GalleryModal, GalleryModalProps};
//!
//! if state.modal.is_open {
//!     gallery.render(frame, area, GalleryModalProps {
//!         images: &state.images,
//!         index: state.modal.current_index,
//!         description: &state.description,
//!         title: "Gallery",
//!         is_focused: true,
//!         on_event: Msg::Gallery,
//!     });
//! }
//! ```

mod gallery;
mod image_strip;
mod modal;
mod text_input;

pub use gallery::{
    Description, GalleryAction, GalleryEvent, GalleryModal, GalleryModalProps, GalleryResult,
    ImageDescriptor, ModalViewState,
};
pub use image_strip::{ImageStrip, ImageStripProps};
pub use modal::{centered_rect, render_modal, ModalStyle};
pub use text_input::{TextInput, TextInputProps};

