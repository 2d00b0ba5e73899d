//! Terminal dashboard
//!
//! A [`DashboardView`](view::DashboardView) bound to a user store, a one-field
//! form and two modal image galleries.
//!
//! 1. Event (keyboard) -> `DashboardView::handle_event()` -> `ViewMsg`s
//! 2. `ViewMsg`s applied to the view; store writes go out as `Action`s
//! 3. Reducer updates `AppState`; the view's user subscription emits
//! 4. If anything changed, re-render

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod images;
pub mod reducer;
pub mod state;
pub mod view;

pub use action::Action;
pub use config::{DashboardConfig, ExecutionMode};
pub use reducer::reducer;
pub use state::{AppState, User, UserState};
pub use view::{DashboardView, Focus, GalleryInstance, NameSync, ViewError, ViewMsg};
