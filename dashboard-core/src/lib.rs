//! Core traits and types for the dashboard
//!
//! This crate provides the state-management primitives the dashboard view is
//! built on, following a Redux/Elm-inspired architecture.
//!
//! # Core Concepts
//!
//! - **Action**: Commands that describe store changes
//! - **Store**: Centralized state container with reducer pattern
//! - **StoreHandle**: What a view sees of the store: `select` streams and `dispatch`
//! - **Scope**: Owns a view's subscriptions; closing it cancels them all
//! - **FormModel**: View-local editable fields
//! - **Component**: Pure UI elements that render based on props
//!
//! # Basic Example
//!
//! ```ignore
//! use dashboard_core::Store;
//!
//! let (action_tx, mut action_rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut store = Store::new(AppState::default(), reducer);
//! let handle = store.handle(action_tx);
//!
//! // A view subscribes to a slice...
//! let names = handle.select(|s: &AppState| s.user.as_ref().map(|u| u.name.clone()));
//!
//! // ...and writes by dispatching; the loop owning the store reduces it
//! handle.dispatch(AppAction::UserLogout)?;
//! while let Ok(action) = action_rx.try_recv() {
//!     store.dispatch(action);
//! }
//! ```

pub mod action;
pub mod component;
pub mod event;
pub mod form;
pub mod input;
pub mod scope;
pub mod store;
pub mod testing;

// Core trait exports
pub use action::Action;
pub use component::Component;

// Event exports
pub use event::EventKind;
pub use input::{process_raw_event, spawn_input_poller, PollerConfig, RawEvent};

// Store exports
pub use store::{
    LoggingMiddleware, Middleware, Reducer, Store, StoreError, StoreHandle, StoreWithMiddleware,
};

// Scope and form exports
pub use form::{Field, FormBuilder, FormError, FormModel};
pub use scope::{Scope, ScopeKey};

