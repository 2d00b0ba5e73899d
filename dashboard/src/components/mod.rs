//! Dashboard-specific components

mod help_bar;
mod user_panel;

pub use help_bar::{HelpBar, HelpBarProps};
pub use user_panel::{UserPanel, UserPanelProps};
