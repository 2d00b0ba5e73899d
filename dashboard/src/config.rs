//! Runtime configuration for the dashboard view

use std::time::Duration;

pub const DEFAULT_ASSET_BASE: &str = "assets/images/gallery";
pub const DEFAULT_GREETING_URL: &str = "http://localhost:8080/api/greeting";

/// Where the view is running
///
/// The greeting fetch only happens when rendering on the server side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    #[default]
    Client,
    ServerRender,
}

impl ExecutionMode {
    pub fn from_server_render(flag: bool) -> Self {
        if flag {
            Self::ServerRender
        } else {
            Self::Client
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub mode: ExecutionMode,
    /// Directory prefix of the image catalog
    pub asset_base: String,
    /// Form field bound to the user's name
    pub name_field: String,
    pub name_label: String,
    pub greeting_url: String,
    /// Delay before the observable gallery resolves its sequence
    pub images_delay: Duration,
    /// Delay before the subscribed copy of the images is assigned
    pub subscribed_delay: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::Client,
            asset_base: DEFAULT_ASSET_BASE.to_string(),
            name_field: "name".to_string(),
            name_label: "Enter your name".to_string(),
            greeting_url: DEFAULT_GREETING_URL.to_string(),
            images_delay: Duration::from_millis(300),
            subscribed_delay: Duration::from_millis(500),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();

        assert_eq!(config.mode, ExecutionMode::Client);
        assert_eq!(config.name_field, "name");
        assert_eq!(config.images_delay, Duration::from_millis(300));
        assert_eq!(config.subscribed_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_mode_from_flag() {
        assert_eq!(ExecutionMode::from_server_render(true), ExecutionMode::ServerRender);
        assert_eq!(ExecutionMode::from_server_render(false), ExecutionMode::Client);
    }
}
