//! Demo host settings.

use serde::{Deserialize, Serialize};

/// Settings for the window the demo binary hands to plugins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Title of the demo window.
    #[serde(default = "default_window_title")]
    pub window_title: String,
    /// How many `update_state` notifications to send while active.
    #[serde(default = "default_update_cycles")]
    pub update_cycles: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            update_cycles: default_update_cycles(),
        }
    }
}

fn default_window_title() -> String {
    "exthost demo".to_string()
}

fn default_update_cycles() -> u32 {
    1
}
