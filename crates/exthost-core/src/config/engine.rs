//! Plugin engine configuration.

use serde::{Deserialize, Serialize};

/// Which registered plugins the engine loads on startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Load every registered plugin, ignoring `plugins`.
    #[serde(default = "default_true")]
    pub load_all: bool,
    /// Module names of plugins to load when `load_all` is false.
    #[serde(default)]
    pub plugins: Vec<String>,
    /// Register plugins flagged as hidden (test-only plugins).
    #[serde(default)]
    pub include_hidden: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            load_all: true,
            plugins: Vec::new(),
            include_hidden: false,
        }
    }
}

fn default_true() -> bool {
    true
}
