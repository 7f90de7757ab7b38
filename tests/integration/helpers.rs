//! Shared test helpers for integration tests.

use exthost_core::config::EngineConfig;
use exthost_plugin::{PluginEngine, PluginExport};

/// Every bundled plugin, hidden ones included.
pub fn all_exports() -> Vec<PluginExport> {
    let mut exports = plugin_demo::exports();
    exports.extend(plugin_introspection::exports());
    exports
}

/// Engine with every bundled plugin registered and loaded.
pub fn loaded_engine() -> PluginEngine {
    let config = EngineConfig {
        include_hidden: true,
        ..EngineConfig::default()
    };
    PluginEngine::from_config(&config, all_exports()).expect("bundled plugins should load")
}

/// Engine with every bundled plugin registered and none loaded.
pub fn registered_engine() -> PluginEngine {
    let mut engine = PluginEngine::new();
    for export in all_exports() {
        engine.register(export).expect("bundled ids are unique");
    }
    engine
}
