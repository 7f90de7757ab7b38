//! Plugin registry: stores registered plugin exports and their load state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::capability::Capability;
use crate::dependency::PluginDependency;
use crate::error::{PluginError, PluginResult};
use crate::exports::PluginExport;

/// Metadata describing a plugin module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Unique module name.
    pub id: String,
    /// Human-readable plugin name.
    pub name: String,
    /// Plugin version string.
    pub version: String,
    /// Plugin description.
    pub description: String,
    /// Authors or maintainers.
    pub authors: Vec<String>,
    /// Plugins that must be loaded first, as dependency declarations
    /// (`name` or `name <version requirement>`).
    pub dependencies: Vec<String>,
    /// Whether the plugin is compiled into the host.
    pub builtin: bool,
    /// Whether the plugin should be hidden from users (test plugins).
    pub hidden: bool,
}

impl PluginInfo {
    /// Creates metadata with empty description, authors and dependencies.
    pub fn new(id: &str, name: &str, version: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            version: version.to_string(),
            description: String::new(),
            authors: Vec::new(),
            dependencies: Vec::new(),
            builtin: true,
            hidden: false,
        }
    }
}

/// A registered plugin and what the registry knows about it.
#[derive(Debug)]
pub struct RegisteredPlugin {
    /// The plugin's export.
    pub export: PluginExport,
    /// Whether the plugin is loaded.
    pub loaded: bool,
    /// Exported capabilities whose prerequisites are missing, mapped to
    /// the first missing prerequisite.
    pub unsatisfied: BTreeMap<Capability, Capability>,
    /// Parsed dependency declarations.
    pub dependencies: Vec<PluginDependency>,
    /// Cleared when a load fails; an unavailable plugin is never retried.
    pub available: bool,
    /// Why the last load failed.
    pub error: Option<String>,
}

/// Registry of all known plugins.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    /// Module name → plugin.
    plugins: BTreeMap<String, RegisteredPlugin>,
}

impl PluginRegistry {
    /// Creates a new empty plugin registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plugin export, validating capability prerequisites and
    /// parsing dependency declarations.
    ///
    /// Capabilities with missing prerequisites are recorded rather than
    /// rejected, so the plugin's other capabilities stay usable. A
    /// malformed dependency rejects the whole export.
    pub fn register(&mut self, export: PluginExport) -> PluginResult<()> {
        let id = export.id().to_string();
        if self.plugins.contains_key(&id) {
            return Err(PluginError::AlreadyRegistered(id));
        }

        let dependencies = export
            .info
            .dependencies
            .iter()
            .map(|dep| dep.parse::<PluginDependency>())
            .collect::<PluginResult<Vec<_>>>()?;

        let mut unsatisfied = BTreeMap::new();
        for (capability, missing) in export.unsatisfied_prerequisites() {
            warn!(
                plugin_id = %id,
                capability = %capability,
                missing = %missing,
                "Capability prerequisite not provided; binding will fail"
            );
            unsatisfied.entry(capability).or_insert(missing);
        }

        info!(
            plugin_id = %id,
            name = %export.info.name,
            version = %export.info.version,
            capabilities = ?export.capability_names(),
            "Registering plugin"
        );

        self.plugins.insert(
            id,
            RegisteredPlugin {
                export,
                loaded: false,
                unsatisfied,
                dependencies,
                available: true,
                error: None,
            },
        );
        Ok(())
    }

    /// Removes a plugin that is not loaded.
    pub fn unregister(&mut self, plugin_id: &str) -> PluginResult<PluginExport> {
        match self.plugins.get(plugin_id) {
            None => return Err(PluginError::PluginNotFound(plugin_id.to_string())),
            Some(plugin) if plugin.loaded => {
                return Err(PluginError::StillLoaded(plugin_id.to_string()));
            }
            Some(_) => {}
        }
        let plugin = self
            .plugins
            .remove(plugin_id)
            .ok_or_else(|| PluginError::PluginNotFound(plugin_id.to_string()))?;
        info!(plugin_id = %plugin_id, "Plugin unregistered");
        Ok(plugin.export)
    }

    /// Gets a registered plugin.
    pub fn get(&self, plugin_id: &str) -> Option<&RegisteredPlugin> {
        self.plugins.get(plugin_id)
    }

    pub(crate) fn get_mut(&mut self, plugin_id: &str) -> Option<&mut RegisteredPlugin> {
        self.plugins.get_mut(plugin_id)
    }

    /// Records a failed load. The plugin stays registered but
    /// [`is_available`](Self::is_available) turns false.
    pub(crate) fn mark_unavailable(&mut self, plugin_id: &str, error: &PluginError) {
        if let Some(plugin) = self.plugins.get_mut(plugin_id) {
            warn!(plugin_id = %plugin_id, error = %error, "Plugin marked unavailable");
            plugin.loaded = false;
            plugin.available = false;
            plugin.error = Some(error.to_string());
        }
    }

    /// Gets a registered plugin or fails with `PluginNotFound`.
    pub fn require(&self, plugin_id: &str) -> PluginResult<&RegisteredPlugin> {
        self.get(plugin_id)
            .ok_or_else(|| PluginError::PluginNotFound(plugin_id.to_string()))
    }

    /// Lists metadata of all registered plugins, ordered by module name.
    pub fn list(&self) -> Vec<PluginInfo> {
        self.plugins
            .values()
            .map(|plugin| plugin.export.info.clone())
            .collect()
    }

    /// Module names of loaded plugins, ordered by module name.
    pub fn loaded_ids(&self) -> Vec<String> {
        self.plugins
            .iter()
            .filter(|(_, plugin)| plugin.loaded)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Module names of loaded plugins that declare `plugin_id` as a
    /// dependency.
    pub fn loaded_dependants(&self, plugin_id: &str) -> Vec<String> {
        self.plugins
            .iter()
            .filter(|(_, plugin)| {
                plugin.loaded && plugin.dependencies.iter().any(|dep| dep.name() == plugin_id)
            })
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Returns plugin count.
    pub fn count(&self) -> usize {
        self.plugins.len()
    }

    /// Checks whether a plugin is registered.
    pub fn contains(&self, plugin_id: &str) -> bool {
        self.plugins.contains_key(plugin_id)
    }

    /// Checks whether a plugin is registered and has not failed to load.
    pub fn is_available(&self, plugin_id: &str) -> bool {
        self.plugins
            .get(plugin_id)
            .is_some_and(|plugin| plugin.available)
    }

    /// Checks whether a plugin is loaded.
    pub fn is_loaded(&self, plugin_id: &str) -> bool {
        self.plugins
            .get(plugin_id)
            .map(|plugin| plugin.loaded)
            .unwrap_or(false)
    }
}
