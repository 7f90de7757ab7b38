//! Plugin engine: loading, unloading, and capability binding.

use tracing::{debug, info};

use exthost_core::config::EngineConfig;

use crate::capability::Capability;
use crate::dependency::PluginDependency;
use crate::error::{PluginError, PluginResult};
use crate::exports::PluginExport;
use crate::extension::BoundExtension;
use crate::params::ConstructParams;
use crate::registry::{PluginInfo, PluginRegistry};

/// Owns the plugin registry and binds plugins to capabilities.
#[derive(Debug, Default)]
pub struct PluginEngine {
    /// Plugin registry.
    registry: PluginRegistry,
}

impl PluginEngine {
    /// Creates an engine with no plugins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an engine from configuration: registers `exports` (hidden
    /// ones only when `include_hidden` is set) and loads the configured
    /// plugins.
    pub fn from_config(config: &EngineConfig, exports: Vec<PluginExport>) -> PluginResult<Self> {
        let mut engine = Self::new();
        for export in exports {
            if export.info.hidden && !config.include_hidden {
                debug!(plugin_id = %export.id(), "Skipping hidden plugin");
                continue;
            }
            engine.register(export)?;
        }

        if config.load_all {
            engine.load_all()?;
        } else {
            for plugin_id in &config.plugins {
                engine.load_plugin(plugin_id)?;
            }
        }

        info!(
            registered = engine.registry.count(),
            loaded = engine.registry.loaded_ids().len(),
            "Plugin engine ready"
        );
        Ok(engine)
    }

    /// Registers a plugin export without loading it.
    pub fn register(&mut self, export: PluginExport) -> PluginResult<()> {
        self.registry.register(export)
    }

    /// Loads a plugin, loading its declared dependencies first.
    ///
    /// Loading an already loaded plugin is a no-op. A plugin that depends
    /// on itself, or on a plugin that depends back on it, loads: a plugin
    /// whose load is already in progress counts as satisfied. Any failure
    /// marks the plugin unavailable, and later loads fail with
    /// `PluginUnavailable` without retrying.
    pub fn load_plugin(&mut self, plugin_id: &str) -> PluginResult<()> {
        let mut loading = Vec::new();
        self.load_recursive(plugin_id, &mut loading)
    }

    fn load_recursive(&mut self, plugin_id: &str, loading: &mut Vec<String>) -> PluginResult<()> {
        let plugin = self.registry.require(plugin_id)?;
        if plugin.loaded || loading.iter().any(|id| id == plugin_id) {
            return Ok(());
        }
        if !plugin.available {
            return Err(PluginError::PluginUnavailable {
                plugin: plugin_id.to_string(),
                reason: plugin.error.clone().unwrap_or_default(),
            });
        }

        let dependencies = plugin.dependencies.clone();
        loading.push(plugin_id.to_string());
        let result = self.load_dependencies(plugin_id, &dependencies, loading);
        loading.pop();
        if let Err(e) = result {
            self.registry.mark_unavailable(plugin_id, &e);
            return Err(e);
        }

        let plugin = self
            .registry
            .get_mut(plugin_id)
            .ok_or_else(|| PluginError::PluginNotFound(plugin_id.to_string()))?;
        plugin.loaded = true;

        info!(
            plugin_id = %plugin_id,
            name = %plugin.export.info.name,
            version = %plugin.export.info.version,
            dependencies = dependencies.len(),
            "Plugin loaded"
        );
        Ok(())
    }

    fn load_dependencies(
        &mut self,
        plugin_id: &str,
        dependencies: &[PluginDependency],
        loading: &mut Vec<String>,
    ) -> PluginResult<()> {
        for dependency in dependencies {
            let Some(found) = self.registry.get(dependency.name()) else {
                return Err(PluginError::DependencyNotFound {
                    plugin: plugin_id.to_string(),
                    dependency: dependency.name().to_string(),
                });
            };
            let version = &found.export.info.version;
            if !dependency.is_satisfied_by(version) {
                return Err(PluginError::DependencyVersionMismatch {
                    plugin: plugin_id.to_string(),
                    dependency: dependency.to_string(),
                    found: version.clone(),
                });
            }
            self.load_recursive(dependency.name(), loading)?;
        }
        Ok(())
    }

    /// Loads every registered plugin that is still available.
    ///
    /// Stops at the first failure; the failing plugin is left unavailable.
    pub fn load_all(&mut self) -> PluginResult<()> {
        let ids: Vec<String> = self.registry.list().into_iter().map(|info| info.id).collect();
        for plugin_id in ids {
            if self.registry.is_available(&plugin_id) {
                self.load_plugin(&plugin_id)?;
            }
        }
        Ok(())
    }

    /// Unloads a plugin, unloading loaded plugins that depend on it first.
    ///
    /// Returns the module names actually unloaded, dependants before the
    /// plugins they depend on. Unloading a plugin that is not loaded is a
    /// no-op and returns an empty list.
    pub fn unload_plugin(&mut self, plugin_id: &str) -> PluginResult<Vec<String>> {
        let mut unloaded = Vec::new();
        self.unload_recursive(plugin_id, &mut unloaded)?;
        Ok(unloaded)
    }

    fn unload_recursive(&mut self, plugin_id: &str, unloaded: &mut Vec<String>) -> PluginResult<()> {
        if !self.registry.require(plugin_id)?.loaded {
            return Ok(());
        }
        // Cleared first so self and mutual dependencies terminate.
        if let Some(plugin) = self.registry.get_mut(plugin_id) {
            plugin.loaded = false;
        }

        for dependant in self.registry.loaded_dependants(plugin_id) {
            self.unload_recursive(&dependant, unloaded)?;
        }

        info!(plugin_id = %plugin_id, "Plugin unloaded");
        unloaded.push(plugin_id.to_string());
        Ok(())
    }

    /// Unloads every loaded plugin.
    pub fn unload_all(&mut self) -> PluginResult<()> {
        for plugin_id in self.registry.loaded_ids() {
            self.unload_plugin(&plugin_id)?;
        }
        info!("All plugins unloaded");
        Ok(())
    }

    /// Whether `plugin_id` is loaded and can bind `capability`.
    pub fn provides_extension(&self, plugin_id: &str, capability: Capability) -> bool {
        self.registry
            .get(plugin_id)
            .map(|plugin| {
                plugin.loaded
                    && plugin.export.exports(capability)
                    && !plugin.unsatisfied.contains_key(&capability)
            })
            .unwrap_or(false)
    }

    /// Binds a new extension instance of `plugin_id` to `capability`.
    ///
    /// Every binding check (plugin known and loaded, capability exported,
    /// prerequisites satisfied) runs before the factory is invoked.
    pub fn create_extension(
        &self,
        plugin_id: &str,
        capability: Capability,
        params: ConstructParams,
    ) -> PluginResult<BoundExtension> {
        let plugin = self.registry.require(plugin_id)?;
        if !plugin.loaded {
            return Err(PluginError::PluginNotLoaded(plugin_id.to_string()));
        }
        let factory = plugin.export.factory(capability).ok_or_else(|| {
            PluginError::CapabilityNotProvided {
                plugin: plugin_id.to_string(),
                capability,
            }
        })?;
        if let Some(missing) = plugin.unsatisfied.get(&capability) {
            return Err(PluginError::PrerequisiteUnsatisfied {
                plugin: plugin_id.to_string(),
                capability,
                missing: *missing,
            });
        }

        let extension = factory(params)?;
        if extension.capability() != capability {
            return Err(PluginError::WrongCapability {
                expected: capability,
                actual: extension.capability(),
            });
        }

        let bound = BoundExtension::new(plugin_id, extension);
        debug!(
            plugin_id = %plugin_id,
            capability = %capability,
            extension_id = %bound.id(),
            "Extension created"
        );
        Ok(bound)
    }

    /// Gets a plugin's metadata.
    pub fn plugin_info(&self, plugin_id: &str) -> Option<&PluginInfo> {
        self.registry.get(plugin_id).map(|plugin| &plugin.export.info)
    }

    /// Lists all registered plugins.
    pub fn list_plugins(&self) -> Vec<PluginInfo> {
        self.registry.list()
    }

    /// Module names of loaded plugins.
    pub fn loaded_plugins(&self) -> Vec<String> {
        self.registry.loaded_ids()
    }

    /// Whether a plugin is registered and has not failed to load.
    pub fn is_available(&self, plugin_id: &str) -> bool {
        self.registry.is_available(plugin_id)
    }

    /// Why the plugin's last load failed, if it did.
    pub fn plugin_error(&self, plugin_id: &str) -> Option<&str> {
        self.registry.get(plugin_id)?.error.as_deref()
    }

    /// Whether a plugin is loaded.
    pub fn is_loaded(&self, plugin_id: &str) -> bool {
        self.registry.is_loaded(plugin_id)
    }

    /// Returns the plugin registry.
    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }
}
