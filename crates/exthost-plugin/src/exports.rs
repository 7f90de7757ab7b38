//! The load-time contract every plugin module exposes.
//!
//! A plugin crate provides a `register()` function returning a
//! [`PluginExport`]: its metadata plus one extension factory per
//! capability it implements.

use std::collections::BTreeMap;

use crate::capability::Capability;
use crate::error::PluginResult;
use crate::extension::Extension;
use crate::params::ConstructParams;
use crate::registry::PluginInfo;
use crate::traits::{Activatable, Callable, Configurable};

/// Builds a fresh extension instance from construction parameters.
pub type ExtensionFactory = Box<dyn Fn(ConstructParams) -> PluginResult<Extension>>;

/// Plugin metadata together with its capability → factory map.
pub struct PluginExport {
    /// Plugin metadata.
    pub info: PluginInfo,
    /// Capability → factory.
    factories: BTreeMap<Capability, ExtensionFactory>,
}

impl std::fmt::Debug for PluginExport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginExport")
            .field("info", &self.info)
            .field("capabilities", &self.capability_names())
            .finish()
    }
}

impl PluginExport {
    /// Creates an export with no capabilities.
    pub fn new(info: PluginInfo) -> Self {
        Self {
            info,
            factories: BTreeMap::new(),
        }
    }

    /// Registers a raw factory for a capability, replacing any previous one.
    pub fn with_factory<F>(mut self, capability: Capability, factory: F) -> Self
    where
        F: Fn(ConstructParams) -> PluginResult<Extension> + 'static,
    {
        self.factories.insert(capability, Box::new(factory));
        self
    }

    /// Registers a parameterless `Activatable` constructor.
    pub fn with_activatable<F, E>(self, make: F) -> Self
    where
        F: Fn() -> E + 'static,
        E: Activatable + 'static,
    {
        self.with_factory(Capability::Activatable, move |params| {
            params.finish()?;
            Ok(Extension::Activatable(Box::new(make())))
        })
    }

    /// Registers a parameterless `Configurable` constructor.
    pub fn with_configurable<F, E>(self, make: F) -> Self
    where
        F: Fn() -> E + 'static,
        E: Configurable + 'static,
    {
        self.with_factory(Capability::Configurable, move |params| {
            params.finish()?;
            Ok(Extension::Configurable(Box::new(make())))
        })
    }

    /// Registers a parameterless `Callable` constructor.
    pub fn with_callable<F, E>(self, make: F) -> Self
    where
        F: Fn() -> E + 'static,
        E: Callable + 'static,
    {
        self.with_factory(Capability::Callable, move |params| {
            params.finish()?;
            Ok(Extension::Callable(Box::new(make())))
        })
    }

    /// Plugin module name.
    pub fn id(&self) -> &str {
        &self.info.id
    }

    /// Whether a factory is exported for `capability`.
    pub fn exports(&self, capability: Capability) -> bool {
        self.factories.contains_key(&capability)
    }

    /// Exported capabilities in declaration order.
    pub fn capabilities(&self) -> impl Iterator<Item = Capability> + '_ {
        self.factories.keys().copied()
    }

    /// Exported capability names, as hosts see them.
    pub fn capability_names(&self) -> Vec<&'static str> {
        self.capabilities().map(|cap| cap.as_str()).collect()
    }

    /// `(capability, missing prerequisite)` pairs for every exported
    /// capability whose prerequisites are not also exported.
    pub fn unsatisfied_prerequisites(&self) -> Vec<(Capability, Capability)> {
        let mut missing = Vec::new();
        for cap in self.capabilities() {
            for pre in cap.prerequisites() {
                if !self.exports(*pre) {
                    missing.push((cap, *pre));
                }
            }
        }
        missing
    }

    pub(crate) fn factory(&self, capability: Capability) -> Option<&ExtensionFactory> {
        self.factories.get(&capability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Widget;
    use crate::plugin_info;

    #[derive(Debug)]
    struct Settings;

    impl Configurable for Settings {
        fn create_configure_widget(&self) -> PluginResult<Widget> {
            Ok(Widget::label("settings"))
        }
    }

    #[test]
    fn test_capability_names() {
        let export = PluginExport::new(plugin_info!(id: "p", name: "P", version: "1.0"))
            .with_configurable(|| Settings);
        assert_eq!(export.capability_names(), vec!["Configurable"]);
        assert!(export.exports(Capability::Configurable));
        assert!(!export.exports(Capability::Activatable));
        assert!(export.unsatisfied_prerequisites().is_empty());
    }

    #[test]
    fn test_parameterless_factory_rejects_params() {
        let export = PluginExport::new(plugin_info!(id: "p", name: "P", version: "1.0"))
            .with_configurable(|| Settings);
        let factory = export.factory(Capability::Configurable).unwrap();
        assert!(factory(ConstructParams::new()).is_ok());
        assert!(factory(ConstructParams::new().with("invalid-property", "x")).is_err());
    }
}
