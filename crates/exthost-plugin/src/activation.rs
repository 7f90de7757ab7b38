//! Activation set: drives one `Activatable` extension per loaded plugin
//! against a single host object.
//!
//! Members are processed in plugin order for `activate` and `update_state`
//! and in reverse order for `deactivate`. A failure in one member is
//! logged and collected into the returned [`ActivationReport`]; the
//! remaining members are still processed.
//!
//! The set follows the engine through [`ActivationSet::load_plugin`],
//! [`ActivationSet::unload_plugin`] and [`ActivationSet::sync`], so a
//! plugin unloaded while active releases what it put into the host.

use tracing::{debug, error, info};

use exthost_core::types::HostId;

use crate::capability::Capability;
use crate::engine::PluginEngine;
use crate::error::{PluginError, PluginResult};
use crate::extension::BoundExtension;
use crate::host::HostObject;
use crate::params::ConstructParams;

/// Outcome of applying one lifecycle step to every member.
#[derive(Debug, Default)]
pub struct ActivationReport {
    /// Plugins whose extension completed the step.
    pub succeeded: Vec<String>,
    /// Plugins whose extension failed, with the error.
    pub failed: Vec<(String, PluginError)>,
}

impl ActivationReport {
    /// Whether every member completed the step.
    pub fn is_ok(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(&mut self, plugin_id: &str, result: PluginResult<()>) {
        match result {
            Ok(()) => self.succeeded.push(plugin_id.to_string()),
            Err(e) => {
                error!(plugin_id = %plugin_id, error = %e, "Extension lifecycle step failed");
                self.failed.push((plugin_id.to_string(), e));
            }
        }
    }
}

/// The `Activatable` extensions of all loaded plugins for one host.
///
/// Call [`deactivate_all`](Self::deactivate_all) or
/// [`shutdown`](Self::shutdown) before dropping a set that is active:
/// dropping active members only logs a warning and leaves their widgets
/// in the host.
#[derive(Debug, Default)]
pub struct ActivationSet {
    members: Vec<BoundExtension>,
    active_on: Option<HostId>,
}

impl ActivationSet {
    /// Binds an `Activatable` extension for every loaded plugin that
    /// provides one. Binding failures are reported, not fatal.
    pub fn new(engine: &PluginEngine) -> (Self, ActivationReport) {
        let mut set = Self::default();
        let mut report = ActivationReport::default();
        for plugin_id in engine.loaded_plugins() {
            let provides = engine
                .registry()
                .get(&plugin_id)
                .is_some_and(|p| p.export.exports(Capability::Activatable));
            if !provides {
                continue;
            }
            let result = engine
                .create_extension(&plugin_id, Capability::Activatable, ConstructParams::new())
                .map(|ext| set.members.push(ext));
            report.record(&plugin_id, result);
        }
        debug!(members = set.members.len(), "Activation set built");
        (set, report)
    }

    /// Activates every member on `host`.
    pub fn activate_all(&mut self, host: &mut dyn HostObject) -> ActivationReport {
        self.active_on = Some(host.host_id());
        let mut report = ActivationReport::default();
        for member in &mut self.members {
            let result = member.activate(host);
            report.record(member.plugin_id(), result);
        }
        info!(
            host_id = %host.host_id(),
            activated = report.succeeded.len(),
            failed = report.failed.len(),
            "Activation set activated"
        );
        report
    }

    /// Notifies every active member of a host state change.
    pub fn update_state_all(&mut self, host: &mut dyn HostObject) -> ActivationReport {
        let mut report = ActivationReport::default();
        for member in self.members.iter_mut().filter(|m| m.is_active()) {
            let result = member.update_state(host);
            report.record(member.plugin_id(), result);
        }
        report
    }

    /// Deactivates every member, last activated first.
    pub fn deactivate_all(&mut self, host: &mut dyn HostObject) -> ActivationReport {
        let mut report = ActivationReport::default();
        for member in self.members.iter_mut().rev() {
            let result = member.deactivate(host);
            report.record(member.plugin_id(), result);
        }
        if self.members.iter().all(|m| !m.is_active()) {
            self.active_on = None;
        }
        info!(
            host_id = %host.host_id(),
            deactivated = report.succeeded.len(),
            failed = report.failed.len(),
            "Activation set deactivated"
        );
        report
    }

    /// Deactivates every member and consumes the set.
    pub fn shutdown(mut self, host: &mut dyn HostObject) -> ActivationReport {
        self.deactivate_all(host)
    }

    /// Loads a plugin (and its dependencies) and adds every newly loaded
    /// `Activatable` plugin, activating it when the set is active on
    /// `host`.
    pub fn load_plugin(
        &mut self,
        engine: &mut PluginEngine,
        plugin_id: &str,
        host: &mut dyn HostObject,
    ) -> PluginResult<ActivationReport> {
        engine.load_plugin(plugin_id)?;
        Ok(self.sync(engine, host))
    }

    /// Unloads a plugin and its loaded dependants, deactivating and
    /// removing their members, dependants first.
    pub fn unload_plugin(
        &mut self,
        engine: &mut PluginEngine,
        plugin_id: &str,
        host: &mut dyn HostObject,
    ) -> PluginResult<ActivationReport> {
        let unloaded = engine.unload_plugin(plugin_id)?;
        let mut report = ActivationReport::default();
        for id in &unloaded {
            if !self.contains(id) {
                continue;
            }
            let result = self.remove_plugin(id, host);
            report.record(id, result);
        }
        Ok(report)
    }

    /// Reconciles membership with the engine: members of plugins that are
    /// no longer loaded are deactivated and removed (last added first),
    /// and loaded `Activatable` plugins without a member are added.
    pub fn sync(&mut self, engine: &PluginEngine, host: &mut dyn HostObject) -> ActivationReport {
        let mut report = ActivationReport::default();

        let stale: Vec<String> = self
            .members
            .iter()
            .rev()
            .filter(|m| !engine.is_loaded(m.plugin_id()))
            .map(|m| m.plugin_id().to_string())
            .collect();
        for plugin_id in stale {
            let result = self.remove_plugin(&plugin_id, host);
            report.record(&plugin_id, result);
        }

        for plugin_id in engine.loaded_plugins() {
            if self.contains(&plugin_id)
                || !engine.provides_extension(&plugin_id, Capability::Activatable)
            {
                continue;
            }
            let result = self.add_plugin(engine, &plugin_id, host);
            report.record(&plugin_id, result);
        }

        debug!(members = self.members.len(), "Activation set synced");
        report
    }

    /// Adds a newly loaded plugin's extension, activating it right away
    /// when the set is active on `host`.
    pub fn add_plugin(
        &mut self,
        engine: &PluginEngine,
        plugin_id: &str,
        host: &mut dyn HostObject,
    ) -> PluginResult<()> {
        if self.contains(plugin_id) {
            return Ok(());
        }
        let mut extension =
            engine.create_extension(plugin_id, Capability::Activatable, ConstructParams::new())?;
        if self.active_on == Some(host.host_id()) {
            extension.activate(host)?;
        }
        self.members.push(extension);
        Ok(())
    }

    /// Removes a plugin's extension, deactivating it first when active.
    pub fn remove_plugin(&mut self, plugin_id: &str, host: &mut dyn HostObject) -> PluginResult<()> {
        let Some(index) = self.members.iter().position(|m| m.plugin_id() == plugin_id) else {
            return Ok(());
        };
        self.members[index].deactivate(host)?;
        self.members.remove(index);
        Ok(())
    }

    /// Whether the set has a member for `plugin_id`.
    pub fn contains(&self, plugin_id: &str) -> bool {
        self.members.iter().any(|m| m.plugin_id() == plugin_id)
    }

    /// Gets the member for `plugin_id`.
    pub fn get(&self, plugin_id: &str) -> Option<&BoundExtension> {
        self.members.iter().find(|m| m.plugin_id() == plugin_id)
    }

    /// Module names of all members, in activation order.
    pub fn plugin_ids(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.plugin_id()).collect()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
