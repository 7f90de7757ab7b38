//! Bound extension instances and their lifecycle state machine.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use exthost_core::types::{ExtensionId, HostId};

use crate::capability::Capability;
use crate::error::{PluginError, PluginResult};
use crate::host::{HostObject, Widget};
use crate::traits::{Activatable, Callable, Configurable, HasPrerequisite, Properties};

/// A freshly constructed extension, tagged with the capability it serves.
#[derive(Debug)]
pub enum Extension {
    /// Lifecycle extension.
    Activatable(Box<dyn Activatable>),
    /// Settings widget provider.
    Configurable(Box<dyn Configurable>),
    /// Deterministic callable members.
    Callable(Box<dyn Callable>),
    /// Introspectable attributes.
    Properties(Box<dyn Properties>),
    /// Extension with a prerequisite capability.
    HasPrerequisite(Box<dyn HasPrerequisite>),
}

impl Extension {
    /// The capability this instance implements.
    pub fn capability(&self) -> Capability {
        match self {
            Self::Activatable(_) => Capability::Activatable,
            Self::Configurable(_) => Capability::Configurable,
            Self::Callable(_) => Capability::Callable,
            Self::Properties(_) => Capability::Properties,
            Self::HasPrerequisite(_) => Capability::HasPrerequisite,
        }
    }
}

/// Lifecycle state of a bound extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionState {
    /// Initial state, and the state after `deactivate`.
    Inactive,
    /// After a successful `activate`.
    Active,
}

impl std::fmt::Display for ExtensionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inactive => write!(f, "inactive"),
            Self::Active => write!(f, "active"),
        }
    }
}

/// An extension instance the engine has bound to a capability.
///
/// Lifecycle calls go through this wrapper, which tracks the
/// `Inactive → Active → Inactive` state machine and the host the
/// extension is active on. Repeated `activate` or `deactivate` calls are
/// logged and ignored, so plugin code never sees them.
#[derive(Debug)]
pub struct BoundExtension {
    id: ExtensionId,
    plugin_id: String,
    state: ExtensionState,
    host: Option<HostId>,
    activated_at: Option<DateTime<Utc>>,
    inner: Extension,
}

impl BoundExtension {
    pub(crate) fn new(plugin_id: &str, inner: Extension) -> Self {
        Self {
            id: ExtensionId::new(),
            plugin_id: plugin_id.to_string(),
            state: ExtensionState::Inactive,
            host: None,
            activated_at: None,
            inner,
        }
    }

    /// Instance identifier.
    pub fn id(&self) -> ExtensionId {
        self.id
    }

    /// Module name of the plugin that created this instance.
    pub fn plugin_id(&self) -> &str {
        &self.plugin_id
    }

    /// Capability this instance was bound as.
    pub fn capability(&self) -> Capability {
        self.inner.capability()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ExtensionState {
        self.state
    }

    /// Whether the extension is active.
    pub fn is_active(&self) -> bool {
        self.state == ExtensionState::Active
    }

    /// Host the extension is currently active on.
    pub fn active_host(&self) -> Option<HostId> {
        self.host
    }

    /// When the current activation cycle started.
    pub fn activated_at(&self) -> Option<DateTime<Utc>> {
        self.activated_at
    }

    fn wrong_capability(&self, expected: Capability) -> PluginError {
        PluginError::WrongCapability {
            expected,
            actual: self.capability(),
        }
    }

    fn activatable(&mut self) -> PluginResult<&mut dyn Activatable> {
        let actual = self.capability();
        match &mut self.inner {
            Extension::Activatable(ext) => Ok(ext.as_mut()),
            _ => Err(PluginError::WrongCapability {
                expected: Capability::Activatable,
                actual,
            }),
        }
    }

    /// Activates the extension on `host`.
    ///
    /// A no-op when already active on the same host. A failed activation
    /// leaves the extension inactive.
    pub fn activate(&mut self, host: &mut dyn HostObject) -> PluginResult<()> {
        let host_id = host.host_id();
        if let Some(active_on) = self.host {
            if active_on != host_id {
                return Err(PluginError::HostMismatch {
                    expected: active_on,
                    actual: host_id,
                });
            }
            warn!(
                plugin_id = %self.plugin_id,
                extension_id = %self.id,
                "Extension already active, ignoring activate"
            );
            return Ok(());
        }

        let (id, plugin_id) = (self.id, self.plugin_id.clone());
        self.activatable()?
            .activate(host)
            .map_err(|e| PluginError::ActivationFailed {
                extension: id,
                plugin: plugin_id,
                source: Box::new(e),
            })?;

        self.state = ExtensionState::Active;
        self.host = Some(host_id);
        self.activated_at = Some(Utc::now());

        info!(
            plugin_id = %self.plugin_id,
            extension_id = %self.id,
            host_id = %host_id,
            "Extension activated"
        );
        Ok(())
    }

    /// Deactivates the extension, releasing what `activate` created.
    ///
    /// A no-op when inactive. On failure the extension stays active so the
    /// host may try again.
    pub fn deactivate(&mut self, host: &mut dyn HostObject) -> PluginResult<()> {
        let host_id = host.host_id();
        let Some(active_on) = self.host else {
            warn!(
                plugin_id = %self.plugin_id,
                extension_id = %self.id,
                "Extension not active, ignoring deactivate"
            );
            return Ok(());
        };
        if active_on != host_id {
            return Err(PluginError::HostMismatch {
                expected: active_on,
                actual: host_id,
            });
        }

        let (id, plugin_id) = (self.id, self.plugin_id.clone());
        self.activatable()?
            .deactivate(host)
            .map_err(|e| PluginError::DeactivationFailed {
                extension: id,
                plugin: plugin_id,
                source: Box::new(e),
            })?;

        self.state = ExtensionState::Inactive;
        self.host = None;
        self.activated_at = None;

        info!(
            plugin_id = %self.plugin_id,
            extension_id = %self.id,
            host_id = %host_id,
            "Extension deactivated"
        );
        Ok(())
    }

    /// Forwards a state-change notification. Ignored unless active on
    /// `host`.
    pub fn update_state(&mut self, host: &mut dyn HostObject) -> PluginResult<()> {
        if self.host != Some(host.host_id()) {
            debug!(
                plugin_id = %self.plugin_id,
                extension_id = %self.id,
                "Extension not active on this host, skipping update_state"
            );
            return Ok(());
        }
        self.activatable()?.update_state(host);
        Ok(())
    }

    /// Asks a configurable extension for a new settings widget.
    pub fn create_configure_widget(&self) -> PluginResult<Widget> {
        let Extension::Configurable(ext) = &self.inner else {
            return Err(self.wrong_capability(Capability::Configurable));
        };
        let widget = ext
            .create_configure_widget()
            .map_err(|e| PluginError::ConfigurationFailed {
                extension: self.id,
                plugin: self.plugin_id.clone(),
                source: Box::new(e),
            })?;
        debug!(
            plugin_id = %self.plugin_id,
            widget_id = %widget.id,
            "Configure widget created"
        );
        Ok(widget)
    }

    /// Borrows the callable members.
    pub fn as_callable(&self) -> PluginResult<&dyn Callable> {
        match &self.inner {
            Extension::Callable(ext) => Ok(ext.as_ref()),
            _ => Err(self.wrong_capability(Capability::Callable)),
        }
    }

    /// Borrows the property accessors.
    pub fn as_properties(&self) -> PluginResult<&dyn Properties> {
        match &self.inner {
            Extension::Properties(ext) => Ok(ext.as_ref()),
            _ => Err(self.wrong_capability(Capability::Properties)),
        }
    }

    /// Borrows the property accessors mutably.
    pub fn as_properties_mut(&mut self) -> PluginResult<&mut dyn Properties> {
        let actual = self.capability();
        match &mut self.inner {
            Extension::Properties(ext) => Ok(ext.as_mut()),
            _ => Err(PluginError::WrongCapability {
                expected: Capability::Properties,
                actual,
            }),
        }
    }

    /// Borrows the prerequisite-bearing extension.
    pub fn as_has_prerequisite(&self) -> PluginResult<&dyn HasPrerequisite> {
        match &self.inner {
            Extension::HasPrerequisite(ext) => Ok(ext.as_ref()),
            _ => Err(self.wrong_capability(Capability::HasPrerequisite)),
        }
    }
}

impl Drop for BoundExtension {
    fn drop(&mut self) {
        if let Some(host_id) = self.host {
            warn!(
                plugin_id = %self.plugin_id,
                extension_id = %self.id,
                host_id = %host_id,
                "Extension dropped while still active"
            );
        }
    }
}
