//! Prelude for plugin crates.

pub use serde_json::Value;

pub use exthost_core::types::WidgetId;

pub use crate::capability::Capability;
pub use crate::error::{PluginError, PluginResult};
pub use crate::exports::PluginExport;
pub use crate::extension::Extension;
pub use crate::host::{Dialog, DialogResponse, HostObject, Widget, WidgetKind};
pub use crate::params::ConstructParams;
pub use crate::properties::{PropertyAccess, PropertyBag, PropertySpec};
pub use crate::registry::PluginInfo;
pub use crate::traits::{Activatable, Callable, Configurable, HasPrerequisite, Properties};

pub use crate::plugin_info;
