//! Capability contracts implemented by plugin extensions.
//!
//! Each extension point is its own trait. A plugin type implements the
//! subset it supports and exports one factory per capability.

use serde_json::Value;

use crate::error::PluginResult;
use crate::host::{HostObject, Widget};
use crate::properties::{PropertyBag, PropertySpec};

/// Lifecycle bound to a host object.
///
/// The engine guarantees `activate` precedes `update_state` and
/// `deactivate` within one cycle and filters out repeated calls, so
/// implementations only deal with the well-ordered case.
pub trait Activatable: std::fmt::Debug {
    /// Creates and attaches the resources this extension owns.
    fn activate(&mut self, host: &mut dyn HostObject) -> PluginResult<()>;

    /// Detaches and destroys everything the matching `activate` created.
    fn deactivate(&mut self, host: &mut dyn HostObject) -> PluginResult<()>;

    /// Notification that host state relevant to the extension changed.
    fn update_state(&mut self, _host: &mut dyn HostObject) {}
}

/// Provides a settings surface on demand.
pub trait Configurable: std::fmt::Debug {
    /// Returns a newly created widget. Each call yields an independent
    /// object; ownership passes to the caller.
    fn create_configure_widget(&self) -> PluginResult<Widget>;
}

/// Deterministic members used to validate the host's invocation layer.
pub trait Callable: std::fmt::Debug {
    /// Takes nothing, returns nothing.
    fn call_no_args(&self);

    /// Returns a fixed string.
    fn call_with_return(&self) -> String;

    /// Returns a fixed boolean.
    ///
    /// The single argument is an out-parameter, so it is the return value
    /// here and the by-name call takes no arguments.
    fn call_single_arg(&self) -> bool;

    /// Returns both arguments swapped: `(inout, input)`.
    fn call_multi_args(&self, input: Value, inout: Value) -> (Value, Value);
}

/// Introspectable data attributes.
///
/// Access checks live in [`PropertyBag`]; implementors only expose it.
pub trait Properties: std::fmt::Debug {
    /// The extension's property storage.
    fn properties(&self) -> &PropertyBag;

    /// The extension's property storage, mutably.
    fn properties_mut(&mut self) -> &mut PropertyBag;

    /// Declared properties.
    fn property_specs(&self) -> &[PropertySpec] {
        self.properties().specs()
    }

    /// Reads a property.
    fn get_property(&self, name: &str) -> PluginResult<Value> {
        self.properties().get(name)
    }

    /// Writes a property.
    fn set_property(&mut self, name: &str, value: Value) -> PluginResult<()> {
        self.properties_mut().set(name, value)
    }
}

/// Extension that only binds when its plugin also exports [`Properties`].
pub trait HasPrerequisite: std::fmt::Debug {
    /// Value of the `prerequisite` construction parameter, if given.
    fn prerequisite(&self) -> Option<&str>;
}
