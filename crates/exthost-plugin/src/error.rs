//! Plugin engine error types.

use thiserror::Error;

use exthost_core::error::{AppError, ErrorKind};
use exthost_core::types::{ExtensionId, HostId};

use crate::capability::Capability;

/// Errors raised while registering, loading, binding, or driving plugins.
#[derive(Debug, Error)]
pub enum PluginError {
    /// A capability name did not match any known extension point.
    #[error("unknown capability '{0}'")]
    UnknownCapability(String),

    /// A plugin with the same module name is already registered.
    #[error("plugin '{0}' is already registered")]
    AlreadyRegistered(String),

    /// No plugin with this module name is registered.
    #[error("plugin '{0}' not found")]
    PluginNotFound(String),

    /// The plugin is registered but not loaded.
    #[error("plugin '{0}' is not loaded")]
    PluginNotLoaded(String),

    /// The plugin is loaded and cannot be removed until it is unloaded.
    #[error("plugin '{0}' is still loaded")]
    StillLoaded(String),

    /// A declared plugin dependency is not registered.
    #[error("plugin '{plugin}' depends on unknown plugin '{dependency}'")]
    DependencyNotFound {
        /// Plugin being loaded.
        plugin: String,
        /// Missing dependency.
        dependency: String,
    },

    /// A registered dependency's version does not satisfy the declared
    /// requirement.
    #[error("plugin '{plugin}' requires '{dependency}', found version '{found}'")]
    DependencyVersionMismatch {
        /// Plugin being loaded.
        plugin: String,
        /// Dependency declaration, including its requirement.
        dependency: String,
        /// Version of the registered dependency.
        found: String,
    },

    /// A dependency declaration could not be parsed.
    #[error("invalid dependency '{dependency}': {reason}")]
    InvalidDependency {
        /// Declaration as written.
        dependency: String,
        /// What was wrong.
        reason: String,
    },

    /// An earlier load failed; the plugin is not retried.
    #[error("plugin '{plugin}' is unavailable: {reason}")]
    PluginUnavailable {
        /// Plugin module name.
        plugin: String,
        /// Error recorded by the failed load.
        reason: String,
    },

    /// The plugin does not export this capability.
    #[error("plugin '{plugin}' does not provide a '{capability}' extension")]
    CapabilityNotProvided {
        /// Plugin module name.
        plugin: String,
        /// Requested capability.
        capability: Capability,
    },

    /// The capability is exported but one of its prerequisites is not.
    #[error(
        "plugin '{plugin}' cannot bind '{capability}': prerequisite '{missing}' is not provided"
    )]
    PrerequisiteUnsatisfied {
        /// Plugin module name.
        plugin: String,
        /// Requested capability.
        capability: Capability,
        /// Prerequisite the plugin failed to export.
        missing: Capability,
    },

    /// The extension has no property with this name.
    #[error("no property named '{0}'")]
    UnknownProperty(String),

    /// The property cannot be read.
    #[error("property '{0}' is not readable")]
    PropertyNotReadable(String),

    /// The property cannot be written.
    #[error("property '{0}' is not writable")]
    PropertyNotWritable(String),

    /// The property can only be set at construction.
    #[error("property '{0}' can only be set at construction")]
    PropertyConstructOnly(String),

    /// The value does not match the property's type.
    #[error("invalid value for property '{name}': expected {expected}")]
    InvalidPropertyValue {
        /// Property name.
        name: String,
        /// Expected JSON type.
        expected: &'static str,
    },

    /// The capability has no method with this name.
    #[error("'{capability}' has no method named '{method}'")]
    UnknownMethod {
        /// Capability the call was made on.
        capability: Capability,
        /// Requested method.
        method: String,
    },

    /// A dynamic call received the wrong number of arguments.
    #[error("method '{method}' takes {expected} argument(s), got {actual}")]
    ArgumentCount {
        /// Method name.
        method: String,
        /// Declared arity.
        expected: usize,
        /// Supplied arguments.
        actual: usize,
    },

    /// A dynamic call received an argument of the wrong type.
    #[error("invalid argument for '{method}': {reason}")]
    InvalidArgument {
        /// Method name.
        method: String,
        /// What was wrong.
        reason: String,
    },

    /// A lifecycle method was invoked dynamically without a host object.
    #[error("method '{0}' requires a host object")]
    HostRequired(String),

    /// The bound extension is not of the capability the caller expected.
    #[error("extension is bound as '{actual}', not '{expected}'")]
    WrongCapability {
        /// Capability the caller needed.
        expected: Capability,
        /// Capability the extension was bound as.
        actual: Capability,
    },

    /// A lifecycle call named a different host than the one the
    /// extension is active on.
    #[error("extension is active on host {expected}, not {actual}")]
    HostMismatch {
        /// Host the extension was activated on.
        expected: HostId,
        /// Host passed to the call.
        actual: HostId,
    },

    /// Failure reported by a plugin's own code.
    #[error("{0}")]
    Extension(String),

    /// `activate` failed for one extension instance.
    #[error("extension {extension} of plugin '{plugin}' failed to activate: {source}")]
    ActivationFailed {
        /// Extension instance.
        extension: ExtensionId,
        /// Plugin module name.
        plugin: String,
        /// Underlying failure.
        #[source]
        source: Box<PluginError>,
    },

    /// `deactivate` failed for one extension instance.
    #[error("extension {extension} of plugin '{plugin}' failed to deactivate: {source}")]
    DeactivationFailed {
        /// Extension instance.
        extension: ExtensionId,
        /// Plugin module name.
        plugin: String,
        /// Underlying failure.
        #[source]
        source: Box<PluginError>,
    },

    /// `create_configure_widget` failed for one extension instance.
    #[error("extension {extension} of plugin '{plugin}' failed to create its configure widget: {source}")]
    ConfigurationFailed {
        /// Extension instance.
        extension: ExtensionId,
        /// Plugin module name.
        plugin: String,
        /// Underlying failure.
        #[source]
        source: Box<PluginError>,
    },

    /// A return value could not be marshaled.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PluginError {
    /// Convenience constructor for plugin-side failures.
    pub fn extension(message: impl Into<String>) -> Self {
        Self::Extension(message.into())
    }

    /// Whether this error was raised while binding a capability, before
    /// any extension method ran.
    pub fn is_binding_error(&self) -> bool {
        matches!(
            self,
            Self::PluginNotFound(_)
                | Self::PluginNotLoaded(_)
                | Self::CapabilityNotProvided { .. }
                | Self::PrerequisiteUnsatisfied { .. }
        )
    }

    fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownCapability(_)
            | Self::PluginNotFound(_)
            | Self::DependencyNotFound { .. }
            | Self::CapabilityNotProvided { .. }
            | Self::UnknownProperty(_)
            | Self::UnknownMethod { .. } => ErrorKind::NotFound,
            Self::AlreadyRegistered(_) | Self::StillLoaded(_) => ErrorKind::Conflict,
            Self::PropertyNotReadable(_)
            | Self::PropertyNotWritable(_)
            | Self::PropertyConstructOnly(_)
            | Self::InvalidPropertyValue { .. }
            | Self::ArgumentCount { .. }
            | Self::InvalidArgument { .. }
            | Self::InvalidDependency { .. }
            | Self::HostRequired(_)
            | Self::HostMismatch { .. }
            | Self::WrongCapability { .. } => ErrorKind::Validation,
            Self::Serialization(_) => ErrorKind::Serialization,
            Self::PluginNotLoaded(_)
            | Self::PluginUnavailable { .. }
            | Self::DependencyVersionMismatch { .. }
            | Self::PrerequisiteUnsatisfied { .. }
            | Self::Extension(_)
            | Self::ActivationFailed { .. }
            | Self::DeactivationFailed { .. }
            | Self::ConfigurationFailed { .. } => ErrorKind::Plugin,
        }
    }
}

/// A specialized `Result` type for plugin operations.
pub type PluginResult<T> = Result<T, PluginError>;

impl From<PluginError> for AppError {
    fn from(err: PluginError) -> Self {
        let kind = err.kind();
        AppError::with_source(kind, err.to_string(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prerequisite_error_maps_to_plugin_kind() {
        let err = PluginError::PrerequisiteUnsatisfied {
            plugin: "missing-prerequisite".to_string(),
            capability: Capability::HasPrerequisite,
            missing: Capability::Properties,
        };
        assert!(err.is_binding_error());
        let app: AppError = err.into();
        assert_eq!(app.kind, ErrorKind::Plugin);
        assert!(app.message.contains("prerequisite 'Properties'"));
    }

    #[test]
    fn test_property_errors_are_validation() {
        let app: AppError = PluginError::PropertyNotWritable("read-only".to_string()).into();
        assert_eq!(app.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_activation_failure_is_not_a_binding_error() {
        let err = PluginError::ActivationFailed {
            extension: ExtensionId::new(),
            plugin: "hello-world".to_string(),
            source: Box::new(PluginError::extension("boom")),
        };
        assert!(!err.is_binding_error());
        assert!(err.to_string().ends_with("failed to activate: boom"));
    }
}
