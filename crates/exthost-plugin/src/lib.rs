//! # exthost-plugin
//!
//! Extension lifecycle contract and plugin engine for exthost. Provides:
//!
//! - One trait per capability: [`Activatable`], [`Configurable`],
//!   [`Callable`], [`Properties`], [`HasPrerequisite`]
//! - [`PluginExport`], the capability → factory map each plugin exposes
//! - [`PluginEngine`], which loads plugins (dependencies first) and binds
//!   them to capabilities, checking prerequisites before any call
//! - [`BoundExtension`], which enforces the `Inactive → Active → Inactive`
//!   state machine and supports invocation by method name
//! - [`ActivationSet`], which drives every loaded plugin's `Activatable`
//!   extension against one host object

pub mod activation;
pub mod capability;
pub mod dependency;
pub mod engine;
pub mod error;
pub mod exports;
pub mod extension;
pub mod host;
pub mod invoke;
pub mod macros;
pub mod params;
pub mod prelude;
pub mod properties;
pub mod registry;
pub mod traits;

pub use activation::{ActivationReport, ActivationSet};
pub use capability::Capability;
pub use dependency::PluginDependency;
pub use engine::PluginEngine;
pub use error::{PluginError, PluginResult};
pub use exports::PluginExport;
pub use extension::{BoundExtension, Extension, ExtensionState};
pub use host::{HostObject, HostWindow, Widget};
pub use params::ConstructParams;
pub use registry::{PluginInfo, PluginRegistry};
pub use traits::{Activatable, Callable, Configurable, HasPrerequisite, Properties};
