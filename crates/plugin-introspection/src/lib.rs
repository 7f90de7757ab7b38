//! Test-only plugins for validating a host's invocation layer and
//! capability binding. Both are flagged hidden.
//!
//! - [`introspection`] exports `Callable`, `Properties` and
//!   `HasPrerequisite`.
//! - [`missing_prerequisite`] exports `HasPrerequisite` without
//!   `Properties`, so binding it must fail.

pub mod introspection;
pub mod missing_prerequisite;

use exthost_plugin::PluginExport;

/// Every plugin in this crate.
pub fn exports() -> Vec<PluginExport> {
    vec![introspection::register(), missing_prerequisite::register()]
}
