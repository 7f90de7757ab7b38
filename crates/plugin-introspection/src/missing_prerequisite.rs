//! The `missing-prerequisite` plugin: exports `HasPrerequisite` but not
//! the `Properties` it requires.

use exthost_plugin::prelude::*;

use crate::introspection::{IntrospectionCallable, IntrospectionPrerequisite};

/// Module name.
pub const PLUGIN_ID: &str = "missing-prerequisite";

/// Plugin export.
pub fn register() -> PluginExport {
    PluginExport::new(plugin_info!(
        id: PLUGIN_ID,
        name: "Missing Prerequisite",
        version: env!("CARGO_PKG_VERSION"),
        description: "Declares a capability without its prerequisite",
        authors: ["exthost developers"],
        hidden: true
    ))
    .with_callable(|| IntrospectionCallable)
    .with_factory(Capability::HasPrerequisite, |params| {
        Ok(Extension::HasPrerequisite(Box::new(
            IntrospectionPrerequisite::new(params)?,
        )))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_reports_missing_prerequisite() {
        let export = register();
        assert_eq!(
            export.unsatisfied_prerequisites(),
            vec![(Capability::HasPrerequisite, Capability::Properties)]
        );
    }
}
