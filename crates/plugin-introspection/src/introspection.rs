//! The `introspection` plugin.

use tracing::debug;

use exthost_plugin::prelude::*;

/// Module name.
pub const PLUGIN_ID: &str = "introspection";

/// Fixed return value of `call_with_return`.
pub const HELLO: &str = "Hello, World!";

/// Name of the read-only property.
pub const READ_ONLY: &str = "read-only";
/// Name of the write-only property.
pub const WRITE_ONLY: &str = "write-only";
/// Name of the read-write property.
pub const READWRITE: &str = "readwrite";
/// Name of the construct-only property.
pub const CONSTRUCT_ONLY: &str = "construct-only";
/// Construction parameter read back by the `HasPrerequisite` extension.
pub const PREREQUISITE: &str = "prerequisite";

/// Plugin export.
pub fn register() -> PluginExport {
    PluginExport::new(plugin_info!(
        id: PLUGIN_ID,
        name: "Introspection",
        version: env!("CARGO_PKG_VERSION"),
        description: "Deterministic callables and properties for host tests",
        authors: ["exthost developers"],
        hidden: true
    ))
    .with_callable(|| IntrospectionCallable)
    .with_factory(Capability::Properties, |mut params| {
        let properties = IntrospectionProperties::new(&mut params)?;
        params.finish()?;
        Ok(Extension::Properties(Box::new(properties)))
    })
    .with_factory(Capability::HasPrerequisite, |params| {
        Ok(Extension::HasPrerequisite(Box::new(
            IntrospectionPrerequisite::new(params)?,
        )))
    })
}

/// Callable members with fixed results.
#[derive(Debug)]
pub struct IntrospectionCallable;

impl Callable for IntrospectionCallable {
    fn call_no_args(&self) {
        debug!("introspection_callable_call_no_args");
    }

    fn call_with_return(&self) -> String {
        HELLO.to_string()
    }

    fn call_single_arg(&self) -> bool {
        true
    }

    fn call_multi_args(&self, input: Value, inout: Value) -> (Value, Value) {
        (inout, input)
    }
}

/// One property of each access mode.
#[derive(Debug)]
pub struct IntrospectionProperties {
    bag: PropertyBag,
}

impl IntrospectionProperties {
    /// Declared properties and their defaults.
    pub fn specs() -> Vec<PropertySpec> {
        vec![
            PropertySpec::new(CONSTRUCT_ONLY, PropertyAccess::ConstructOnly, Value::Null),
            PropertySpec::new(READ_ONLY, PropertyAccess::ReadOnly, "read-only"),
            PropertySpec::new(WRITE_ONLY, PropertyAccess::WriteOnly, Value::Null),
            PropertySpec::new(READWRITE, PropertyAccess::ReadWrite, "readwrite"),
        ]
    }

    /// Builds the extension, consuming parameters that name its properties.
    pub fn new(params: &mut ConstructParams) -> PluginResult<Self> {
        Ok(Self {
            bag: PropertyBag::construct(Self::specs(), params)?,
        })
    }
}

impl Properties for IntrospectionProperties {
    fn properties(&self) -> &PropertyBag {
        &self.bag
    }

    fn properties_mut(&mut self) -> &mut PropertyBag {
        &mut self.bag
    }
}

/// Extension that requires `Properties` from the same plugin.
#[derive(Debug)]
pub struct IntrospectionPrerequisite {
    prerequisite: Option<String>,
}

impl IntrospectionPrerequisite {
    /// Builds the extension from its single optional parameter.
    pub fn new(mut params: ConstructParams) -> PluginResult<Self> {
        let prerequisite = params.take_string(PREREQUISITE)?;
        params.finish()?;
        Ok(Self { prerequisite })
    }
}

impl HasPrerequisite for IntrospectionPrerequisite {
    fn prerequisite(&self) -> Option<&str> {
        self.prerequisite.as_deref()
    }
}
