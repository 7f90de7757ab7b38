//! Introspectable data attributes with enforced access modes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PluginError, PluginResult};
use crate::params::ConstructParams;

/// How the host may access a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyAccess {
    /// Readable, never writable.
    ReadOnly,
    /// Writable, never readable.
    WriteOnly,
    /// Readable and writable.
    ReadWrite,
    /// Readable, settable only through construction parameters.
    ConstructOnly,
}

impl PropertyAccess {
    /// Whether the host may read the value.
    pub fn is_readable(self) -> bool {
        !matches!(self, Self::WriteOnly)
    }

    /// Whether the host may write the value after construction.
    pub fn is_writable(self) -> bool {
        matches!(self, Self::WriteOnly | Self::ReadWrite)
    }

    /// Whether the value may be supplied at construction.
    pub fn is_constructible(self) -> bool {
        !matches!(self, Self::ReadOnly)
    }
}

/// Declaration of one property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySpec {
    /// Property name.
    pub name: String,
    /// Access mode.
    pub access: PropertyAccess,
    /// Initial value; its JSON type is the property's type unless null.
    pub default: Value,
}

impl PropertySpec {
    /// Creates a property declaration.
    pub fn new(name: &str, access: PropertyAccess, default: impl Into<Value>) -> Self {
        Self {
            name: name.to_string(),
            access,
            default: default.into(),
        }
    }

    fn check_type(&self, value: &Value) -> PluginResult<()> {
        let expected = json_type(&self.default);
        if self.default.is_null() || value.is_null() || json_type(value) == expected {
            Ok(())
        } else {
            Err(PluginError::InvalidPropertyValue {
                name: self.name.clone(),
                expected,
            })
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Property storage that enforces each property's access mode.
///
/// Rejected writes leave the stored value untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyBag {
    specs: Vec<PropertySpec>,
    values: BTreeMap<String, Value>,
}

impl PropertyBag {
    /// Creates a bag holding each property's default.
    pub fn new(specs: Vec<PropertySpec>) -> Self {
        let values = specs
            .iter()
            .map(|spec| (spec.name.clone(), spec.default.clone()))
            .collect();
        Self { specs, values }
    }

    /// Creates a bag and applies any construction parameters naming its
    /// properties. Parameters for other names are left in `params`.
    pub fn construct(specs: Vec<PropertySpec>, params: &mut ConstructParams) -> PluginResult<Self> {
        let mut bag = Self::new(specs);
        for spec in &bag.specs {
            let Some(value) = params.take(&spec.name) else {
                continue;
            };
            if !spec.access.is_constructible() {
                return Err(PluginError::PropertyNotWritable(spec.name.clone()));
            }
            spec.check_type(&value)?;
            bag.values.insert(spec.name.clone(), value);
        }
        Ok(bag)
    }

    /// Declared properties.
    pub fn specs(&self) -> &[PropertySpec] {
        &self.specs
    }

    fn spec(&self, name: &str) -> PluginResult<&PropertySpec> {
        self.specs
            .iter()
            .find(|spec| spec.name == name)
            .ok_or_else(|| PluginError::UnknownProperty(name.to_string()))
    }

    /// Reads a property.
    pub fn get(&self, name: &str) -> PluginResult<Value> {
        let spec = self.spec(name)?;
        if !spec.access.is_readable() {
            return Err(PluginError::PropertyNotReadable(name.to_string()));
        }
        Ok(self.values.get(name).cloned().unwrap_or(Value::Null))
    }

    /// Writes a property.
    pub fn set(&mut self, name: &str, value: Value) -> PluginResult<()> {
        let spec = self.spec(name)?;
        match spec.access {
            PropertyAccess::ConstructOnly => {
                return Err(PluginError::PropertyConstructOnly(name.to_string()));
            }
            PropertyAccess::ReadOnly => {
                return Err(PluginError::PropertyNotWritable(name.to_string()));
            }
            PropertyAccess::WriteOnly | PropertyAccess::ReadWrite => {}
        }
        spec.check_type(&value)?;
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Reads a stored value regardless of access mode, for the owning
    /// extension's own use.
    pub fn stored(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}
