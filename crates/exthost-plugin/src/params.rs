//! Construction parameters passed to extension factories.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{PluginError, PluginResult};

/// Named values an extension is constructed with.
///
/// Factories [`take`](Self::take) every parameter they understand and then
/// call [`finish`](Self::finish), which rejects anything left over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstructParams {
    values: BTreeMap<String, Value>,
}

impl ConstructParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    /// Removes and returns a parameter.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    /// Removes a parameter that must be a string when present.
    pub fn take_string(&mut self, name: &str) -> PluginResult<Option<String>> {
        match self.values.remove(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(PluginError::InvalidPropertyValue {
                name: name.to_string(),
                expected: "string",
            }),
        }
    }

    /// Whether no parameters remain.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Names of the remaining parameters.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Fails with `UnknownProperty` if any parameter was not consumed.
    pub fn finish(self) -> PluginResult<()> {
        match self.values.into_keys().next() {
            Some(name) => Err(PluginError::UnknownProperty(name)),
            None => Ok(()),
        }
    }
}

impl From<serde_json::Map<String, Value>> for ConstructParams {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        Self {
            values: map.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_rejects_leftovers() {
        let mut params = ConstructParams::new()
            .with("known", "x")
            .with("invalid-property", "does-not-exist");
        assert_eq!(params.take("known"), Some(Value::from("x")));
        let err = params.finish().unwrap_err();
        assert!(matches!(err, PluginError::UnknownProperty(name) if name == "invalid-property"));
    }

    #[test]
    fn test_take_string_checks_type() {
        let mut params = ConstructParams::new().with("count", 3);
        assert!(params.take_string("count").is_err());
        assert_eq!(params.take_string("absent").expect("absent is fine"), None);
    }
}
