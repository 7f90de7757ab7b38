//! Invocation of extension methods by name with JSON-marshaled values.
//!
//! This is the reflection layer a host (or a scripting bridge) uses when it
//! only knows a method name and a list of arguments. Return values follow
//! one convention: no value is `null`, one value is that value, several
//! values are an array in declaration order.

use serde_json::Value;
use tracing::debug;

use crate::capability::Capability;
use crate::error::{PluginError, PluginResult};
use crate::extension::BoundExtension;
use crate::host::HostObject;

fn expect_args(method: &str, args: &[Value], expected: usize) -> PluginResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(PluginError::ArgumentCount {
            method: method.to_string(),
            expected,
            actual: args.len(),
        })
    }
}

fn string_arg<'a>(method: &str, value: &'a Value) -> PluginResult<&'a str> {
    value.as_str().ok_or_else(|| PluginError::InvalidArgument {
        method: method.to_string(),
        reason: "expected a string".to_string(),
    })
}

impl BoundExtension {
    /// Names of the methods [`call`](Self::call) accepts for this
    /// extension's capability.
    pub fn method_names(&self) -> &'static [&'static str] {
        match self.capability() {
            Capability::Activatable => &["activate", "deactivate", "update_state"],
            Capability::Configurable => &["create_configure_widget"],
            Capability::Callable => &[
                "call_no_args",
                "call_with_return",
                "call_single_arg",
                "call_multi_args",
            ],
            Capability::Properties => &["get_property", "set_property"],
            Capability::HasPrerequisite => &["prerequisite"],
        }
    }

    fn unknown_method(&self, method: &str) -> PluginError {
        PluginError::UnknownMethod {
            capability: self.capability(),
            method: method.to_string(),
        }
    }

    /// Invokes a method that does not need the host object.
    pub fn call(&mut self, method: &str, args: &[Value]) -> PluginResult<Value> {
        debug!(
            plugin_id = %self.plugin_id(),
            capability = %self.capability(),
            method = method,
            args = args.len(),
            "Dynamic call"
        );

        match self.capability() {
            Capability::Activatable => {
                if self.method_names().contains(&method) {
                    Err(PluginError::HostRequired(method.to_string()))
                } else {
                    Err(self.unknown_method(method))
                }
            }
            Capability::Configurable => match method {
                "create_configure_widget" => {
                    expect_args(method, args, 0)?;
                    Ok(serde_json::to_value(self.create_configure_widget()?)?)
                }
                _ => Err(self.unknown_method(method)),
            },
            Capability::Callable => {
                let callable = self.as_callable()?;
                match method {
                    "call_no_args" => {
                        expect_args(method, args, 0)?;
                        callable.call_no_args();
                        Ok(Value::Null)
                    }
                    "call_with_return" => {
                        expect_args(method, args, 0)?;
                        Ok(Value::String(callable.call_with_return()))
                    }
                    "call_single_arg" => {
                        expect_args(method, args, 0)?;
                        Ok(Value::Bool(callable.call_single_arg()))
                    }
                    "call_multi_args" => {
                        expect_args(method, args, 2)?;
                        let (first, second) =
                            callable.call_multi_args(args[0].clone(), args[1].clone());
                        Ok(Value::Array(vec![first, second]))
                    }
                    _ => Err(self.unknown_method(method)),
                }
            }
            Capability::Properties => match method {
                "get_property" => {
                    expect_args(method, args, 1)?;
                    let name = string_arg(method, &args[0])?;
                    self.as_properties()?.get_property(name)
                }
                "set_property" => {
                    expect_args(method, args, 2)?;
                    let name = string_arg(method, &args[0])?;
                    self.as_properties_mut()?
                        .set_property(name, args[1].clone())?;
                    Ok(Value::Null)
                }
                _ => Err(self.unknown_method(method)),
            },
            Capability::HasPrerequisite => match method {
                "prerequisite" => {
                    expect_args(method, args, 0)?;
                    Ok(self
                        .as_has_prerequisite()?
                        .prerequisite()
                        .map(Value::from)
                        .unwrap_or(Value::Null))
                }
                _ => Err(self.unknown_method(method)),
            },
        }
    }

    /// Invokes a lifecycle method that operates on `host`. Other methods
    /// are forwarded to [`call`](Self::call).
    pub fn call_with_host(
        &mut self,
        method: &str,
        host: &mut dyn HostObject,
        args: &[Value],
    ) -> PluginResult<Value> {
        if self.capability() != Capability::Activatable {
            return self.call(method, args);
        }
        expect_args(method, args, 0)?;
        match method {
            "activate" => self.activate(host)?,
            "deactivate" => self.deactivate(host)?,
            "update_state" => self.update_state(host)?,
            _ => return Err(self.unknown_method(method)),
        }
        Ok(Value::Null)
    }
}
