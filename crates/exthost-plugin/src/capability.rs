//! Capability (extension point) definitions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PluginError;

/// Enumeration of every extension point a host can bind a plugin to.
///
/// The string form (see [`Capability::as_str`]) is the key plugins use in
/// their exported capability map and the name hosts log and look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Capability {
    /// Lifecycle bound to a host object: activate, deactivate, update_state.
    Activatable,
    /// Provides a settings widget on demand.
    Configurable,
    /// Test-only: deterministic callable members.
    Callable,
    /// Test-only: introspectable data attributes.
    Properties,
    /// Test-only: only binds when `Properties` is exported alongside it.
    HasPrerequisite,
}

impl Capability {
    /// All capabilities, in declaration order.
    pub const ALL: [Capability; 5] = [
        Self::Activatable,
        Self::Configurable,
        Self::Callable,
        Self::Properties,
        Self::HasPrerequisite,
    ];

    /// Returns the string name of this capability.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activatable => "Activatable",
            Self::Configurable => "Configurable",
            Self::Callable => "Callable",
            Self::Properties => "Properties",
            Self::HasPrerequisite => "HasPrerequisite",
        }
    }

    /// Capabilities the same plugin must also export for this one to bind.
    pub fn prerequisites(&self) -> &'static [Capability] {
        match self {
            Self::HasPrerequisite => &[Self::Properties],
            _ => &[],
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Capability {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cap| cap.as_str() == s)
            .ok_or_else(|| PluginError::UnknownCapability(s.to_string()))
    }
}
