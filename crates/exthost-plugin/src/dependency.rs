//! Plugin dependency declarations.
//!
//! A declaration is a module name optionally followed by whitespace and a
//! version requirement: `hello-world`, `hello-world >=1.0`,
//! `hello-world >=1.0, <2.0`.

use std::fmt;
use std::str::FromStr;

use semver::{Version, VersionReq};

use crate::error::{PluginError, PluginResult};

/// A parsed dependency on another plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDependency {
    name: String,
    requirement: Option<VersionReq>,
}

impl PluginDependency {
    /// Module name of the required plugin.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version requirement, if any.
    pub fn requirement(&self) -> Option<&VersionReq> {
        self.requirement.as_ref()
    }

    /// Whether a plugin at `version` satisfies this dependency.
    ///
    /// Without a requirement any version matches. With one, the version
    /// must parse (missing minor or patch components count as zero).
    pub fn is_satisfied_by(&self, version: &str) -> bool {
        match &self.requirement {
            None => true,
            Some(req) => parse_version(version).is_some_and(|v| req.matches(&v)),
        }
    }
}

impl FromStr for PluginDependency {
    type Err = PluginError;

    fn from_str(s: &str) -> PluginResult<Self> {
        let invalid = |reason: &str| PluginError::InvalidDependency {
            dependency: s.to_string(),
            reason: reason.to_string(),
        };

        let s = s.trim();
        let (name, rest) = match s.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (s, ""),
        };

        if name.is_empty() {
            return Err(invalid("missing module name"));
        }
        if let Some(c) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(invalid(&format!("invalid character '{c}' in module name")));
        }

        let requirement = if rest.is_empty() {
            None
        } else {
            Some(VersionReq::parse(rest).map_err(|e| invalid(&e.to_string()))?)
        };

        Ok(Self {
            name: name.to_string(),
            requirement,
        })
    }
}

impl fmt::Display for PluginDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.requirement {
            Some(req) => write!(f, "{} {}", self.name, req),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Parses a plugin version, accepting `1` and `1.2` as `1.0.0` and `1.2.0`.
pub fn parse_version(version: &str) -> Option<Version> {
    let version = version.trim();
    if let Ok(v) = Version::parse(version) {
        return Some(v);
    }
    match version.split('.').count() {
        1 => Version::parse(&format!("{version}.0.0")).ok(),
        2 => Version::parse(&format!("{version}.0")).ok(),
        _ => None,
    }
}
