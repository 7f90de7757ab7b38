//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! an optional `config/default` file, an optional environment overlay, and
//! `EXTHOST__*` environment variables. Every section has serde defaults so
//! the host runs with no configuration present at all.

pub mod demo;
pub mod engine;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::demo::DemoConfig;
pub use self::engine::EngineConfig;
pub use self::logging::LoggingConfig;

use crate::result::AppResult;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Plugin engine settings.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Demo host window settings.
    #[serde(default)]
    pub demo: DemoConfig,
}

impl AppConfig {
    /// Load configuration for the given environment name.
    ///
    /// Merges `config/default` with `config/{env}` and environment
    /// variables prefixed with `EXTHOST`, later sources winning.
    pub fn load(env: &str) -> AppResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("EXTHOST")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("engine.plugins")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
