//! Price API configuration module.
//!
//! Configuration is layered: built-in defaults, then an optional
//! `vitrina.toml`, then `VITRINA_*` environment variables. Nested keys use a
//! double underscore (`VITRINA_ENGINE__STRICT_OR=true`).

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use vitrina_core::QualificationPolicy;

/// Config file looked up in the working directory (extension optional).
pub const DEFAULT_CONFIG_FILE: &str = "vitrina";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "VITRINA";

/// Price API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Interface to bind
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// SQLite database file
    pub database_path: String,

    /// Pool size
    pub max_connections: u32,

    /// Promotion engine settings
    pub engine: EngineConfig,
}

/// Promotion engine settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Accept a promotion as soon as an OR condition holds, even when an
    /// earlier condition failed.
    #[serde(default)]
    pub strict_or: bool,
}

impl ApiConfig {
    /// Load configuration from `vitrina.toml` (if present) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE, environment())
    }

    /// Load configuration from a named file and an environment source.
    pub fn load_from(file: &str, env: Environment) -> Result<Self, ConfigError> {
        let config: ApiConfig = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080_i64)?
            .set_default("database_path", "./vitrina.db")?
            .set_default("max_connections", 5_i64)?
            .set_default("engine.strict_or", false)?
            .add_source(File::with_name(file).required(false))
            .add_source(env)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue("port".to_string()));
        }

        if self.database_path.trim().is_empty() {
            return Err(ConfigError::MissingRequired("database_path".to_string()));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue("max_connections".to_string()));
        }

        Ok(())
    }

    /// Socket address to bind, e.g. `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Qualification policy selected by `engine.strict_or`.
    pub fn policy(&self) -> QualificationPolicy {
        if self.engine.strict_or {
            QualificationPolicy::StrictOr
        } else {
            QualificationPolicy::Reference
        }
    }
}

/// `VITRINA_*` environment source. The prefix is joined with a single
/// underscore (`VITRINA_PORT`); nested keys use a double one
/// (`VITRINA_ENGINE__STRICT_OR`).
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const NO_FILE: &str = "does-not-exist/vitrina-test";

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        environment().source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::load_from(NO_FILE, env(&[])).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path, "./vitrina.db");
        assert_eq!(config.max_connections, 5);
        assert!(!config.engine.strict_or);
        assert_eq!(config.policy(), QualificationPolicy::Reference);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_environment_overrides() {
        let config = ApiConfig::load_from(
            NO_FILE,
            env(&[
                ("VITRINA_PORT", "9090"),
                ("VITRINA_DATABASE_PATH", "/tmp/precios.db"),
                ("VITRINA_ENGINE__STRICT_OR", "true"),
            ]),
        )
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.database_path, "/tmp/precios.db");
        assert_eq!(config.policy(), QualificationPolicy::StrictOr);
    }

    #[test]
    fn test_double_underscore_prefix_is_not_an_override() {
        let config =
            ApiConfig::load_from(NO_FILE, env(&[("VITRINA__PORT", "9191")])).unwrap();
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_port_rejected() {
        let err = ApiConfig::load_from(NO_FILE, env(&[("VITRINA_PORT", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(field) if field == "port"));

        let err = ApiConfig::load_from(NO_FILE, env(&[("VITRINA_PORT", "not-a-port")]));
        assert!(matches!(err, Err(ConfigError::Source(_))));
    }

    #[test]
    fn test_blank_database_path_rejected() {
        let err =
            ApiConfig::load_from(NO_FILE, env(&[("VITRINA_DATABASE_PATH", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired(_)));
    }
}
