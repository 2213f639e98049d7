//! Process configuration, read from `SAFETYNET_*` environment variables.
//!
//! Loading goes through the `config` crate: defaults first, then the
//! environment. The raw values are then checked into a [`ServerConfig`].

use ::config::{Config, Environment};
use common::model::variant::{ServiceVariant, UnknownVariant};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Prefix shared by every environment variable the server reads.
pub const ENV_PREFIX: &str = "SAFETYNET";
pub const VARIANT_VAR: &str = "SAFETYNET_VARIANT";
pub const HOST_VAR: &str = "SAFETYNET_HOST";
pub const PORT_VAR: &str = "SAFETYNET_PORT";
pub const DATABASE_VAR: &str = "SAFETYNET_DATABASE";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

/// Maximum accepted JSON request body.
pub const JSON_LIMIT_BYTES: usize = 256 * 1024;

const IN_MEMORY_DATABASE: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    InMemory,
    File(PathBuf),
}

impl DatabaseLocation {
    fn parse(value: &str) -> Self {
        if value.trim() == IN_MEMORY_DATABASE {
            DatabaseLocation::InMemory
        } else {
            DatabaseLocation::File(PathBuf::from(value))
        }
    }
}

/// Settings as the environment provides them, before validation.
#[derive(Debug, Deserialize)]
pub struct RawSettings {
    variant: Option<String>,
    host: String,
    port: u16,
    database: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawSettings")]
pub struct ServerConfig {
    pub variant: ServiceVariant,
    pub host: String,
    pub port: u16,
    pub database: DatabaseLocation,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SAFETYNET_VARIANT must be set to the service to run")]
    MissingVariant,
    #[error(transparent)]
    UnknownVariant(#[from] UnknownVariant),
    #[error("invalid configuration: {0}")]
    Load(#[from] ::config::ConfigError),
}

impl TryFrom<RawSettings> for ServerConfig {
    type Error = ConfigError;

    fn try_from(raw: RawSettings) -> Result<Self, ConfigError> {
        let variant: ServiceVariant = raw
            .variant
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingVariant)?
            .parse()?;
        let database = match raw.database.filter(|value| !value.trim().is_empty()) {
            Some(value) => DatabaseLocation::parse(&value),
            None => DatabaseLocation::File(PathBuf::from(format!("{variant}.sqlite"))),
        };

        Ok(Self {
            variant,
            host: raw.host,
            port: raw.port,
            database,
        })
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    /// Builds a config from `environment` layered over the defaults. Blank
    /// values count as unset.
    fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        let raw: RawSettings = Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .add_source(environment.ignore_empty(true))
            .build()?
            .try_deserialize()?;
        Self::try_from(raw)
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: ::config::Map<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_environment(Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    #[test]
    fn defaults_follow_the_variant() {
        let config = config_from(&[(VARIANT_VAR, "fire_station")]).unwrap();

        assert_eq!(config.variant, ServiceVariant::FireStation);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(
            config.database,
            DatabaseLocation::File(PathBuf::from("fire_station.sqlite"))
        );
        assert_eq!(config.url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = config_from(&[
            (VARIANT_VAR, "person_info"),
            (HOST_VAR, "0.0.0.0"),
            (PORT_VAR, "9090"),
            (DATABASE_VAR, ":memory:"),
        ])
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9090);
        assert_eq!(config.database, DatabaseLocation::InMemory);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config_from(&[
            (VARIANT_VAR, "child_alert"),
            (HOST_VAR, ""),
            (DATABASE_VAR, ""),
        ])
        .unwrap();

        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(
            config.database,
            DatabaseLocation::File(PathBuf::from("child_alert.sqlite"))
        );
    }

    #[test]
    fn missing_or_bad_values_are_rejected() {
        assert!(matches!(config_from(&[]), Err(ConfigError::MissingVariant)));
        assert!(matches!(
            config_from(&[(VARIANT_VAR, "hospital")]),
            Err(ConfigError::UnknownVariant(_))
        ));
        assert!(matches!(
            config_from(&[(VARIANT_VAR, "child_alert"), (PORT_VAR, "eighty")]),
            Err(ConfigError::Load(_))
        ));
    }
}
