//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod database;
pub mod logging;
pub mod uploads;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::database::{DatabaseBackend, DatabaseConfig};
pub use self::logging::{LogFormat, LoggingConfig};
pub use self::uploads::UploadConfig;

use crate::error::AppError;

/// Prefix for environment variable overrides, e.g. `ELDEREASE__SERVER__PORT`.
pub const ENV_PREFIX: &str = "ELDEREASE";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Upload storage settings.
    #[serde(default)]
    pub uploads: UploadConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml` with an environment-specific overlay
    /// and environment variables prefixed with `ELDEREASE__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from_dir("config", env)
    }

    /// Same as [`AppConfig::load`] but reading files from `dir`.
    pub fn load_from_dir(dir: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Socket address the HTTP server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AppConfig::from_toml("").expect("defaults");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.backend, DatabaseBackend::Postgres);
        assert!(config.database.run_migrations);
        assert_eq!(config.uploads.directory, "uploads");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 8081

            [server.cors]
            allowed_origins = ["*"]

            [database]
            backend = "memory"

            [uploads]
            directory = "/tmp/elderease"
            "#,
        )
        .expect("parse");

        assert_eq!(config.bind_address(), "0.0.0.0:8081");
        assert_eq!(config.server.cors.allowed_origins, vec!["*".to_string()]);
        assert_eq!(config.database.backend, DatabaseBackend::Memory);
        assert_eq!(config.uploads.directory, "/tmp/elderease");
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let err = AppConfig::from_toml("[database]\nbackend = \"mongo\"").unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }
}
