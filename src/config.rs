//! Configuration module
//!
//! Settings come from a TOML file, by default
//! `~/.config/eventhub-booking/config.toml`. Every section and field is
//! optional; missing values fall back to the defaults below.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::DatabaseConfig;

/// Environment variable pointing at an alternative config file
pub const CONFIG_ENV: &str = "BOOKING_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub api_host: String,
    pub api_port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
    /// Expose Prometheus metrics at `/metrics`
    pub metrics_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 4000,
            shutdown_timeout: 30,
            metrics_enabled: true,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Full connection URL; takes precedence over `path`
    pub url: Option<String>,
    /// SQLite file path
    pub path: PathBuf,
    pub max_connections: u32,
    /// Seconds a SQLite writer waits for the database lock
    pub busy_timeout_secs: u64,
    /// Keep everything in process memory instead of a database
    pub in_memory: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            path: PathBuf::from("./eventhub.db"),
            max_connections: 10,
            busy_timeout_secs: 10,
            in_memory: false,
        }
    }
}

impl DatabaseSettings {
    pub fn connection_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!("sqlite://{}?mode=rwc", self.path.display()),
        }
    }

    pub fn to_database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.connection_url(),
            max_connections: self.max_connections,
            busy_timeout: std::time::Duration::from_secs(self.busy_timeout_secs),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub jwt_issuer: String,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        let jwt = JwtConfig::default();
        Self {
            jwt_secret: jwt.secret,
            jwt_expiration_hours: jwt.expiration_hours,
            jwt_issuer: jwt.issuer,
        }
    }
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("jwt_issuer", &self.jwt_issuer)
            .finish()
    }
}

impl SecurityConfig {
    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.jwt_secret.clone(),
            expiration_hours: self.jwt_expiration_hours,
            issuer: self.jwt_issuer.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `eventhub_booking=debug`
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("security.jwt_secret is empty".into()));
        }
        if self.security.jwt_expiration_hours <= 0 {
            return Err(ConfigError::Invalid(
                "security.jwt_expiration_hours must be positive".into(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("eventhub-booking")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg.server.api_port, 4000);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.database.connection_url(), "sqlite://./eventhub.db?mode=rwc");
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let file = write_config(
            r#"
            [server]
            api_port = 8080

            [security]
            jwt_secret = "s3cret"

            [logging]
            format = "json"
            "#,
        );
        let cfg = AppConfig::load(file.path()).unwrap();
        assert_eq!(cfg.server.api_port, 8080);
        assert_eq!(cfg.server.api_host, "0.0.0.0");
        assert_eq!(cfg.security.jwt_secret, "s3cret");
        assert_eq!(cfg.security.jwt_expiration_hours, 24);
        assert_eq!(cfg.logging.format, "json");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn database_url_wins_over_path() {
        let file = write_config(
            r#"
            [database]
            url = "postgres://localhost/eventhub"
            path = "/tmp/ignored.db"
            "#,
        );
        let cfg = AppConfig::load(file.path()).unwrap();
        assert_eq!(cfg.database.connection_url(), "postgres://localhost/eventhub");
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let file = write_config("[server\napi_port = ");
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn empty_secret_is_rejected() {
        let file = write_config("[security]\njwt_secret = \"  \"\n");
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn security_debug_hides_secret() {
        let cfg = SecurityConfig {
            jwt_secret: "top-secret".into(),
            ..SecurityConfig::default()
        };
        assert!(!format!("{cfg:?}").contains("top-secret"));
    }

    #[test]
    fn default_path_ends_with_app_dir() {
        let path = default_config_path();
        assert!(path.ends_with("eventhub-booking/config.toml"));
    }
}
