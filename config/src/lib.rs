//! # Configuration Management for chainsql
//!
//! This crate provides the configuration structures shared by the chainsql
//! workspace: how to reach the database and how query builders behave.
//!
//! ## Quick Start
//!
//! ### Programmatic Configuration
//! ```rust
//! use config::{BuilderConfig, DatabaseConfig, Driver};
//!
//! let db_config = DatabaseConfig::new(
//!     Driver::Postgres,
//!     "localhost".to_string(), 5432, "myapp".to_string(),
//!     "postgres".to_string(), "password".to_string(),
//!     10, 30,
//! );
//!
//! let builder_config = BuilderConfig::default();
//! assert!(builder_config.validate_table_names);
//! ```
//!
//! ### TOML File Configuration
//! ```toml
//! [database]
//! driver = "mysql"
//! host = "localhost"
//! port = 3306
//! database = "myapp"
//! username = "root"
//! password = "password"
//! max_connections = 10
//! connection_timeout_seconds = 30
//!
//! [builder]
//! validate_table_names = true
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from chainsql.toml
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::{env, fmt, path::Path};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./chainsql.toml";
const CONFIG_PATH_ENV: &str = "CHAINSQL_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Environment variable error: {0}")]
    Env(#[from] env::VarError),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub builder: BuilderConfig,
}

/// Database engine behind the connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    Mysql,
    Postgres,
}

impl Driver {
    /// URL scheme used by the connection string
    pub fn scheme(&self) -> &'static str {
        match self {
            Driver::Mysql => "mysql",
            Driver::Postgres => "postgresql",
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Driver::Mysql => write!(f, "mysql"),
            Driver::Postgres => write!(f, "postgres"),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub driver: Driver,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub max_connections: u32,
    pub connection_timeout_seconds: u64,
    /// Bind RFC 3339 and UUID strings as timestamps and uuids instead of text
    #[serde(default)]
    pub infer_string_types: bool,
}

/// Query builder behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Reject table names that are not plain SQL identifiers
    #[serde(default = "default_validate_table_names")]
    pub validate_table_names: bool,
}

fn default_validate_table_names() -> bool {
    true
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            validate_table_names: default_validate_table_names(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the TOML file named in .env, or the default path
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            // A missing .env is fine, the default path still applies
            if !err.not_found() {
                return Err(err.into());
            }
        }

        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            Self::from_file(&config_path)
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)
        } else {
            Err(ConfigError::Invalid(format!(
                "Config path must be specified in .env file as {} or in {} file",
                CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH
            )))
        }
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database.validate()
    }
}

impl DatabaseConfig {
    /// Create a new database configuration
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        driver: Driver,
        host: String,
        port: u16,
        database: String,
        username: String,
        password: String,
        max_connections: u32,
        connection_timeout_seconds: u64,
    ) -> Self {
        Self {
            driver,
            host,
            port,
            database,
            username,
            password,
            max_connections,
            connection_timeout_seconds,
            infer_string_types: false,
        }
    }

    /// Build connection string
    pub fn connection_string(&self) -> String {
        format!(
            "{}://{}:{}@{}:{}/{}",
            self.driver.scheme(),
            self.username,
            self.password,
            self.host,
            self.port,
            self.database
        )
    }

    /// Validate database values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::Invalid(
                "Database host cannot be empty".to_string(),
            ));
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid(
                "Database port cannot be zero".to_string(),
            ));
        }
        if self.database.is_empty() {
            return Err(ConfigError::Invalid(
                "Database name cannot be empty".to_string(),
            ));
        }
        if self.username.is_empty() {
            return Err(ConfigError::Invalid(
                "Database username cannot be empty".to_string(),
            ));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "Database max_connections must be greater than 0".to_string(),
            ));
        }
        if self.connection_timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "Database connection_timeout_seconds must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_TOML: &str = r#"
[database]
driver = "mysql"
host = "localhost"
port = 3306
database = "shop"
username = "root"
password = "secret"
max_connections = 5
connection_timeout_seconds = 10
"#;

    fn postgres_config() -> DatabaseConfig {
        DatabaseConfig::new(
            Driver::Postgres,
            "db.internal".to_string(),
            5432,
            "shop".to_string(),
            "postgres".to_string(),
            "pw".to_string(),
            10,
            30,
        )
    }

    #[test]
    fn test_parse_valid_toml() {
        let config = AppConfig::from_toml_str(VALID_TOML).unwrap();
        assert_eq!(config.database.driver, Driver::Mysql);
        assert_eq!(config.database.port, 3306);
        // Missing [builder] section falls back to defaults
        assert!(config.builder.validate_table_names);
    }

    #[test]
    fn test_string_type_inference_is_opt_in() {
        let config = AppConfig::from_toml_str(VALID_TOML).unwrap();
        assert!(!config.database.infer_string_types);

        let content = VALID_TOML.replace(
            "connection_timeout_seconds = 10",
            "connection_timeout_seconds = 10\ninfer_string_types = true",
        );
        let config = AppConfig::from_toml_str(&content).unwrap();
        assert!(config.database.infer_string_types);
        assert!(!postgres_config().infer_string_types);
    }

    #[test]
    fn test_builder_section_overrides_default() {
        let content = format!("{}\n[builder]\nvalidate_table_names = false\n", VALID_TOML);
        let config = AppConfig::from_toml_str(&content).unwrap();
        assert!(!config.builder.validate_table_names);
    }

    #[test]
    fn test_unknown_driver_is_rejected() {
        let content = VALID_TOML.replace("\"mysql\"", "\"oracle\"");
        let result = AppConfig::from_toml_str(&content);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_zero_port_is_invalid() {
        let content = VALID_TOML.replace("port = 3306", "port = 0");
        let result = AppConfig::from_toml_str(&content);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_empty_host_is_invalid() {
        let mut config = postgres_config();
        config.host = String::new();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_connections_is_invalid() {
        let mut config = postgres_config();
        config.max_connections = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_connections"));
    }

    #[test]
    fn test_connection_string_follows_driver() {
        let config = postgres_config();
        assert_eq!(
            config.connection_string(),
            "postgresql://postgres:pw@db.internal:5432/shop"
        );

        let mut config = config;
        config.driver = Driver::Mysql;
        config.port = 3306;
        assert_eq!(
            config.connection_string(),
            "mysql://postgres:pw@db.internal:3306/shop"
        );
    }

    #[test]
    fn test_from_file_reads_toml() {
        let path = env::temp_dir().join(format!("chainsql-config-{}.toml", std::process::id()));
        std::fs::write(&path, VALID_TOML).unwrap();
        let config = AppConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.database.database, "shop");
    }

    #[test]
    fn test_from_file_missing_path() {
        let result = AppConfig::from_file("/definitely/not/here/chainsql.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
