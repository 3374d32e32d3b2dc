//! CLI configuration

use core_kernel::CoreError;
use infra_db::DatabaseConfig;
use serde::Deserialize;

/// Prefix of every environment variable read into [`CliConfig`]
pub const ENV_PREFIX: &str = "FINANCE";

/// Connection string variables consulted when `FINANCE_DATABASE_URL` is unset
pub const LEGACY_URL_VARS: [&str; 2] = ["DB_URL", "DATABASE_URL"];

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// CLI configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// PostgreSQL connection string
    pub database_url: Option<String>,
    /// Log level or `EnvFilter` directive
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Maximum number of pooled connections
    pub max_connections: u32,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            max_connections: 10,
        }
    }
}

impl CliConfig {
    /// Loads configuration from `FINANCE_*` environment variables
    ///
    /// Falls back to `DB_URL`, then `DATABASE_URL`, for the connection string.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let config = Self::load(config::Environment::with_prefix(ENV_PREFIX))?;
        Ok(config.with_legacy_url(|key| std::env::var(key).ok()))
    }

    fn load(environment: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Fills in a missing connection string from the legacy variables
    pub fn with_legacy_url(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if self.url().is_none() {
            self.database_url = LEGACY_URL_VARS
                .iter()
                .filter_map(|key| lookup(key))
                .find(|url| !url.trim().is_empty());
        }
        self
    }

    fn url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    /// Builds the pool configuration
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Configuration` if no connection string is set or
    /// the pool size is zero
    pub fn database_config(&self) -> Result<DatabaseConfig, CoreError> {
        let url = self.url().ok_or_else(|| {
            CoreError::configuration(format!(
                "no database URL; set {}_DATABASE_URL or {}",
                ENV_PREFIX,
                LEGACY_URL_VARS.join(" or ")
            ))
        })?;

        if self.max_connections == 0 {
            return Err(CoreError::configuration(
                "max_connections must be at least 1",
            ));
        }

        Ok(DatabaseConfig::new(url)
            .application_name("finance-db")
            .max_connections(self.max_connections))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn environment(vars: &[(&str, &str)]) -> config::Environment {
        let mut source = config::Map::new();
        for (key, value) in vars {
            source.insert(key.to_string(), value.to_string());
        }
        config::Environment::with_prefix(ENV_PREFIX).source(Some(source))
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = CliConfig::load(environment(&[])).unwrap();

        assert_eq!(config.database_url, None);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.max_connections, 10);
    }

    #[test]
    fn test_prefixed_variables() {
        let config = CliConfig::load(environment(&[
            ("FINANCE_DATABASE_URL", "postgres://localhost/finance"),
            ("FINANCE_LOG_LEVEL", "debug"),
            ("FINANCE_LOG_FORMAT", "json"),
            ("FINANCE_MAX_CONNECTIONS", "25"),
        ]))
        .unwrap();

        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/finance"));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.max_connections, 25);
    }

    #[test]
    fn test_legacy_url_fallback_order() {
        let lookup = |key: &str| match key {
            "DB_URL" => Some("postgres://legacy/finance".to_string()),
            "DATABASE_URL" => Some("postgres://generic/finance".to_string()),
            _ => None,
        };

        let config = CliConfig::default().with_legacy_url(lookup);
        assert_eq!(config.database_url.as_deref(), Some("postgres://legacy/finance"));

        let only_generic = CliConfig::default().with_legacy_url(|key| {
            (key == "DATABASE_URL").then(|| "postgres://generic/finance".to_string())
        });
        assert_eq!(
            only_generic.database_url.as_deref(),
            Some("postgres://generic/finance")
        );
    }

    #[test]
    fn test_prefixed_url_wins_over_legacy() {
        let config = CliConfig {
            database_url: Some("postgres://primary/finance".to_string()),
            ..CliConfig::default()
        }
        .with_legacy_url(|_| Some("postgres://legacy/finance".to_string()));

        assert_eq!(config.database_url.as_deref(), Some("postgres://primary/finance"));
    }

    #[test]
    fn test_missing_url_is_configuration_error() {
        let config = CliConfig::default().with_legacy_url(|_| None);

        match config.database_config() {
            Err(CoreError::Configuration(msg)) => assert!(msg.contains("FINANCE_DATABASE_URL")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_url_counts_as_missing() {
        let config = CliConfig {
            database_url: Some("   ".to_string()),
            ..CliConfig::default()
        };

        assert!(config.database_config().is_err());
    }

    #[test]
    fn test_database_config_carries_pool_size() {
        let config = CliConfig {
            database_url: Some("postgres://localhost/finance".to_string()),
            max_connections: 4,
            ..CliConfig::default()
        };

        let db = config.database_config().unwrap();
        assert_eq!(db.url, "postgres://localhost/finance");
        assert_eq!(db.max_connections, 4);
        assert_eq!(db.application_name, "finance-db");
    }

    #[test]
    fn test_zero_pool_size_is_rejected() {
        let config = CliConfig {
            database_url: Some("postgres://localhost/finance".to_string()),
            max_connections: 0,
            ..CliConfig::default()
        };

        assert!(matches!(
            config.database_config(),
            Err(CoreError::Configuration(_))
        ));
    }
}
