//! API configuration

use serde::Deserialize;

/// API configuration
///
/// Every field can be overridden with an `API_`-prefixed environment
/// variable, e.g. `API_PORT=9000` or `API_DATABASE_URL=postgres://...`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// PostgreSQL connection string
    pub database_url: String,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Upper bound of the connection pool
    pub max_connections: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/autovault".to_string(),
            log_level: "info".to_string(),
            max_connections: 10,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables over the defaults
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_source(config::Environment::with_prefix("API"))
    }

    /// Loads configuration from any `config` source layered over the defaults
    pub fn from_source<S>(source: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("database_url", defaults.database_url)?
            .set_default("log_level", defaults.log_level)?
            .set_default("max_connections", i64::from(defaults.max_connections))?
            .add_source(source)
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_apply_without_overrides() {
        let source = config::Environment::default().source(Some(HashMap::new()));
        let config = ApiConfig::from_source(source).unwrap();

        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_prefixed_variables_override_defaults() {
        let vars = HashMap::from([
            ("API_PORT".to_string(), "9090".to_string()),
            ("API_DATABASE_URL".to_string(), "postgres://db/test".to_string()),
        ]);
        let source = config::Environment::with_prefix("API")
            .try_parsing(true)
            .source(Some(vars));

        let config = ApiConfig::from_source(source).unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.database_url, "postgres://db/test");
        assert_eq!(config.host, "0.0.0.0");
    }
}
