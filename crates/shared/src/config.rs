//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Company / bookkeeping configuration.
    #[serde(default)]
    pub company: CompanyConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL (e.g. `sqlite://tallybook.db?mode=rwc`).
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

/// Company-level bookkeeping settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyConfig {
    /// Base currency code (ISO 4217) applied to journal lines by default.
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    /// Display name shown in window titles and reports.
    #[serde(default = "default_company_name")]
    pub name: String,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            base_currency: default_base_currency(),
            name: default_company_name(),
        }
    }
}

fn default_base_currency() -> String {
    "SGD".to_string()
}

fn default_company_name() -> String {
    "Tallybook".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TALLYBOOK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_defaults() {
        let company = CompanyConfig::default();
        assert_eq!(company.base_currency, "SGD");
        assert_eq!(company.name, "Tallybook");
    }

    #[test]
    fn test_database_config_defaults() {
        let config: DatabaseConfig =
            serde_json::from_str(r#"{"url": "sqlite://tallybook.db"}"#).unwrap();
        assert_eq!(config.max_connections, 5);
    }
}
