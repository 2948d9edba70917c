//! CLI configuration.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shelf_commerce::Currency;
use shelf_data::ApiConfig;
use shelf_observability::LoggingConfig;

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["shelf.toml", ".shelf.toml", "shelf.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShelfConfig {
    /// Remote catalog connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// Device store location.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Display settings.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Log level and format.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Environment-specific overrides.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub environments: HashMap<String, EnvironmentConfig>,
}

impl ShelfConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Get environment-specific config.
    pub fn for_environment(&self, env: &str) -> Result<ShelfConfig> {
        let env_config = self
            .environments
            .get(env)
            .with_context(|| format!("Unknown environment: {}", env))?;

        let mut config = self.clone();
        if let Some(ref api) = env_config.api {
            config.api = api.clone();
        }
        if let Some(ref cache) = env_config.cache {
            config.cache = cache.clone();
        }
        Ok(config)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Device store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Store file, relative to the working directory unless absolute.
    #[serde(default = "default_cache_path")]
    pub path: String,
}

fn default_cache_path() -> String {
    ".shelf/favorites.json".to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
        }
    }
}

/// Display configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Currency prices are shown in.
    #[serde(default)]
    pub currency: Currency,
}

/// Environment-specific configuration overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    #[serde(default)]
    pub api: Option<ApiConfig>,

    #[serde(default)]
    pub cache: Option<CacheConfig>,
}

/// Generate a default shelf.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Shelf storefront configuration

[api]
base_url = "{base_url}"
timeout_ms = 10000

[cache]
path = ".shelf/favorites.json"

[display]
currency = "USD"

[logging]
level = "warn"
format = "human"

[environments.local.api]
base_url = "http://localhost:3000"
timeout_ms = 2000
"#,
        base_url = shelf_data::DEFAULT_BASE_URL
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_observability::{LogFormat, LogLevel};

    #[test]
    fn test_default_config_parses() {
        let config: ShelfConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api, ApiConfig::default());
        assert_eq!(config.cache.path, ".shelf/favorites.json");
        assert_eq!(config.display.currency, Currency::USD);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert_eq!(config.logging.format, LogFormat::Human);
        assert!(config.environments.contains_key("local"));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: ShelfConfig = toml::from_str("[display]\ncurrency = \"EUR\"\n").unwrap();
        assert_eq!(config.display.currency, Currency::EUR);
        assert_eq!(config.api.base_url, shelf_data::DEFAULT_BASE_URL);
        assert_eq!(config.cache, CacheConfig::default());
    }

    #[test]
    fn test_environment_overrides_api() {
        let config: ShelfConfig = toml::from_str(&generate_default_config()).unwrap();
        let local = config.for_environment("local").unwrap();
        assert_eq!(local.api.base_url, "http://localhost:3000");
        assert_eq!(local.api.timeout_ms, 2000);
        assert_eq!(local.cache, config.cache);

        assert!(config.for_environment("nope").is_err());
    }

    #[test]
    fn test_load_json_and_toml() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("shelf.json");
        std::fs::write(&json_path, r#"{"display": {"currency": "VND"}}"#).unwrap();
        assert_eq!(
            ShelfConfig::load(&json_path).unwrap().display.currency,
            Currency::VND
        );

        let toml_path = dir.path().join("shelf.toml");
        std::fs::write(&toml_path, "[cache]\npath = \"/tmp/favs.json\"\n").unwrap();
        assert_eq!(ShelfConfig::load(&toml_path).unwrap().cache.path, "/tmp/favs.json");
    }

    #[test]
    fn test_load_reports_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shelf.toml");
        std::fs::write(&path, "[api\n").unwrap();
        let err = ShelfConfig::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse TOML config"));
    }
}
