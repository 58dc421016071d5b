use crate::core::catalog::{self, Currency};
use crate::providers::exchange_rate_api::DEFAULT_BASE_URL;
use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DefaultsConfig {
    #[serde(default = "default_amount")]
    pub amount: String,
    #[serde(default = "default_from")]
    pub from: String,
    #[serde(default = "default_to")]
    pub to: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        DefaultsConfig {
            amount: default_amount(),
            from: default_from(),
            to: default_to(),
        }
    }
}

fn default_amount() -> String {
    "1".to_string()
}

fn default_from() -> String {
    "EUR".to_string()
}

fn default_to() -> String {
    "USD".to_string()
}

fn default_refresh_interval_secs() -> u64 {
    60
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            provider: ProviderConfig::default(),
            refresh_interval_secs: default_refresh_interval_secs(),
            defaults: DefaultsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to defaults
    /// when no file exists there.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "fxconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config.validate()?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.refresh_interval_secs == 0 {
            bail!("refresh_interval_secs must be greater than zero");
        }
        self.default_from()?;
        self.default_to()?;
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn default_from(&self) -> Result<&'static Currency> {
        catalog::find(&self.defaults.from)
            .with_context(|| format!("Unknown default source currency: {}", self.defaults.from))
    }

    pub fn default_to(&self) -> Result<&'static Currency> {
        catalog::find(&self.defaults.to)
            .with_context(|| format!("Unknown default target currency: {}", self.defaults.to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
provider:
  base_url: "http://localhost:8080"
refresh_interval_secs: 30
defaults:
  amount: "250"
  from: "gbp"
  to: "JPY"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        config.validate().unwrap();
        assert_eq!(config.provider.base_url, "http://localhost:8080");
        assert_eq!(config.refresh_interval(), Duration::from_secs(30));
        assert_eq!(config.defaults.amount, "250");
        assert_eq!(config.default_from().unwrap().code, "GBP");
        assert_eq!(config.default_to().unwrap().code, "JPY");
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: AppConfig = serde_yaml::from_str("defaults:\n  to: CHF\n").unwrap();
        assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.refresh_interval_secs, 60);
        assert_eq!(config.defaults.amount, "1");
        assert_eq!(config.defaults.from, "EUR");
        assert_eq!(config.defaults.to, "CHF");
    }

    #[test]
    fn test_unknown_default_currency_is_rejected() {
        let config: AppConfig = serde_yaml::from_str("defaults:\n  from: BTC\n").unwrap();
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "Unknown default source currency: BTC");
    }

    #[test]
    fn test_zero_refresh_interval_is_rejected() {
        let config: AppConfig = serde_yaml::from_str("refresh_interval_secs: 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_config_path_is_under_app_dir() -> Result<()> {
        let path = AppConfig::default_config_path()?;
        assert!(path.ends_with("config.yaml"));
        assert!(path.components().any(|c| c.as_os_str() == "fxconv"));
        Ok(())
    }

    #[test]
    fn test_load_from_path() -> Result<()> {
        let file = tempfile::NamedTempFile::new()?;
        fs::write(file.path(), "refresh_interval_secs: 15\n")?;
        let config = AppConfig::load_from_path(file.path())?;
        assert_eq!(config.refresh_interval_secs, 15);

        fs::write(file.path(), "defaults:\n  to: XXX\n")?;
        assert!(AppConfig::load_from_path(file.path()).is_err());
        Ok(())
    }
}
