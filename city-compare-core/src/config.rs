use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{collections::HashMap, env, fs, path::PathBuf};

use crate::provider::ProviderId;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "CITY_COMPARE_CONFIG";

/// Settings for a single provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    /// Overrides the provider's public endpoint.
    pub base_url: Option<String>,
}

/// Top-level configuration, read from TOML and overlaid with the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Run the two city lookups concurrently.
    #[serde(default)]
    pub concurrent: bool,

    /// Example TOML:
    /// [providers.openweather]
    /// api_key = "..."
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

impl Config {
    pub fn provider_config(&self, id: ProviderId) -> Option<&ProviderConfig> {
        self.providers.get(id.as_str())
    }

    /// Returns API key for a provider, if present.
    pub fn provider_api_key(&self, id: ProviderId) -> Option<&str> {
        self.provider_config(id).and_then(|cfg| cfg.api_key.as_deref())
    }

    /// Configured endpoint, falling back to the provider's public one.
    pub fn provider_base_url(&self, id: ProviderId) -> &str {
        self.provider_config(id)
            .and_then(|cfg| cfg.base_url.as_deref())
            .unwrap_or(id.default_base_url())
    }

    pub fn set_provider_api_key(&mut self, id: ProviderId, api_key: String) {
        self.providers.entry(id.as_str().to_string()).or_default().api_key = Some(api_key);
    }

    pub fn set_provider_base_url(&mut self, id: ProviderId, base_url: String) {
        self.providers.entry(id.as_str().to_string()).or_default().base_url = Some(base_url);
    }

    /// Load the config file (if any) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_file()?;
        cfg.apply_env(|name| env::var(name).ok());
        Ok(cfg)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load_file() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Overlay values from environment-style lookups. Non-empty values win over the file.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        for &id in ProviderId::all() {
            if let Some(key) = id.api_key_env().and_then(&lookup) {
                self.set_provider_api_key(id, key);
            }
            if let Some(url) = lookup(id.base_url_env()) {
                self.set_provider_base_url(id, url);
            }
        }

        if let Some(flag) = lookup("CITY_COMPARE_CONCURRENT") {
            self.concurrent = matches!(flag.trim().to_lowercase().as_str(), "1" | "true" | "yes");
        }
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Self::config_file_path_from(env::var(CONFIG_PATH_ENV).ok())
    }

    /// A blank override falls back to the platform config directory.
    fn config_file_path_from(override_path: Option<String>) -> Result<PathBuf> {
        if let Some(path) = override_path.filter(|p| !p.trim().is_empty()) {
            return Ok(PathBuf::from(path));
        }

        let dirs = ProjectDirs::from("dev", "city-compare", "city-compare")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
