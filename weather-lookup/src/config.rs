use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

/// WeatherAPI.com current-conditions endpoint.
pub const DEFAULT_API_PATH: &str = "http://api.weatherapi.com/v1/current.json";

pub const API_KEY_ENV: &str = "WEATHER_API_KEY";
pub const API_PATH_ENV: &str = "WEATHER_API_PATH";

/// Resolved settings the lookup is constructed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub api_key: String,
    pub api_path: String,
}

impl ApiSettings {
    pub fn new(api_key: impl Into<String>, api_path: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), api_path: api_path.into() }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// api_path = "http://api.weatherapi.com/v1/current.json"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_path: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// [`Config::load`] with `WEATHER_API_KEY` / `WEATHER_API_PATH` applied on top.
    pub fn load_with_env() -> Result<Self> {
        Ok(Self::load()?.with_overrides(env::var(API_KEY_ENV).ok(), env::var(API_PATH_ENV).ok()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-lookup", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Non-empty overrides replace the stored values.
    pub fn with_overrides(mut self, api_key: Option<String>, api_path: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(path) = api_path.filter(|p| !p.trim().is_empty()) {
            self.api_path = Some(path);
        }
        self
    }

    pub fn api_path_or_default(&self) -> &str {
        self.api_path.as_deref().unwrap_or(DEFAULT_API_PATH)
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    pub fn api_settings(&self) -> Result<ApiSettings> {
        let api_key = self.api_key.as_deref().filter(|k| !k.trim().is_empty()).ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `weather configure` or set {API_KEY_ENV}."
            )
        })?;

        Ok(ApiSettings::new(api_key, self.api_path_or_default()))
    }
}
