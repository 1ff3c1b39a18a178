use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::client::{DEFAULT_BASE_URL, DEFAULT_TRANSLATION_EDITION};

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub translation_edition: Option<String>,
    pub log_filter: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn translation_edition(&self) -> &str {
        self.translation_edition
            .as_deref()
            .unwrap_or(DEFAULT_TRANSLATION_EDITION)
    }

    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    fn get_config_path() -> Result<PathBuf> {
        Ok(app_dir()?.join("config.json"))
    }
}

/// `<config_dir>/tilawah`, home of the config, local storage and log file
pub fn app_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow!("Could not determine config directory"))?;

    Ok(config_dir.join("tilawah"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();

        assert_eq!(config, Config::new());
        assert_eq!(config.api_base_url(), "https://api.alquran.cloud/v1");
        assert_eq!(config.translation_edition(), "en.asad");
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tilawah").join("config.json");
        let config = Config {
            api_base_url: Some("http://localhost:8080/v1".to_string()),
            translation_edition: None,
            log_filter: Some("tilawah=debug".to_string()),
        };

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();

        assert_eq!(loaded, config);
        assert_eq!(loaded.translation_edition(), "en.asad");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "translation_edition": "en.sahih" }"#).unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.translation_edition(), "en.sahih");
        assert_eq!(config.api_base_url(), DEFAULT_BASE_URL);
    }
}
