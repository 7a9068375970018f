use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::backend::extraction::DEFAULT_EXTRACTION_URL;
use crate::backend::generative::{DEFAULT_GENERATIVE_MODEL, DEFAULT_GENERATIVE_URL};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub generative: GenerativeConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Base URL of the attendance extraction service
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerativeConfig {
    /// API key for the generative backend; fallback stays disabled
    /// while unset
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Config::default();
            config.save()?;
            return Ok(config);
        }

        let contents = fs::read_to_string(&config_path)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents)
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(&config_path, toml_string)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .context("Could not determine home directory")?;

        Ok(home.join(".aura").join("config.toml"))
    }

    /// Extraction base URL, falling back to the hosted service
    pub fn extraction_url(&self) -> &str {
        self.extraction
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_EXTRACTION_URL)
    }

    pub fn generative_url(&self) -> &str {
        self.generative
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_GENERATIVE_URL)
    }

    pub fn generative_model(&self) -> &str {
        self.generative
            .model
            .as_deref()
            .unwrap_or(DEFAULT_GENERATIVE_MODEL)
    }

    pub fn api_key(&self) -> Option<&str> {
        self.generative.api_key.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_urls() {
        let config = Config::default();
        assert_eq!(config.extraction_url(), DEFAULT_EXTRACTION_URL);
        assert_eq!(config.generative_url(), DEFAULT_GENERATIVE_URL);
        assert_eq!(config.generative_model(), DEFAULT_GENERATIVE_MODEL);
        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut config = Config::default();
        config.generative.api_key = Some("test-key".to_string());
        config.extraction.base_url = Some("http://localhost:9000".to_string());

        let toml_string = toml::to_string(&config).unwrap();
        assert!(toml_string.contains("test-key"));

        let deserialized: Config = toml::from_str(&toml_string).unwrap();
        assert_eq!(deserialized.api_key(), Some("test-key"));
        assert_eq!(deserialized.extraction_url(), "http://localhost:9000");
    }

    #[test]
    fn test_partial_config_parses() {
        let config: Config = toml::from_str("[generative]\nmodel = \"gemini-2.0-flash\"\n").unwrap();
        assert_eq!(config.generative_model(), "gemini-2.0-flash");
        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_config_file_roundtrip() {
        // Exercise the same read/parse path as load() without touching
        // the real home directory
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.generative.api_key = Some("abc".to_string());
        fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let loaded: Config = toml::from_str(&contents).unwrap();
        assert_eq!(loaded.api_key(), Some("abc"));
    }
}
