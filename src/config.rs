//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the
//! moon-config.toml file: the default observing site and where the bundled
//! city list lives.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::Observer;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "moon-config.toml";

/// Errors that can occur while writing the configuration back to disk.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config serialization failed: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("config IO: {0}")]
    Io(#[from] std::io::Error),
}

/// Application configuration loaded from moon-config.toml
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Observing site used when no location is given on the command line
    pub observer: ObserverConfig,
    /// City search configuration
    pub gazetteer: GazetteerConfig,
}

/// Observing site configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ObserverConfig {
    /// Human-readable site name for reference
    pub name: String,
    /// Latitude in degrees, north positive
    pub latitude: f64,
    /// Longitude in degrees, east positive
    pub longitude: f64,
}

impl ObserverConfig {
    pub fn observer(&self) -> Observer {
        Observer::new(self.latitude, self.longitude)
    }
}

/// City list configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GazetteerConfig {
    /// Path to the JSON city list
    pub cities_path: String,
    /// Maximum number of matches returned by a search
    pub max_results: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            observer: ObserverConfig {
                name: "Portland, ME".to_string(),
                latitude: 43.6591,
                longitude: -70.2568,
            },
            gazetteer: GazetteerConfig {
                cities_path: "assets/cities_data.json".to_string(),
                max_results: 15,
            },
        }
    }
}

impl Config {
    /// Load configuration from moon-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    log::debug!("Loaded configuration for observer: {}", config.observer.name);
                    config
                }
                Err(e) => {
                    log::warn!("Invalid config file format: {}", e);
                    log::warn!("Using default configuration (Portland, ME)");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config file found, using default configuration (Portland, ME)");
                Self::default()
            }
        }
    }

    /// Save current configuration to the given path
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        log::info!("Configuration saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Save current configuration to moon-config.toml
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to_path(CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.observer.name, "Portland, ME");
        assert_eq!(config.observer.latitude, 43.6591);
        assert_eq!(config.observer.longitude, -70.2568);
        assert_eq!(config.gazetteer.max_results, 15);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        // Should fallback to default
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_file_falls_back() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "observer = 12").unwrap();
        assert_eq!(Config::load_from_path(file.path()), Config::default());
    }

    #[test]
    fn test_save_and_reload() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.observer = ObserverConfig {
            name: "Tromsø".to_string(),
            latitude: 69.6492,
            longitude: 18.9553,
        };
        config.save_to_path(file.path()).unwrap();

        let loaded = Config::load_from_path(file.path());
        assert_eq!(loaded.observer.observer(), Observer::new(69.6492, 18.9553));
        assert_eq!(loaded.observer.name, "Tromsø");
    }
}
