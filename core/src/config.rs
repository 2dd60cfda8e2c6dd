//! Handles the configuration of tyne.
//!
//! this module is responsible for parsing the Tyne.toml file and layering environment variables
//! and cli arguments on top of it.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use std::{path::PathBuf, str::FromStr};

pub static DEFAULT_CONFIG: &str = include_str!("../Tyne.toml");

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Settings for the search engine
    #[serde(default)]
    pub search: SearchSettings,
    /// Where the catalogue lives
    #[serde(default)]
    pub catalog: CatalogSettings,
    /// What level of logging to use.
    /// Default is "info".
    #[serde(default = "default_log_level")]
    #[serde(deserialize_with = "de_log_level")]
    pub log_level: log::LevelFilter,
}

impl Default for Settings {
    #[inline]
    fn default() -> Self {
        Self {
            search: SearchSettings::default(),
            catalog: CatalogSettings::default(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from the config file, environment variables, and CLI arguments.
    ///
    /// The environment variables are prefixed with `TYNE_`, e.g. `TYNE_LOG_LEVEL=debug`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the config file is not found or if the config file is
    /// invalid.
    #[inline]
    pub fn init(
        config: PathBuf,
        catalog: Option<PathBuf>,
        log_level: Option<log::LevelFilter>,
    ) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::from(config))
            .add_source(Environment::with_prefix("TYNE"))
            .build()?;

        let mut settings: Self = s.try_deserialize()?;

        settings.catalog.path = shellexpand::tilde(&settings.catalog.path.to_string_lossy())
            .into_owned()
            .into();

        if let Some(catalog) = catalog {
            settings.catalog.path = catalog;
        }

        if let Some(log_level) = log_level {
            settings.log_level = log_level;
        }

        Ok(settings)
    }

    /// Get the (default) path to the config file.
    /// If the config file does not exist at this path, it will be created with the default config.
    ///
    /// See [`crate::get_config_dir`] for more information about where this default path is located.
    ///
    /// # Errors
    ///
    /// This function will return an error if the system config directory (e.g., `~/.config` on linux) could not be found, or if the config file was missing and could not be created.
    #[inline]
    pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
        let config_dir = crate::get_config_dir()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir)?;
        }
        let config_file = config_dir.join("Tyne.toml");

        if !config_file.exists() {
            std::fs::write(&config_file, DEFAULT_CONFIG)?;
        }

        Ok(config_file)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct SearchSettings {
    /// How many of the closest results of each type make it into the top results.
    /// Default is 5.
    #[serde(default = "default_top_results_per_type")]
    pub top_results_per_type: usize,
}

const fn default_top_results_per_type() -> usize {
    5
}

impl Default for SearchSettings {
    #[inline]
    fn default() -> Self {
        Self {
            top_results_per_type: default_top_results_per_type(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct CatalogSettings {
    /// Path to the catalogue database.
    /// Defaults to `catalog.db` in the data directory, see [`crate::get_data_dir`].
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

fn default_catalog_path() -> PathBuf {
    crate::get_data_dir()
        .unwrap_or_else(|_| std::env::temp_dir().join("tyne"))
        .join("catalog.db")
}

impl Default for CatalogSettings {
    #[inline]
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn de_log_level<'de, D>(deserializer: D) -> Result<log::LevelFilter, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(log::LevelFilter::from_str(&s).unwrap_or_else(|_| default_log_level()))
}

const fn default_log_level() -> log::LevelFilter {
    log::LevelFilter::Info
}
