use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;
use serde::Deserialize;

use crate::libs::constants::{
    APP_DIR_NAME, CONFIG_FILENAME, DEFAULT_SLOW_CATEGORY, DEFAULT_SLOW_CATEGORY_DELAY_MS,
    DEFAULT_TRENDING_LIMIT, STORAGE_FILENAME,
};
use crate::libs::error::{AnyResult, PetflixError};

/**
 * Application settings, read from `<config dir>/petflix/config.toml`.
 * Every field is optional in the file.
 */
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Load the catalog from this JSON document instead of the bundled one
    pub dataset_path: Option<PathBuf>,
    /// Where favorites are persisted
    pub storage_path: Option<PathBuf>,
    pub slow_category: String,
    pub slow_category_delay_ms: u64,
    pub trending_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dataset_path: None,
            storage_path: None,
            slow_category: DEFAULT_SLOW_CATEGORY.to_string(),
            slow_category_delay_ms: DEFAULT_SLOW_CATEGORY_DELAY_MS,
            trending_limit: DEFAULT_TRENDING_LIMIT,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME))
    }

    pub fn data_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME))
    }

    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(CONFIG_FILENAME))
    }

    /// Load the config from the default location, falling back to defaults
    pub fn load_default() -> AnyResult<Config> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Config::default()),
        }
    }

    /// A missing file means defaults, an invalid one is an error
    pub fn load(path: &Path) -> AnyResult<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        info!("Loading config: {:?}", path);
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;

        Ok(config)
    }

    pub fn slow_category_delay(&self) -> Duration {
        Duration::from_millis(self.slow_category_delay_ms)
    }

    pub fn resolved_storage_path(&self) -> AnyResult<PathBuf> {
        self.storage_path
            .clone()
            .or_else(|| Self::data_dir().map(|dir| dir.join(STORAGE_FILENAME)))
            .ok_or_else(|| PetflixError::Config("could not determine the data directory".into()))
    }
}
