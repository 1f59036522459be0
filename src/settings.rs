use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::api::BetMode;

pub const DEFAULT_CONFIG_FILE: &str = "sportsbook.toml";
pub const ENV_PREFIX: &str = "SPORTSBOOK";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub log_level: String,
    pub catalog_path: Option<PathBuf>,
    pub sample_history: bool,
    pub default_mode: BetMode,
}

impl Settings {
    /// Defaults, then the config file if it exists, then `SPORTSBOOK_*`
    /// environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };
        Config::builder()
            .set_default("log_level", "info")?
            .set_default("sample_history", true)?
            .set_default("default_mode", "straight")?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            catalog_path: None,
            sample_history: true,
            default_mode: BetMode::Straight,
        }
    }
}
