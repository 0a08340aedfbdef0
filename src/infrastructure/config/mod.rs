//! Board configuration, layered from defaults, an optional TOML file and
//! `TESTDESK_`-prefixed environment variables (later layers win).

use crate::domain::error::{AppError, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "TESTDESK_";
pub const DEFAULT_UNCLASSIFIED_ID: &str = "unclassified";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Page size used when no preference has been stored yet
    pub default_page_size: u32,
    /// Upper bound accepted by the board for page size changes
    pub max_page_size: u32,
    /// Scenario id given to rows without a tag
    pub unclassified_scenario_id: String,
    /// Display name of the unclassified scenario
    pub unclassified_scenario_name: String,
    /// `tracing_subscriber` filter directive
    pub log_filter: String,
    /// SQLite file backing the local test asset repository
    pub database_path: Option<PathBuf>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
            unclassified_scenario_id: DEFAULT_UNCLASSIFIED_ID.to_string(),
            unclassified_scenario_name: "Uncategorized".to_string(),
            log_filter: "info".to_string(),
            database_path: None,
        }
    }
}

impl BoardConfig {
    pub fn load(config_path: &Path) -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(BoardConfig::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed(ENV_PREFIX));
        Self::extract(figment)
    }

    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let figment =
            Figment::from(Serialized::defaults(BoardConfig::default())).merge(Toml::string(toml));
        Self::extract(figment)
    }

    fn extract(figment: Figment) -> Result<Self> {
        let config: BoardConfig = figment
            .extract()
            .map_err(|e| AppError::ConfigError(format!("Failed to load board config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_page_size == 0 {
            return Err(AppError::ConfigError(
                "max_page_size must be greater than zero.".to_string(),
            ));
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(AppError::ConfigError(format!(
                "default_page_size must be between 1 and {}.",
                self.max_page_size
            )));
        }
        if self.unclassified_scenario_id.trim().is_empty() {
            return Err(AppError::ConfigError(
                "unclassified_scenario_id must not be empty.".to_string(),
            ));
        }
        Ok(())
    }
}
