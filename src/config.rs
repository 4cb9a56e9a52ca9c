// src/config.rs
//! Configuration loading for fsfolder.
//!
//! Looked up in `./fsfolder.toml`, then `<config dir>/fsfolder/config.toml`;
//! missing files mean defaults.

use crate::error::ConfigError;
use crate::fields::{FieldSet, Protocol};
use crate::sort::{Direction, SortStack};
use crate::utils::formatter::{is_valid_pattern, DEFAULT_DATETIME_FORMAT};
use crate::utils::DateFormat;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub browser: BrowserConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// chrono strftime pattern for datetime columns
    pub datetime_format: String,
    /// Render datetimes in UTC instead of local time
    pub utc: bool,
    /// List dot-files
    pub show_hidden: bool,
    /// Optional columns hidden at startup
    pub hidden_fields: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// "default", "webdav" or "msgd"
    pub protocol: String,
    /// Criteria applied at startup, primary first
    pub default_sort: Vec<SortSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
            utc: false,
            show_hidden: false,
            hidden_fields: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig { enabled: false, level: "info".to_string(), file: None }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config: Config = toml::from_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        config.validate()?;
        Ok(config)
    }

    fn find_config_file() -> Option<PathBuf> {
        let local = PathBuf::from("fsfolder.toml");
        if local.exists() {
            return Some(local);
        }
        let global = dirs::config_dir()?.join("fsfolder").join("config.toml");
        global.exists().then_some(global)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_pattern(&self.display.datetime_format) {
            return Err(ConfigError::Invalid(format!(
                "invalid datetime_format '{}'",
                self.display.datetime_format
            )));
        }
        self.protocol()?;
        if self.logging.level.parse::<log::LevelFilter>().is_err() {
            return Err(ConfigError::Invalid(format!("unknown log level '{}'", self.logging.level)));
        }
        Ok(())
    }

    pub fn protocol(&self) -> Result<Protocol, ConfigError> {
        self.browser.protocol.parse().map_err(ConfigError::Invalid)
    }

    pub fn date_format(&self) -> DateFormat {
        DateFormat { pattern: self.display.datetime_format.clone(), utc: self.display.utc }
    }

    /// Startup sort stack. Unknown fields are skipped; a repeated field keeps
    /// its first position and direction.
    pub fn initial_sort(&self, fields: &FieldSet) -> SortStack {
        let mut seen = HashSet::new();
        let specs: Vec<_> = self
            .browser
            .default_sort
            .iter()
            .filter(|spec| {
                let first = seen.insert(spec.field.as_str());
                if !first {
                    log::warn!("default_sort repeats field '{}'", spec.field);
                }
                first
            })
            .collect();

        let mut stack = SortStack::new();
        for spec in specs.into_iter().rev() {
            let Some(field) = fields.get(&spec.field) else {
                log::warn!("default_sort names unknown field '{}'", spec.field);
                continue;
            };
            stack.toggle(field);
            if spec.direction == Direction::Descending {
                stack.toggle(field);
            }
        }
        stack
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.logging
            .file
            .clone()
            .or_else(|| dirs::cache_dir().map(|d| d.join("fsfolder").join("fsfolder.log")))
    }
}
