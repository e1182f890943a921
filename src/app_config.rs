use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::encoding::DEFAULT_DETECTION_WINDOW;
use crate::errors::EncodingError;

/// Application configuration module
/// This module handles loading, validating and saving the importer settings
/// used by the command line front-end.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Encoding hint applied to every input; detection runs when unset
    #[serde(default)]
    pub encoding: Option<String>,

    /// Leading bytes handed to the encoding detector
    #[serde(default = "default_detection_window_bytes")]
    pub detection_window_bytes: usize,

    /// SQLite database used by `store`; platform data dir when unset
    #[serde(default)]
    pub database_path: Option<String>,

    /// Pretty-print JSON output
    #[serde(default = "default_true")]
    pub pretty_json: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_detection_window_bytes() -> usize {
    DEFAULT_DETECTION_WINDOW
}

fn default_true() -> bool {
    true
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching `log` filter
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if let Some(encoding) = &self.encoding {
            if encoding != "UTF-8" {
                EncodingError::check_supported(&encoding.trim().to_uppercase())
                    .map_err(|e| anyhow!("Invalid encoding in config: {}", e))?;
            }
        }

        if self.detection_window_bytes == 0 {
            return Err(anyhow!("detection_window_bytes must be greater than zero"));
        }

        if let Some(path) = &self.database_path {
            if path.trim().is_empty() {
                return Err(anyhow!("database_path must not be empty when set"));
            }
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            encoding: None,
            detection_window_bytes: default_detection_window_bytes(),
            database_path: None,
            pretty_json: true,
            log_level: LogLevel::default(),
        }
    }
}
