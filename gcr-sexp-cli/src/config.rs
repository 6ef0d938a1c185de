//! Configuration management

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Nesting cap applied unless the config file sets another
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// How `parse` prints an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Single-line canonical text, raw atom bytes
    Canonical,
    /// One element per line, non-printable atoms as #hex#
    Pretty,
    /// Nested JSON arrays of atom strings
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Default output format
    #[serde(default = "default_output_format")]
    pub default_format: OutputFormat,

    /// Maximum nesting depth accepted when parsing
    #[serde(default = "default_max_depth")]
    pub max_depth: Option<usize>,

    /// Strip whitespace around file contents before parsing
    #[serde(default = "default_true")]
    pub trim_input: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            default_format: default_output_format(),
            max_depth: default_max_depth(),
            trim_input: default_true(),
        }
    }
}

impl CliConfig {
    /// Load configuration from file
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path.to_owned(),
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: CliConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        Ok(config)
    }

    /// Save configuration to file
    #[allow(dead_code)]
    pub fn save(&self, config_path: Option<&Path>) -> Result<()> {
        let config_path = match config_path {
            Some(path) => path.to_owned(),
            None => Self::default_config_path()?,
        };

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    /// Get default configuration file path
    fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Cannot determine config directory")?;

        Ok(config_dir.join("gcr-sexp").join("config.toml"))
    }
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Canonical
}

fn default_max_depth() -> Option<usize> {
    Some(DEFAULT_MAX_DEPTH)
}

fn default_true() -> bool {
    true
}
