//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.gradebook.toml` files.

use crate::models::DEFAULT_TOP_THRESHOLD;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".gradebook.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Input and output locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// File locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Student records CSV.
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Destination of the basic report.
    #[serde(default = "default_basic_report")]
    pub basic_report: PathBuf,

    /// Destination of the detailed report.
    #[serde(default = "default_detailed_report")]
    pub detailed_report: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            basic_report: default_basic_report(),
            detailed_report: default_detailed_report(),
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from("data/students.csv")
}

fn default_basic_report() -> PathBuf {
    PathBuf::from("output/analysis_report.txt")
}

fn default_detailed_report() -> PathBuf {
    PathBuf::from("output/analysis_modular_report.txt")
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Minimum grade listed under top performers.
    #[serde(default = "default_top_threshold")]
    pub top_threshold: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_threshold: default_top_threshold(),
        }
    }
}

fn default_top_threshold() -> f64 {
    DEFAULT_TOP_THRESHOLD
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// Only values given explicitly on the command line override the file.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref input) = args.input {
            self.paths.input = input.clone();
        }
        if let Some(ref output) = args.output {
            self.paths.basic_report = output.clone();
        }
        if let Some(ref detailed) = args.detailed_output {
            self.paths.detailed_report = detailed.clone();
        }
        if let Some(threshold) = args.threshold {
            self.report.top_threshold = threshold;
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
