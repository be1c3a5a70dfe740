//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation. Path and threshold defaults live in the
//! config layer so a config file can supply them.

use clap::Parser;
use std::path::PathBuf;

/// Gradebook - student grade statistics from CSV records
///
/// Loads student records (name, age, grade, subject), prints a summary,
/// and writes a basic and a detailed text report.
///
/// Examples:
///   gradebook
///   gradebook --input data/students.csv --output out/report.txt
///   gradebook --threshold 85 --detailed-output out/detailed.txt
///   gradebook --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Student records CSV to analyze
    ///
    /// Default: from config or data/students.csv
    #[arg(short, long, value_name = "FILE", env = "GRADEBOOK_INPUT")]
    pub input: Option<PathBuf>,

    /// Output file path for the basic report
    ///
    /// Default: from config or output/analysis_report.txt
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output file path for the detailed report
    ///
    /// Default: from config or output/analysis_modular_report.txt
    #[arg(short, long, value_name = "FILE")]
    pub detailed_output: Option<PathBuf>,

    /// Minimum grade for the top performers listing
    ///
    /// Default: from config or 90
    #[arg(short, long, value_name = "GRADE")]
    pub threshold: Option<f64>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .gradebook.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only, no console summary)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .gradebook.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(threshold) = self.threshold {
            if !threshold.is_finite() {
                return Err("Threshold must be a finite number".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
