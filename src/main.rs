//! Gradebook - student grade statistics from CSV records
//!
//! A CLI tool that loads student records, prints summary statistics,
//! and writes a basic and a detailed plain-text report.
//!
//! Exit codes:
//!   0 - Success (a failed report write is reported but not fatal)
//!   1 - Invalid arguments, unreadable config, or input could not be loaded

mod analysis;
mod cli;
mod config;
mod error;
mod loader;
mod models;
mod report;

use anyhow::{Context, Result};
use chrono::Local;
use cli::Args;
use config::{Config, DEFAULT_CONFIG_FILE};
use models::{StudentRecord, Summary};
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    let mut config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(&args, &config);

    info!("Gradebook v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Config: {:?}", config);

    match run_analysis(&config, args.quiet) {
        Ok(failed_writes) => {
            if failed_writes > 0 {
                warn!("{} report(s) could not be written", failed_writes);
            }
            Ok(())
        }
        Err(e) => {
            error!("Analysis failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .gradebook.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", DEFAULT_CONFIG_FILE);
    println!("   Edit it to customize input and report paths and the top performer threshold.");
    Ok(())
}

/// Initialize logging. `RUST_LOG` takes precedence over the flags.
fn init_logging(args: &Args, config: &Config) {
    let level = if config.general.verbose && !args.quiet {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("gradebook={}", level.to_string().to_lowercase()))
    });

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    Ok(Config::load_default()?.unwrap_or_default())
}

/// Load, summarize, and write both reports.
///
/// Only a load failure is returned as an error; report writes are
/// reported and the run continues. Returns the number of failed writes.
fn run_analysis(config: &Config, quiet: bool) -> Result<usize> {
    let input = &config.paths.input;
    let threshold = config.report.top_threshold;

    let records = loader::load_students(input)?;
    let summary = Summary::from_records(&records, threshold);
    debug!(
        "Grade bands cover {} of {} records",
        summary.distribution.total(),
        summary.total
    );

    if records.is_empty() {
        warn!("No records found in {}", input.display());
        if !quiet {
            println!("No data loaded. Please check {}", input.display());
        }
    } else if !quiet {
        print_summary(&summary);
    }

    let mut failed_writes = 0;

    if !write_detailed_report(&records, &summary, &config.paths.detailed_report, quiet) {
        failed_writes += 1;
    }

    let basic = report::generate_basic_report(&summary);
    if save_or_report(&basic, &config.paths.basic_report) {
        if !quiet {
            println!(
                "📝 Report written to {}",
                config.paths.basic_report.display()
            );
        }
    } else {
        failed_writes += 1;
    }

    if !quiet {
        if failed_writes == 0 {
            println!("\n✅ Analysis complete!");
        } else {
            println!(
                "\n⚠️  Analysis complete with {} failed report write(s)",
                failed_writes
            );
        }
    }

    Ok(failed_writes)
}

/// Print the console summary.
fn print_summary(summary: &Summary) {
    println!("📊 Student Grade Analysis");
    println!("{}", "=".repeat(45));
    println!("Loaded {} students", summary.total);
    println!("Average grade: {:.1}", summary.average_grade);
    println!("Highest grade: {:.1}", summary.highest_grade);

    println!("\nGrade Distribution:");
    for (band, count) in summary.distribution.iter() {
        println!(
            "{}: {} students ({:.1}%)",
            band,
            count,
            summary.distribution.percentage(band, summary.total)
        );
    }

    println!(
        "\nTop Performers ({}+): {} students",
        summary.threshold,
        summary.top_performers.len()
    );
    for student in &summary.top_performers {
        println!(
            "  {}: {:.1} ({})",
            student.name, student.grade, student.subject
        );
    }
}

/// Render and save the detailed report. Skipped when there are no records.
///
/// Returns `false` only when the write was attempted and failed.
fn write_detailed_report(
    records: &[StudentRecord],
    summary: &Summary,
    path: &Path,
    quiet: bool,
) -> bool {
    if records.is_empty() {
        if !quiet {
            println!("No data to analyze");
        }
        return true;
    }

    let content =
        report::generate_detailed_report(records, summary, Local::now().naive_local());

    if !save_or_report(&content, path) {
        return false;
    }

    if !quiet {
        let listed = report::parse_total_students(&content).unwrap_or(0);
        println!(
            "📝 Detailed report saved to {} ({} students)",
            path.display(),
            listed
        );
    }
    true
}

/// Save a report, returning whether the write succeeded.
fn save_or_report(content: &str, path: &Path) -> bool {
    match report::save_report(content, path) {
        Ok(()) => {
            info!("Saved report to {}", path.display());
            true
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("Error generating report: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GradebookError;
    use tempfile::TempDir;

    fn make_config(temp_dir: &TempDir, csv: &str) -> Config {
        let input = temp_dir.path().join("students.csv");
        std::fs::write(&input, csv).unwrap();

        let mut config = Config::default();
        config.paths.input = input;
        config.paths.basic_report = temp_dir.path().join("out/basic.txt");
        config.paths.detailed_report = temp_dir.path().join("out/detailed.txt");
        config
    }

    #[test]
    fn test_run_writes_both_reports() {
        let temp_dir = TempDir::new().unwrap();
        let config = make_config(
            &temp_dir,
            "name,age,grade,subject\nAlice,20,95,Math\nBob,21,70,Art\n",
        );

        let failed = run_analysis(&config, true).unwrap();
        assert_eq!(failed, 0);

        let detailed = std::fs::read_to_string(&config.paths.detailed_report).unwrap();
        assert_eq!(report::parse_total_students(&detailed), Some(2));
        let basic = std::fs::read_to_string(&config.paths.basic_report).unwrap();
        assert!(basic.contains("Math students: 1"));
    }

    #[test]
    fn test_run_header_only_skips_detailed_report() {
        let temp_dir = TempDir::new().unwrap();
        let config = make_config(&temp_dir, "name,age,grade,subject\n");

        let failed = run_analysis(&config, true).unwrap();
        assert_eq!(failed, 0);

        assert!(!config.paths.detailed_report.exists());
        let basic = std::fs::read_to_string(&config.paths.basic_report).unwrap();
        assert!(basic.contains("Total students: 0"));
    }

    #[test]
    fn test_run_continues_after_write_failure() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = make_config(&temp_dir, "name,age,grade,subject\nAlice,20,95,Math\n");
        // An existing directory cannot be written as a file.
        config.paths.detailed_report = temp_dir.path().to_path_buf();

        let failed = run_analysis(&config, true).unwrap();
        assert_eq!(failed, 1);
        assert!(config.paths.basic_report.exists());
    }

    #[test]
    fn test_run_counts_every_failed_write() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = make_config(&temp_dir, "name,age,grade,subject\nAlice,20,95,Math\n");
        config.paths.detailed_report = temp_dir.path().to_path_buf();
        config.paths.basic_report = temp_dir.path().to_path_buf();

        assert_eq!(run_analysis(&config, true).unwrap(), 2);
    }

    #[test]
    fn test_run_missing_input_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.paths.input = temp_dir.path().join("missing.csv");
        config.paths.basic_report = temp_dir.path().join("basic.txt");

        let err = run_analysis(&config, true).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GradebookError>(),
            Some(GradebookError::InputNotFound { .. })
        ));
        assert!(!config.paths.basic_report.exists());
    }
}
