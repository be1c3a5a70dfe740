//! Plain-text report generation.
//!
//! This module renders the basic and detailed analysis reports from
//! loaded records and their [`Summary`], and saves them to disk.

use crate::error::{GradebookError, Result};
use crate::models::{StudentRecord, Summary};
use chrono::NaiveDateTime;
use std::fs;
use std::path::Path;
use tracing::debug;

const TOTAL_STUDENTS_PREFIX: &str = "Total students:";

/// Generate the compact report.
///
/// Lines are joined with `\n`; there is no trailing newline.
pub fn generate_basic_report(summary: &Summary) -> String {
    let mut lines = Vec::new();

    lines.push("Student Analysis Report".to_string());
    lines.push("=".repeat(30));
    lines.push(format!("{} {}", TOTAL_STUDENTS_PREFIX, summary.total));
    lines.push(format!("Average grade: {:.1}", summary.average_grade));
    lines.push(format!("Average age: {:.1}", summary.average_age));
    lines.push(format!(
        "Highest grade: {:.1} (by: {})",
        summary.highest_grade,
        summary.top_scorers_label()
    ));
    lines.push(format!("Math students: {}", summary.math_count));
    lines.push(String::new());
    lines.push("Counts by subject:".to_string());

    for (subject, count) in &summary.by_subject {
        lines.push(format!("  {}: {}", subject, count));
    }

    lines.join("\n")
}

/// Generate the comprehensive report with one block per record.
pub fn generate_detailed_report(
    records: &[StudentRecord],
    summary: &Summary,
    generated_at: NaiveDateTime,
) -> String {
    let mut output = String::new();

    output.push_str("COMPREHENSIVE STUDENT ANALYSIS REPORT\n");
    output.push_str(&"=".repeat(50));
    output.push_str("\n\n");

    output.push_str(&format!(
        "Report generated on: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));

    output.push_str(&generate_statistics_section(summary));
    output.push_str(&generate_distribution_section(summary));
    output.push_str(&generate_top_performers_section(summary));
    output.push_str(&generate_records_section(records));

    output
}

/// Generate the basic statistics block.
fn generate_statistics_section(summary: &Summary) -> String {
    let mut section = section_header("BASIC STATISTICS", 20);

    section.push_str(&format!("{} {}\n", TOTAL_STUDENTS_PREFIX, summary.total));
    section.push_str(&format!("Average grade: {:.1}\n", summary.average_grade));
    section.push_str(&format!("Highest grade: {:.1}\n", summary.highest_grade));
    section.push_str(&format!("Lowest grade: {:.1}\n", summary.lowest_grade));
    section.push_str(&format!("Grade range: {:.1}\n\n", summary.grade_range()));

    section
}

/// Generate the grade distribution block, bands in A to F order.
fn generate_distribution_section(summary: &Summary) -> String {
    let mut section = section_header("GRADE DISTRIBUTION", 20);

    for (band, count) in summary.distribution.iter() {
        section.push_str(&format!(
            "{}: {} students ({:.1}%)\n",
            band,
            count,
            summary.distribution.percentage(band, summary.total)
        ));
    }
    section.push('\n');

    section
}

/// Generate the top performers block.
fn generate_top_performers_section(summary: &Summary) -> String {
    let mut section = section_header(&format!("TOP PERFORMERS ({}+)", summary.threshold), 20);

    if summary.top_performers.is_empty() {
        section.push_str(&format!(
            "No students scored {} or above\n",
            summary.threshold
        ));
    } else {
        for student in &summary.top_performers {
            section.push_str(&format!(
                "{}: {:.1} ({})\n",
                student.name, student.grade, student.subject
            ));
        }
    }
    section.push('\n');

    section
}

/// Generate one block per record.
fn generate_records_section(records: &[StudentRecord]) -> String {
    let mut section = section_header("INDIVIDUAL STUDENT RECORDS", 30);

    for student in records {
        section.push_str(&format!("Name: {}\n", student.name));
        section.push_str(&format!("  Age: {}\n", student.age_label()));
        section.push_str(&format!("  Grade: {:.1}\n", student.grade));
        section.push_str(&format!("  Subject: {}\n\n", student.subject));
    }

    section
}

fn section_header(title: &str, rule_width: usize) -> String {
    format!("{}\n{}\n", title, "-".repeat(rule_width))
}

/// Read the student count back out of a rendered report.
pub fn parse_total_students(report: &str) -> Option<usize> {
    report
        .lines()
        .find_map(|line| line.strip_prefix(TOTAL_STUDENTS_PREFIX))
        .and_then(|rest| rest.trim().parse().ok())
}

/// Write a report to `path`, creating parent directories as needed.
pub fn save_report(content: &str, path: &Path) -> Result<()> {
    let write_failed = |source| GradebookError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_failed)?;
    }

    fs::write(path, content).map_err(write_failed)?;
    debug!("Wrote {} bytes to {}", content.len(), path.display());

    Ok(())
}
