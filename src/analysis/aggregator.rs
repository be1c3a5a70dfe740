//! Grade aggregation and statistics.
//!
//! This module provides pure functions computing summary statistics
//! over a slice of student records. Nothing here performs I/O.

use crate::models::{GradeDistribution, StudentRecord};
use std::collections::BTreeMap;

/// Label used for records whose subject is empty.
pub const UNKNOWN_SUBJECT: &str = "Unknown";

/// Mean grade over all records, `0.0` when empty.
///
/// Grades that defaulted to `0.0` while loading count like any other grade.
pub fn average_grade(records: &[StudentRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }

    let sum: f64 = records.iter().map(|r| r.grade).sum();
    sum / records.len() as f64
}

/// Mean age over records that have an age, `0.0` when none do.
pub fn average_age(records: &[StudentRecord]) -> f64 {
    let ages: Vec<i64> = records.iter().filter_map(|r| r.age).collect();

    if ages.is_empty() {
        return 0.0;
    }

    let sum: f64 = ages.iter().map(|&a| a as f64).sum();
    sum / ages.len() as f64
}

/// Count records whose subject equals `subject`, ignoring case and surrounding whitespace.
pub fn count_by_subject(records: &[StudentRecord], subject: &str) -> usize {
    let wanted = subject.trim().to_lowercase();

    records
        .iter()
        .filter(|r| r.subject.trim().to_lowercase() == wanted)
        .count()
}

/// Highest grade, `0.0` when empty.
pub fn highest_grade(records: &[StudentRecord]) -> f64 {
    records
        .iter()
        .map(|r| r.grade)
        .reduce(f64::max)
        .unwrap_or(0.0)
}

/// Lowest grade, `0.0` when empty.
pub fn lowest_grade(records: &[StudentRecord]) -> f64 {
    records
        .iter()
        .map(|r| r.grade)
        .reduce(f64::min)
        .unwrap_or(0.0)
}

/// Names of every record tied at the highest grade, in input order.
pub fn top_scorer_names(records: &[StudentRecord]) -> Vec<String> {
    if records.is_empty() {
        return Vec::new();
    }

    let highest = highest_grade(records);
    records
        .iter()
        .filter(|r| r.grade == highest)
        .map(|r| r.name.clone())
        .collect()
}

/// Records with a grade at or above `threshold`, in input order.
pub fn top_performers(records: &[StudentRecord], threshold: f64) -> Vec<&StudentRecord> {
    records.iter().filter(|r| r.grade >= threshold).collect()
}

/// Count records in each grade band.
pub fn grade_bands(records: &[StudentRecord]) -> GradeDistribution {
    let mut dist = GradeDistribution::default();

    for record in records {
        dist.add(record.grade);
    }

    dist
}

/// Count records by subject.
///
/// Blank subjects are counted under [`UNKNOWN_SUBJECT`]. Keys iterate alphabetically.
pub fn subject_counts(records: &[StudentRecord]) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();

    for record in records {
        let subject = record.subject.trim();
        let label = if subject.is_empty() {
            UNKNOWN_SUBJECT
        } else {
            subject
        };
        *counts.entry(label.to_string()).or_default() += 1;
    }

    counts
}
