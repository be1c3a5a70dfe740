//! Data models for the grade analyzer.
//!
//! This module contains the core data structures used throughout
//! the application for representing student records, grade bands,
//! and the summary computed over a set of records.

use crate::analysis;
use std::collections::BTreeMap;
use std::fmt;

/// Subject compared against for the "Math students" count.
pub const MATH_SUBJECT: &str = "math";

/// Default minimum grade for a top performer.
pub const DEFAULT_TOP_THRESHOLD: f64 = 90.0;

/// One parsed line of the input file.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    /// Student name, trimmed.
    pub name: String,
    /// Age in years; `None` when the source field was not an integer.
    pub age: Option<i64>,
    /// Grade; `0.0` when the source field was not a number.
    pub grade: f64,
    /// Subject, trimmed. May be empty.
    pub subject: String,
}

impl StudentRecord {
    pub fn new(
        name: impl Into<String>,
        age: Option<i64>,
        grade: f64,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            age,
            grade,
            subject: subject.into(),
        }
    }

    /// Returns the age for display, or `N/A` when absent.
    pub fn age_label(&self) -> String {
        match self.age {
            Some(age) => age.to_string(),
            None => "N/A".to_string(),
        }
    }
}

/// Fixed grade band used for distribution reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GradeBand {
    A,
    B,
    C,
    D,
    F,
}

impl GradeBand {
    /// All bands in report order.
    pub const ALL: [GradeBand; 5] = [
        GradeBand::A,
        GradeBand::B,
        GradeBand::C,
        GradeBand::D,
        GradeBand::F,
    ];

    /// Classify a grade using inclusive lower bounds of 90, 80, 70 and 60.
    ///
    /// Anything below 60, including NaN, falls into `F`.
    pub fn from_grade(grade: f64) -> Self {
        if grade >= 90.0 {
            GradeBand::A
        } else if grade >= 80.0 {
            GradeBand::B
        } else if grade >= 70.0 {
            GradeBand::C
        } else if grade >= 60.0 {
            GradeBand::D
        } else {
            GradeBand::F
        }
    }

    /// Position of the band in `ALL`.
    pub fn index(&self) -> usize {
        match self {
            GradeBand::A => 0,
            GradeBand::B => 1,
            GradeBand::C => 2,
            GradeBand::D => 3,
            GradeBand::F => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GradeBand::A => "A (90-100)",
            GradeBand::B => "B (80-89)",
            GradeBand::C => "C (70-79)",
            GradeBand::D => "D (60-69)",
            GradeBand::F => "F (0-59)",
        }
    }
}

impl fmt::Display for GradeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-band record counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GradeDistribution {
    counts: [usize; 5],
}

impl GradeDistribution {
    /// Record one grade in its band.
    pub fn add(&mut self, grade: f64) {
        self.counts[GradeBand::from_grade(grade).index()] += 1;
    }

    pub fn count(&self, band: GradeBand) -> usize {
        self.counts[band.index()]
    }

    /// Sum over all five bands.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Share of `total` in the band, as a percentage. `0.0` when `total` is zero.
    pub fn percentage(&self, band: GradeBand, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (self.count(band) as f64 / total as f64) * 100.0
        }
    }

    /// Bands and counts in report order.
    pub fn iter(&self) -> impl Iterator<Item = (GradeBand, usize)> + '_ {
        GradeBand::ALL
            .into_iter()
            .map(move |band| (band, self.count(band)))
    }
}

/// Statistics derived from a set of records.
///
/// Recomputed from the records on every report; nothing is cached.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Number of records.
    pub total: usize,
    /// Mean grade over all records.
    pub average_grade: f64,
    /// Mean age over records with a present age.
    pub average_age: f64,
    /// Records whose subject is math, ignoring case and surrounding spaces.
    pub math_count: usize,
    /// Highest grade, `0.0` when there are no records.
    pub highest_grade: f64,
    /// Lowest grade, `0.0` when there are no records.
    pub lowest_grade: f64,
    /// Names tied at the highest grade, in input order.
    pub top_scorers: Vec<String>,
    /// Record counts keyed by subject label, alphabetical.
    pub by_subject: BTreeMap<String, usize>,
    /// Record counts by grade band.
    pub distribution: GradeDistribution,
    /// Threshold used for `top_performers`.
    pub threshold: f64,
    /// Records with a grade at or above `threshold`, in input order.
    pub top_performers: Vec<StudentRecord>,
}

impl Summary {
    /// Compute every statistic over `records`.
    pub fn from_records(records: &[StudentRecord], threshold: f64) -> Self {
        Self {
            total: records.len(),
            average_grade: analysis::average_grade(records),
            average_age: analysis::average_age(records),
            math_count: analysis::count_by_subject(records, MATH_SUBJECT),
            highest_grade: analysis::highest_grade(records),
            lowest_grade: analysis::lowest_grade(records),
            top_scorers: analysis::top_scorer_names(records),
            by_subject: analysis::subject_counts(records),
            distribution: analysis::grade_bands(records),
            threshold,
            top_performers: analysis::top_performers(records, threshold)
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    /// Difference between the highest and lowest grade.
    pub fn grade_range(&self) -> f64 {
        self.highest_grade - self.lowest_grade
    }

    /// Tied top scorers joined with `", "`, or `N/A` when there are none.
    pub fn top_scorers_label(&self) -> String {
        if self.top_scorers.is_empty() {
            "N/A".to_string()
        } else {
            self.top_scorers.join(", ")
        }
    }
}
