//! Student record loader.
//!
//! Reads a comma-delimited file whose first non-blank line is a header
//! and turns each remaining line into a [`StudentRecord`]. Malformed
//! fields degrade to defaults instead of failing the load.

use crate::error::{GradebookError, Result};
use crate::models::StudentRecord;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// Minimum number of comma-separated fields in a data line.
const MIN_FIELDS: usize = 4;

/// Load all student records from `path`.
///
/// A missing file is an error; it never yields an empty list.
pub fn load_students(path: &Path) -> Result<Vec<StudentRecord>> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => GradebookError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => GradebookError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let students = parse_students(&content);
    info!("Loaded {} students from {}", students.len(), path.display());

    Ok(students)
}

/// Parse records from the full text of an input file.
///
/// Blank lines are dropped, then the first remaining line is skipped as
/// the header. Lines with fewer than four fields are skipped silently.
pub fn parse_students(content: &str) -> Vec<StudentRecord> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .skip(1)
        .filter_map(|line| {
            let record = parse_line(line);
            if record.is_none() {
                debug!("Skipping malformed line: {}", line);
            }
            record
        })
        .collect()
}

/// Parse one data line. Returns `None` when it has too few fields.
fn parse_line(line: &str) -> Option<StudentRecord> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() < MIN_FIELDS {
        return None;
    }

    Some(StudentRecord::new(
        parts[0],
        parse_age(parts[1]),
        parse_grade(parts[2]),
        parts[3],
    ))
}

fn parse_age(field: &str) -> Option<i64> {
    field.parse::<i64>().ok()
}

fn parse_grade(field: &str) -> f64 {
    field.parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_basic_file() {
        let content = "name,age,grade,subject\n\
                       Alice,20,88.5,Math\n\
                       Bob,22,91,Science\n";

        let students = parse_students(content);
        assert_eq!(students.len(), 2);
        assert_eq!(students[0], StudentRecord::new("Alice", Some(20), 88.5, "Math"));
        assert_eq!(students[1], StudentRecord::new("Bob", Some(22), 91.0, "Science"));
    }

    #[test]
    fn test_header_only() {
        assert!(parse_students("name,age,grade,subject\n").is_empty());
        assert!(parse_students("").is_empty());
        assert!(parse_students("\n   \n").is_empty());
    }

    #[test]
    fn test_blank_lines_before_header() {
        let content = "\n  \nname,age,grade,subject\n\nAlice,20,88,Math\n\n";
        let students = parse_students(content);
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].name, "Alice");
    }

    #[test]
    fn test_short_line_dropped() {
        let content = "name,age,grade,subject\n\
                       Alice,20,88,Math\n\
                       Broken,21,70\n\
                       Cara,19,75,Art\n";

        let students = parse_students(content);
        let names: Vec<_> = students.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Cara"]);
    }

    #[test]
    fn test_fields_trimmed_and_extras_ignored() {
        let content = "header\n  Alice ,  20 , 88.5 ,  Math  , extra, more\n";
        let students = parse_students(content);
        assert_eq!(students, vec![StudentRecord::new("Alice", Some(20), 88.5, "Math")]);
    }

    #[test]
    fn test_bad_numbers_degrade() {
        let content = "header\nAlice,twenty,abc,Math\nBob,21.5,,Art\n";
        let students = parse_students(content);

        assert_eq!(students.len(), 2);
        assert_eq!(students[0].age, None);
        assert_eq!(students[0].grade, 0.0);
        assert_eq!(students[1].age, None);
        assert_eq!(students[1].grade, 0.0);
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "name,age,grade,subject\r\nAlice,20,90,Math\r\n";
        let students = parse_students(content);
        assert_eq!(students, vec![StudentRecord::new("Alice", Some(20), 90.0, "Math")]);
    }

    #[test]
    fn test_load_students_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("students.csv");
        std::fs::write(&path, "name,age,grade,subject\nAlice,20,88,Math\n").unwrap();

        let students = load_students(&path).unwrap();
        assert_eq!(students.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.csv");

        let err = load_students(&path).unwrap_err();
        assert!(matches!(err, GradebookError::InputNotFound { .. }));
    }

    #[test]
    fn test_load_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("binary.csv");
        std::fs::write(&path, b"h\n\xff\xfe,1,2,3\n").unwrap();

        let err = load_students(&path).unwrap_err();
        assert!(matches!(err, GradebookError::ReadFailed { .. }));
    }
}
