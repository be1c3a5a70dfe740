//! Error types for loading student records and saving reports.
//!
//! Load failures are fatal to report generation; write failures are
//! returned to the caller so a failed report does not stop the run.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GradebookError {
    #[error("File not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report to {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, GradebookError>;
