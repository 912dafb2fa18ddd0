//! Error types for codescribe.

use std::path::PathBuf;

use crate::filter::FilterError;
use crate::walker::WalkError;

/// Top-level error type for codescribe operations.
#[derive(Debug, thiserror::Error)]
pub enum ScribeError {
    #[error("source not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("source is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("walk error: {0}")]
    Walk(#[from] WalkError),

    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{written} of {requested} output files written; the rest failed")]
    PartialWrite { written: usize, requested: usize },
}

/// Map an error to its exit code.
pub fn exit_code(error: &ScribeError) -> i32 {
    match error {
        ScribeError::SourceNotFound(_) => 3,
        ScribeError::NotADirectory(_) => 3,
        ScribeError::Filter(_) => 4,
        ScribeError::Walk(_) => 2,
        ScribeError::Write { .. } => 5,
        ScribeError::PartialWrite { .. } => 6,
        ScribeError::Io(_) => 1,
    }
}
