//! Report persistence.
//!
//! Appends the format extension to the configured base name and writes
//! each requested document. Every write goes to a `.tmp` sibling first and
//! is renamed into place, so a failed write never leaves a truncated
//! report behind. One target failing does not stop the other target.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::ScribeError;

/// One successfully written output file.
#[derive(Debug)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub bytes: u64,
}

/// Result of writing all requested targets.
#[derive(Debug)]
pub struct WriteOutcome {
    pub written: Vec<WrittenFile>,
    pub failures: Vec<(PathBuf, std::io::Error)>,
}

impl WriteOutcome {
    /// Total bytes persisted across targets.
    pub fn bytes_written(&self) -> u64 {
        self.written.iter().map(|w| w.bytes).sum()
    }

    /// Collapse into the run result per the error taxonomy: every target
    /// failing is fatal, a partial failure is reported as such.
    pub fn into_result(self) -> Result<Vec<WrittenFile>, ScribeError> {
        if self.failures.is_empty() {
            return Ok(self.written);
        }
        let requested = self.written.len() + self.failures.len();
        if self.written.is_empty() {
            if let Some((path, source)) = self.failures.into_iter().next() {
                return Err(ScribeError::Write { path, source });
            }
        }
        Err(ScribeError::PartialWrite {
            written: self.written.len(),
            requested,
        })
    }
}

/// Write the rendered document(s) next to the current working directory
/// (or wherever `output_base` points), one file per requested format.
pub fn write_reports(
    markdown: Option<&str>,
    text: Option<&str>,
    output_base: &str,
) -> WriteOutcome {
    let mut outcome = WriteOutcome {
        written: Vec::new(),
        failures: Vec::new(),
    };

    let targets = [
        markdown.map(|doc| (PathBuf::from(format!("{output_base}.md")), doc)),
        text.map(|doc| (PathBuf::from(format!("{output_base}.txt")), doc)),
    ];

    for (path, doc) in targets.into_iter().flatten() {
        match write_atomic(&path, doc) {
            Ok(()) => outcome.written.push(WrittenFile {
                bytes: doc.len() as u64,
                path,
            }),
            Err(err) => {
                log::error!("failed to write {}: {err}", path.display());
                outcome.failures.push((path, err));
            }
        }
    }

    outcome
}

fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let tmp = PathBuf::from(format!("{}.tmp", path.display()));
    fs::write(&tmp, contents)?;
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }
    Ok(())
}
