//! End-to-end report assembly.
//!
//! Wires the pipeline together: filter engine -> walker -> size guard ->
//! renderer input. The caller (normally the CLI) passes a resolved
//! [`Config`] and receives the immutable [`Report`] plus a run summary;
//! writing to disk is the writer's job.

use crate::config::Config;
use crate::errors::ScribeError;
use crate::filter::FilterEngine;
use crate::guard::{read_content, FileContent};
use crate::output::{language_tag, Report, ReportFile};
use crate::tokens::count_tokens;
use crate::walker::{self, WalkError};

/// Counters and warnings surfaced to the caller at the end of a run.
#[derive(Debug)]
pub struct RunSummary {
    pub files_included: usize,
    pub files_skipped: usize,
    /// Content bytes embedded in the report (after truncation).
    pub content_bytes: u64,
    pub token_estimate: usize,
    pub warnings: Vec<String>,
}

/// A finished pipeline run.
#[derive(Debug)]
pub struct RunReport {
    pub report: Report,
    pub summary: RunSummary,
}

/// Run the whole pipeline for one configuration.
///
/// Fatal problems (bad source path, unusable ignore file) surface as
/// errors before any output is produced; recoverable ones end up in the
/// summary's warning list.
pub fn generate(config: &Config) -> Result<RunReport, ScribeError> {
    let filter = FilterEngine::new(config)?;

    let outcome = walker::scan(config, &filter).map_err(|err| match err {
        WalkError::NotFound { path } => ScribeError::SourceNotFound(path),
        WalkError::NotADirectory { path } => ScribeError::NotADirectory(path),
        other => ScribeError::Walk(other),
    })?;

    let max_bytes = config.max_size_bytes();
    let mut warnings = outcome.warnings;
    let mut files = Vec::new();
    let mut content_bytes = 0u64;
    let mut token_estimate = 0usize;

    for entry in outcome.root.files_in_order() {
        let content = read_content(&entry.path, max_bytes);
        match &content {
            FileContent::Binary => {
                warnings.push(format!(
                    "binary content omitted: {}",
                    entry.rel_path.display()
                ));
            }
            FileContent::Unreadable(message) => {
                warnings.push(format!("cannot read {}: {message}", entry.rel_path.display()));
            }
            FileContent::Full(_) | FileContent::Truncated { .. } => {}
        }

        content_bytes += content.bytes_embedded();
        if let Some(text) = content.as_text() {
            token_estimate += count_tokens(text);
        }

        files.push(ReportFile {
            rel_path: entry.rel_path.to_string_lossy().replace('\\', "/"),
            language: language_tag(entry.extension.as_deref()),
            content,
        });
    }

    let files_included = files.len();
    let summary = RunSummary {
        files_included,
        files_skipped: outcome.files_skipped,
        content_bytes,
        token_estimate,
        warnings,
    };

    Ok(RunReport {
        report: Report {
            root: config.source.clone(),
            tree: outcome.root,
            files,
        },
        summary,
    })
}
