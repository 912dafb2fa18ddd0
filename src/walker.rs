//! Depth-first directory traversal.
//!
//! Walks the source root, consults the [`FilterEngine`] at every node and
//! produces the filtered [`DirectoryNode`] tree. Symbolic links are never
//! followed; they are skipped with a warning. Permission and IO errors on
//! individual entries are logged, recorded as warnings and skipped so a
//! single unreadable directory never aborts the run. Determinism comes
//! from the final recursive sort, not from filesystem enumeration order.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::Config;
use crate::filter::{FilterEngine, Verdict};
use crate::tree::{DirectoryNode, FileEntry};

/// Errors that abort the walk before it starts.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("path not found: {path}")]
    NotFound { path: PathBuf },

    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of a completed walk.
#[derive(Debug)]
pub struct WalkOutcome {
    /// Filtered tree rooted at the source directory.
    pub root: DirectoryNode,
    /// Files excluded by the filter engine.
    pub files_skipped: usize,
    /// Recoverable problems encountered along the way.
    pub warnings: Vec<String>,
}

/// Walk the configured source root, filtering as we go.
pub fn scan(config: &Config, filter: &FilterEngine) -> Result<WalkOutcome, WalkError> {
    let source = &config.source;

    if !source.exists() {
        return Err(WalkError::NotFound {
            path: source.clone(),
        });
    }
    let metadata = source.metadata().map_err(|e| WalkError::Io {
        path: source.clone(),
        source: e,
    })?;
    if !metadata.is_dir() {
        return Err(WalkError::NotADirectory {
            path: source.clone(),
        });
    }

    let root_name = source
        .file_name()
        .map_or_else(|| source.to_string_lossy().into_owned(), |n| {
            n.to_string_lossy().into_owned()
        });

    let mut walk = Walk {
        filter,
        files_skipped: 0,
        warnings: Vec::new(),
    };

    let mut root = DirectoryNode::new(root_name, PathBuf::new());
    walk.scan_dir(source, Path::new(""), &mut root);
    root.sort();

    Ok(WalkOutcome {
        root,
        files_skipped: walk.files_skipped,
        warnings: walk.warnings,
    })
}

struct Walk<'a> {
    filter: &'a FilterEngine,
    files_skipped: usize,
    warnings: Vec<String>,
}

impl Walk<'_> {
    fn warn(&mut self, message: String) {
        log::warn!("{message}");
        self.warnings.push(message);
    }

    fn scan_dir(&mut self, abs: &Path, rel: &Path, node: &mut DirectoryNode) {
        let reader = match fs::read_dir(abs) {
            Ok(reader) => reader,
            Err(err) => {
                self.warn(format!("cannot read directory {}: {err}", abs.display()));
                return;
            }
        };

        for entry in reader {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    self.warn(format!("cannot read entry in {}: {err}", abs.display()));
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy().into_owned();
            let child_abs = entry.path();
            let child_rel = rel.join(&name);

            let file_type = match entry.file_type() {
                Ok(ft) => ft,
                Err(err) => {
                    self.warn(format!("cannot stat {}: {err}", child_abs.display()));
                    continue;
                }
            };

            if file_type.is_symlink() {
                self.warn(format!("symlink skipped: {}", child_abs.display()));
                continue;
            }

            if file_type.is_dir() {
                match self.filter.verdict(&child_rel, true) {
                    Verdict::Included => {
                        let mut child = DirectoryNode::new(name, child_rel.clone());
                        self.scan_dir(&child_abs, &child_rel, &mut child);
                        node.add_dir(child);
                    }
                    Verdict::Excluded(reason) => {
                        log::debug!("skipping directory {} ({reason})", child_rel.display());
                    }
                }
                continue;
            }

            match self.filter.verdict(&child_rel, false) {
                Verdict::Included => {
                    let size = match entry.metadata() {
                        Ok(metadata) => metadata.len(),
                        Err(err) => {
                            self.warn(format!("cannot stat {}: {err}", child_abs.display()));
                            continue;
                        }
                    };
                    let extension = child_abs
                        .extension()
                        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()));
                    node.add_file(FileEntry {
                        name,
                        rel_path: child_rel,
                        path: child_abs,
                        size,
                        extension,
                    });
                }
                Verdict::Excluded(reason) => {
                    log::debug!("skipping file {} ({reason})", child_rel.display());
                    self.files_skipped += 1;
                }
            }
        }
    }
}
