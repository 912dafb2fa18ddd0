//! File and directory inclusion rules.
//!
//! The [`FilterEngine`] is built once per run from the [`Config`] and the
//! process-wide constant sets, then consulted by the walker for every
//! candidate path. Verdicts are a pure function of the path, its ancestry
//! and the configuration; the engine holds no mutable state.
//!
//! Rule order (first match wins):
//!
//! 1. hidden entries (dotfiles and dot-directories)
//! 2. excluded directory names (exact name match)
//! 3. minimal-mode boilerplate patterns
//! 4. `.spec.ts` naming convention (when `--ignore-spec`)
//! 5. `.gitignore` rules (when `--git-ignore`)
//! 6. extension allow/deny lists, explicit exclude winning over include

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use glob::Pattern;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use thiserror::Error;

use crate::config::{normalize_extension, Config, DEFAULT_EXTENSIONS, MINIMAL_FILE_PATTERNS};

/// Errors that can occur while building the filter engine.
///
/// These are configuration-level problems and abort the run before any
/// traversal starts.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("--git-ignore is set but no ignore file was found at {0}")]
    GitignoreMissing(PathBuf),

    #[error("failed to load ignore file {path}: {source}")]
    GitignoreLoad {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("invalid exclusion pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Why a path was excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExcludeReason {
    Hidden,
    ExcludedDirectory,
    MinimalBoilerplate,
    SpecFile,
    GitIgnored,
    ExtensionNotSelected,
}

impl fmt::Display for ExcludeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            ExcludeReason::Hidden => "hidden",
            ExcludeReason::ExcludedDirectory => "excluded directory",
            ExcludeReason::MinimalBoilerplate => "minimal-mode boilerplate",
            ExcludeReason::SpecFile => "spec file ignored",
            ExcludeReason::GitIgnored => "git-ignored",
            ExcludeReason::ExtensionNotSelected => "extension not selected",
        };
        f.write_str(reason)
    }
}

/// Inclusion decision for one candidate path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Included,
    Excluded(ExcludeReason),
}

impl Verdict {
    /// Check if this verdict keeps the path.
    pub fn is_included(&self) -> bool {
        matches!(self, Verdict::Included)
    }
}

/// Per-run inclusion oracle.
pub struct FilterEngine {
    included_exts: HashSet<String>,
    excluded_exts: HashSet<String>,
    excluded_dirs: HashSet<String>,
    minimal: bool,
    minimal_patterns: Vec<Pattern>,
    ignore_spec: bool,
    gitignore: Option<Gitignore>,
}

impl FilterEngine {
    /// Build the engine from a resolved configuration.
    ///
    /// Loads the project's `.gitignore` once when `git_ignore` is set; a
    /// missing ignore file with the flag active is an error, matching the
    /// explicitness of the flag.
    pub fn new(config: &Config) -> Result<Self, FilterError> {
        let mut included_exts: HashSet<String> =
            DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect();
        included_exts.extend(config.include_ext.iter().map(|e| normalize_extension(e)));

        let excluded_exts: HashSet<String> = config
            .exclude_ext
            .iter()
            .map(|e| normalize_extension(e))
            .collect();

        let excluded_dirs: HashSet<String> = config.excluded_dirs.iter().cloned().collect();

        let minimal_patterns = MINIMAL_FILE_PATTERNS
            .iter()
            .map(|raw| {
                Pattern::new(raw).map_err(|source| FilterError::InvalidPattern {
                    pattern: (*raw).to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let gitignore = if config.git_ignore {
            Some(load_gitignore(&config.source)?)
        } else {
            None
        };

        Ok(Self {
            included_exts,
            excluded_exts,
            excluded_dirs,
            minimal: config.minimal,
            minimal_patterns,
            ignore_spec: config.ignore_spec,
            gitignore,
        })
    }

    /// Decide whether a path (relative to the source root) is included.
    pub fn verdict(&self, rel_path: &Path, is_dir: bool) -> Verdict {
        let name = rel_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name_lower = name.to_lowercase();

        if name.starts_with('.') {
            return Verdict::Excluded(ExcludeReason::Hidden);
        }

        if is_dir && self.excluded_dirs.contains(&name) {
            return Verdict::Excluded(ExcludeReason::ExcludedDirectory);
        }

        if self.minimal && self.is_minimal_excluded(rel_path, &name_lower, is_dir) {
            return Verdict::Excluded(ExcludeReason::MinimalBoilerplate);
        }

        if self.ignore_spec && !is_dir && name_lower.ends_with(".spec.ts") {
            return Verdict::Excluded(ExcludeReason::SpecFile);
        }

        if let Some(gitignore) = &self.gitignore {
            if gitignore
                .matched_path_or_any_parents(rel_path, is_dir)
                .is_ignore()
            {
                return Verdict::Excluded(ExcludeReason::GitIgnored);
            }
        }

        if is_dir {
            return Verdict::Included;
        }

        match extension_of(&name_lower) {
            Some(ext) if self.excluded_exts.contains(&ext) => {
                Verdict::Excluded(ExcludeReason::ExtensionNotSelected)
            }
            Some(ext) if self.included_exts.contains(&ext) => Verdict::Included,
            _ => Verdict::Excluded(ExcludeReason::ExtensionNotSelected),
        }
    }

    fn is_minimal_excluded(&self, rel_path: &Path, name_lower: &str, is_dir: bool) -> bool {
        if !is_dir && self.minimal_patterns.iter().any(|p| p.matches(name_lower)) {
            return true;
        }

        let path_lower = rel_path
            .to_string_lossy()
            .to_lowercase()
            .replace('\\', "/");
        let segments: Vec<&str> = path_lower.split('/').collect();

        // A dist/ segment anywhere kills the whole subtree.
        if segments.iter().any(|s| *s == "dist") {
            return true;
        }

        // index.html is only boilerplate when it sits under dist/ or src/.
        if !is_dir
            && name_lower == "index.html"
            && segments[..segments.len() - 1]
                .iter()
                .any(|s| *s == "dist" || *s == "src")
        {
            return true;
        }

        false
    }
}

/// Lowercased extension with leading dot, `None` for extension-less names.
fn extension_of(name_lower: &str) -> Option<String> {
    Path::new(name_lower)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
}

fn load_gitignore(root: &Path) -> Result<Gitignore, FilterError> {
    let path = root.join(".gitignore");
    if !path.is_file() {
        return Err(FilterError::GitignoreMissing(path));
    }

    let mut builder = GitignoreBuilder::new(root);
    if let Some(source) = builder.add(&path) {
        return Err(FilterError::GitignoreLoad { path, source });
    }

    builder
        .build()
        .map_err(|source| FilterError::GitignoreLoad { path, source })
}
