//! Run configuration and the built-in selection constants.
//!
//! A [`Config`] is built once per invocation by the CLI layer (already
//! validated and with the source path resolved to an absolute directory)
//! and is never mutated afterwards. The constant sets below are passed
//! explicitly into the filter engine rather than read through globals.

use std::path::PathBuf;

/// Base name used for output files when none is configured.
pub const DEFAULT_OUTPUT_BASE: &str = "structure_complete";

/// Extensions considered source-relevant out of the box.
///
/// Lowercase, with leading dot. Extended at runtime via
/// [`Config::include_ext`], shrunk via [`Config::exclude_ext`].
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".cs", ".csproj", ".sln", ".ts", ".js", ".html", ".scss", ".json", ".py", ".rs", ".toml",
    ".txt", ".md",
];

/// Directory names that are never traversed.
pub const EXCLUDED_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "__pycache__",
    ".venv",
    "bin",
    "obj",
    "dist",
    "build",
    "out",
    ".vscode",
    ".idea",
    "target",
    ".pytest_cache",
    "venv",
];

/// Filename glob patterns excluded in minimal mode.
///
/// Matched case-insensitively against the file name. Path-sensitive minimal
/// rules (`dist/` segments, `index.html` under `dist/` or `src/`) live in the
/// filter engine because they need the whole relative path.
pub const MINIMAL_FILE_PATTERNS: &[&str] = &[
    "package-lock.json",
    "tsconfig*.json",
    "angular.json",
    "environment*.ts",
    "styles.css",
    "*.csproj",
    "*.sln",
    "appsettings.json",
    "pipfile.lock",
    "poetry.lock",
];

/// Which report formats to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Markdown report only (default).
    #[default]
    Markdown,
    /// Plain-text report only.
    Text,
    /// Both formats in one run.
    Both,
}

impl OutputMode {
    /// Whether a Markdown document should be produced.
    pub fn wants_markdown(self) -> bool {
        matches!(self, OutputMode::Markdown | OutputMode::Both)
    }

    /// Whether a plain-text document should be produced.
    pub fn wants_text(self) -> bool {
        matches!(self, OutputMode::Text | OutputMode::Both)
    }
}

/// Immutable snapshot of one run's options.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute path of the directory to scan.
    pub source: PathBuf,
    /// Output file base name; format extensions are appended by the writer.
    pub output_base: String,
    /// Which report formats to write.
    pub mode: OutputMode,
    /// Apply the minimal-mode boilerplate exclusions.
    pub minimal: bool,
    /// Extra extensions to include, normalized via [`normalize_extension`].
    pub include_ext: Vec<String>,
    /// Extensions to exclude; always wins over includes.
    pub exclude_ext: Vec<String>,
    /// Directory names to skip entirely (seeded from [`EXCLUDED_DIRS`]).
    pub excluded_dirs: Vec<String>,
    /// Skip files matching the `.spec.ts` naming convention.
    pub ignore_spec: bool,
    /// Apply the project's `.gitignore` rules.
    pub git_ignore: bool,
    /// Per-file content limit in kilobytes; `None` or 0 means unlimited.
    pub max_size_kb: Option<u64>,
    /// Prepend the ASCII logo banner to the Markdown report.
    pub show_logo: bool,
}

impl Config {
    /// Create a configuration with defaults for the given source root.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output_base: DEFAULT_OUTPUT_BASE.to_string(),
            mode: OutputMode::default(),
            minimal: false,
            include_ext: Vec::new(),
            exclude_ext: Vec::new(),
            excluded_dirs: EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
            ignore_spec: false,
            git_ignore: false,
            max_size_kb: None,
            show_logo: true,
        }
    }

    /// Effective content limit in bytes, with 0 treated as unlimited.
    pub fn max_size_bytes(&self) -> Option<u64> {
        match self.max_size_kb {
            None | Some(0) => None,
            Some(kb) => Some(kb * 1024),
        }
    }
}

/// Normalize a user-supplied extension: lowercase, leading dot.
///
/// ```
/// use codescribe::config::normalize_extension;
///
/// assert_eq!(normalize_extension("RS"), ".rs");
/// assert_eq!(normalize_extension(".Log"), ".log");
/// ```
pub fn normalize_extension(ext: &str) -> String {
    let lower = ext.to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    }
}
