//! CodeScribe - export a project's structure and file contents as a
//! single Markdown or plain-text report.
//!
//! The pipeline walks a directory tree, filters files by extension rules,
//! exclusion lists and ignore-file semantics, gates each file's content by
//! size, and renders one deterministic document suitable for feeding a
//! whole codebase to a human or LLM reviewer.
//!
//! # Quick Start
//!
//! ```no_run
//! use codescribe::config::Config;
//! use codescribe::report::generate;
//!
//! let mut config = Config::new("/path/to/project");
//! config.minimal = true;
//!
//! let run = generate(&config).unwrap();
//! println!("{}", run.report.to_markdown(true));
//! println!("{} files included", run.summary.files_included);
//! ```
//!
//! # Modules
//!
//! - [`config`] - Run options and the built-in selection constants
//! - [`filter`] - Inclusion verdicts per path
//! - [`guard`] - Size-gated, binary-aware content reading
//! - [`walker`] - Deterministic directory traversal
//! - [`tree`] - Filtered file tree representation
//! - [`output`] - Markdown and plain-text rendering
//! - [`writer`] - Atomic report persistence
//! - [`report`] - Pipeline orchestration
//! - [`tokens`] - Token estimation for the run summary

pub mod config;
pub mod errors;
pub mod filter;
pub mod guard;
pub mod output;
pub mod report;
pub mod tokens;
pub mod tree;
pub mod walker;
pub mod writer;

// Re-export key types at crate root for convenience
pub use config::{Config, OutputMode};
pub use errors::ScribeError;
pub use filter::{ExcludeReason, FilterEngine, FilterError, Verdict};
pub use guard::FileContent;
pub use output::Report;
pub use report::{generate, RunReport, RunSummary};
pub use tree::{DirectoryNode, FileEntry};
pub use walker::WalkError;
