//! CodeScribe CLI - export a project's tree and file contents as a report.

use std::fs;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use codescribe::config::{
    normalize_extension, Config, OutputMode, DEFAULT_EXTENSIONS, DEFAULT_OUTPUT_BASE,
};
use codescribe::errors::{exit_code, ScribeError};
use codescribe::report;
use codescribe::writer::write_reports;

#[derive(Parser)]
#[command(name = "codescribe")]
#[command(about = "Export a project's tree and file contents as a Markdown or text report")]
#[command(version)]
struct Cli {
    /// Directory to scan
    #[arg(
        long,
        value_name = "DIR",
        required_unless_present_any = ["default_ext", "completions"]
    )]
    source: Option<PathBuf>,

    /// Output file base name; .md/.txt is appended per format
    #[arg(long, value_name = "NAME")]
    output: Option<String>,

    /// Maximum content embedded per file, in kilobytes (0 = unlimited)
    #[arg(long, value_name = "KB")]
    max_size: Option<u64>,

    /// Extra extensions to include (e.g. --include-ext .cfg .ini)
    #[arg(long, num_args(1..), value_name = "EXT")]
    include_ext: Vec<String>,

    /// Extensions to exclude; always wins over includes
    #[arg(long, num_args(1..), value_name = "EXT")]
    exclude_ext: Vec<String>,

    /// Additional directory names to skip
    #[arg(long, num_args(1..), value_name = "NAME")]
    exclude_dir: Vec<String>,

    /// Skip .spec.ts test files
    #[arg(long)]
    ignore_spec: bool,

    /// Apply the project's .gitignore rules
    #[arg(long)]
    git_ignore: bool,

    /// Exclude boilerplate (lockfiles, build output, IDE config)
    #[arg(long)]
    minimal: bool,

    /// Suppress the ASCII logo banner
    #[arg(long)]
    no_logo: bool,

    /// Write a plain-text report instead of Markdown
    #[arg(long, conflicts_with = "export_txt")]
    txt: bool,

    /// Write a plain-text report in addition to Markdown
    #[arg(long)]
    export_txt: bool,

    /// Print the default extension set and exit
    #[arg(long)]
    default_ext: bool,

    /// Generate shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "codescribe", &mut std::io::stdout());
        return;
    }

    if cli.default_ext {
        let mut exts: Vec<&str> = DEFAULT_EXTENSIONS.to_vec();
        exts.sort_unstable();
        println!("{}", exts.join(" "));
        return;
    }

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(exit_code(&err));
    }
}

fn run(cli: Cli) -> Result<(), ScribeError> {
    let config = resolve_config(cli)?;
    let run = report::generate(&config)?;

    let markdown = config
        .mode
        .wants_markdown()
        .then(|| run.report.to_markdown(config.show_logo));
    let text = config
        .mode
        .wants_text()
        .then(|| run.report.to_text(config.show_logo));

    let outcome = write_reports(markdown.as_deref(), text.as_deref(), &config.output_base);
    for written in &outcome.written {
        println!("Report written: {}", written.path.display());
    }
    let bytes_written = outcome.bytes_written();
    outcome.into_result()?;

    let summary = &run.summary;
    println!();
    println!("Analysis complete.");
    println!("Files included: {}", summary.files_included);
    println!("Files skipped: {}", summary.files_skipped);
    println!(
        "Content volume: ~{:.2} KB",
        summary.content_bytes as f64 / 1024.0
    );
    println!("Estimated tokens: ~{}", summary.token_estimate);
    println!("Bytes written: {bytes_written}");
    if !summary.warnings.is_empty() {
        println!("Warnings: {}", summary.warnings.len());
        for warning in &summary.warnings {
            eprintln!("warning: {warning}");
        }
    }

    Ok(())
}

/// Validate and normalize CLI arguments into the immutable run config.
fn resolve_config(cli: Cli) -> Result<Config, ScribeError> {
    let source = match cli.source {
        Some(source) => source,
        // clap's required_unless_present_any keeps this unreachable.
        None => return Err(ScribeError::SourceNotFound(PathBuf::from("--source"))),
    };
    let source = fs::canonicalize(&source).map_err(|_| ScribeError::SourceNotFound(source))?;
    if !source.is_dir() {
        return Err(ScribeError::NotADirectory(source));
    }

    let mut config = Config::new(source);

    if let Some(output) = cli.output {
        config.output_base = strip_format_suffix(&output).to_string();
        if config.output_base.is_empty() {
            config.output_base = DEFAULT_OUTPUT_BASE.to_string();
        }
    }

    config.mode = if cli.txt {
        OutputMode::Text
    } else if cli.export_txt {
        OutputMode::Both
    } else {
        OutputMode::Markdown
    };

    config.minimal = cli.minimal;
    config.ignore_spec = cli.ignore_spec;
    config.git_ignore = cli.git_ignore;
    config.show_logo = !cli.no_logo;
    config.max_size_kb = cli.max_size;
    config.include_ext = cli
        .include_ext
        .iter()
        .map(|e| normalize_extension(e))
        .collect();
    config.exclude_ext = cli
        .exclude_ext
        .iter()
        .map(|e| normalize_extension(e))
        .collect();
    config.excluded_dirs.extend(cli.exclude_dir);

    Ok(config)
}

/// Treat an explicit .md/.txt suffix on --output as the base name.
fn strip_format_suffix(output: &str) -> &str {
    output
        .strip_suffix(".md")
        .or_else(|| output.strip_suffix(".txt"))
        .unwrap_or(output)
}
