//! CLI entry point for the fsearch tool.
//!
//! Walks a directory tree breadth-first and prints every regular file that
//! passes the given name, stem and extension filters.
//!
//! # Usage
//!
//! ```bash
//! fsearch [OPTIONS] [ROOT]
//!
//! # All mp3 files below ~/Music, skipping the podcasts folder
//! fsearch ~/Music --ext mp3 --exclude podcasts
//!
//! # Every Cargo.toml below the current directory, as JSON
//! fsearch --name Cargo.toml --format json --output manifests.json
//!
//! # Settings from a file, with a command-line override
//! fsearch --config search.json --no-progress
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use fsearch_core::Config;
use fsearch_walker::{FileSearch, SearchResult, StatsSnapshot};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Breadth-first file search with name, stem and extension filters.
///
/// Prints the canonical path of every matching regular file. Symbolic links
/// are never followed.
#[derive(Debug, Parser)]
#[command(name = "fsearch", version, about, long_about = None)]
struct Cli {
    /// Directory to search.
    ///
    /// Defaults to the current directory.
    #[arg(env = "FSEARCH_ROOT")]
    root: Option<Utf8PathBuf>,

    /// Only match files with this exact name (case-insensitive).
    #[arg(short = 'n', long = "name", value_name = "NAME", value_delimiter = ',', env = "FSEARCH_NAMES")]
    names: Vec<String>,

    /// Only match files with this name without extension (case-insensitive).
    #[arg(short = 's', long = "stem", value_name = "STEM", value_delimiter = ',', env = "FSEARCH_STEMS")]
    stems: Vec<String>,

    /// Only match files with this extension, with or without the dot.
    #[arg(short = 'e', long = "ext", value_name = "EXT", value_delimiter = ',', env = "FSEARCH_EXTENSIONS")]
    extensions: Vec<String>,

    /// Never descend into this directory. Relative paths are resolved
    /// against the search root.
    #[arg(short = 'x', long = "exclude", value_name = "DIR", value_delimiter = ',', env = "FSEARCH_EXCLUDE")]
    exclude: Vec<Utf8PathBuf>,

    /// After the first match in a directory, skip that directory's other files.
    #[arg(short, long, env = "FSEARCH_QUIT_DIRECTORY_ON_MATCH")]
    quit_directory_on_match: bool,

    /// JSON configuration file. Command-line options override its values.
    #[arg(short, long, value_name = "FILE", env = "FSEARCH_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Do not draw the progress line.
    #[arg(long, env = "FSEARCH_NO_PROGRESS")]
    no_progress: bool,

    /// Entries scanned between two progress updates.
    #[arg(long, value_name = "N", env = "FSEARCH_RENDER_INTERVAL")]
    render_interval: Option<u64>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Output file (defaults to stdout).
    #[arg(short, long, value_name = "FILE")]
    output: Option<Utf8PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored log output.
    #[arg(long)]
    no_color: bool,
}

/// Result output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One `[path]` per line.
    Text,
    /// JSON document with statistics and errors.
    Json,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `warn` level by default so the
/// progress line stays readable. Logs go to stderr.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "warn" };
        EnvFilter::new(level)
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Builds a [`Config`] from the optional config file and CLI arguments.
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded or the merged
/// configuration is invalid.
fn build_config(cli: &Cli) -> color_eyre::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            info!(path = %path, "Loading configuration file");
            Config::from_json_file(path)?
        }
        None => Config::default(),
    };

    apply_overrides(&mut config, cli);
    config.validate()?;

    Ok(config)
}

/// Layers command-line values over `config`.
///
/// A given root or a non-empty list replaces the configured value; flags can
/// only switch behavior on.
fn apply_overrides(config: &mut Config, cli: &Cli) {
    let search = &mut config.search;

    if let Some(root) = &cli.root {
        search.root = Some(root.clone());
    }
    if !cli.names.is_empty() {
        search.exclusive_filenames.clone_from(&cli.names);
    }
    if !cli.stems.is_empty() {
        search.exclusive_file_stems.clone_from(&cli.stems);
    }
    if !cli.extensions.is_empty() {
        search.exclusive_extensions.clone_from(&cli.extensions);
    }
    if !cli.exclude.is_empty() {
        search.exclude_directories.clone_from(&cli.exclude);
    }
    search.quit_directory_on_match |= cli.quit_directory_on_match;

    if cli.no_progress {
        config.progress.enabled = false;
    }
    if let Some(interval) = cli.render_interval {
        config.progress.render_interval = interval;
    }

    // JSON on stdout must not be interleaved with the status line.
    if cli.format == OutputFormat::Json && cli.output.is_none() {
        config.progress.enabled = false;
    }
}

// =============================================================================
// COMMAND IMPLEMENTATION
// =============================================================================

/// Runs the search and writes the results.
///
/// # Errors
///
/// Returns an error if the results cannot be serialized or written.
fn run_search(
    config: &Config,
    format: OutputFormat,
    output: Option<&Utf8PathBuf>,
) -> color_eyre::Result<()> {
    let result = FileSearch::from_config(config).search();

    let content = match format {
        OutputFormat::Text => render_text(&result),
        OutputFormat::Json => render_json(&result)?,
    };

    if let Some(output_path) = output {
        std::fs::write(output_path.as_std_path(), &content)?;
        info!(path = %output_path, files = result.files.len(), "Results written");
    } else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        write!(handle, "{content}")?;
    }

    if !result.errors.is_empty() {
        warn!(count = result.errors.len(), "Some paths could not be searched");
        let stderr = std::io::stderr();
        let mut handle = stderr.lock();
        writeln!(handle)?;
        writeln!(handle, "Errors ({}):", result.errors.len())?;
        for error in &result.errors {
            writeln!(handle, "  {error}")?;
        }
    }

    Ok(())
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// Renders one bracketed path per line, sorted.
fn render_text(result: &SearchResult) -> String {
    use std::fmt::Write;

    let mut output = String::new();
    for path in result.sorted_files() {
        let _ = writeln!(output, "[{path}]");
    }
    output
}

/// Renders the result as a pretty-printed JSON document.
fn render_json(result: &SearchResult) -> color_eyre::Result<String> {
    #[derive(serde::Serialize)]
    struct Report<'a> {
        root: Option<&'a str>,
        stats: &'a StatsSnapshot,
        match_rate: f64,
        files: Vec<&'a str>,
        errors: Vec<String>,
    }

    let report = Report {
        root: result.root.as_deref().map(Utf8Path::as_str),
        stats: &result.stats,
        match_rate: result.stats.match_rate(),
        files: result.sorted_files().into_iter().map(Utf8Path::as_str).collect(),
        errors: result.errors.iter().map(ToString::to_string).collect(),
    };

    let mut json = serde_json::to_string_pretty(&report)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to serialize JSON: {}", e))?;
    json.push('\n');
    Ok(json)
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    // 4. Merge config file and arguments, then search
    let config = build_config(&cli)?;
    run_search(&config, cli.format, cli.output.as_ref())
}
