//! CLI command definitions and handlers

pub(crate) mod explain;
pub(crate) mod review;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Exit codes: 0 success, 1 fail-on threshold hit, 2 usage error
/// (handled by clap), 3 environment error (no files, bad git ref).
pub const EXIT_FAIL_ON: i32 = 1;
pub const EXIT_ERROR: i32 = 3;

/// Designlint - design review and pre-mortem analysis
///
/// Analyzes markdown, text, JSON, and YAML design documents for common
/// design gaps, missing considerations, and risks.
#[derive(Parser, Debug)]
#[command(name = "designlint")]
#[command(
    version,
    about = "Design review and pre-mortem analysis for engineering artifacts",
    after_help = "\
Examples:
  designlint review docs/design.md              Analyze a single document
  designlint review 'docs/**/*.md' -f json      JSON output for scripting
  designlint review docs/ --baseline main       Compare against the doc at a git ref
  designlint explain REQ-001                    Show what a rule checks and why
  designlint explain --list                     List all rules"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Perform design review analysis on engineering artifacts
    Review {
        /// File path, directory, or glob pattern to analyze
        path_or_glob: String,

        /// Output format
        #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Minimum severity to display
        #[arg(long, default_value = "low", value_parser = ["low", "med", "high"])]
        severity_threshold: String,

        /// Exit with error if findings >= this severity
        #[arg(long, default_value = "none", value_parser = ["none", "med", "high"])]
        fail_on: String,

        /// Maximum characters per file
        #[arg(long, default_value_t = 200_000)]
        max_chars: usize,

        /// Additional regex patterns to redact (repeatable)
        #[arg(long)]
        redact: Vec<String>,

        /// Analysis profile
        #[arg(long, default_value = "general", value_parser = ["general", "security", "performance", "reliability"])]
        profile: String,

        /// Git ref to compare against (branch, tag, commit)
        #[arg(long)]
        baseline: Option<String>,

        /// Write output to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Disable color output
        #[arg(long)]
        no_color: bool,

        /// Show evidence for each finding in text output
        #[arg(long, visible_alias = "verbose")]
        show_evidence: bool,
    },

    /// Explain what a rule checks and how to address its findings
    Explain {
        /// Rule ID to explain (e.g., REQ-001)
        rule_id: Option<String>,

        /// List all available rules
        #[arg(long)]
        list: bool,

        /// Output format
        #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Disable color output
        #[arg(long)]
        no_color: bool,
    },
}

/// Run the parsed CLI, returning the process exit code.
pub fn run(cli: Cli) -> i32 {
    let result = match cli.command {
        Commands::Review { .. } => review::execute(cli.command),
        Commands::Explain { .. } => explain::execute(cli.command),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            EXIT_ERROR
        }
    }
}
