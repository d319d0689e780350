// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! ghinfo CLI - star and license statistics over a range of public GitHub
//! repositories.
//!
//! # Examples
//!
//! ```bash
//! # Stargazer buckets for ids (9950000, 9950020]
//! ghinfo stars --since 9950000 --max-id 9950020
//!
//! # License types, most common first
//! ghinfo licenses --since 9950000 --max-id 9950020 --sort repos --desc
//!
//! # JSON output
//! ghinfo stars --since 1 --max-id 100 --format json --pretty
//!
//! # Write a default config file
//! ghinfo config init
//! ```

mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use ghinfo_core::{CoreError, ReportKind};
use ghinfo_fetch::ReportError;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{config, report};

// ============================================================================
// CLI Definition
// ============================================================================

/// ghinfo CLI - GitHub repository statistics.
#[derive(Parser)]
#[command(name = "ghinfo")]
#[command(about = "Star and license statistics over a range of public GitHub repositories")]
#[command(long_about = r#"
ghinfo walks the public repository listing between two ids and reports
either how many repositories fall in each stargazer bucket or how many
use each license.

The API token is read from GH_TOKEN, then GITHUB_TOKEN. Requests without
a token are allowed but heavily rate limited.

Examples:
  ghinfo stars --since 9950000 --max-id 9950020
  ghinfo licenses --since 9950000 --max-id 9950020 --sort repos --desc
  ghinfo stars --since 1 --max-id 100 --format json
"#)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// List every failed lookup in text output.
    #[arg(long, global = true)]
    pub show_failures: bool,

    /// Secondary lookups in flight (1-16).
    #[arg(long, short = 'j', global = true)]
    pub concurrency: Option<usize>,

    /// Config file to use instead of the default location.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Repositories and stars per stargazer bucket.
    #[command(visible_alias = "s")]
    Stars(report::ReportArgs),

    /// Repositories per license type.
    #[command(visible_alias = "l")]
    Licenses(report::ReportArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Invalid parameters.
    Validation = 2,
    /// Interrupted; a partial report was printed.
    Cancelled = 3,
    /// Repositories were found but every lookup failed.
    AllFailed = 4,
}

impl ExitCode {
    /// Exit code for a failed command.
    fn for_error(error: &anyhow::Error) -> Self {
        let validation = error.downcast_ref::<CoreError>().is_some()
            || matches!(
                error.downcast_ref::<ReportError>(),
                Some(ReportError::Validation(_))
            );
        if validation {
            Self::Validation
        } else {
            Self::Error
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("ghinfo=debug,info")
    } else {
        EnvFilter::new("ghinfo=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Stars(args) => report::run(ReportKind::Stargazers, args, &cli).await,
        Commands::Licenses(args) => report::run(ReportKind::Licenses, args, &cli).await,
        Commands::Config(args) => config::run(args, &cli).await.map(|()| ExitCode::Success),
    };

    let code = match result {
        Ok(code) => code,
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            ExitCode::for_error(&e)
        }
    };

    std::process::exit(code as i32);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use ghinfo_core::{SortKey, SortSpec};

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_report_flags() {
        let cli = Cli::parse_from([
            "ghinfo", "licenses", "--since", "5", "--max-id", "20", "--sort", "repos", "--desc",
            "--format", "json",
        ]);
        assert_eq!(cli.format, OutputFormat::Json);
        let Commands::Licenses(args) = cli.command else {
            panic!("expected licenses");
        };
        assert_eq!((args.since, args.max_id), (5, 20));
        assert_eq!(
            args.sort_spec(SortSpec::default()),
            SortSpec::descending(SortKey::RepoCount)
        );
    }

    #[test]
    fn test_validation_errors_map_to_exit_code() {
        let invalid = anyhow::Error::new(CoreError::InvalidRange {
            since: 10,
            max_id: 5,
        });
        assert_eq!(ExitCode::for_error(&invalid), ExitCode::Validation);
        assert_eq!(
            ExitCode::for_error(&anyhow::anyhow!("boom")),
            ExitCode::Error
        );
    }
}
