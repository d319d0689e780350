//! Report commands - `stars` and `licenses`.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use ghinfo_core::{CoreError, Report, ReportKind, ReportStatus, SortDirection, SortKey, SortSpec};
use ghinfo_fetch::{FetchContext, ReportError, ReportPipeline, ReportRequest};
use ghinfo_store::{Config, token_from_env};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments shared by both report commands.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Exclusive lower id bound.
    #[arg(long)]
    pub since: u64,

    /// Inclusive upper id bound (at most 500 above `--since`).
    #[arg(long)]
    pub max_id: u64,

    /// Column to order rows by. Defaults to the configured column.
    #[arg(long, value_enum)]
    pub sort: Option<SortColumn>,

    /// Largest first.
    #[arg(long, conflicts_with = "asc")]
    pub desc: bool,

    /// Smallest first.
    #[arg(long)]
    pub asc: bool,
}

/// Sortable columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortColumn {
    /// Bucket order or license name.
    Identity,
    /// Number of repositories.
    Repos,
    /// Total stars (stars report only).
    Stars,
}

impl From<SortColumn> for SortKey {
    fn from(column: SortColumn) -> Self {
        match column {
            SortColumn::Identity => SortKey::Identity,
            SortColumn::Repos => SortKey::RepoCount,
            SortColumn::Stars => SortKey::StarTotal,
        }
    }
}

impl ReportArgs {
    /// Resolves the ordering, falling back to `default` for unset parts.
    pub fn sort_spec(&self, default: SortSpec) -> SortSpec {
        let key = self.sort.map_or(default.key, SortKey::from);
        let direction = if self.desc {
            SortDirection::Descending
        } else if self.asc {
            SortDirection::Ascending
        } else {
            default.direction
        };
        SortSpec::new(key, direction)
    }
}

/// Runs a report command.
pub async fn run(kind: ReportKind, args: &ReportArgs, cli: &Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path).await,
        None => Config::load().await,
    }
    .context("failed to load configuration")?;

    let request = build_request(kind, args, &config)?;

    let token = token_from_env();
    if token.is_none() {
        warn!("No API token set (GH_TOKEN or GITHUB_TOKEN); requests are heavily rate limited");
    }

    let settings = match cli.concurrency {
        Some(concurrency) => config.fetch_settings(token).with_concurrency(concurrency),
        None => config.fetch_settings(token),
    };
    let ctx = FetchContext::new(settings)?;
    debug!(?ctx, "Fetch context ready");

    info!(kind = %kind, range = %request.range, sort = %request.sort.key, "Running report");

    let cancel = CancellationToken::new();
    let interrupt = spawn_interrupt_handler(cancel.clone());
    let result = ReportPipeline::new(ctx).run(&request, &cancel).await;
    interrupt.abort();

    match result {
        Ok(report) => {
            print_report(&report, cli)?;
            if report.status() == ReportStatus::AllFailed {
                Ok(ExitCode::AllFailed)
            } else {
                Ok(ExitCode::Success)
            }
        }
        Err(ReportError::Cancelled { partial }) => {
            print_report(&partial, cli)?;
            Ok(ExitCode::Cancelled)
        }
        Err(e) => Err(e.into()),
    }
}

/// Validates the request. Flags win over the configured ordering.
fn build_request(
    kind: ReportKind,
    args: &ReportArgs,
    config: &Config,
) -> Result<ReportRequest, CoreError> {
    let sort = args.sort_spec(config.sort_spec_for(kind));
    ReportRequest::new(kind, args.since, args.max_id, sort)
}

/// Cancels `cancel` on Ctrl-C.
fn spawn_interrupt_handler(cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, finishing with a partial report");
            cancel.cancel();
        }
    })
}

fn print_report(report: &Report, cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color).with_failures(cli.show_failures);
            println!("{}", formatter.format_report(report));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_report(report)?);
        }
    }
    Ok(())
}
