//! Config command - inspect or create the configuration file.

use anyhow::Result;
use clap::{Args, Subcommand};
use ghinfo_store::{Config, TOKEN_ENV_VARS, default_config_dir};
use std::path::PathBuf;
use tracing::info;

use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration.
    Show,

    /// Show configuration paths.
    Path,

    /// Write a config file with default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli).await,
        ConfigAction::Path => show_paths(cli),
        ConfigAction::Init { force } => init_config(*force, cli).await,
    }
}

fn config_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(Config::default_path)
}

/// Name of the variable the token would be read from, if any is set.
fn token_source() -> Option<&'static str> {
    TOKEN_ENV_VARS.into_iter().find(|name| {
        std::env::var(name)
            .map(|v| !v.trim().is_empty())
            .unwrap_or(false)
    })
}

async fn show_config(cli: &Cli) -> Result<()> {
    let path = config_path(cli);
    let config = Config::load_from(&path).await?;
    let token = token_source();

    match cli.format {
        OutputFormat::Text => {
            println!("ghinfo Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("File:          {}", path.display());
            println!("API base:      {}", config.api_base_url);
            println!("Concurrency:   {}", config.concurrency);
            println!("Timeout:       {}s", config.timeout_secs);
            println!("User agent:    {}", config.user_agent);
            println!(
                "Default sort:  {} {}",
                config.sort_key, config.sort_direction
            );
            println!("Token:         {}", token.unwrap_or("not set"));
        }
        OutputFormat::Json => {
            let mut value = serde_json::to_value(&config)?;
            value["token_source"] = serde_json::json!(token);
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&value)?);
        }
    }

    Ok(())
}

fn show_paths(cli: &Cli) -> Result<()> {
    let config_dir = default_config_dir();
    let config_file = config_path(cli);

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:  {}", config_dir.display());
            println!("Config file: {}", config_file.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "config_file": config_file.display().to_string(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

async fn init_config(force: bool, cli: &Cli) -> Result<()> {
    let path = config_path(cli);

    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    Config::default().save_to(&path).await?;
    info!(path = %path.display(), "Config initialized");
    if !cli.quiet {
        println!("Wrote {}", path.display());
    }

    Ok(())
}
