/*
[INPUT]:  CLI arguments, YAML configuration file, TASKTRACK_* environment
[OUTPUT]: One-shot task commands or the interactive login/task screens
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, subcommands, or startup flow
*/

mod cli;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{Command, TaskCommand};
use tasktrack_client::{AppConfig, AppContext};

#[derive(Parser, Debug)]
#[command(name = "tasktrack", version, about = "Terminal client for the task-tracking service")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    /// Override api.base_url from the configuration
    #[arg(long = "base-url", value_name = "URL", global = true)]
    base_url: Option<String>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: String,
    /// Validate configuration and exit
    #[arg(long = "dry-run")]
    dry_run: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let command = match args.command {
        Some(Command::Init { output }) => {
            cli::init::run_init(output)?;
            return Ok(ExitCode::SUCCESS);
        }
        Some(Command::Task(command)) => command,
        None => TaskCommand::Interactive,
    };

    let mut config = AppConfig::load(args.config_path.as_deref()).context("load config")?;
    if let Some(base_url) = args.base_url {
        config.api.base_url = base_url;
        config.validate().context("invalid --base-url")?;
    }
    debug!(base_url = %config.api.base_url, persist = config.storage.persist, "configuration loaded");

    if args.dry_run {
        info!("dry-run requested; configuration validated");
        println!("configuration OK: {}", config.api.base_url);
        return Ok(ExitCode::SUCCESS);
    }

    let ctx = AppContext::from_config(config)?;
    cli::commands::run(&ctx, command).await
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}
