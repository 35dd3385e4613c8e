mod cmd;
mod config;
mod context;
mod dispatch;
mod domain;
mod error;
mod infra;
mod ingress;
mod services;
#[cfg(test)]
mod test_support;
mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::run::{self as run_cmd, RunCommandArgs};
use crate::cmd::usage;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::discord::DiscordClient;
use crate::infra::jira::JiraClient;
use crate::infra::openai::OpenAiClient;

#[derive(Parser)]
#[command(
    name = "pinbot",
    author,
    version,
    about = "Turns pinned chat messages into Jira tickets"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle reaction events and create tickets for pinned messages.
    Run(RunArgs),
    /// Inspect the configuration.
    Config(ConfigArgs),
    /// Print the guide shown to chat users.
    Usage,
}

#[derive(Args)]
struct RunArgs {
    /// Read newline-delimited JSON reaction events from this file instead of stdin.
    #[arg(short, long)]
    events: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config(args) => config_cmd::run(args.command),
        Commands::Usage => {
            usage::run();
            Ok(())
        }
        Commands::Run(args) => run_bot(args).await,
    }
}

async fn run_bot(args: RunArgs) -> AppResult<()> {
    let config = AppConfig::from_env()?;

    let chat = Arc::new(DiscordClient::new(&config)?);
    let issue_tracker = Arc::new(JiraClient::new(&config)?);
    let language_model = Arc::new(OpenAiClient::new(&config)?);

    info!(
        default_project = %config.default_project_key,
        parse_strategy = config.parse_strategy.as_str(),
        trigger = %config.trigger_emoji,
        "bot starting"
    );
    let context = AppContext::new(config, chat, issue_tracker, language_model);

    let (ingress, dispatch) = run_cmd::run(context, RunCommandArgs { events: args.events }).await?;

    info!(forwarded = ingress.forwarded, "event stream closed");
    if ingress.malformed > 0 {
        warn!(malformed = ingress.malformed, "some reaction events were skipped");
    }
    println!(
        "Handled {} reaction events: {} tickets created, {} failed, {} unavailable, {} ignored, {} aborted.",
        dispatch.received,
        dispatch.created,
        dispatch.failed,
        dispatch.unavailable,
        dispatch.ignored,
        dispatch.aborted
    );

    Ok(())
}
