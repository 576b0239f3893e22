//! CLI command definitions and dispatch.

pub mod card;
pub mod push;
pub mod schema;
pub mod task;

use std::path::PathBuf;

use a2a_tasks::{A2AError, TaskState};
use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};

use crate::config::CliConfig;
use crate::telemetry;

/// Command-line client for agents speaking the A2A task protocol.
#[derive(Parser)]
#[command(name = "a2a-tasks", version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Agent base URL (overrides config and A2A_AGENT_URL).
    #[arg(long, global = true, env = "A2A_AGENT_URL")]
    pub url: Option<String>,

    /// Bearer token (overrides config and A2A_AGENT_TOKEN).
    #[arg(long, global = true, env = "A2A_AGENT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// JSON-RPC path under the base URL.
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Config file (defaults to ~/.a2a-tasks/config.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and show the agent card.
    Card,

    /// Get a task by id.
    Get(task::GetArgs),

    /// Send a text message as a task.
    Send(task::SendArgs),

    /// Cancel a task.
    Cancel(task::CancelArgs),

    /// Send a text message and follow the task's updates.
    Stream(task::SendArgs),

    /// Reattach to a running task's updates.
    Resubscribe(task::ResubscribeArgs),

    /// Manage a task's push notification target.
    #[command(subcommand)]
    Push(push::PushCommands),

    /// Print the JSON Schema of a protocol type.
    Schema(schema::SchemaArgs),

    /// Show the effective configuration.
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Shared state handed to every command.
pub struct Context {
    pub config: CliConfig,
    /// Where `config` was read from, if anywhere.
    pub config_path: Option<PathBuf>,
    pub output: OutputFormat,
}

/// Execute the CLI command.
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.or_else(CliConfig::default_path);
    let config = match &config_path {
        Some(path) => CliConfig::load_from(path)?,
        None => CliConfig::default(),
    }
    .with_overrides(cli.url, cli.token, cli.endpoint);

    let _telemetry = telemetry::init_telemetry(&config.logging, &config.telemetry)?;

    let ctx = Context {
        config,
        config_path,
        output: cli.output,
    };

    let result = match cli.command {
        Commands::Card => card::execute(&ctx).await,
        Commands::Get(args) => task::get(&ctx, args).await,
        Commands::Send(args) => task::send(&ctx, args).await,
        Commands::Cancel(args) => task::cancel(&ctx, args).await,
        Commands::Stream(args) => task::stream(&ctx, args).await,
        Commands::Resubscribe(args) => task::resubscribe(&ctx, args).await,
        Commands::Push(cmd) => push::execute(&ctx, cmd).await,
        Commands::Schema(args) => schema::execute(args),
        Commands::Config => show_config(&ctx),
    };

    if let Err(err) = &result {
        if let Some(a2a) = err.downcast_ref::<A2AError>() {
            report_error(a2a);
        }
    }
    result
}

fn show_config(ctx: &Context) -> anyhow::Result<()> {
    let config = ctx.config.redacted();
    match ctx.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Text => {
            if let Some(ref path) = ctx.config_path {
                println!("  {} {}\n", "#".dimmed(), path.display().to_string().dimmed());
            }
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }
    Ok(())
}

/// Print the protocol kind and coarse category of a failed call.
fn report_error(err: &A2AError) {
    let category = err.status_category();
    match err.protocol_kind() {
        Some(kind) => eprintln!(
            "  {} {} (code {}, {})",
            "✗".red().bold(),
            kind.to_string().red(),
            kind.code(),
            category
        ),
        None => eprintln!("  {} {}", "✗".red().bold(), category.to_string().red()),
    }
}

/// Print a value as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn paint_state(state: &TaskState) -> ColoredString {
    let label = state.to_string();
    match state {
        TaskState::Completed => label.green().bold(),
        TaskState::Failed => label.red().bold(),
        TaskState::Canceled => label.yellow(),
        TaskState::InputRequired => label.magenta(),
        TaskState::Submitted | TaskState::Working => label.cyan(),
        TaskState::Unknown => label.dimmed(),
    }
}
