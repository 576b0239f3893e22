//! `a2a-tasks push` — manage a task's push notification target.

use a2a_tasks::{PushNotificationConfig, TaskPushNotificationConfig};
use clap::{Args, Subcommand};
use colored::Colorize;
use url::Url;

use super::{print_json, Context, OutputFormat};

#[derive(Subcommand)]
pub enum PushCommands {
    /// Register a webhook for a task's updates.
    Set(SetArgs),

    /// Show the webhook registered for a task.
    Get(GetArgs),
}

#[derive(Args)]
pub struct SetArgs {
    /// Task id.
    pub task_id: String,

    /// Webhook URL the agent should POST updates to.
    #[arg(value_name = "URL")]
    pub webhook: Url,

    /// Token the agent echoes back on each call.
    #[arg(long)]
    pub webhook_token: Option<String>,
}

#[derive(Args)]
pub struct GetArgs {
    /// Task id.
    pub task_id: String,
}

pub async fn execute(ctx: &Context, cmd: PushCommands) -> anyhow::Result<()> {
    match cmd {
        PushCommands::Set(args) => set(ctx, args).await,
        PushCommands::Get(args) => get(ctx, args).await,
    }
}

async fn set(ctx: &Context, args: SetArgs) -> anyhow::Result<()> {
    let client = ctx.config.client()?;

    let mut target = PushNotificationConfig::new(args.webhook);
    if let Some(token) = args.webhook_token {
        target = target.with_token(token);
    }

    let stored = client
        .set_task_push_notification(TaskPushNotificationConfig::new(args.task_id, target))
        .await?;
    render(ctx, &stored, "Push notifications registered")
}

async fn get(ctx: &Context, args: GetArgs) -> anyhow::Result<()> {
    let client = ctx.config.client()?;
    let stored = client.get_task_push_notification(&args.task_id).await?;
    render(ctx, &stored, "Push notification target")
}

fn render(ctx: &Context, config: &TaskPushNotificationConfig, title: &str) -> anyhow::Result<()> {
    if ctx.output == OutputFormat::Json {
        return print_json(config);
    }

    let target = &config.push_notification_config;
    println!("\n  {} {} for {}", "✓".green().bold(), title, config.id.cyan());
    println!("  {:<8} {}", "URL:".bold(), target.url);
    if target.token.is_some() {
        println!("  {:<8} {}", "Token:".bold(), "set".dimmed());
    }
    if let Some(ref auth) = target.authentication {
        println!("  {:<8} {}", "Auth:".bold(), auth.schemes.join(", "));
    }
    println!();
    Ok(())
}
