//! `a2a-tasks get|send|cancel|stream|resubscribe` — task operations.

use a2a_tasks::{
    A2AClient, Message, Task, TaskEventStream, TaskIdParams, TaskQueryParams, TaskSendParams,
    TaskStreamingResult,
};
use clap::Args;
use colored::Colorize;
use futures::StreamExt;

use super::{paint_state, print_json, Context, OutputFormat};

#[derive(Args)]
pub struct GetArgs {
    /// Task id.
    pub task_id: String,

    /// History entries to include (defaults to the configured length).
    #[arg(long)]
    pub history: Option<i32>,
}

#[derive(Args)]
pub struct SendArgs {
    /// Message text.
    pub text: String,

    /// Continue an existing task instead of creating one.
    #[arg(long)]
    pub task_id: Option<String>,

    /// Session to group the task under.
    #[arg(long)]
    pub session_id: Option<String>,
}

#[derive(Args)]
pub struct CancelArgs {
    /// Task id.
    pub task_id: String,
}

#[derive(Args)]
pub struct ResubscribeArgs {
    /// Task id.
    pub task_id: String,
}

pub async fn get(ctx: &Context, args: GetArgs) -> anyhow::Result<()> {
    let client = ctx.config.client()?;
    let history = args.history.unwrap_or(ctx.config.history_length);
    let params = TaskQueryParams::new(args.task_id).with_history_length(history);

    let task = client.get_task_with(params, None).await?;
    render_task(ctx, &task)
}

pub async fn send(ctx: &Context, args: SendArgs) -> anyhow::Result<()> {
    let client = ctx.config.client()?;
    let params = send_params(ctx, &client, args);

    let task = client.send_task_with(params, None).await?;
    render_task(ctx, &task)
}

pub async fn cancel(ctx: &Context, args: CancelArgs) -> anyhow::Result<()> {
    let client = ctx.config.client()?;
    let task = client
        .cancel_task_with(TaskIdParams::new(args.task_id), None)
        .await?;
    render_task(ctx, &task)
}

pub async fn stream(ctx: &Context, args: SendArgs) -> anyhow::Result<()> {
    let client = ctx.config.client()?;
    let params = send_params(ctx, &client, args);

    if ctx.output == OutputFormat::Text {
        println!("\n  {} Streaming task {}\n", "→".dimmed(), params.id.cyan());
    }
    let events = client.send_task_streaming_with(params, None).await?;
    follow(ctx, events).await
}

pub async fn resubscribe(ctx: &Context, args: ResubscribeArgs) -> anyhow::Result<()> {
    let client = ctx.config.client()?;
    if ctx.output == OutputFormat::Text {
        println!("\n  {} Resubscribing to {}\n", "→".dimmed(), args.task_id.cyan());
    }
    let events = client
        .resubscribe_to_task_with(TaskQueryParams::new(args.task_id), None)
        .await?;
    follow(ctx, events).await
}

/// Task params for a message, keeping any ids given on the command line.
///
/// A session id is only generated for a brand new task.
fn send_params(ctx: &Context, client: &A2AClient, args: SendArgs) -> TaskSendParams {
    let mut params = client
        .new_task_params(Message::user_text(args.text))
        .with_history_length(ctx.config.history_length);
    if let Some(task_id) = args.task_id {
        params.id = task_id;
        params.session_id = None;
    }
    if let Some(session_id) = args.session_id {
        params = params.with_session_id(session_id);
    }
    params
}


/// Print events until the stream ends or Ctrl-C is pressed.
async fn follow(ctx: &Context, events: TaskEventStream) -> anyhow::Result<()> {
    let mut events = events.with_cancellation(async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    });

    while let Some(event) = events.next().await {
        let event = event?;
        match ctx.output {
            OutputFormat::Json => println!("{}", serde_json::to_string(&event)?),
            OutputFormat::Text => print_event(&event),
        }
    }
    Ok(())
}

fn print_event(event: &TaskStreamingResult) {
    match event {
        TaskStreamingResult::StatusUpdate(update) => {
            let text = update
                .status
                .message
                .as_ref()
                .map(Message::text_content)
                .unwrap_or_default();
            let marker = if update.is_final {
                " (final)".dimmed().to_string()
            } else {
                String::new()
            };
            println!(
                "  {} {}{}  {}",
                "●".bold(),
                paint_state(&update.status.state),
                marker,
                text
            );
        }
        TaskStreamingResult::ArtifactUpdate(update) => {
            let name = update.artifact.name.as_deref().unwrap_or("artifact");
            println!(
                "  {} {}  {}",
                "◆".blue().bold(),
                name.bold(),
                update.artifact.text_content()
            );
        }
    }
}

fn render_task(ctx: &Context, task: &Task) -> anyhow::Result<()> {
    if ctx.output == OutputFormat::Json {
        return print_json(task);
    }

    println!();
    println!("  {} Task {}", "✓".green().bold(), task.id.cyan());
    if let Some(ref session_id) = task.session_id {
        println!("  {:<10} {}", "Session:".bold(), session_id);
    }
    println!("  {:<10} {}", "State:".bold(), paint_state(task.state()));
    println!("  {:<10} {}", "Updated:".bold(), task.status.timestamp.dimmed());
    if let Some(ref message) = task.status.message {
        println!("  {:<10} {}", "Message:".bold(), message.text_content());
    }

    if let Some(ref artifacts) = task.artifacts {
        println!("\n  {}", "Artifacts".bold());
        for artifact in artifacts {
            let name = artifact.name.as_deref().unwrap_or("-");
            println!("  {} {}  {}", "◆".blue(), name, artifact.text_content());
        }
    }

    if let Some(ref history) = task.history {
        println!("\n  {} ({} entries)", "History".bold(), history.len());
        for message in history {
            println!("  {} {}: {}", "·".dimmed(), message.role, message.text_content());
        }
    }
    println!();
    Ok(())
}
