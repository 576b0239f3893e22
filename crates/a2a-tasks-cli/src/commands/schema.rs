//! `a2a-tasks schema` — print the JSON Schema of a protocol type.

use a2a_tasks::{AgentCard, Message, Task, TaskPushNotificationConfig, TaskStreamingResult};
use clap::Args;
use schemars::schema::RootSchema;
use schemars::schema_for;

#[derive(Args)]
pub struct SchemaArgs {
    /// Type to describe.
    pub target: SchemaTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SchemaTarget {
    Task,
    Message,
    AgentCard,
    PushNotification,
    StreamEvent,
}

pub fn schema(target: SchemaTarget) -> RootSchema {
    match target {
        SchemaTarget::Task => schema_for!(Task),
        SchemaTarget::Message => schema_for!(Message),
        SchemaTarget::AgentCard => schema_for!(AgentCard),
        SchemaTarget::PushNotification => schema_for!(TaskPushNotificationConfig),
        SchemaTarget::StreamEvent => schema_for!(TaskStreamingResult),
    }
}

pub fn execute(args: SchemaArgs) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&schema(args.target))?);
    Ok(())
}
