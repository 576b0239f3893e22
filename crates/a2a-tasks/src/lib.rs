//! # a2a-tasks
//!
//! Client-side codec and task lifecycle engine for the Agent-to-Agent (A2A)
//! task protocol: JSON-RPC 2.0 envelopes over HTTP, with server-sent events
//! for incremental task updates.
//!
//! ## Architecture
//!
//! 1. **Task model**: tasks, messages, artifacts and the state machine that
//!    folds status and artifact updates into a task.
//! 2. **Envelope codec**: closed request/response unions keyed by `method`,
//!    decoded leniently when the discriminator is missing or unknown.
//! 3. **Error taxonomy**: the fixed JSON-RPC code table and coarse status
//!    categories.
//! 4. **Client**: request/response calls and SSE subscriptions over an
//!    injected transport.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use a2a_tasks::{A2AClient, AgentCard, Message};
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Discover a remote agent
//!     let card = AgentCard::discover("https://agent.example.com").await?;
//!     println!("Found: {}", card.name);
//!
//!     // Send a task and follow its updates
//!     let client = A2AClient::new("https://agent.example.com")?;
//!     let mut events = client
//!         .send_task_streaming(Message::user_text("Summarize Q4 report"))
//!         .await?;
//!     while let Some(event) = events.next().await {
//!         println!("{:?}", event?);
//!     }
//!     Ok(())
//! }
//! ```

pub mod agent_card;
pub mod artifact;
pub mod client;
pub mod error;
pub mod id;
pub mod message;
pub mod notification;
pub mod task;
pub mod transport;

// Re-export primary types
pub use agent_card::{AgentCapabilities, AgentCard, AgentProvider, AgentSkill};
pub use artifact::Artifact;
pub use client::{A2AClient, DEFAULT_HISTORY_LENGTH};
pub use error::{A2AError, A2AResult};
pub use id::{IdGenerator, StringOrInt, UuidGenerator};
pub use message::{DataPart, FileContent, FilePart, Message, Part, Role, TextPart};
pub use notification::{Authentication, PushNotificationConfig, TaskPushNotificationConfig};
pub use task::{
    Task, TaskArtifactUpdateEvent, TaskIdParams, TaskQueryParams, TaskSendParams, TaskState,
    TaskStatus, TaskStatusUpdateEvent, TaskStreamingResult,
};
pub use transport::error_codes::{ErrorKind, JsonRpcError, StatusCategory};
pub use transport::http::{HttpTransport, Transport, TransportResponse};
pub use transport::jsonrpc::{JsonRpcRequest, JsonRpcResponse, Request, Response};
pub use transport::sse::TaskEventStream;
