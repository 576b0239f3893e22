//! Task — the stateful unit of work in the A2A task protocol.
//!
//! The conventional lifecycle is:
//!
//! ```text
//! SUBMITTED → WORKING → COMPLETED
//!                     → FAILED
//!                     → CANCELED
//!                     → INPUT_REQUIRED
//! ```
//!
//! The wire protocol lets a server report any state at any time, so no
//! transition is rejected here. Every mutation consumes the task and returns
//! the updated value; a `Task` is never changed in place.

use std::collections::HashMap;

use chrono::{SecondsFormat, Utc};
use schemars::JsonSchema;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::artifact::Artifact;
use crate::message::{Message, Metadata};
use crate::notification::PushNotificationConfig;

/// A Task — the fundamental unit of work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier for this task.
    pub id: String,

    /// Optional session grouping related tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Current status of the task.
    pub status: TaskStatus,

    /// Prior status messages, most recent first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<Message>>,

    /// Artifacts produced by the task, most recently added first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<Vec<Artifact>>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: Metadata,
}

impl Task {
    /// Create a submitted task.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            session_id: None,
            status: TaskStatus::new(TaskState::Submitted),
            history: None,
            artifacts: None,
            metadata: Metadata::new(),
        }
    }

    /// Create a submitted task within a session.
    pub fn with_session(id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            session_id: Some(session_id.into()),
            ..Self::new(id)
        }
    }

    pub fn state(&self) -> &TaskState {
        &self.status.state
    }

    /// Check if the task is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.state.is_terminal()
    }

    /// Move to WORKING, keeping the current status message.
    #[must_use]
    pub fn mark_working(self) -> Self {
        let message = self.status.message.clone();
        Self {
            status: TaskStatus {
                message,
                ..TaskStatus::new(TaskState::Working)
            },
            ..self
        }
    }

    /// Move to COMPLETED with a single text artifact.
    ///
    /// The artifact list is replaced, not extended; call
    /// [`add_artifacts`](Self::add_artifacts) beforehand when accumulating.
    #[must_use]
    pub fn mark_completed(self, text: impl Into<String>) -> Self {
        Self {
            status: TaskStatus::new(TaskState::Completed),
            artifacts: Some(vec![Artifact::text(text)]),
            ..self
        }
    }

    /// Move to FAILED.
    #[must_use]
    pub fn mark_failed(self) -> Self {
        Self {
            status: TaskStatus::new(TaskState::Failed),
            ..self
        }
    }

    /// Replace the status.
    ///
    /// When the new status carries a message, the message of the status being
    /// replaced is pushed to the front of the history, so history always lags
    /// the current status by one update.
    #[must_use]
    pub fn update_status(self, update: TaskStatus) -> Self {
        if update.message.is_none() {
            return Self {
                status: update,
                ..self
            };
        }

        let Task {
            id,
            session_id,
            status,
            history,
            artifacts,
            metadata,
        } = self;

        let history = match status.message {
            Some(previous) => {
                let mut updated = Vec::with_capacity(history.as_ref().map_or(1, |h| h.len() + 1));
                updated.push(previous);
                updated.extend(history.unwrap_or_default());
                Some(updated)
            }
            None => history,
        };

        Self {
            id,
            session_id,
            status: update,
            history,
            artifacts,
            metadata,
        }
    }

    /// Prepend artifacts, so the most recently added come first.
    #[must_use]
    pub fn add_artifacts(self, updates: Vec<Artifact>) -> Self {
        let mut artifacts = updates;
        artifacts.extend(self.artifacts.unwrap_or_default());
        Self {
            artifacts: Some(artifacts),
            ..self
        }
    }

    /// Keep the last `history_length` history entries.
    ///
    /// `None` or a non-positive length drops the history entirely.
    #[must_use]
    pub fn limit_history(self, history_length: Option<i32>) -> Self {
        let history = match history_length {
            Some(n) if n > 0 => {
                let mut entries = self.history.unwrap_or_default();
                let keep = n as usize;
                if entries.len() > keep {
                    entries.drain(..entries.len() - keep);
                }
                Some(entries)
            }
            _ => None,
        };
        Self { history, ..self }
    }
}

/// Status of a task at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TaskStatus {
    pub state: TaskState,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,

    /// ISO-8601 time at which the producer created this status.
    #[serde(default = "now_timestamp")]
    pub timestamp: String,
}

impl TaskStatus {
    /// A status stamped with the current time.
    pub fn new(state: TaskState) -> Self {
        Self {
            state,
            message: None,
            timestamp: now_timestamp(),
        }
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.message = Some(message);
        self
    }
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The state of a task in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    /// Task has been submitted but not yet started.
    Submitted,

    /// Task is actively being worked on.
    Working,

    /// Task is paused, waiting for additional input from the client.
    InputRequired,

    /// Task completed successfully.
    Completed,

    /// Task was canceled by the client.
    Canceled,

    /// Task failed.
    Failed,

    /// Unknown or unrecognised state.
    #[serde(other)]
    Unknown,
}

impl TaskState {
    /// Whether no further work will happen on the task.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Canceled | TaskState::Failed
        )
    }

    /// Whether the task is waiting on the client.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, TaskState::InputRequired)
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskState::Submitted => write!(f, "submitted"),
            TaskState::Working => write!(f, "working"),
            TaskState::InputRequired => write!(f, "input-required"),
            TaskState::Completed => write!(f, "completed"),
            TaskState::Canceled => write!(f, "canceled"),
            TaskState::Failed => write!(f, "failed"),
            TaskState::Unknown => write!(f, "unknown"),
        }
    }
}

// ── Streaming events ─────────────────────────────────────────

/// A status change streamed for a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TaskStatusUpdateEvent {
    /// The task id.
    pub id: String,

    pub status: TaskStatus,

    /// Set on the last event the server will send for this subscription.
    #[serde(rename = "final")]
    pub is_final: bool,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: Metadata,
}

/// A new or updated artifact streamed for a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TaskArtifactUpdateEvent {
    /// The task id.
    pub id: String,

    pub artifact: Artifact,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: Metadata,
}

/// One event of a task subscription, told apart on the wire by whether it
/// carries a `status` or an `artifact` field.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum TaskStreamingResult {
    StatusUpdate(TaskStatusUpdateEvent),
    ArtifactUpdate(TaskArtifactUpdateEvent),
}

impl TaskStreamingResult {
    pub fn task_id(&self) -> &str {
        match self {
            TaskStreamingResult::StatusUpdate(e) => &e.id,
            TaskStreamingResult::ArtifactUpdate(e) => &e.id,
        }
    }

    /// True only for a status update flagged `final`.
    pub fn is_final(&self) -> bool {
        matches!(self, TaskStreamingResult::StatusUpdate(e) if e.is_final)
    }
}

impl<'de> Deserialize<'de> for TaskStreamingResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if value.get("status").is_some() {
            TaskStatusUpdateEvent::deserialize(value)
                .map(TaskStreamingResult::StatusUpdate)
                .map_err(de::Error::custom)
        } else if value.get("artifact").is_some() {
            TaskArtifactUpdateEvent::deserialize(value)
                .map(TaskStreamingResult::ArtifactUpdate)
                .map_err(de::Error::custom)
        } else {
            Err(de::Error::custom(
                "streaming result has neither a `status` nor an `artifact` field",
            ))
        }
    }
}

impl From<TaskStatusUpdateEvent> for TaskStreamingResult {
    fn from(event: TaskStatusUpdateEvent) -> Self {
        Self::StatusUpdate(event)
    }
}

impl From<TaskArtifactUpdateEvent> for TaskStreamingResult {
    fn from(event: TaskArtifactUpdateEvent) -> Self {
        Self::ArtifactUpdate(event)
    }
}

// ── Request parameters ───────────────────────────────────────

/// Parameters for `tasks/send` and `tasks/sendSubscribe`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskSendParams {
    /// Task to create or continue.
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    pub message: Message,

    /// How many history entries the response should include.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_length: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push_notification: Option<PushNotificationConfig>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: Metadata,
}

impl TaskSendParams {
    pub fn new(id: impl Into<String>, message: Message) -> Self {
        Self {
            id: id.into(),
            session_id: None,
            message,
            history_length: None,
            push_notification: None,
            metadata: Metadata::new(),
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_history_length(mut self, history_length: i32) -> Self {
        self.history_length = Some(history_length);
        self
    }

    pub fn with_push_notification(mut self, config: PushNotificationConfig) -> Self {
        self.push_notification = Some(config);
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Parameters for `tasks/get` and `tasks/resubscribe`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskQueryParams {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_length: Option<i32>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: Metadata,
}

impl TaskQueryParams {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            history_length: None,
            metadata: Metadata::new(),
        }
    }

    pub fn with_history_length(mut self, history_length: i32) -> Self {
        self.history_length = Some(history_length);
        self
    }
}

/// Parameters naming a single task (`tasks/cancel`, `tasks/pushNotification/get`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TaskIdParams {
    pub id: String,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: Metadata,
}

impl TaskIdParams {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            metadata: Metadata::new(),
        }
    }
}
