//! Push notification types for webhook-based task updates.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use url::Url;

/// Where and how the remote agent should POST task updates.
///
/// Clients register a webhook URL so they do not need to hold an SSE
/// connection open while a long task runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PushNotificationConfig {
    /// The webhook URL where updates will be POSTed.
    pub url: Url,

    /// Token the agent echoes back so the receiver can validate the call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Authentication the agent must use when calling the webhook.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<Authentication>,
}

impl PushNotificationConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            token: None,
            authentication: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Authentication schemes and optional credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Authentication {
    pub schemes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<String>,
}

/// A push notification config bound to a task id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskPushNotificationConfig {
    /// The task id.
    pub id: String,
    pub push_notification_config: PushNotificationConfig,
}

impl TaskPushNotificationConfig {
    pub fn new(task_id: impl Into<String>, config: PushNotificationConfig) -> Self {
        Self {
            id: task_id.into(),
            push_notification_config: config,
        }
    }
}
