//! Agent Card — the self-describing metadata document for agent discovery.
//!
//! Every agent speaking the task protocol publishes its card at:
//!   `/.well-known/agent.json`
//!
//! The card describes the agent's endpoint, capabilities, skills and the
//! content types it accepts and produces.

use reqwest::Client;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{A2AError, A2AResult};
use crate::notification::Authentication;
use crate::transport::http::join_path;

/// Path of the agent card relative to the agent's base URL.
pub const AGENT_CARD_PATH: &str = "/.well-known/agent.json";

fn default_modes() -> Vec<String> {
    vec!["text".into()]
}

/// An Agent Card — metadata describing an agent's capabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    /// Human-readable name of the agent.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Endpoint the agent serves the task protocol on.
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<AgentProvider>,

    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,

    #[serde(default)]
    pub capabilities: AgentCapabilities,

    /// Authentication the agent expects from callers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<Authentication>,

    /// Content types accepted when a skill does not say otherwise.
    #[serde(default = "default_modes")]
    pub default_input_modes: Vec<String>,

    /// Content types produced when a skill does not say otherwise.
    #[serde(default = "default_modes")]
    pub default_output_modes: Vec<String>,

    #[serde(default)]
    pub skills: Vec<AgentSkill>,
}

impl AgentCard {
    /// Discover an agent by fetching its card from the well-known endpoint.
    pub async fn discover(base_url: &str) -> A2AResult<Self> {
        let base = Url::parse(base_url)?;
        Self::discover_with(&Client::new(), &base).await
    }

    /// Discover an agent using a caller-supplied HTTP client.
    pub async fn discover_with(http: &Client, base_url: &Url) -> A2AResult<Self> {
        let url = join_path(base_url, AGENT_CARD_PATH)?;

        tracing::info!(url = %url, "Discovering agent");

        let response = http.get(url).send().await.map_err(|e| {
            A2AError::DiscoveryFailed(format!("failed to fetch agent card: {e}"))
        })?;

        if !response.status().is_success() {
            return Err(A2AError::DiscoveryFailed(format!(
                "agent card endpoint returned {}",
                response.status()
            )));
        }

        let card: AgentCard = response.json().await.map_err(|e| {
            A2AError::InvalidAgentCard(format!("failed to parse agent card: {e}"))
        })?;

        card.validate()?;

        tracing::info!(
            name = %card.name,
            skills = card.skills.len(),
            streaming = card.supports_streaming(),
            "Discovered agent"
        );

        Ok(card)
    }

    /// Validate the agent card has required fields.
    pub fn validate(&self) -> A2AResult<()> {
        if self.name.trim().is_empty() {
            return Err(A2AError::InvalidAgentCard("name is required".into()));
        }
        if self.url.trim().is_empty() {
            return Err(A2AError::InvalidAgentCard("url is required".into()));
        }
        Ok(())
    }

    pub fn supports_streaming(&self) -> bool {
        self.capabilities.streaming
    }

    pub fn supports_push_notifications(&self) -> bool {
        self.capabilities.push_notifications
    }

    /// Find a skill by ID.
    pub fn find_skill(&self, skill_id: &str) -> Option<&AgentSkill> {
        self.skills.iter().find(|s| s.id == skill_id)
    }
}

/// Information about the agent's provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AgentProvider {
    pub organization: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Optional protocol features the agent supports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgentCapabilities {
    /// `tasks/sendSubscribe` and `tasks/resubscribe` are available.
    #[serde(default)]
    pub streaming: bool,

    /// `tasks/pushNotification/*` are available.
    #[serde(default)]
    pub push_notifications: bool,

    /// The agent records the status history of its tasks.
    #[serde(default)]
    pub state_transition_history: bool,
}

/// A specific ability of the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgentSkill {
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Example prompts for this skill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_modes: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_modes: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_card_defaults() {
        let card: AgentCard = serde_json::from_value(json!({
            "name": "Echo",
            "url": "http://localhost:8080/",
            "version": "1.0.0"
        }))
        .unwrap();

        assert_eq!(card.default_input_modes, vec!["text".to_string()]);
        assert_eq!(card.default_output_modes, vec!["text".to_string()]);
        assert!(!card.supports_streaming());
        assert!(!card.supports_push_notifications());
        assert!(card.skills.is_empty());
        card.validate().unwrap();
    }

    #[test]
    fn test_full_card() {
        let card: AgentCard = serde_json::from_value(json!({
            "name": "Currency Agent",
            "description": "Converts currencies",
            "url": "https://agents.example.com/currency",
            "provider": {"organization": "Example Corp"},
            "version": "0.2.1",
            "documentationUrl": "https://docs.example.com/currency",
            "capabilities": {"streaming": true, "pushNotifications": true},
            "authentication": {"schemes": ["bearer"]},
            "defaultInputModes": ["text", "data"],
            "skills": [{
                "id": "convert",
                "name": "Convert",
                "tags": ["finance"],
                "examples": ["100 USD to EUR"]
            }]
        }))
        .unwrap();

        assert!(card.supports_streaming());
        assert!(card.supports_push_notifications());
        assert!(!card.capabilities.state_transition_history);
        assert_eq!(card.default_input_modes.len(), 2);
        assert_eq!(card.default_output_modes, vec!["text".to_string()]);
        assert_eq!(card.find_skill("convert").unwrap().name, "Convert");
        assert!(card.find_skill("missing").is_none());
        assert_eq!(
            card.authentication.unwrap().schemes,
            vec!["bearer".to_string()]
        );
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let mut card: AgentCard = serde_json::from_value(json!({
            "name": " ",
            "url": "http://localhost/",
            "version": "1"
        }))
        .unwrap();
        assert!(matches!(
            card.validate(),
            Err(A2AError::InvalidAgentCard(_))
        ));

        card.name = "Echo".into();
        card.url = String::new();
        assert!(matches!(
            card.validate(),
            Err(A2AError::InvalidAgentCard(_))
        ));
    }
}
