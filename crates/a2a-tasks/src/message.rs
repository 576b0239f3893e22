//! Message — communication units exchanged while a task runs.
//!
//! A Message carries one or more Parts (text, file, or structured data)
//! and a role naming who produced it.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Free-form string metadata attached to most protocol objects.
pub type Metadata = HashMap<String, String>;

/// Value of the `kind` field written on every message.
pub const MESSAGE_KIND: &str = "message";

fn message_kind() -> String {
    MESSAGE_KIND.into()
}

/// A message exchanged between a client and a remote agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Identifier assigned by the message creator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    /// Event type marker, always `"message"` for messages.
    #[serde(default = "message_kind")]
    pub kind: String,

    /// Role of the sender.
    pub role: Role,

    /// Content parts, in order.
    pub parts: Vec<Part>,

    /// Context the message belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,

    /// Task the message relates to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,

    /// Other tasks referenced as context by this message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_task_ids: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: Metadata,
}

impl Message {
    /// Create a message with the given role and parts.
    pub fn new(role: Role, parts: Vec<Part>) -> Self {
        Self {
            message_id: None,
            kind: message_kind(),
            role,
            parts,
            context_id: None,
            task_id: None,
            reference_task_ids: None,
            metadata: Metadata::new(),
        }
    }

    /// Create a message from the client side.
    pub fn user(parts: Vec<Part>) -> Self {
        Self::new(Role::User, parts)
    }

    /// Create a message from the remote agent.
    pub fn agent(parts: Vec<Part>) -> Self {
        Self::new(Role::Agent, parts)
    }

    /// Convenience: a user message with a single text part.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self::user(vec![Part::text(text)])
    }

    /// Convenience: an agent message with a single text part.
    pub fn agent_text(text: impl Into<String>) -> Self {
        Self::agent(vec![Part::text(text)])
    }

    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Attach the context, task and referenced-task identifiers.
    pub fn with_references(
        mut self,
        context_id: Option<String>,
        task_id: Option<String>,
        reference_task_ids: Option<Vec<String>>,
    ) -> Self {
        self.context_id = context_id;
        self.task_id = task_id;
        self.reference_task_ids = reference_task_ids;
        self
    }

    /// Strip everything but role, parts and metadata.
    pub fn to_simple(&self) -> Self {
        Self {
            role: self.role.clone(),
            parts: self.parts.clone(),
            metadata: self.metadata.clone(),
            ..Self::new(Role::User, Vec::new())
        }
    }

    /// The text of the first part, if that part is text.
    pub fn first_text(&self) -> Option<&str> {
        match self.parts.first() {
            Some(Part::Text(part)) => Some(part.text.as_str()),
            _ => None,
        }
    }

    /// Extract all text content from this message.
    pub fn text_content(&self) -> String {
        text_content(&self.parts)
    }
}

pub(crate) fn text_content(parts: &[Part]) -> String {
    parts
        .iter()
        .filter_map(|p| match p {
            Part::Text(part) => Some(part.text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The role of a message sender.
///
/// Servers in the wild use more than the two canonical roles (e.g.
/// `"assistant"`), so unrecognised roles are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The client side of the conversation.
    User,
    /// The remote agent.
    Agent,
    #[serde(untagged)]
    Other(String),
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Agent => f.write_str("agent"),
            Role::Other(role) => f.write_str(role),
        }
    }
}

/// A piece of message or artifact content.
///
/// Written with a `kind` discriminator; the legacy `type` key is accepted on
/// decode.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Part {
    Text(TextPart),
    File(FilePart),
    Data(DataPart),
}

impl Part {
    /// Create a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextPart {
            text: text.into(),
            metadata: Metadata::new(),
        })
    }

    /// Create a file part.
    pub fn file(file: FileContent) -> Self {
        Self::File(FilePart {
            file,
            metadata: Metadata::new(),
        })
    }

    /// Create a structured data part.
    pub fn data(data: serde_json::Map<String, Value>) -> Self {
        Self::Data(DataPart {
            data,
            metadata: Metadata::new(),
        })
    }

    pub fn metadata(&self) -> &Metadata {
        match self {
            Part::Text(p) => &p.metadata,
            Part::File(p) => &p.metadata,
            Part::Data(p) => &p.metadata,
        }
    }
}

impl<'de> Deserialize<'de> for Part {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let kind = value
            .get("kind")
            .or_else(|| value.get("type"))
            .and_then(Value::as_str)
            .ok_or_else(|| de::Error::missing_field("kind"))?
            .to_owned();

        let part = match kind.as_str() {
            "text" => TextPart::deserialize(value).map(Part::Text),
            "file" => FilePart::deserialize(value).map(Part::File),
            "data" => DataPart::deserialize(value).map(Part::Data),
            other => return Err(de::Error::unknown_variant(other, &["text", "file", "data"])),
        };
        part.map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TextPart {
    pub text: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FilePart {
    pub file: FileContent,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DataPart {
    pub data: serde_json::Map<String, Value>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: Metadata,
}

/// File content — either inline (base64 `bytes`) or by `uri` reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Base64-encoded inline data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl FileContent {
    /// Inline file content; `data` is base64-encoded.
    pub fn inline(name: impl Into<String>, mime_type: impl Into<String>, data: &[u8]) -> Self {
        use base64::Engine;
        Self {
            name: Some(name.into()),
            mime_type: Some(mime_type.into()),
            bytes: Some(base64::engine::general_purpose::STANDARD.encode(data)),
            uri: None,
        }
    }

    /// File content by reference.
    pub fn uri(uri: impl Into<String>, name: Option<String>) -> Self {
        Self {
            name,
            uri: Some(uri.into()),
            ..Self::default()
        }
    }

    /// Decode inline bytes. `None` when the file is a URI reference.
    pub fn decoded_bytes(&self) -> Option<Result<Vec<u8>, base64::DecodeError>> {
        use base64::Engine;
        self.bytes
            .as_deref()
            .map(|b| base64::engine::general_purpose::STANDARD.decode(b))
    }
}
