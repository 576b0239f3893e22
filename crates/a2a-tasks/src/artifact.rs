//! Artifact — outputs produced by a task.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::message::{Metadata, Part};

/// An artifact produced by a task.
///
/// When a server streams an artifact in chunks, successive artifacts share an
/// `index` and carry `append`/`last_chunk`. Reassembly is left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// Human-readable name/title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Description of what this artifact contains.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The content parts of this artifact.
    pub parts: Vec<Part>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: Metadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub append: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_chunk: Option<bool>,
}

impl Artifact {
    /// An artifact built from the given parts.
    pub fn new(parts: Vec<Part>) -> Self {
        Self {
            name: None,
            description: None,
            parts,
            metadata: Metadata::new(),
            index: None,
            append: None,
            last_chunk: None,
        }
    }

    /// An unnamed artifact with a single text part.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(vec![Part::text(content)])
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Mark this artifact as chunk `index` of a streamed artifact.
    pub fn as_chunk(mut self, index: u32, append: bool, last_chunk: bool) -> Self {
        self.index = Some(index);
        self.append = Some(append);
        self.last_chunk = Some(last_chunk);
        self
    }

    /// Extract text content from this artifact.
    pub fn text_content(&self) -> String {
        crate::message::text_content(&self.parts)
    }
}
