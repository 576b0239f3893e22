//! Error types for the task protocol client.

use thiserror::Error;

use crate::transport::error_codes::{ErrorKind, JsonRpcError, StatusCategory};

/// Errors that can occur when talking to a remote agent.
#[derive(Debug, Error)]
pub enum A2AError {
    /// Failed to discover the agent card at the well-known endpoint.
    #[error("agent discovery failed: {0}")]
    DiscoveryFailed(String),

    /// The agent card is invalid or missing required fields.
    #[error("invalid agent card: {0}")]
    InvalidAgentCard(String),

    /// Connection, TLS or timeout failure in the HTTP transport.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status outside the success range.
    #[error("server returned HTTP {status}")]
    HttpStatus { status: u16, body: String },

    /// Malformed JSON, or a payload that does not fit the selected variant.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The remote agent returned a JSON-RPC error object.
    #[error(transparent)]
    Protocol(#[from] JsonRpcError),

    /// The response carried neither a result nor an error.
    #[error("response carried neither a result nor an error")]
    EmptyResponse,

    /// The response variant does not carry the expected result type.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// The SSE stream could not be read or framed.
    #[error("streaming error: {0}")]
    Streaming(String),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl A2AError {
    /// The protocol error kind, when the agent answered with a JSON-RPC error.
    pub fn protocol_kind(&self) -> Option<ErrorKind> {
        match self {
            A2AError::Protocol(err) => Some(err.kind()),
            _ => None,
        }
    }

    /// Collapse the error into a coarse client-facing category.
    pub fn status_category(&self) -> StatusCategory {
        match self {
            A2AError::Protocol(err) => err.kind().status_category(),
            A2AError::HttpStatus { status, .. } => StatusCategory::from_http_status(*status),
            A2AError::Transport(err) => err
                .status()
                .map(|s| StatusCategory::from_http_status(s.as_u16()))
                .unwrap_or(StatusCategory::InternalError),
            A2AError::DiscoveryFailed(_) => StatusCategory::NotFound,
            A2AError::InvalidUrl(_) => StatusCategory::BadRequest,
            A2AError::InvalidAgentCard(_)
            | A2AError::Serialization(_)
            | A2AError::EmptyResponse
            | A2AError::UnexpectedResponse(_)
            | A2AError::Streaming(_) => StatusCategory::InternalError,
        }
    }
}

/// Result type alias.
pub type A2AResult<T> = Result<T, A2AError>;
