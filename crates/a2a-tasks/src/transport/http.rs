//! HTTP transport capability.
//!
//! The client only needs two things from the network: POST a JSON body and
//! read the reply, or POST a JSON body and read back a stream of SSE event
//! payloads. [`Transport`] captures exactly that, so tests and embedders can
//! swap in their own implementation. [`HttpTransport`] is the reqwest-backed
//! default.

use std::time::Duration;

use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures::stream::{BoxStream, StreamExt};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::error::{A2AError, A2AResult};
use crate::transport::jsonrpc;

/// Media type of JSON-RPC request and response bodies.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Media type of SSE subscription responses.
pub const EVENT_STREAM_MEDIA_TYPE: &str = "text/event-stream";

/// The `data` payloads of an SSE response, in the order the server sent them.
pub type EventDataStream = BoxStream<'static, A2AResult<String>>;

/// Raw reply to a POSTed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Send-request / open-event-stream capability used by [`crate::A2AClient`].
///
/// Implementations must be safe to share between concurrent calls.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a JSON body and return the status and body of the reply.
    ///
    /// A non-success status is not an error at this level.
    async fn post(&self, body: String) -> A2AResult<TransportResponse>;

    /// POST a JSON body and stream back the `data` field of each SSE event.
    ///
    /// Dropping the returned stream must close the connection.
    async fn open_event_stream(&self, body: String) -> A2AResult<EventDataStream>;
}

/// Join a path onto a base URL, keeping the base URL's own path.
pub(crate) fn join_path(base: &Url, path: &str) -> A2AResult<Url> {
    let base = base.as_str().trim_end_matches('/');
    let path = path.trim_start_matches('/');
    Ok(Url::parse(&format!("{base}/{path}"))?)
}

/// reqwest-backed [`Transport`] posting to a single JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    endpoint: Url,
    auth_token: Option<String>,
    timeout: Option<Duration>,
}

impl HttpTransport {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: Client::new(),
            endpoint,
            auth_token: None,
            timeout: None,
        }
    }

    /// Use a preconfigured HTTP client (proxies, TLS, pooling).
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Send `Authorization: Bearer <token>` on every request.
    pub fn with_auth(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Bound request/response calls. Event streams are not subject to it.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.http
    }

    fn request(&self, body: String, accept: &str) -> RequestBuilder {
        let mut request = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, JSON_MEDIA_TYPE)
            .header(ACCEPT, accept)
            .body(body);

        if let Some(ref token) = self.auth_token {
            request = request.bearer_auth(token);
        }
        request
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, body: String) -> A2AResult<TransportResponse> {
        let mut request = self.request(body, JSON_MEDIA_TYPE);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }

    async fn open_event_stream(&self, body: String) -> A2AResult<EventDataStream> {
        let response = self.request(body, EVENT_STREAM_MEDIA_TYPE).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), url = %self.endpoint, "Event stream rejected");
            return Err(A2AError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.starts_with(EVENT_STREAM_MEDIA_TYPE) {
            let body = response.text().await?;
            tracing::warn!(
                content_type = %content_type,
                url = %self.endpoint,
                "Event stream answered with a plain reply"
            );
            return Err(rejected_subscription(&content_type, &body));
        }

        let events = response
            .bytes_stream()
            .eventsource()
            .map(|event| match event {
                Ok(event) => Ok(event.data),
                Err(e) => Err(A2AError::Streaming(e.to_string())),
            });
        Ok(events.boxed())
    }
}

/// Error for a subscription answered with something other than an event stream.
///
/// A JSON-RPC error in the body is surfaced as [`A2AError::Protocol`].
fn rejected_subscription(content_type: &str, body: &str) -> A2AError {
    if let Ok(response) = jsonrpc::decode_response(body) {
        if let Some(error) = response.error() {
            return A2AError::Protocol(error.clone());
        }
    }
    A2AError::Streaming(format!(
        "unexpected content type `{content_type}` for an event stream"
    ))
}
