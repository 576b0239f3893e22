//! A2A Client — high-level client for the task protocol.
//!
//! The client builds typed requests, runs them through the envelope codec and
//! an injected [`Transport`], and hands back decoded tasks, push notification
//! configs or event streams. Every operation has a `*_with` form taking full
//! params and an optional request id; the short forms fill in defaults.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::agent_card::AgentCard;
use crate::error::{A2AError, A2AResult};
use crate::id::{IdGenerator, StringOrInt, UuidGenerator};
use crate::message::Message;
use crate::notification::TaskPushNotificationConfig;
use crate::task::{Task, TaskIdParams, TaskQueryParams, TaskSendParams};
use crate::transport::http::{join_path, HttpTransport, Transport};
use crate::transport::jsonrpc::{self, JsonRpcRequest, JsonRpcResponse};
use crate::transport::sse::TaskEventStream;

/// History length requested when the caller does not choose one.
pub const DEFAULT_HISTORY_LENGTH: i32 = 10;

/// JSON-RPC path used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "/";

/// High-level client for communicating with a remote agent.
#[derive(Clone)]
pub struct A2AClient {
    /// Base URL of the remote agent.
    base_url: Url,

    /// Default reqwest transport, also used for agent card discovery.
    http: HttpTransport,

    /// Replaces `http` for JSON-RPC traffic when set.
    transport: Option<Arc<dyn Transport>>,

    id_generator: Arc<dyn IdGenerator>,
}

impl std::fmt::Debug for A2AClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("A2AClient")
            .field("base_url", &self.base_url.as_str())
            .field("endpoint", &self.http.endpoint().as_str())
            .field("custom_transport", &self.transport.is_some())
            .finish()
    }
}

impl A2AClient {
    /// Create a client for the agent at `base_url`, posting to its root path.
    pub fn new(base_url: &str) -> A2AResult<Self> {
        let base_url = Url::parse(base_url)?;
        let endpoint = join_path(&base_url, DEFAULT_ENDPOINT)?;
        Ok(Self {
            base_url,
            http: HttpTransport::new(endpoint),
            transport: None,
            id_generator: Arc::new(UuidGenerator),
        })
    }

    /// Post JSON-RPC requests to `path` under the base URL.
    pub fn with_endpoint(mut self, path: &str) -> A2AResult<Self> {
        let endpoint = join_path(&self.base_url, path)?;
        self.http = self.http.with_endpoint(endpoint);
        Ok(self)
    }

    /// Route JSON-RPC traffic through a custom transport.
    ///
    /// Endpoint, auth and timeout settings only apply to the built-in HTTP
    /// transport and are ignored by a custom one.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom source for request, task and session ids.
    pub fn with_id_generator(mut self, generator: impl IdGenerator + 'static) -> Self {
        self.id_generator = Arc::new(generator);
        self
    }

    /// Set authentication token.
    pub fn with_auth(mut self, token: impl Into<String>) -> Self {
        self.http = self.http.with_auth(token);
        self
    }

    /// Use a preconfigured HTTP client.
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = self.http.with_http_client(http);
        self
    }

    /// Bound every request/response call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The URL JSON-RPC requests are posted to.
    pub fn endpoint_url(&self) -> &Url {
        self.http.endpoint()
    }

    /// Fetch the remote agent's card from its well-known path.
    pub async fn agent_card(&self) -> A2AResult<AgentCard> {
        AgentCard::discover_with(self.http.http_client(), &self.base_url).await
    }

    // ── Request / response operations ────────────────────────

    /// Get a task by its ID with the default history length.
    pub async fn get_task(&self, task_id: &str) -> A2AResult<Task> {
        let params = TaskQueryParams::new(task_id).with_history_length(DEFAULT_HISTORY_LENGTH);
        self.get_task_with(params, None).await
    }

    pub async fn get_task_with(
        &self,
        params: TaskQueryParams,
        request_id: Option<StringOrInt>,
    ) -> A2AResult<Task> {
        let request = JsonRpcRequest::get_task(Some(self.request_id(request_id)), params);
        self.call(request).await?.into_task()
    }

    /// Send a message as a new task with generated task and session ids.
    pub async fn send_task(&self, message: Message) -> A2AResult<Task> {
        self.send_task_with(self.new_task_params(message), None)
            .await
    }

    pub async fn send_task_with(
        &self,
        params: TaskSendParams,
        request_id: Option<StringOrInt>,
    ) -> A2AResult<Task> {
        let request = JsonRpcRequest::send_task(Some(self.request_id(request_id)), params);
        self.call(request).await?.into_task()
    }

    /// Cancel a task.
    ///
    /// A server that refuses answers with a `TaskNotCancelable` protocol
    /// error; otherwise check the returned state.
    pub async fn cancel_task(&self, task_id: &str) -> A2AResult<Task> {
        self.cancel_task_with(TaskIdParams::new(task_id), None)
            .await
    }

    pub async fn cancel_task_with(
        &self,
        params: TaskIdParams,
        request_id: Option<StringOrInt>,
    ) -> A2AResult<Task> {
        let request = JsonRpcRequest::cancel_task(Some(self.request_id(request_id)), params);
        self.call(request).await?.into_task()
    }

    // ── Push notifications ───────────────────────────────────

    /// Register the push notification target of a task.
    pub async fn set_task_push_notification(
        &self,
        config: TaskPushNotificationConfig,
    ) -> A2AResult<TaskPushNotificationConfig> {
        self.set_task_push_notification_with(config, None).await
    }

    pub async fn set_task_push_notification_with(
        &self,
        config: TaskPushNotificationConfig,
        request_id: Option<StringOrInt>,
    ) -> A2AResult<TaskPushNotificationConfig> {
        let request =
            JsonRpcRequest::set_task_push_notification(Some(self.request_id(request_id)), config);
        self.call(request).await?.into_push_notification_config()
    }

    /// Read the push notification target of a task.
    pub async fn get_task_push_notification(
        &self,
        task_id: &str,
    ) -> A2AResult<TaskPushNotificationConfig> {
        self.get_task_push_notification_with(TaskIdParams::new(task_id), None)
            .await
    }

    pub async fn get_task_push_notification_with(
        &self,
        params: TaskIdParams,
        request_id: Option<StringOrInt>,
    ) -> A2AResult<TaskPushNotificationConfig> {
        let request =
            JsonRpcRequest::get_task_push_notification(Some(self.request_id(request_id)), params);
        self.call(request).await?.into_push_notification_config()
    }

    // ── Streaming operations ─────────────────────────────────

    /// Send a message as a new task and subscribe to its updates.
    pub async fn send_task_streaming(&self, message: Message) -> A2AResult<TaskEventStream> {
        self.send_task_streaming_with(self.new_task_params(message), None)
            .await
    }

    pub async fn send_task_streaming_with(
        &self,
        params: TaskSendParams,
        request_id: Option<StringOrInt>,
    ) -> A2AResult<TaskEventStream> {
        let request =
            JsonRpcRequest::send_task_streaming(Some(self.request_id(request_id)), params);
        self.subscribe(request).await
    }

    /// Reattach to a running task's updates. Missed events are not replayed.
    pub async fn resubscribe_to_task(&self, task_id: &str) -> A2AResult<TaskEventStream> {
        self.resubscribe_to_task_with(TaskQueryParams::new(task_id), None)
            .await
    }

    pub async fn resubscribe_to_task_with(
        &self,
        params: TaskQueryParams,
        request_id: Option<StringOrInt>,
    ) -> A2AResult<TaskEventStream> {
        let request = JsonRpcRequest::resubscribe(Some(self.request_id(request_id)), params);
        self.subscribe(request).await
    }

    // ── Raw exchange ─────────────────────────────────────────

    /// Send any request and return the decoded response envelope.
    ///
    /// A non-success HTTP status is an error; a JSON-RPC `error` field is
    /// left in the envelope for the caller to inspect.
    pub async fn call(&self, request: JsonRpcRequest) -> A2AResult<JsonRpcResponse> {
        let body = jsonrpc::encode_request(&request)?;

        tracing::debug!(
            method = request.method().unwrap_or("unknown"),
            request_id = ?request.id(),
            url = %self.endpoint_url(),
            "Sending A2A request"
        );

        let response = self.transport().post(body).await?;

        if !response.is_success() {
            tracing::warn!(
                status = response.status,
                method = request.method().unwrap_or("unknown"),
                "A2A request failed"
            );
            return Err(A2AError::HttpStatus {
                status: response.status,
                body: response.body,
            });
        }

        jsonrpc::decode_response(&response.body)
    }

    /// Send params for a new task: fresh `task::` and `session::` ids and
    /// the default history length.
    pub fn new_task_params(&self, message: Message) -> TaskSendParams {
        let task_id = format!("task::{}", self.id_generator.generate_id());
        let session_id = format!("session::{}", self.id_generator.generate_id());
        TaskSendParams::new(task_id, message)
            .with_session_id(session_id)
            .with_history_length(DEFAULT_HISTORY_LENGTH)
    }

    // ── Internals ────────────────────────────────────────────

    async fn subscribe(&self, request: JsonRpcRequest) -> A2AResult<TaskEventStream> {
        let body = jsonrpc::encode_request(&request)?;

        tracing::debug!(
            method = request.method().unwrap_or("unknown"),
            request_id = ?request.id(),
            url = %self.endpoint_url(),
            "Opening A2A event stream"
        );

        let events = self.transport().open_event_stream(body).await?;
        Ok(TaskEventStream::new(events))
    }

    fn transport(&self) -> &dyn Transport {
        match &self.transport {
            Some(transport) => transport.as_ref(),
            None => &self.http,
        }
    }

    fn request_id(&self, supplied: Option<StringOrInt>) -> StringOrInt {
        supplied.unwrap_or_else(|| StringOrInt::String(self.id_generator.generate_id()))
    }
}
