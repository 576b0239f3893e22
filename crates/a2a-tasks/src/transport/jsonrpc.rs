//! JSON-RPC 2.0 envelope codec for the task protocol.
//!
//! Requests and responses are closed unions keyed by the `method` field.
//! Decoding is two-phase: the raw JSON value is parsed first, the
//! discriminator is peeked, and only then is the value decoded into the
//! selected variant. A missing or unknown discriminator never fails a decode;
//! a malformed body inside a recognised variant always does.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{A2AError, A2AResult};
use crate::id::StringOrInt;
use crate::notification::TaskPushNotificationConfig;
use crate::task::{Task, TaskIdParams, TaskQueryParams, TaskSendParams, TaskStreamingResult};
use crate::transport::error_codes::JsonRpcError;

/// JSON-RPC 2.0 protocol version.
pub const JSONRPC_VERSION: &str = "2.0";

fn default_version() -> String {
    JSONRPC_VERSION.into()
}

// ── Methods ──────────────────────────────────────────────────

/// Task protocol JSON-RPC method names.
pub mod methods {
    /// Create or continue a task.
    pub const SEND_TASK: &str = "tasks/send";

    /// Fetch a task by id.
    pub const GET_TASK: &str = "tasks/get";

    /// Cancel a task.
    pub const CANCEL_TASK: &str = "tasks/cancel";

    /// Register a push notification target for a task.
    pub const SET_TASK_PUSH_NOTIFICATION: &str = "tasks/pushNotification/set";

    /// Read the push notification target of a task.
    pub const GET_TASK_PUSH_NOTIFICATION: &str = "tasks/pushNotification/get";

    /// Reattach to the event stream of a running task.
    pub const RESUBSCRIBE: &str = "tasks/resubscribe";

    /// Create or continue a task and stream its updates over SSE.
    pub const SEND_TASK_STREAMING: &str = "tasks/sendSubscribe";
}

// ── Requests ─────────────────────────────────────────────────

/// The envelope shared by every recognised request variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Request<P> {
    pub jsonrpc: String,
    pub id: Option<StringOrInt>,
    pub params: P,
}

impl<P> Request<P> {
    pub fn new(id: Option<StringOrInt>, params: P) -> Self {
        Self {
            jsonrpc: default_version(),
            id,
            params,
        }
    }
}

/// A JSON-RPC request of the task protocol.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonRpcRequest {
    SendTask(Request<TaskSendParams>),
    GetTask(Request<TaskQueryParams>),
    CancelTask(Request<TaskIdParams>),
    SetTaskPushNotification(Request<TaskPushNotificationConfig>),
    GetTaskPushNotification(Request<TaskIdParams>),
    Resubscribe(Request<TaskQueryParams>),
    SendTaskStreaming(Request<TaskSendParams>),
    /// Missing or unrecognised `method`; only the envelope header is kept.
    UnknownMethod {
        jsonrpc: String,
        id: Option<StringOrInt>,
    },
}

impl JsonRpcRequest {
    pub fn send_task(id: Option<StringOrInt>, params: TaskSendParams) -> Self {
        Self::SendTask(Request::new(id, params))
    }

    pub fn get_task(id: Option<StringOrInt>, params: TaskQueryParams) -> Self {
        Self::GetTask(Request::new(id, params))
    }

    pub fn cancel_task(id: Option<StringOrInt>, params: TaskIdParams) -> Self {
        Self::CancelTask(Request::new(id, params))
    }

    pub fn set_task_push_notification(
        id: Option<StringOrInt>,
        params: TaskPushNotificationConfig,
    ) -> Self {
        Self::SetTaskPushNotification(Request::new(id, params))
    }

    pub fn get_task_push_notification(id: Option<StringOrInt>, params: TaskIdParams) -> Self {
        Self::GetTaskPushNotification(Request::new(id, params))
    }

    pub fn resubscribe(id: Option<StringOrInt>, params: TaskQueryParams) -> Self {
        Self::Resubscribe(Request::new(id, params))
    }

    pub fn send_task_streaming(id: Option<StringOrInt>, params: TaskSendParams) -> Self {
        Self::SendTaskStreaming(Request::new(id, params))
    }

    /// The method discriminator, `None` for [`JsonRpcRequest::UnknownMethod`].
    pub fn method(&self) -> Option<&'static str> {
        match self {
            JsonRpcRequest::SendTask(_) => Some(methods::SEND_TASK),
            JsonRpcRequest::GetTask(_) => Some(methods::GET_TASK),
            JsonRpcRequest::CancelTask(_) => Some(methods::CANCEL_TASK),
            JsonRpcRequest::SetTaskPushNotification(_) => {
                Some(methods::SET_TASK_PUSH_NOTIFICATION)
            }
            JsonRpcRequest::GetTaskPushNotification(_) => {
                Some(methods::GET_TASK_PUSH_NOTIFICATION)
            }
            JsonRpcRequest::Resubscribe(_) => Some(methods::RESUBSCRIBE),
            JsonRpcRequest::SendTaskStreaming(_) => Some(methods::SEND_TASK_STREAMING),
            JsonRpcRequest::UnknownMethod { .. } => None,
        }
    }

    pub fn id(&self) -> Option<&StringOrInt> {
        match self {
            JsonRpcRequest::SendTask(r) | JsonRpcRequest::SendTaskStreaming(r) => r.id.as_ref(),
            JsonRpcRequest::GetTask(r) | JsonRpcRequest::Resubscribe(r) => r.id.as_ref(),
            JsonRpcRequest::CancelTask(r) | JsonRpcRequest::GetTaskPushNotification(r) => {
                r.id.as_ref()
            }
            JsonRpcRequest::SetTaskPushNotification(r) => r.id.as_ref(),
            JsonRpcRequest::UnknownMethod { id, .. } => id.as_ref(),
        }
    }
}

#[derive(Serialize)]
struct RequestWire<'a, P> {
    jsonrpc: &'static str,
    id: &'a Option<StringOrInt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<&'a P>,
}

impl<P: Serialize> Request<P> {
    fn wire(&self, method: &'static str) -> RequestWire<'_, P> {
        RequestWire {
            jsonrpc: JSONRPC_VERSION,
            id: &self.id,
            method: Some(method),
            params: Some(&self.params),
        }
    }
}

impl Serialize for JsonRpcRequest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            JsonRpcRequest::SendTask(r) => r.wire(methods::SEND_TASK).serialize(serializer),
            JsonRpcRequest::GetTask(r) => r.wire(methods::GET_TASK).serialize(serializer),
            JsonRpcRequest::CancelTask(r) => r.wire(methods::CANCEL_TASK).serialize(serializer),
            JsonRpcRequest::SetTaskPushNotification(r) => r
                .wire(methods::SET_TASK_PUSH_NOTIFICATION)
                .serialize(serializer),
            JsonRpcRequest::GetTaskPushNotification(r) => r
                .wire(methods::GET_TASK_PUSH_NOTIFICATION)
                .serialize(serializer),
            JsonRpcRequest::Resubscribe(r) => r.wire(methods::RESUBSCRIBE).serialize(serializer),
            JsonRpcRequest::SendTaskStreaming(r) => r
                .wire(methods::SEND_TASK_STREAMING)
                .serialize(serializer),
            JsonRpcRequest::UnknownMethod { id, .. } => RequestWire::<()> {
                jsonrpc: JSONRPC_VERSION,
                id,
                method: None,
                params: None,
            }
            .serialize(serializer),
        }
    }
}

#[derive(Deserialize)]
struct RequestEnvelope<P> {
    #[serde(default = "default_version")]
    jsonrpc: String,
    #[serde(default)]
    id: Option<StringOrInt>,
    params: P,
}

#[derive(Deserialize)]
struct EnvelopeHeader {
    #[serde(default = "default_version")]
    jsonrpc: String,
    #[serde(default)]
    id: Option<StringOrInt>,
}

fn request_envelope<P: DeserializeOwned>(value: Value) -> Result<Request<P>, serde_json::Error> {
    let envelope: RequestEnvelope<P> = serde_json::from_value(value)?;
    Ok(Request {
        jsonrpc: envelope.jsonrpc,
        id: envelope.id,
        params: envelope.params,
    })
}

fn peek_method(value: &Value) -> Result<Option<String>, serde_json::Error> {
    let object = value
        .as_object()
        .ok_or_else(|| <serde_json::Error as de::Error>::custom("JSON-RPC message must be an object"))?;
    Ok(object
        .get("method")
        .and_then(Value::as_str)
        .map(str::to_owned))
}

/// Decode a request from an already-parsed JSON value.
pub fn decode_request_value(value: Value) -> Result<JsonRpcRequest, serde_json::Error> {
    let method = peek_method(&value)?;
    let request = match method.as_deref() {
        Some(methods::SEND_TASK) => JsonRpcRequest::SendTask(request_envelope(value)?),
        Some(methods::GET_TASK) => JsonRpcRequest::GetTask(request_envelope(value)?),
        Some(methods::CANCEL_TASK) => JsonRpcRequest::CancelTask(request_envelope(value)?),
        Some(methods::SET_TASK_PUSH_NOTIFICATION) => {
            JsonRpcRequest::SetTaskPushNotification(request_envelope(value)?)
        }
        Some(methods::GET_TASK_PUSH_NOTIFICATION) => {
            JsonRpcRequest::GetTaskPushNotification(request_envelope(value)?)
        }
        Some(methods::RESUBSCRIBE) => JsonRpcRequest::Resubscribe(request_envelope(value)?),
        Some(methods::SEND_TASK_STREAMING) => {
            JsonRpcRequest::SendTaskStreaming(request_envelope(value)?)
        }
        _ => {
            let header: EnvelopeHeader = serde_json::from_value(value)?;
            JsonRpcRequest::UnknownMethod {
                jsonrpc: header.jsonrpc,
                id: header.id,
            }
        }
    };
    Ok(request)
}

impl<'de> Deserialize<'de> for JsonRpcRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        decode_request_value(value).map_err(de::Error::custom)
    }
}

// ── Responses ────────────────────────────────────────────────

/// The envelope shared by every response variant.
///
/// A well-formed response carries exactly one of `result` and `error`; the
/// codec keeps whichever fields are present without enforcing that.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<R> {
    pub jsonrpc: String,
    pub id: Option<StringOrInt>,
    pub result: Option<R>,
    pub error: Option<JsonRpcError>,
}

impl<R> Response<R> {
    pub fn success(id: Option<StringOrInt>, result: R) -> Self {
        Self {
            jsonrpc: default_version(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Option<StringOrInt>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: default_version(),
            id,
            result: None,
            error: Some(error),
        }
    }

    /// The result, or the JSON-RPC error as [`A2AError::Protocol`].
    pub fn into_result(self) -> A2AResult<R> {
        if let Some(error) = self.error {
            return Err(A2AError::Protocol(error));
        }
        self.result.ok_or(A2AError::EmptyResponse)
    }
}

impl Response<Value> {
    /// Re-decode an untyped result into the shape the caller expects.
    pub fn decode_result<T: DeserializeOwned>(self) -> A2AResult<T> {
        let value = self.into_result()?;
        Ok(serde_json::from_value(value)?)
    }
}

/// A JSON-RPC response of the task protocol.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonRpcResponse {
    SendTask(Response<Task>),
    GetTask(Response<Task>),
    CancelTask(Response<Task>),
    SetTaskPushNotification(Response<TaskPushNotificationConfig>),
    GetTaskPushNotification(Response<TaskPushNotificationConfig>),
    SendTaskStreaming(Response<TaskStreamingResult>),
    /// No recognised `method`; the result is kept as raw JSON.
    Default(Response<Value>),
}

impl JsonRpcResponse {
    /// The method discriminator written on encode, `None` for `Default`.
    pub fn method(&self) -> Option<&'static str> {
        match self {
            JsonRpcResponse::SendTask(_) => Some(methods::SEND_TASK),
            JsonRpcResponse::GetTask(_) => Some(methods::GET_TASK),
            JsonRpcResponse::CancelTask(_) => Some(methods::CANCEL_TASK),
            JsonRpcResponse::SetTaskPushNotification(_) => {
                Some(methods::SET_TASK_PUSH_NOTIFICATION)
            }
            JsonRpcResponse::GetTaskPushNotification(_) => {
                Some(methods::GET_TASK_PUSH_NOTIFICATION)
            }
            JsonRpcResponse::SendTaskStreaming(_) => Some(methods::SEND_TASK_STREAMING),
            JsonRpcResponse::Default(_) => None,
        }
    }

    pub fn id(&self) -> Option<&StringOrInt> {
        match self {
            JsonRpcResponse::SendTask(r)
            | JsonRpcResponse::GetTask(r)
            | JsonRpcResponse::CancelTask(r) => r.id.as_ref(),
            JsonRpcResponse::SetTaskPushNotification(r)
            | JsonRpcResponse::GetTaskPushNotification(r) => r.id.as_ref(),
            JsonRpcResponse::SendTaskStreaming(r) => r.id.as_ref(),
            JsonRpcResponse::Default(r) => r.id.as_ref(),
        }
    }

    pub fn error(&self) -> Option<&JsonRpcError> {
        match self {
            JsonRpcResponse::SendTask(r)
            | JsonRpcResponse::GetTask(r)
            | JsonRpcResponse::CancelTask(r) => r.error.as_ref(),
            JsonRpcResponse::SetTaskPushNotification(r)
            | JsonRpcResponse::GetTaskPushNotification(r) => r.error.as_ref(),
            JsonRpcResponse::SendTaskStreaming(r) => r.error.as_ref(),
            JsonRpcResponse::Default(r) => r.error.as_ref(),
        }
    }

    /// Check if this is an error response.
    pub fn is_error(&self) -> bool {
        self.error().is_some()
    }

    /// Extract a `Task` result from any task-carrying variant or `Default`.
    pub fn into_task(self) -> A2AResult<Task> {
        match self {
            JsonRpcResponse::SendTask(r)
            | JsonRpcResponse::GetTask(r)
            | JsonRpcResponse::CancelTask(r) => r.into_result(),
            JsonRpcResponse::Default(r) => r.decode_result(),
            other => Err(other.unexpected("a task")),
        }
    }

    /// Extract a push notification config result.
    pub fn into_push_notification_config(self) -> A2AResult<TaskPushNotificationConfig> {
        match self {
            JsonRpcResponse::SetTaskPushNotification(r)
            | JsonRpcResponse::GetTaskPushNotification(r) => r.into_result(),
            JsonRpcResponse::Default(r) => r.decode_result(),
            other => Err(other.unexpected("a push notification config")),
        }
    }

    /// Extract a streaming event result.
    pub fn into_streaming_result(self) -> A2AResult<TaskStreamingResult> {
        match self {
            JsonRpcResponse::SendTaskStreaming(r) => r.into_result(),
            JsonRpcResponse::Default(r) => r.decode_result(),
            other => Err(other.unexpected("a streaming event")),
        }
    }

    fn unexpected(&self, expected: &str) -> A2AError {
        if let Some(error) = self.error() {
            return A2AError::Protocol(error.clone());
        }
        A2AError::UnexpectedResponse(format!(
            "expected {expected}, got a `{}` response",
            self.method().unwrap_or("default")
        ))
    }
}

#[derive(Serialize)]
struct ResponseWire<'a, R> {
    jsonrpc: &'static str,
    id: &'a Option<StringOrInt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a R>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a JsonRpcError>,
}

impl<R: Serialize> Response<R> {
    fn wire(&self, method: Option<&'static str>) -> ResponseWire<'_, R> {
        ResponseWire {
            jsonrpc: JSONRPC_VERSION,
            id: &self.id,
            method,
            result: self.result.as_ref(),
            error: self.error.as_ref(),
        }
    }
}

impl Serialize for JsonRpcResponse {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let method = self.method();
        match self {
            JsonRpcResponse::SendTask(r)
            | JsonRpcResponse::GetTask(r)
            | JsonRpcResponse::CancelTask(r) => r.wire(method).serialize(serializer),
            JsonRpcResponse::SetTaskPushNotification(r)
            | JsonRpcResponse::GetTaskPushNotification(r) => r.wire(method).serialize(serializer),
            JsonRpcResponse::SendTaskStreaming(r) => r.wire(method).serialize(serializer),
            JsonRpcResponse::Default(r) => r.wire(None).serialize(serializer),
        }
    }
}

#[derive(Deserialize)]
struct ResponseEnvelope<R> {
    #[serde(default = "default_version")]
    jsonrpc: String,
    #[serde(default)]
    id: Option<StringOrInt>,
    result: Option<R>,
    error: Option<JsonRpcError>,
}

fn response_envelope<R: DeserializeOwned>(
    value: Value,
) -> Result<Response<R>, serde_json::Error> {
    let envelope: ResponseEnvelope<R> = serde_json::from_value(value)?;
    Ok(Response {
        jsonrpc: envelope.jsonrpc,
        id: envelope.id,
        result: envelope.result,
        error: envelope.error,
    })
}

/// Decode a response from an already-parsed JSON value.
///
/// Many servers omit `method` on responses, so an absent or unrecognised
/// method selects [`JsonRpcResponse::Default`] rather than failing.
pub fn decode_response_value(value: Value) -> Result<JsonRpcResponse, serde_json::Error> {
    let method = peek_method(&value)?;
    let response = match method.as_deref() {
        Some(methods::SEND_TASK) => JsonRpcResponse::SendTask(response_envelope(value)?),
        Some(methods::GET_TASK) => JsonRpcResponse::GetTask(response_envelope(value)?),
        Some(methods::CANCEL_TASK) => JsonRpcResponse::CancelTask(response_envelope(value)?),
        Some(methods::SET_TASK_PUSH_NOTIFICATION) => {
            JsonRpcResponse::SetTaskPushNotification(response_envelope(value)?)
        }
        Some(methods::GET_TASK_PUSH_NOTIFICATION) => {
            JsonRpcResponse::GetTaskPushNotification(response_envelope(value)?)
        }
        Some(methods::SEND_TASK_STREAMING) => {
            JsonRpcResponse::SendTaskStreaming(response_envelope(value)?)
        }
        _ => JsonRpcResponse::Default(response_envelope(value)?),
    };
    Ok(response)
}

impl<'de> Deserialize<'de> for JsonRpcResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        decode_response_value(value).map_err(de::Error::custom)
    }
}

// ── Text codec ───────────────────────────────────────────────

/// Encode a request as a JSON body.
pub fn encode_request(request: &JsonRpcRequest) -> A2AResult<String> {
    Ok(serde_json::to_string(request)?)
}

/// Decode a request body. Invalid JSON is a hard error.
pub fn decode_request(body: &str) -> A2AResult<JsonRpcRequest> {
    let value: Value = serde_json::from_str(body)?;
    Ok(decode_request_value(value)?)
}

/// Encode a response as a JSON body.
pub fn encode_response(response: &JsonRpcResponse) -> A2AResult<String> {
    Ok(serde_json::to_string(response)?)
}

/// Decode a response body. Invalid JSON is a hard error.
pub fn decode_response(body: &str) -> A2AResult<JsonRpcResponse> {
    let value: Value = serde_json::from_str(body)?;
    Ok(decode_response_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::Artifact;
    use crate::message::Message;
    use crate::notification::PushNotificationConfig;
    use crate::task::{TaskArtifactUpdateEvent, TaskState, TaskStatus, TaskStatusUpdateEvent};
    use crate::transport::error_codes::ErrorKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn push_config() -> TaskPushNotificationConfig {
        TaskPushNotificationConfig::new(
            "t1",
            PushNotificationConfig::new(url::Url::parse("https://hooks.example.com/t1").unwrap())
                .with_token("tok"),
        )
    }

    fn send_params() -> TaskSendParams {
        TaskSendParams::new("t1", Message::user_text("hello"))
            .with_session_id("s1")
            .with_history_length(10)
    }

    fn task() -> Task {
        Task::with_session("t1", "s1")
            .mark_working()
            .add_artifacts(vec![Artifact::text("partial")])
    }

    #[test]
    fn test_request_round_trip() {
        let requests = vec![
            JsonRpcRequest::send_task(Some("r1".into()), send_params()),
            JsonRpcRequest::send_task(
                None,
                TaskSendParams::new("t2", Message::user(Vec::new())),
            ),
            JsonRpcRequest::get_task(
                Some(StringOrInt::Int(2)),
                TaskQueryParams::new("t1").with_history_length(3),
            ),
            JsonRpcRequest::cancel_task(Some("r3".into()), TaskIdParams::new("t1")),
            JsonRpcRequest::set_task_push_notification(Some("r4".into()), push_config()),
            JsonRpcRequest::get_task_push_notification(None, TaskIdParams::new("t1")),
            JsonRpcRequest::resubscribe(Some("r6".into()), TaskQueryParams::new("t1")),
            JsonRpcRequest::send_task_streaming(Some("r7".into()), send_params()),
            JsonRpcRequest::UnknownMethod {
                jsonrpc: JSONRPC_VERSION.into(),
                id: Some(StringOrInt::Int(8)),
            },
        ];

        for request in requests {
            let encoded = encode_request(&request).unwrap();
            assert_eq!(decode_request(&encoded).unwrap(), request, "{encoded}");
        }
    }

    #[test]
    fn test_response_round_trip() {
        let status_event = TaskStreamingResult::from(TaskStatusUpdateEvent {
            id: "t1".into(),
            status: TaskStatus::new(TaskState::Completed),
            is_final: true,
            metadata: Default::default(),
        });
        let artifact_event = TaskStreamingResult::from(TaskArtifactUpdateEvent {
            id: "t1".into(),
            artifact: Artifact::text("chunk").as_chunk(0, false, false),
            metadata: Default::default(),
        });

        let responses = vec![
            JsonRpcResponse::SendTask(Response::success(Some("r1".into()), task())),
            JsonRpcResponse::GetTask(Response::success(Some(StringOrInt::Int(2)), task())),
            JsonRpcResponse::CancelTask(Response::failure(
                Some("r3".into()),
                JsonRpcError::task_not_cancelable(),
            )),
            JsonRpcResponse::SetTaskPushNotification(Response::success(None, push_config())),
            JsonRpcResponse::GetTaskPushNotification(Response::failure(
                None,
                JsonRpcError::push_notification_unsupported(),
            )),
            JsonRpcResponse::SendTaskStreaming(Response::success(Some("r6".into()), status_event)),
            JsonRpcResponse::SendTaskStreaming(Response::success(
                Some("r7".into()),
                artifact_event,
            )),
            JsonRpcResponse::Default(Response::success(
                Some("r8".into()),
                json!({"anything": [1, 2, 3]}),
            )),
            JsonRpcResponse::Default(Response::failure(None, JsonRpcError::internal_error())),
        ];

        for response in responses {
            let encoded = encode_response(&response).unwrap();
            assert_eq!(decode_response(&encoded).unwrap(), response, "{encoded}");
        }
    }

    #[test]
    fn test_encode_omits_absent_fields() {
        let request = JsonRpcRequest::cancel_task(None, TaskIdParams::new("t1"));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"jsonrpc": "2.0", "id": null, "method": "tasks/cancel", "params": {"id": "t1"}})
        );

        let unknown = JsonRpcRequest::UnknownMethod {
            jsonrpc: "2.0".into(),
            id: Some("x".into()),
        };
        assert_eq!(
            serde_json::to_value(&unknown).unwrap(),
            json!({"jsonrpc": "2.0", "id": "x"})
        );

        let response =
            JsonRpcResponse::Default(Response::failure(None, JsonRpcError::task_not_found()));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"jsonrpc": "2.0", "id": null, "error": {"code": -32001, "message": "Task not found"}})
        );
    }

    #[test]
    fn test_response_without_method_is_default() {
        let body = r#"{"jsonrpc":"2.0","id":"r1","result":{"id":"t1","status":{"state":"failed","timestamp":"2025-06-23T20:58:01Z"}}}"#;
        let response = decode_response(body).unwrap();

        let JsonRpcResponse::Default(inner) = response else {
            panic!("expected the default variant");
        };
        assert_eq!(inner.id, Some(StringOrInt::String("r1".into())));
        assert_eq!(
            inner.result,
            Some(json!({"id": "t1", "status": {"state": "failed", "timestamp": "2025-06-23T20:58:01Z"}}))
        );
        assert_eq!(inner.error, None);

        let task: Task = inner.decode_result().unwrap();
        assert_eq!(task.state(), &TaskState::Failed);
    }

    #[test]
    fn test_response_with_unknown_method_is_default() {
        let body = r#"{"jsonrpc":"2.0","id":1,"method":"tasks/resubscribe","result":{"whatever":true}}"#;
        assert!(matches!(
            decode_response(body).unwrap(),
            JsonRpcResponse::Default(_)
        ));
    }

    #[test]
    fn test_default_response_keeps_raw_result() {
        let body = r#"{"jsonrpc":"2.0","id":"r1","result":{"status":{"timestamp":"x","state":"failed"},"id":"t1"}}"#;
        let response = decode_response(body).unwrap();
        let JsonRpcResponse::Default(ref inner) = response else {
            panic!("expected a default response");
        };
        assert_eq!(
            serde_json::to_string(inner.result.as_ref().unwrap()).unwrap(),
            r#"{"status":{"timestamp":"x","state":"failed"},"id":"t1"}"#
        );
        assert_eq!(encode_response(&response).unwrap(), body);
    }

    #[test]
    fn test_response_with_method_is_typed() {
        let body = r#"{
            "id": "wasm-0-479093",
            "jsonrpc": "2.0",
            "method": "tasks/send",
            "result": {
                "id": "wasm-0-479093",
                "contextId": "46efa62e",
                "kind": "task",
                "status": {"state": "failed", "timestamp": "2025-06-23T20:58:01.954703Z"}
            }
        }"#;
        let response = decode_response(body).unwrap();
        let JsonRpcResponse::SendTask(inner) = response else {
            panic!("expected a send-task response");
        };
        assert_eq!(inner.id, Some("wasm-0-479093".into()));
        assert_eq!(inner.result.unwrap().status.state, TaskState::Failed);
    }

    #[test]
    fn test_typed_response_with_bad_result_fails() {
        let body = r#"{"jsonrpc":"2.0","id":1,"method":"tasks/get","result":{"status":"nope"}}"#;
        assert!(matches!(
            decode_response(body),
            Err(A2AError::Serialization(_))
        ));
    }

    #[test]
    fn test_response_with_both_result_and_error_is_kept() {
        let body = r#"{"jsonrpc":"2.0","id":1,"result":{"a":1},"error":{"code":-32603,"message":"boom"}}"#;
        let response = decode_response(body).unwrap();
        assert!(response.is_error());
        let err = response.into_task().unwrap_err();
        assert_eq!(err.protocol_kind(), Some(ErrorKind::InternalError));
    }

    #[test]
    fn test_unknown_request_method() {
        let request =
            decode_request(r#"{"jsonrpc":"2.0","id":1,"method":"tasks/unknown","params":{}}"#)
                .unwrap();
        assert_eq!(
            request,
            JsonRpcRequest::UnknownMethod {
                jsonrpc: "2.0".into(),
                id: Some(StringOrInt::Int(1)),
            }
        );

        let request = decode_request(r#"{"jsonrpc":"2.0","id":"a"}"#).unwrap();
        assert_eq!(request.method(), None);
        assert_eq!(request.id(), Some(&StringOrInt::from("a")));
    }

    #[test]
    fn test_known_method_missing_params_fails() {
        let err = decode_request(r#"{"jsonrpc":"2.0","id":1,"method":"tasks/send"}"#).unwrap_err();
        assert!(err.to_string().contains("params"));

        let err = decode_request(
            r#"{"jsonrpc":"2.0","id":1,"method":"tasks/get","params":{"historyLength":3}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, A2AError::Serialization(_)));
    }

    #[test]
    fn test_malformed_json_fails() {
        assert!(matches!(
            decode_request("{not json"),
            Err(A2AError::Serialization(_))
        ));
        assert!(matches!(
            decode_response(r#"["jsonrpc"]"#),
            Err(A2AError::Serialization(_))
        ));
    }

    #[test]
    fn test_wrong_result_type_is_reported() {
        let response =
            JsonRpcResponse::SetTaskPushNotification(Response::success(None, push_config()));
        assert!(matches!(
            response.into_task(),
            Err(A2AError::UnexpectedResponse(_))
        ));

        let empty = JsonRpcResponse::Default(Response {
            jsonrpc: "2.0".into(),
            id: None,
            result: None,
            error: None,
        });
        assert!(matches!(empty.into_task(), Err(A2AError::EmptyResponse)));
    }
}
