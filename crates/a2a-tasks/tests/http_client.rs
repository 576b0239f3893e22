//! End-to-end tests of `A2AClient` over the reqwest transport against a mock agent.

use a2a_tasks::{
    A2AClient, A2AError, AgentCard, ErrorKind, Message, PushNotificationConfig, StatusCategory,
    TaskPushNotificationConfig, TaskState, TaskStreamingResult,
};
use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn task_json(id: &str, state: &str) -> Value {
    json!({
        "id": id,
        "sessionId": "s1",
        "status": {"state": state, "timestamp": "2025-01-01T00:00:00.000Z"},
        "history": [{"role": "user", "parts": [{"kind": "text", "text": "hello"}]}]
    })
}

fn sse_body(events: &[Value]) -> String {
    events
        .iter()
        .map(|event| format!("data: {event}\n\n"))
        .collect()
}

#[tokio::test]
async fn test_get_task_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "jsonrpc": "2.0",
            "method": "tasks/get",
            "params": {"id": "t1", "historyLength": 10}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": "r1",
            "result": task_json("t1", "working")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = A2AClient::new(&server.uri()).unwrap();
    let task = client.get_task("t1").await.unwrap();

    assert_eq!(task.id, "t1");
    assert_eq!(task.session_id.as_deref(), Some("s1"));
    assert_eq!(task.state(), &TaskState::Working);
    assert_eq!(task.history.unwrap()[0].text_content(), "hello");
}

#[tokio::test]
async fn test_bearer_token_and_custom_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/a2a"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": "r1",
            "method": "tasks/send",
            "result": task_json("t1", "submitted")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = A2AClient::new(&server.uri())
        .unwrap()
        .with_endpoint("/a2a")
        .unwrap()
        .with_auth("secret");
    let task = client.send_task(Message::user_text("hello")).await.unwrap();

    assert_eq!(task.state(), &TaskState::Submitted);
}

#[tokio::test]
async fn test_non_success_status_carries_raw_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("missing token"))
        .mount(&server)
        .await;

    let client = A2AClient::new(&server.uri()).unwrap();
    let err = client.cancel_task("t1").await.unwrap_err();

    match &err {
        A2AError::HttpStatus { status, body } => {
            assert_eq!(*status, 401);
            assert_eq!(body, "missing token");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.status_category(), StatusCategory::Unauthorized);
}

#[tokio::test]
async fn test_protocol_error_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": "r1",
            "error": {"code": -32001, "message": "Task not found", "data": {"id": "t404"}}
        })))
        .mount(&server)
        .await;

    let client = A2AClient::new(&server.uri()).unwrap();
    let err = client.get_task("t404").await.unwrap_err();

    assert_eq!(err.protocol_kind(), Some(ErrorKind::TaskNotFound));
    assert_eq!(err.status_category(), StatusCategory::NotFound);
    match err {
        A2AError::Protocol(rpc) => assert_eq!(rpc.data, Some(json!({"id": "t404"}))),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = A2AClient::new(&server.uri()).unwrap();
    assert!(matches!(
        client.get_task("t1").await,
        Err(A2AError::Serialization(_))
    ));
}

#[tokio::test]
async fn test_push_notification_config_over_http() {
    let server = MockServer::start().await;
    let config = json!({
        "id": "t1",
        "pushNotificationConfig": {"url": "https://hooks.example.com/t1", "token": "abc"}
    });

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "tasks/pushNotification/set",
            "params": config
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": "r1",
            "result": config
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = A2AClient::new(&server.uri()).unwrap();
    let request = TaskPushNotificationConfig::new(
        "t1",
        PushNotificationConfig::new("https://hooks.example.com/t1".parse().unwrap())
            .with_token("abc"),
    );
    let stored = client
        .set_task_push_notification(request.clone())
        .await
        .unwrap();

    assert_eq!(stored, request);
}

#[tokio::test]
async fn test_streaming_stops_at_final_event() {
    let server = MockServer::start().await;
    let body = sse_body(&[
        json!({"jsonrpc": "2.0", "id": "r1", "result": {
            "id": "t1",
            "artifact": {"parts": [{"kind": "text", "text": "chunk"}], "index": 0, "append": false}
        }}),
        json!({"jsonrpc": "2.0", "id": "r1", "result": {
            "id": "t1",
            "status": {"state": "working", "timestamp": "2025-01-01T00:00:00.000Z"},
            "final": false
        }}),
        json!({"jsonrpc": "2.0", "id": "r1", "result": {
            "id": "t1",
            "status": {"state": "completed", "timestamp": "2025-01-01T00:00:01.000Z"},
            "final": true
        }}),
        json!({"jsonrpc": "2.0", "id": "r1", "result": {
            "id": "t1",
            "status": {"state": "failed", "timestamp": "2025-01-01T00:00:02.000Z"},
            "final": true
        }}),
    ]);

    Mock::given(method("POST"))
        .and(header("accept", "text/event-stream"))
        .and(body_partial_json(json!({"method": "tasks/sendSubscribe"})))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let client = A2AClient::new(&server.uri()).unwrap();
    let events: Vec<TaskStreamingResult> = client
        .send_task_streaming(Message::user_text("go"))
        .await
        .unwrap()
        .map(|event| event.unwrap())
        .collect()
        .await;

    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], TaskStreamingResult::ArtifactUpdate(_)));
    match &events[2] {
        TaskStreamingResult::StatusUpdate(update) => {
            assert!(update.is_final);
            assert_eq!(update.status.state, TaskState::Completed);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_resubscribe_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "tasks/resubscribe"})))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = A2AClient::new(&server.uri()).unwrap();
    let err = client.resubscribe_to_task("t1").await.unwrap_err();
    assert!(matches!(err, A2AError::HttpStatus { status: 404, .. }));
}

#[tokio::test]
async fn test_resubscribe_json_error_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "tasks/resubscribe"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": "r1",
            "error": {"code": -32001, "message": "Task not found"}
        })))
        .mount(&server)
        .await;

    let client = A2AClient::new(&server.uri()).unwrap();
    let err = client.resubscribe_to_task("missing").await.unwrap_err();
    assert_eq!(err.protocol_kind(), Some(ErrorKind::TaskNotFound));
}

#[tokio::test]
async fn test_streaming_plain_reply_without_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .mount(&server)
        .await;

    let client = A2AClient::new(&server.uri()).unwrap();
    let err = client
        .send_task_streaming(Message::user_text("go"))
        .await
        .unwrap_err();
    match err {
        A2AError::Streaming(message) => assert!(message.contains("text/plain")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_agent_card_discovery() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/.well-known/agent.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Echo Agent",
            "url": server.uri(),
            "version": "1.0.0",
            "capabilities": {"streaming": true},
            "skills": [{"id": "echo", "name": "Echo"}]
        })))
        .mount(&server)
        .await;

    let card = AgentCard::discover(&server.uri()).await.unwrap();
    assert_eq!(card.name, "Echo Agent");
    assert!(card.supports_streaming());
    assert!(card.find_skill("echo").is_some());

    let client = A2AClient::new(&server.uri()).unwrap();
    assert_eq!(client.agent_card().await.unwrap(), card);
}

#[tokio::test]
async fn test_agent_card_discovery_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing/.well-known/agent.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/blank/.well-known/agent.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "",
            "url": "http://localhost",
            "version": "1"
        })))
        .mount(&server)
        .await;

    let err = AgentCard::discover(&format!("{}/missing", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, A2AError::DiscoveryFailed(_)));

    let err = AgentCard::discover(&format!("{}/blank", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, A2AError::InvalidAgentCard(_)));
}
