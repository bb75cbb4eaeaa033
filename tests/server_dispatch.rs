//! End-to-end dispatch tests
//!
//! Drives the protocol server through raw JSON-RPC bodies and through a
//! loopback client, the way a peer agent would see it over the wire.

use std::{
    sync::Arc,
    task::{Context, Poll},
};

use async_trait::async_trait;
use serde_json::json;
use url::Url;

use a2a_agent::{
    client::{AgentClient, ClientConfig},
    codec::JsonRpcCodec,
    prelude::*,
    protocol::{error::A2AResult, AgentStatus, CommunicateReply, DelegateReceipt},
    service::CallService,
    transport::{Transport, TransportRequest, TransportResponse},
};

struct EchoHandler {
    store: Arc<TaskStore>,
}

#[async_trait]
impl AgentHandler for EchoHandler {
    async fn discover(&self) -> A2AResult<AgentDescriptor> {
        Ok(AgentDescriptor::new(
            "echo-agent",
            "Echo Agent",
            vec!["echo".to_string()],
        ))
    }

    async fn communicate(&self, message: Message) -> A2AResult<CommunicateReply> {
        let texts: Vec<&str> = message
            .parts
            .iter()
            .filter_map(|part| match part {
                MessagePart::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        Ok(CommunicateReply::ok(
            Message::agent(texts.join(" ")),
            "echo-agent",
        ))
    }

    async fn delegate(&self, descriptor: TaskDescriptor) -> A2AResult<DelegateReceipt> {
        let task = Task::create(descriptor.message);
        let task_id = self.store.insert(task).await;
        Ok(DelegateReceipt::accepted(task_id, "echo-agent"))
    }

    async fn health(&self) -> HealthReport {
        HealthReport::healthy("echo-agent", 9)
    }
}

fn echo_server() -> A2aServer<EchoHandler> {
    let store = Arc::new(TaskStore::new());
    let handler = EchoHandler {
        store: store.clone(),
    };
    A2aServer::new(handler, ServerConfig::new(4100)).with_task_store(store)
}

/// Transport that hands request bodies straight to a dispatch server
#[derive(Clone)]
struct LoopbackTransport {
    server: A2aServer<EchoHandler>,
    base_url: Url,
}

impl LoopbackTransport {
    fn new(server: A2aServer<EchoHandler>) -> Self {
        Self {
            server,
            base_url: Url::parse("loopback://").unwrap(),
        }
    }
}

#[async_trait]
impl Transport for LoopbackTransport {
    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), A2AError>> {
        Poll::Ready(Ok(()))
    }

    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, A2AError> {
        assert_eq!(request.endpoint, "/rpc");
        assert_eq!(request.method, "POST");

        let response = self.server.dispatch_bytes(&request.body).await;
        Ok(TransportResponse::new(200).body(response.encode()?))
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[tokio::test]
async fn discover_routes_and_echoes_id() {
    let server = echo_server();

    let response = server
        .dispatch_bytes(br#"{"jsonrpc":"2.0","method":"discover","id":1}"#)
        .await;
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["id"], 1);
    assert!(json.get("error").is_none());
    let result = &json["result"];
    for field in ["id", "name", "capabilities", "status", "timestamp"] {
        assert!(result.get(field).is_some(), "result must carry {}", field);
    }
}

#[tokio::test]
async fn unknown_method_is_method_not_found() {
    let server = echo_server();

    let response = server
        .dispatch_bytes(br#"{"jsonrpc":"2.0","method":"unknown_op","id":2}"#)
        .await;
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["id"], 2);
    assert_eq!(json["error"]["code"], -32601);
    assert!(json.get("result").is_none());
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let server = echo_server();

    let response = server.dispatch_bytes(b"{").await;
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["error"]["code"], -32700);
}

#[tokio::test]
async fn communicate_validates_inbound_messages() {
    let server = echo_server();
    let body = json!({
        "jsonrpc": "2.0",
        "method": "communicate",
        "params": {"message": {"role": "user", "parts": [], "messageId": "m1"}},
        "id": 3
    });

    let response = server.dispatch_bytes(body.to_string().as_bytes()).await;
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["error"]["code"], -32002);
}

#[tokio::test]
async fn delegation_lifecycle_is_observable() {
    let server = echo_server();

    let body = json!({
        "jsonrpc": "2.0",
        "method": "delegate",
        "params": {
            "message": {
                "role": "user",
                "parts": [{"kind": "text", "text": "sum 1..5"}],
                "messageId": "m1"
            }
        },
        "id": 4
    });
    let response = server.dispatch_bytes(body.to_string().as_bytes()).await;
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["result"]["status"], "accepted");
    assert_eq!(json["result"]["agentId"], "echo-agent");
    let task_id = json["result"]["taskId"].as_str().unwrap().to_string();

    // Drive the task through its lifecycle the way a worker would
    let store_view = server.task_snapshot(&task_id).await.unwrap();
    assert_eq!(store_view.state(), TaskState::Submitted);

    let body = json!({
        "jsonrpc": "2.0",
        "method": "task/get",
        "params": {"taskId": task_id},
        "id": 5
    });
    let response = server.dispatch_bytes(body.to_string().as_bytes()).await;
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["result"]["status"]["state"], "submitted");
    assert_eq!(json["result"]["history"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn client_and_server_interoperate_over_jsonrpc() {
    let transport = LoopbackTransport::new(echo_server());
    let service = CallService::new(transport, Arc::new(JsonRpcCodec::new()));
    let mut client = AgentClient::new(service, ClientConfig::new("loopback://"));

    let descriptor = client.discover().await.unwrap();
    assert_eq!(descriptor.id, "echo-agent");
    assert_eq!(descriptor.status, AgentStatus::Healthy);

    let reply = client.communicate(Message::user("ping pong")).await.unwrap();
    assert!(reply.success);
    match &reply.response.parts[0] {
        MessagePart::Text { text } => assert_eq!(text, "ping pong"),
        _ => panic!("Expected text reply"),
    }

    let receipt = client
        .delegate(TaskDescriptor::new(Message::user("sum 1..5")))
        .await
        .unwrap();
    let task = client.task_status(receipt.task_id).await.unwrap();
    assert_eq!(task.state(), TaskState::Submitted);

    let report = client.health().await.unwrap();
    assert_eq!(report.status, AgentStatus::Healthy);
}

#[tokio::test]
async fn degraded_agent_still_reports_health() {
    struct DegradedHandler;

    #[async_trait]
    impl AgentHandler for DegradedHandler {
        async fn discover(&self) -> A2AResult<AgentDescriptor> {
            Err(A2AError::Internal("descriptor store unavailable".into()))
        }

        async fn communicate(&self, _message: Message) -> A2AResult<CommunicateReply> {
            Err(A2AError::Internal("backend down".into()))
        }

        async fn delegate(&self, _descriptor: TaskDescriptor) -> A2AResult<DelegateReceipt> {
            Err(A2AError::Internal("backend down".into()))
        }

        async fn health(&self) -> HealthReport {
            HealthReport::unhealthy("degraded-agent", 33)
        }
    }

    let server = A2aServer::new(DegradedHandler, ServerConfig::new(4100));

    let response = server
        .dispatch_bytes(br#"{"jsonrpc":"2.0","method":"communicate","params":{"message":{"role":"user","parts":[{"kind":"text","text":"hi"}],"messageId":"m1"}},"id":6}"#)
        .await;
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["error"]["code"], -32603);

    let response = server
        .dispatch_bytes(br#"{"jsonrpc":"2.0","method":"health","id":7}"#)
        .await;
    let json = serde_json::to_value(&response).unwrap();
    assert!(json.get("error").is_none());
    assert_eq!(json["result"]["status"], "unhealthy");
}
