//! HTTP binding for the protocol server
//!
//! Serves the capability operations over their plain HTTP routes, the
//! JSON-RPC endpoint at the configured base path, and the agent card
//! document at `/agent.json`. Each accepted connection runs on its own
//! task; inbound calls share nothing but the dispatch server itself.

use std::{convert::Infallible, fmt};

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{
    body::Body,
    header::{self, HeaderValue},
    server::conn::http1,
    service::service_fn,
    Method, Request, Response, StatusCode,
};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use crate::{
    codec::jsonrpc::JsonRpcError,
    handler::AgentHandler,
    protocol::{
        agent::TaskDescriptor,
        error::{codes, A2AError},
    },
    server::dispatch::{A2aServer, CommunicateParams},
};

/// Run the server's HTTP binding until the listener fails
pub async fn serve<H: AgentHandler>(server: A2aServer<H>) -> Result<(), A2AError> {
    let addr = server.config().socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| A2AError::Transport(format!("failed to bind {}: {}", addr, e)))?;

    tracing::info!(%addr, "A2A server listening");

    loop {
        let (stream, peer) = listener
            .accept()
            .await
            .map_err(|e| A2AError::Transport(format!("accept failed: {}", e)))?;

        let io = TokioIo::new(stream);
        let server = server.clone();

        tokio::spawn(async move {
            let service = service_fn(move |req| {
                let server = server.clone();
                async move { Ok::<_, Infallible>(handle(server, req).await) }
            });

            if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                tracing::debug!(%peer, error = %err, "connection closed with error");
            }
        });
    }
}

/// Route one HTTP request to the matching protocol surface
pub(crate) async fn handle<H, B>(server: A2aServer<H>, req: Request<B>) -> Response<Full<Bytes>>
where
    H: AgentHandler,
    B: Body,
    B::Error: fmt::Display,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    tracing::debug!(%method, %path, "inbound request");

    // JSON-RPC framing at the configured base path
    if method == Method::POST && path == server.config().base_path {
        let body = match read_body(req).await {
            Ok(body) => body,
            Err(response) => return response,
        };
        let response = server.dispatch_bytes(&body).await;
        return match response.encode() {
            Ok(bytes) => json_response(StatusCode::OK, bytes),
            Err(err) => error_response(&err),
        };
    }

    match (method, path.as_str()) {
        (Method::GET, "/discover") => match server.handler().discover().await {
            Ok(descriptor) => encode_ok(&descriptor),
            Err(err) => error_response(&err),
        },

        (Method::POST, "/communicate") => {
            let body = match read_body(req).await {
                Ok(body) => body,
                Err(response) => return response,
            };
            match decode_body::<CommunicateParams>(&body) {
                Ok(params) => {
                    if let Err(err) = params.message.validate() {
                        return error_response(&err);
                    }
                    match server.handler().communicate(params.message).await {
                        Ok(reply) => encode_ok(&reply),
                        Err(err) => error_response(&err),
                    }
                }
                Err(err) => error_response(&err),
            }
        }

        (Method::POST, "/delegate") => {
            let body = match read_body(req).await {
                Ok(body) => body,
                Err(response) => return response,
            };
            match decode_body::<TaskDescriptor>(&body) {
                Ok(descriptor) => {
                    if let Err(err) = descriptor.message.validate() {
                        return error_response(&err);
                    }
                    match server.handler().delegate(descriptor).await {
                        Ok(receipt) => encode_ok(&receipt),
                        Err(err) => error_response(&err),
                    }
                }
                Err(err) => error_response(&err),
            }
        }

        (Method::GET, "/health") => {
            // Health reporting never fails visibly
            let report = server.handler().health().await;
            encode_ok(&report)
        }

        (Method::GET, "/agent.json") => serve_card(&server).await,

        (Method::GET, path) if path.starts_with("/tasks/") => {
            let task_id = path.trim_start_matches("/tasks/");
            match server.task_snapshot(task_id).await {
                Ok(task) => encode_ok(&task),
                Err(err) => error_response(&err),
            }
        }

        (_, path) => error_response(&A2AError::MethodNotFound(path.to_string())),
    }
}

/// Serve the agent card document verbatim
async fn serve_card<H: AgentHandler>(server: &A2aServer<H>) -> Response<Full<Bytes>> {
    match tokio::fs::read(&server.config().card_path).await {
        Ok(bytes) => json_response(StatusCode::OK, Bytes::from(bytes)),
        Err(_) => json_response(
            StatusCode::NOT_FOUND,
            Bytes::from_static(br#"{"error":"Agent card not found"}"#),
        ),
    }
}

async fn read_body<B>(req: Request<B>) -> Result<Bytes, Response<Full<Bytes>>>
where
    B: Body,
    B::Error: fmt::Display,
{
    match req.into_body().collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(err) => Err(error_response(&A2AError::InvalidRequest(format!(
            "failed to read request body: {}",
            err
        )))),
    }
}

fn decode_body<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, A2AError> {
    serde_json::from_slice(body).map_err(|e| A2AError::InvalidParams(e.to_string()))
}

fn encode_ok<T: serde::Serialize>(value: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(value) {
        Ok(bytes) => json_response(StatusCode::OK, Bytes::from(bytes)),
        Err(err) => error_response(&A2AError::Serialization(err)),
    }
}

fn error_response(err: &A2AError) -> Response<Full<Bytes>> {
    let body = serde_json::to_vec(&JsonRpcError::from(err)).unwrap_or_default();
    json_response(status_for(err), Bytes::from(body))
}

fn status_for(err: &A2AError) -> StatusCode {
    match err.error_code() {
        codes::METHOD_NOT_FOUND | codes::TASK_NOT_FOUND => StatusCode::NOT_FOUND,
        codes::INTERNAL_ERROR => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    }
}

fn json_response(status: StatusCode, body: Bytes) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::{
        protocol::{
            agent::{AgentDescriptor, CommunicateReply, DelegateReceipt, HealthReport},
            error::A2AResult,
            message::Message,
            task::Task,
        },
        server::{config::ServerConfig, store::TaskStore},
    };

    use super::*;

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

        async fn communicate(&self, _message: Message) -> A2AResult<CommunicateReply> {
            Ok(CommunicateReply::ok(Message::agent("echo"), "echo-agent"))
        }

        async fn delegate(&self, descriptor: TaskDescriptor) -> A2AResult<DelegateReceipt> {
            let task = Task::create(descriptor.message);
            let task_id = self.store.insert(task).await;
            Ok(DelegateReceipt::accepted(task_id, "echo-agent"))
        }

        async fn health(&self) -> HealthReport {
            HealthReport::healthy("echo-agent", 5)
        }
    }

    fn server_with(config: ServerConfig) -> A2aServer<EchoHandler> {
        let store = Arc::new(TaskStore::new());
        let handler = EchoHandler {
            store: store.clone(),
        };
        A2aServer::new(handler, config).with_task_store(store)
    }

    fn test_server() -> A2aServer<EchoHandler> {
        server_with(ServerConfig::new(4100))
    }

    fn request(method: Method, uri: &str, body: &[u8]) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Full::new(Bytes::from(body.to_vec())))
            .unwrap()
    }

    async fn body_json(response: Response<Full<Bytes>>) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = handle(test_server(), request(Method::GET, "/health", b"")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["agentId"], "echo-agent");
    }

    #[tokio::test]
    async fn test_discover_route() {
        let response = handle(test_server(), request(Method::GET, "/discover", b"")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["id"], "echo-agent");
        assert!(json["capabilities"].is_array());
    }

    #[tokio::test]
    async fn test_communicate_route() {
        let body = json!({
            "message": {
                "role": "user",
                "parts": [{"kind": "text", "text": "hi"}],
                "messageId": "m1"
            }
        });
        let response = handle(
            test_server(),
            request(Method::POST, "/communicate", body.to_string().as_bytes()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
    }

    #[tokio::test]
    async fn test_communicate_rejects_malformed() {
        let body = json!({
            "message": {"role": "user", "parts": [], "messageId": "m1"}
        });
        let response = handle(
            test_server(),
            request(Method::POST, "/communicate", body.to_string().as_bytes()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], -32002);
    }

    #[tokio::test]
    async fn test_delegate_then_task_route() {
        let server = test_server();
        let body = json!({
            "message": {
                "role": "user",
                "parts": [{"kind": "text", "text": "sum 1..5"}],
                "messageId": "m1"
            }
        });

        let response = handle(
            server.clone(),
            request(Method::POST, "/delegate", body.to_string().as_bytes()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let receipt = body_json(response).await;
        assert_eq!(receipt["status"], "accepted");

        let uri = format!("/tasks/{}", receipt["taskId"].as_str().unwrap());
        let response = handle(server, request(Method::GET, &uri, b"")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let task = body_json(response).await;
        assert_eq!(task["status"]["state"], "submitted");
    }

    #[tokio::test]
    async fn test_unknown_task_is_404() {
        let response = handle(
            test_server(),
            request(Method::GET, "/tasks/no-such-task", b""),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["code"], -32001);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = handle(test_server(), request(Method::GET, "/nope", b"")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["code"], -32601);
    }

    #[tokio::test]
    async fn test_jsonrpc_endpoint() {
        let body = br#"{"jsonrpc":"2.0","method":"discover","id":1}"#;
        let response = handle(test_server(), request(Method::POST, "/rpc", body)).await;

        // JSON-RPC errors ride inside the envelope, so the HTTP status is OK
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["id"], 1);
        assert_eq!(json["result"]["id"], "echo-agent");
    }

    #[tokio::test]
    async fn test_jsonrpc_unknown_method_envelope() {
        let body = br#"{"jsonrpc":"2.0","method":"unknown_op","id":2}"#;
        let response = handle(test_server(), request(Method::POST, "/rpc", body)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], -32601);
        assert_eq!(json["id"], 2);
    }

    #[tokio::test]
    async fn test_card_served_verbatim() {
        let card_path = std::env::temp_dir().join("a2a-agent-card-test.json");
        let card = r#"{"name":"Echo Agent","capabilities":["echo"]}"#;
        std::fs::write(&card_path, card).unwrap();

        let server = server_with(ServerConfig::new(4100).with_card_path(&card_path));
        let response = handle(server, request(Method::GET, "/agent.json", b"")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(bytes.as_ref(), card.as_bytes());

        std::fs::remove_file(&card_path).ok();
    }

    #[tokio::test]
    async fn test_missing_card_is_404() {
        let server = server_with(
            ServerConfig::new(4100)
                .with_card_path(std::env::temp_dir().join("a2a-agent-no-card.json")),
        );
        let response = handle(server, request(Method::GET, "/agent.json", b"")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(bytes.as_ref(), br#"{"error":"Agent card not found"}"#);
    }
}
