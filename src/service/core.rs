//! Core client service implementation
//!
//! Binds a transport and a codec into a Tower `Service` that executes
//! capability operations against a remote agent.

use std::{
    sync::Arc,
    task::{Context, Poll},
};

use futures::future::BoxFuture;
use tower_service::Service;

use crate::{
    codec::{jsonrpc, Codec},
    protocol::{error::A2AError, operation::AgentOp},
    service::{AgentCall, OpReply},
    transport::{Transport, TransportRequest, TransportResponse},
};

/// Client service executing capability operations over a transport
pub struct CallService<T> {
    transport: T,
    codec: Arc<dyn Codec>,
}

impl<T> CallService<T>
where
    T: Transport,
{
    /// Create a new call service
    pub fn new(transport: T, codec: Arc<dyn Codec>) -> Self {
        Self { transport, codec }
    }

    /// Build a transport request from a capability call
    fn build_transport_request(
        call: &AgentCall,
        codec: &dyn Codec,
    ) -> Result<TransportRequest, A2AError> {
        // Envelope codecs post everything to one path; plain codecs use the
        // per-operation routes
        let (endpoint, method) = match codec.rpc_endpoint() {
            Some(path) => (path.to_string(), "POST"),
            None => (call.operation.endpoint(), call.operation.method()),
        };

        let mut transport_req = TransportRequest::new(endpoint, method);

        transport_req = transport_req.header("Content-Type", codec.content_type());
        transport_req = transport_req.header("Accept", codec.content_type());

        if let Some(auth) = &call.context.auth {
            let (header, value) = auth.to_header();
            transport_req = transport_req.header(header, value);
        }

        for (key, value) in &call.context.metadata {
            transport_req = transport_req.header(key.clone(), value.clone());
        }

        let body = codec.encode_request(&call.operation)?;
        if !body.is_empty() && method != "GET" {
            transport_req = transport_req.body(body);
        }

        Ok(transport_req)
    }

    /// Parse a transport response into an operation reply
    fn parse_transport_response(
        transport_resp: TransportResponse,
        codec: &dyn Codec,
        operation: &AgentOp,
    ) -> Result<OpReply, A2AError> {
        if !transport_resp.is_success() {
            return Err(Self::handle_error_response(&transport_resp));
        }

        codec.decode_reply(&transport_resp.body, operation)
    }

    /// Map a failed transport response back onto the error taxonomy
    ///
    /// Error bodies carry the JSON-RPC error object shape on both the plain
    /// and enveloped bindings.
    fn handle_error_response(transport_resp: &TransportResponse) -> A2AError {
        if let Ok(error) =
            serde_json::from_slice::<jsonrpc::JsonRpcError>(&transport_resp.body)
        {
            return jsonrpc::error_from_code(error.code, error.message);
        }

        A2AError::Transport(format!("HTTP error: {}", transport_resp.status))
    }
}

impl<T> Service<AgentCall> for CallService<T>
where
    T: Transport + Clone,
{
    type Response = OpReply;
    type Error = A2AError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.transport.poll_ready(cx)
    }

    fn call(&mut self, call: AgentCall) -> Self::Future {
        let transport = self.transport.clone();
        let codec = self.codec.clone();

        Box::pin(async move {
            let transport_req = Self::build_transport_request(&call, codec.as_ref())?;

            let transport_resp = transport.execute(transport_req).await?;

            let reply = Self::parse_transport_response(
                transport_resp,
                codec.as_ref(),
                &call.operation,
            )?;

            Ok(reply)
        })
    }
}

impl<T> Clone for CallService<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            codec: self.codec.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use crate::{
        codec::{JsonCodec, JsonRpcCodec},
        protocol::{
            agent::{AgentDescriptor, HealthReport},
            message::Message,
        },
        service::CallContext,
        transport::{mock::MockTransport, TransportResponse},
    };

    use super::*;

    #[tokio::test]
    async fn test_service_discover() {
        let transport = MockTransport::new(|req| {
            assert_eq!(req.endpoint, "/discover");
            assert_eq!(req.method, "GET");

            let descriptor = AgentDescriptor::new("agent-7", "Echo", vec!["echo".to_string()]);
            let json = serde_json::to_vec(&descriptor).unwrap();
            TransportResponse::new(200).body(Bytes::from(json))
        });

        let codec = Arc::new(JsonCodec);
        let mut service = CallService::new(transport, codec);

        let call = AgentCall::new(AgentOp::Discover, CallContext::default());
        let reply = service.call(call).await.unwrap();

        match reply {
            OpReply::Descriptor(descriptor) => assert_eq!(descriptor.id, "agent-7"),
            _ => panic!("Expected descriptor reply"),
        }
    }

    #[tokio::test]
    async fn test_service_rpc_codec_posts_to_base_path() {
        let transport = MockTransport::new(|req| {
            assert_eq!(req.endpoint, "/rpc");
            assert_eq!(req.method, "POST");

            let report = HealthReport::healthy("agent-7", 3);
            let envelope = serde_json::json!({
                "jsonrpc": "2.0",
                "result": report,
                "id": "r1",
            });
            TransportResponse::new(200).body(Bytes::from(envelope.to_string()))
        });

        let codec = Arc::new(JsonRpcCodec::new());
        let mut service = CallService::new(transport, codec);

        let call = AgentCall::new(AgentOp::Health, CallContext::default());
        let reply = service.call(call).await.unwrap();

        match reply {
            OpReply::Health(report) => assert_eq!(report.agent_id, "agent-7"),
            _ => panic!("Expected health reply"),
        }
    }

    #[tokio::test]
    async fn test_service_error_handling() {
        let transport = MockTransport::new(|_req| {
            let error_json = r#"{"code":-32001,"message":"Task not found: task-9"}"#;
            TransportResponse::new(404).body(Bytes::from(error_json))
        });

        let codec = Arc::new(JsonCodec);
        let mut service = CallService::new(transport, codec);

        let call = AgentCall::new(
            AgentOp::GetTask {
                task_id: "task-9".to_string(),
            },
            CallContext::default(),
        );

        let result = service.call(call).await;
        assert!(matches!(result, Err(A2AError::Internal(_))));
    }

    #[tokio::test]
    async fn test_service_communicate() {
        let transport = MockTransport::new(|req| {
            assert_eq!(req.endpoint, "/communicate");
            assert_eq!(req.method, "POST");
            assert!(!req.body.is_empty());

            let reply = crate::protocol::agent::CommunicateReply::ok(
                Message::agent("pong"),
                "agent-7",
            );
            let json = serde_json::to_vec(&reply).unwrap();
            TransportResponse::new(200).body(Bytes::from(json))
        });

        let codec = Arc::new(JsonCodec);
        let mut service = CallService::new(transport, codec);

        let call = AgentCall::new(
            AgentOp::Communicate {
                message: Message::user("ping"),
            },
            CallContext::default(),
        );

        let reply = service.call(call).await.unwrap();
        assert!(reply.into_communicate().unwrap().success);
    }
}
