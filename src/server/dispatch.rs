//! Protocol server dispatch
//!
//! Routes decoded JSON-RPC requests to the capability operations of the
//! handler the server was constructed with. The dispatch service holds no
//! task or message state of its own; everything lives in the handler and
//! its task store, so dispatch is stateless and trivially replicable.

use std::{
    convert::Infallible,
    sync::Arc,
    task::{Context, Poll},
};

use futures::future::BoxFuture;
use serde::Deserialize;
use serde_json::Value;
use tower_service::Service;

use crate::{
    codec::jsonrpc::{decode_request, JsonRpcRequest, JsonRpcResponse, RequestId},
    handler::AgentHandler,
    protocol::{
        agent::TaskDescriptor,
        error::{A2AError, A2AResult},
        message::Message,
        task::Task,
    },
    server::{config::ServerConfig, store::TaskStore},
};

/// Parameters of the `communicate` method
#[derive(Debug, Deserialize)]
pub(crate) struct CommunicateParams {
    pub(crate) message: Message,
}

/// Parameters of the `task/get` method
#[derive(Debug, Deserialize)]
pub(crate) struct TaskParams {
    #[serde(rename = "taskId")]
    pub(crate) task_id: String,
}

/// A protocol server binding a capability handler to the envelope codec
///
/// Constructed once from a handler and a configuration object; cloning is
/// cheap and clones share the handler and store.
pub struct A2aServer<H> {
    handler: Arc<H>,
    store: Option<Arc<TaskStore>>,
    config: ServerConfig,
}

impl<H> A2aServer<H>
where
    H: AgentHandler,
{
    /// Create a server dispatching to the given handler
    pub fn new(handler: H, config: ServerConfig) -> Self {
        Self {
            handler: Arc::new(handler),
            store: None,
            config,
        }
    }

    /// Expose a task store through the `task/get` status query
    pub fn with_task_store(mut self, store: Arc<TaskStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// The server's configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The handler this server dispatches to
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Snapshot a delegated task through the attached store
    ///
    /// Fails as an unknown method when no store was attached, since the
    /// status query surface simply does not exist then.
    pub async fn task_snapshot(&self, task_id: &str) -> A2AResult<Task> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| A2AError::MethodNotFound("task/get".into()))?;
        store.get(task_id).await
    }

    /// Decode a raw request body and dispatch it
    ///
    /// Codec failures (unparseable body, invalid envelope) are reported
    /// before any operation runs, with a null id since none was recovered.
    pub async fn dispatch_bytes(&self, raw: &[u8]) -> JsonRpcResponse {
        match decode_request(raw) {
            Ok(request) => self.dispatch(request).await,
            Err(err) => {
                tracing::debug!(error = %err, "rejected undecodable request");
                JsonRpcResponse::from_error(RequestId::Null, &err)
            }
        }
    }

    /// Dispatch a decoded request to the matching capability operation
    ///
    /// Never fails: every protocol error becomes a JSON-RPC error object
    /// echoing the request id.
    pub async fn dispatch(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();
        let method = request.method.clone();

        match self.route(request).await {
            Ok(result) => {
                tracing::debug!(%method, "request handled");
                JsonRpcResponse::result(id, result)
            }
            Err(err) => {
                tracing::warn!(%method, code = err.error_code(), error = %err, "request failed");
                JsonRpcResponse::from_error(id, &err)
            }
        }
    }

    async fn route(&self, request: JsonRpcRequest) -> A2AResult<Value> {
        match request.method.as_str() {
            "discover" => {
                let descriptor = self.handler.discover().await?;
                Ok(serde_json::to_value(descriptor)?)
            }
            "communicate" => {
                let params: CommunicateParams = decode_params(request.params)?;
                params.message.validate()?;
                let reply = self.handler.communicate(params.message).await?;
                Ok(serde_json::to_value(reply)?)
            }
            "delegate" => {
                let descriptor: TaskDescriptor = decode_params(request.params)?;
                descriptor.message.validate()?;
                let receipt = self.handler.delegate(descriptor).await?;
                Ok(serde_json::to_value(receipt)?)
            }
            "health" => {
                // Infallible by contract: the report is returned as-is
                let report = self.handler.health().await;
                Ok(serde_json::to_value(report)?)
            }
            "task/get" => {
                let params: TaskParams = decode_params(request.params)?;
                let task = self.task_snapshot(&params.task_id).await?;
                Ok(serde_json::to_value(task)?)
            }
            other => Err(A2AError::MethodNotFound(other.to_string())),
        }
    }
}

fn decode_params<T: serde::de::DeserializeOwned>(params: Option<Value>) -> A2AResult<T> {
    let params = params.ok_or_else(|| A2AError::InvalidParams("params are required".into()))?;
    serde_json::from_value(params).map_err(|e| A2AError::InvalidParams(e.to_string()))
}

impl<H> Clone for A2aServer<H> {
    fn clone(&self) -> Self {
        Self {
            handler: self.handler.clone(),
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

impl<H> Service<JsonRpcRequest> for A2aServer<H>
where
    H: AgentHandler,
{
    type Response = JsonRpcResponse;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: JsonRpcRequest) -> Self::Future {
        let server = self.clone();
        Box::pin(async move { Ok(server.dispatch(request).await) })
    }
}
