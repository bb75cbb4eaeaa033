//! Validation layer for outbound agent calls
//!
//! Reuses the data model's own validation so malformed messages are
//! rejected before they reach the wire, mirroring the check the remote
//! dispatch layer performs on arrival.

use std::task::{Context, Poll};

use futures::future::BoxFuture;
use tower_layer::Layer;
use tower_service::Service;

use crate::{
    protocol::{error::A2AError, operation::AgentOp},
    service::{AgentCall, OpReply},
};

/// Layer that validates outbound calls and their replies
#[derive(Clone, Debug, Default)]
pub struct ValidationLayer;

impl ValidationLayer {
    /// Create a new validation layer
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for ValidationLayer {
    type Service = ValidationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ValidationService { inner }
    }
}

/// Validation service that wraps an inner service
#[derive(Clone)]
pub struct ValidationService<S> {
    inner: S,
}

impl<S> ValidationService<S> {
    /// Validate an outbound call
    fn validate_call(call: &AgentCall) -> Result<(), A2AError> {
        match &call.operation {
            AgentOp::Communicate { message } => message.validate()?,
            AgentOp::Delegate { descriptor } => descriptor.message.validate()?,
            AgentOp::GetTask { task_id } => {
                if task_id.is_empty() {
                    return Err(A2AError::InvalidParams("Task ID cannot be empty".into()));
                }
            }
            AgentOp::Discover | AgentOp::Health => {}
        }

        if call.context.agent_url.is_empty() {
            return Err(A2AError::InvalidParams("Agent URL cannot be empty".into()));
        }

        Ok(())
    }

    /// Validate a reply before handing it back to the caller
    fn validate_reply(reply: &OpReply) -> Result<(), A2AError> {
        match reply {
            OpReply::Descriptor(descriptor) => {
                if descriptor.id.is_empty() || descriptor.name.is_empty() {
                    return Err(A2AError::MalformedMessage(
                        "descriptor must carry an id and a name".into(),
                    ));
                }
            }
            OpReply::Communicate(communicate) => communicate.response.validate()?,
            OpReply::Delegate(receipt) => {
                if receipt.task_id.is_empty() {
                    return Err(A2AError::MalformedMessage(
                        "receipt must carry a task id".into(),
                    ));
                }
            }
            OpReply::Task(task) => {
                if task.id.is_empty() || task.history.is_empty() {
                    return Err(A2AError::MalformedMessage(
                        "task must carry an id and an initial history entry".into(),
                    ));
                }
            }
            OpReply::Health(_) => {}
        }

        Ok(())
    }
}

impl<S> Service<AgentCall> for ValidationService<S>
where
    S: Service<AgentCall, Response = OpReply, Error = A2AError> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = OpReply;
    type Error = A2AError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, call: AgentCall) -> Self::Future {
        // Validate before passing to the inner service
        if let Err(e) = Self::validate_call(&call) {
            return Box::pin(async move { Err(e) });
        }

        let mut inner = self.inner.clone();
        Box::pin(async move {
            let reply = inner.call(call).await?;

            Self::validate_reply(&reply)?;

            Ok(reply)
        })
    }
}
