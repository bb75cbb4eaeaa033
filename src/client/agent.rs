//! High-level client for calling remote agents

use tower_service::Service;

use crate::{
    client::config::ClientConfig,
    protocol::{
        agent::{AgentDescriptor, CommunicateReply, DelegateReceipt, HealthReport, TaskDescriptor},
        error::A2AError,
        message::Message,
        operation::AgentOp,
        task::Task,
    },
    service::{AgentCall, CallContext, OpReply},
};

/// High-level client for the four-operation capability contract
///
/// Wraps a Tower service and provides one method per capability operation,
/// plus the task status query used to observe delegated work.
pub struct AgentClient<S> {
    service: S,
    config: ClientConfig,
}

impl<S> AgentClient<S>
where
    S: Service<AgentCall, Response = OpReply, Error = A2AError>,
{
    /// Create a new agent client
    pub fn new(service: S, config: ClientConfig) -> Self {
        Self { service, config }
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build a call context from the client configuration
    fn build_context(&self) -> CallContext {
        CallContext {
            agent_url: self.config.agent_url.clone(),
            auth: self.config.auth.clone(),
            timeout: Some(self.config.timeout),
            metadata: Default::default(),
        }
    }

    /// Fetch the remote agent's capability descriptor
    pub async fn discover(&mut self) -> Result<AgentDescriptor, A2AError> {
        let call = AgentCall::new(AgentOp::Discover, self.build_context());
        let reply = self.service.call(call).await?;

        reply
            .into_descriptor()
            .ok_or_else(|| A2AError::Internal("Expected descriptor reply from discover".into()))
    }

    /// Exchange a message with the remote agent
    pub async fn communicate(&mut self, message: Message) -> Result<CommunicateReply, A2AError> {
        if self.config.validate_requests {
            message.validate()?;
        }

        let call = AgentCall::new(AgentOp::Communicate { message }, self.build_context());
        let reply = self.service.call(call).await?;

        reply
            .into_communicate()
            .ok_or_else(|| A2AError::Internal("Expected reply from communicate".into()))
    }

    /// Delegate a work item to the remote agent
    ///
    /// Returns the acceptance receipt immediately; use
    /// [`AgentClient::task_status`] to observe the task afterwards.
    pub async fn delegate(
        &mut self,
        descriptor: TaskDescriptor,
    ) -> Result<DelegateReceipt, A2AError> {
        if self.config.validate_requests {
            descriptor.message.validate()?;
        }

        let call = AgentCall::new(AgentOp::Delegate { descriptor }, self.build_context());
        let reply = self.service.call(call).await?;

        reply
            .into_receipt()
            .ok_or_else(|| A2AError::Internal("Expected receipt reply from delegate".into()))
    }

    /// Query the remote agent's health
    pub async fn health(&mut self) -> Result<HealthReport, A2AError> {
        let call = AgentCall::new(AgentOp::Health, self.build_context());
        let reply = self.service.call(call).await?;

        reply
            .into_health()
            .ok_or_else(|| A2AError::Internal("Expected report reply from health".into()))
    }

    /// Fetch the current snapshot of a delegated task
    pub async fn task_status(&mut self, task_id: impl Into<String>) -> Result<Task, A2AError> {
        let call = AgentCall::new(
            AgentOp::GetTask {
                task_id: task_id.into(),
            },
            self.build_context(),
        );
        let reply = self.service.call(call).await?;

        reply
            .into_task()
            .ok_or_else(|| A2AError::Internal("Expected task reply from task_status".into()))
    }

    /// Poll a delegated task until it reaches a terminal state
    ///
    /// # Arguments
    ///
    /// * `task_id` - The task to poll
    /// * `poll_interval_ms` - How often to poll, in milliseconds
    /// * `max_attempts` - Maximum number of polls (0 = unlimited)
    pub async fn poll_until_terminal(
        &mut self,
        task_id: String,
        poll_interval_ms: u64,
        max_attempts: usize,
    ) -> Result<Task, A2AError> {
        let mut attempts = 0;

        loop {
            let task = self.task_status(task_id.clone()).await?;

            if task.is_terminal() {
                return Ok(task);
            }

            attempts += 1;
            if max_attempts > 0 && attempts >= max_attempts {
                return Err(A2AError::Internal(format!(
                    "task {} not terminal after {} polls",
                    task_id, attempts
                )));
            }

            tokio::time::sleep(tokio::time::Duration::from_millis(poll_interval_ms)).await;
        }
    }
}
