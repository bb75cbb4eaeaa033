//! A2A protocol operations

use super::{agent::TaskDescriptor, message::Message};

/// A2A capability operations
///
/// This enum represents the binding-independent operations of the agent
/// capability contract, plus the task status query a delegator uses to
/// observe completion. Each operation maps onto both the plain HTTP routes
/// and the JSON-RPC method names.
#[derive(Debug, Clone)]
pub enum AgentOp {
    /// Fetch the agent's capability descriptor
    Discover,

    /// Exchange a message with the agent
    Communicate {
        /// The message to deliver
        message: Message,
    },

    /// Delegate a work item to the agent
    Delegate {
        /// Descriptor of the delegated work
        descriptor: TaskDescriptor,
    },

    /// Query the agent's health
    Health,

    /// Fetch the current state of a delegated task
    GetTask {
        /// The task ID to retrieve
        task_id: String,
    },
}

impl AgentOp {
    /// Get the HTTP endpoint path for this operation
    pub fn endpoint(&self) -> String {
        match self {
            AgentOp::Discover => "/discover".to_string(),
            AgentOp::Communicate { .. } => "/communicate".to_string(),
            AgentOp::Delegate { .. } => "/delegate".to_string(),
            AgentOp::Health => "/health".to_string(),
            AgentOp::GetTask { task_id } => format!("/tasks/{}", task_id),
        }
    }

    /// Get the HTTP method for this operation
    pub fn method(&self) -> &'static str {
        match self {
            AgentOp::Discover => "GET",
            AgentOp::Communicate { .. } => "POST",
            AgentOp::Delegate { .. } => "POST",
            AgentOp::Health => "GET",
            AgentOp::GetTask { .. } => "GET",
        }
    }

    /// Get the JSON-RPC method name for this operation
    pub fn rpc_method(&self) -> &'static str {
        match self {
            AgentOp::Discover => "discover",
            AgentOp::Communicate { .. } => "communicate",
            AgentOp::Delegate { .. } => "delegate",
            AgentOp::Health => "health",
            AgentOp::GetTask { .. } => "task/get",
        }
    }
}
