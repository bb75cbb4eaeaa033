//! Agent capability contract payload types
//!
//! These are the request/reply shapes of the four-operation contract every
//! agent exposes (`discover`, `communicate`, `delegate`, `health`). Variants
//! of an agent differ only in internal logic, never in these shapes.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::message::Message;

/// Reported condition of an agent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    /// Agent is serving requests normally
    Healthy,

    /// Agent is up but degraded
    Unhealthy,
}

/// Descriptor returned by `discover`
///
/// Capabilities are an open list of agent-defined capability names; the core
/// does not enumerate or interpret them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentDescriptor {
    /// Unique identifier of the agent
    pub id: String,

    /// Human readable name of the agent
    pub name: String,

    /// Human readable description of the agent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Capability names this agent advertises
    pub capabilities: Vec<String>,

    /// Current condition of the agent
    pub status: AgentStatus,

    /// When this descriptor was produced
    pub timestamp: DateTime<Utc>,
}

impl AgentDescriptor {
    /// Create a descriptor for a healthy agent, stamped now
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        capabilities: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            capabilities,
            status: AgentStatus::Healthy,
            timestamp: Utc::now(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the reported status
    pub fn with_status(mut self, status: AgentStatus) -> Self {
        self.status = status;
        self
    }
}

/// Work item submitted through `delegate`
///
/// The message becomes the first history entry of the created task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskDescriptor {
    /// Initial message describing the delegated work
    pub message: Message,

    /// Optional context grouping for the new task
    #[serde(rename = "contextId", skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,

    /// Optional metadata copied onto the new task, opaque to the core
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
}

impl TaskDescriptor {
    /// Create a descriptor from an initial message
    pub fn new(message: Message) -> Self {
        Self {
            message,
            context_id: None,
            metadata: None,
        }
    }

    /// Group the delegated task under a context
    pub fn with_context_id(mut self, context_id: impl Into<String>) -> Self {
        self.context_id = Some(context_id.into());
        self
    }

    /// Attach metadata for the new task
    pub fn with_metadata(mut self, metadata: HashMap<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Acknowledgement status of a delegation
///
/// `delegate` returns immediately; the only acknowledgement it can give is
/// acceptance. Completion is observed separately via a task status query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DelegationStatus {
    /// The task was accepted for asynchronous execution
    Accepted,
}

/// Receipt returned by `delegate`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DelegateReceipt {
    /// Id of the task created for the delegated work
    #[serde(rename = "taskId")]
    pub task_id: String,

    /// Always `accepted`
    pub status: DelegationStatus,

    /// Id of the accepting agent
    #[serde(rename = "agentId")]
    pub agent_id: String,

    /// Hint at when the work might finish; purely advisory
    #[serde(
        rename = "estimatedCompletion",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_completion: Option<DateTime<Utc>>,
}

impl DelegateReceipt {
    /// Create an acceptance receipt
    pub fn accepted(task_id: impl Into<String>, agent_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            status: DelegationStatus::Accepted,
            agent_id: agent_id.into(),
            estimated_completion: None,
        }
    }

    /// Set the advisory completion estimate
    pub fn with_estimate(mut self, estimate: DateTime<Utc>) -> Self {
        self.estimated_completion = Some(estimate);
        self
    }
}

/// Reply returned by `communicate`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommunicateReply {
    /// Whether the agent acted on the message
    pub success: bool,

    /// The agent's reply message
    pub response: Message,

    /// Id of the replying agent
    #[serde(rename = "agentId")]
    pub agent_id: String,

    /// When the reply was produced
    pub timestamp: DateTime<Utc>,
}

impl CommunicateReply {
    /// Create a successful reply, stamped now
    pub fn ok(response: Message, agent_id: impl Into<String>) -> Self {
        Self {
            success: true,
            response,
            agent_id: agent_id.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Report returned by `health`
///
/// Health reporting never fails: a degraded agent reports `unhealthy`
/// instead of surfacing an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthReport {
    /// Current condition of the agent
    pub status: AgentStatus,

    /// Id of the reporting agent
    #[serde(rename = "agentId")]
    pub agent_id: String,

    /// Seconds since the agent started
    pub uptime: u64,

    /// When the report was produced
    pub timestamp: DateTime<Utc>,
}

impl HealthReport {
    /// Report a healthy agent, stamped now
    pub fn healthy(agent_id: impl Into<String>, uptime: u64) -> Self {
        Self {
            status: AgentStatus::Healthy,
            agent_id: agent_id.into(),
            uptime,
            timestamp: Utc::now(),
        }
    }

    /// Report a degraded agent, stamped now
    pub fn unhealthy(agent_id: impl Into<String>, uptime: u64) -> Self {
        Self {
            status: AgentStatus::Unhealthy,
            agent_id: agent_id.into(),
            uptime,
            timestamp: Utc::now(),
        }
    }
}
