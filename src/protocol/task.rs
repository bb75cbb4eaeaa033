//! A2A task types and lifecycle management
//!
//! Tasks are the unit of delegated work. Their lifecycle is a one-way state
//! machine:
//!
//! ```text
//! submitted -> working -> completed (terminal)
//!                      -> failed    (terminal)
//!                      -> canceled  (terminal)
//! ```
//!
//! No transition leaves a terminal state, so a task's history always forms a
//! reconstructable audit trail.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{error::A2AError, message::Message, Artifact};

/// A task in the A2A protocol
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier for the task, assigned at creation
    pub id: String,

    /// Optional context ID grouping related tasks; immutable
    #[serde(rename = "contextId", skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,

    /// Current status; mutated only through [`Task::transition`]
    pub status: TaskStatus,

    /// Artifacts produced by the task, in production order
    pub artifacts: Vec<Artifact>,

    /// Messages exchanged over the task's lifetime, in arrival order
    pub history: Vec<Message>,

    /// Optional metadata, opaque to the core
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
}

impl Task {
    /// Create a new task in the `submitted` state
    ///
    /// The initial message becomes the first entry of the task's history.
    pub fn create(initial_message: Message) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            context_id: None,
            status: TaskStatus::new(TaskState::Submitted),
            artifacts: Vec::new(),
            history: vec![initial_message],
            metadata: None,
        }
    }

    /// Create a new task grouped under a context
    pub fn create_in_context(initial_message: Message, context_id: impl Into<String>) -> Self {
        Self {
            context_id: Some(context_id.into()),
            ..Self::create(initial_message)
        }
    }

    /// Attach metadata at creation time
    pub fn with_metadata(mut self, metadata: HashMap<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Current lifecycle state
    pub fn state(&self) -> TaskState {
        self.status.state
    }

    /// Check if the task is in a terminal state
    pub fn is_terminal(&self) -> bool {
        self.status.state.is_terminal()
    }

    /// Move the task to a new lifecycle state
    ///
    /// Fails with [`A2AError::InvalidTransition`] when the current state is
    /// terminal or the target is not reachable from it. On success the status
    /// is restamped with the current time and, when a status message is
    /// given, that message is appended to the history.
    pub fn transition(
        &mut self,
        target: TaskState,
        status_message: Option<Message>,
    ) -> Result<(), A2AError> {
        let current = self.status.state;
        if !current.can_transition_to(target) {
            return Err(A2AError::InvalidTransition {
                from: current,
                to: target,
            });
        }

        if let Some(message) = &status_message {
            self.history.push(message.clone());
        }

        self.status = TaskStatus {
            state: target,
            message: status_message,
            timestamp: Utc::now(),
        };

        Ok(())
    }

    /// Append an artifact produced by the task
    ///
    /// Permitted only while the task is `working`, so no output can appear
    /// after the task has been finalized or before it has been picked up.
    pub fn append_artifact(&mut self, artifact: Artifact) -> Result<(), A2AError> {
        if self.status.state != TaskState::Working {
            return Err(A2AError::InvalidState {
                state: self.status.state,
                operation: "appendArtifact",
            });
        }

        artifact.validate()?;
        self.artifacts.push(artifact);
        Ok(())
    }

    /// Append a message to the task's history
    ///
    /// Permitted in any non-terminal state; messages land in arrival order.
    pub fn append_message(&mut self, message: Message) -> Result<(), A2AError> {
        if self.is_terminal() {
            return Err(A2AError::InvalidState {
                state: self.status.state,
                operation: "appendMessage",
            });
        }

        self.history.push(message);
        Ok(())
    }
}

/// Status of a task: state plus the message and time of the last transition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskStatus {
    /// Current lifecycle state
    pub state: TaskState,

    /// The message that triggered or explains this status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,

    /// When this status was entered
    pub timestamp: DateTime<Utc>,
}

impl TaskStatus {
    /// Create a status entered now, with no explaining message
    pub fn new(state: TaskState) -> Self {
        Self {
            state,
            message: None,
            timestamp: Utc::now(),
        }
    }
}

/// Lifecycle state of a task
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    /// Task has been received and is queued for processing
    Submitted,

    /// Task is currently being processed
    Working,

    /// Task completed successfully
    Completed,

    /// Task failed with an error
    Failed,

    /// Task was canceled before completion
    Canceled,
}

impl TaskState {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Failed | TaskState::Canceled
        )
    }

    /// Check whether `target` is reachable from this state
    pub fn can_transition_to(self, target: TaskState) -> bool {
        matches!(
            (self, target),
            (TaskState::Submitted, TaskState::Working)
                | (TaskState::Working, TaskState::Completed)
                | (TaskState::Working, TaskState::Failed)
                | (TaskState::Working, TaskState::Canceled)
        )
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskState::Submitted => "submitted",
            TaskState::Working => "working",
            TaskState::Completed => "completed",
            TaskState::Failed => "failed",
            TaskState::Canceled => "canceled",
        };
        f.write_str(name)
    }
}
