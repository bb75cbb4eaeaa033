//! Core A2A protocol types and definitions

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod agent;
pub mod error;
pub mod message;
pub mod operation;
pub mod task;

pub use agent::{
    AgentDescriptor, AgentStatus, CommunicateReply, DelegateReceipt, HealthReport, TaskDescriptor,
};
pub use error::{A2AError, A2AResult};
pub use message::{Message, MessagePart, Role};
pub use operation::AgentOp;
pub use task::{Task, TaskState, TaskStatus};

use self::message::MessagePart as Part;

/// Artifacts represent task outputs
///
/// An artifact is created once a task produces output and is never mutated
/// afterwards; it can only be appended to the owning task's artifact list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artifact {
    /// Unique identifier of the Artifact
    #[serde(rename = "artifactId")]
    pub artifact_id: String,

    /// A human readable name for the Artifact
    pub name: String,

    /// Contents of the Artifact. Must contain at least one part
    pub parts: Vec<Part>,
}

impl Artifact {
    /// Create a new artifact with a generated id
    pub fn new(name: impl Into<String>, parts: Vec<Part>) -> Self {
        Self {
            artifact_id: Uuid::now_v7().to_string(),
            name: name.into(),
            parts,
        }
    }

    /// Create an artifact with an explicit id
    pub fn with_id(
        artifact_id: impl Into<String>,
        name: impl Into<String>,
        parts: Vec<Part>,
    ) -> Self {
        Self {
            artifact_id: artifact_id.into(),
            name: name.into(),
            parts,
        }
    }

    /// Check the artifact's parts against the same rules as message parts
    pub fn validate(&self) -> Result<(), A2AError> {
        if self.parts.is_empty() {
            return Err(A2AError::MalformedMessage(
                "artifact must have at least one part".into(),
            ));
        }

        for part in &self.parts {
            part.validate()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_artifact_creation() {
        let artifact = Artifact::new("result", vec![Part::data(json!({"sum": 15}))]);

        assert!(!artifact.artifact_id.is_empty());
        assert_eq!(artifact.name, "result");
        assert!(artifact.validate().is_ok());
    }

    #[test]
    fn test_artifact_wire_shape() {
        let artifact = Artifact::with_id("a1", "result", vec![Part::text("done")]);
        let json = serde_json::to_value(&artifact).unwrap();

        assert_eq!(json["artifactId"], "a1");
        assert_eq!(json["name"], "result");
        assert!(json.get("artifact_id").is_none());
    }

    #[test]
    fn test_artifact_validation() {
        let empty = Artifact::with_id("a1", "result", vec![]);
        assert!(empty.validate().is_err());

        let hollow: Part = serde_json::from_value(json!({"kind": "text"})).unwrap();
        let artifact = Artifact::with_id("a2", "result", vec![hollow]);
        assert!(artifact.validate().is_err());
    }
}
