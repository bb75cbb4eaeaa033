//! JSON codec for the plain HTTP+JSON binding

use bytes::Bytes;
use serde_json::json;

use crate::{
    codec::Codec,
    protocol::{
        agent::{AgentDescriptor, CommunicateReply, DelegateReceipt, HealthReport},
        error::A2AError,
        operation::AgentOp,
        task::Task,
    },
    service::response::OpReply,
};

/// JSON codec for the HTTP+JSON protocol binding
#[derive(Debug, Clone, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Create a new JSON codec
    pub fn new() -> Self {
        Self
    }
}

impl Codec for JsonCodec {
    fn encode_request(&self, operation: &AgentOp) -> Result<Bytes, A2AError> {
        let json = match operation {
            AgentOp::Communicate { message } => {
                json!({
                    "message": message,
                })
            }
            AgentOp::Delegate { descriptor } => serde_json::to_value(descriptor)?,
            // Carried as params by envelope codecs; the plain GET binding
            // puts the id in the path and sends no body
            AgentOp::GetTask { task_id } => {
                json!({
                    "taskId": task_id,
                })
            }
            _ => json!({}),
        };

        let bytes = serde_json::to_vec(&json)?;
        Ok(Bytes::from(bytes))
    }

    fn decode_reply(&self, body: &[u8], operation: &AgentOp) -> Result<OpReply, A2AError> {
        match operation {
            AgentOp::Discover => {
                let descriptor: AgentDescriptor = serde_json::from_slice(body)?;
                Ok(OpReply::Descriptor(Box::new(descriptor)))
            }
            AgentOp::Communicate { .. } => {
                let reply: CommunicateReply = serde_json::from_slice(body)?;
                Ok(OpReply::Communicate(Box::new(reply)))
            }
            AgentOp::Delegate { .. } => {
                let receipt: DelegateReceipt = serde_json::from_slice(body)?;
                Ok(OpReply::Delegate(receipt))
            }
            AgentOp::Health => {
                let report: HealthReport = serde_json::from_slice(body)?;
                Ok(OpReply::Health(report))
            }
            AgentOp::GetTask { .. } => {
                let task: Task = serde_json::from_slice(body)?;
                Ok(OpReply::Task(Box::new(task)))
            }
        }
    }

    fn content_type(&self) -> &str {
        "application/a2a+json"
    }
}
