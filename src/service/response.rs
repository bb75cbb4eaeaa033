//! Client-side reply types

use crate::protocol::{
    agent::{AgentDescriptor, CommunicateReply, DelegateReceipt, HealthReport},
    task::Task,
};

/// Reply from a capability operation
#[derive(Debug, Clone)]
pub enum OpReply {
    /// Capability descriptor (from Discover)
    Descriptor(Box<AgentDescriptor>),

    /// Message exchange reply (from Communicate)
    Communicate(Box<CommunicateReply>),

    /// Delegation receipt (from Delegate)
    Delegate(DelegateReceipt),

    /// Health report (from Health)
    Health(HealthReport),

    /// Task snapshot (from GetTask)
    Task(Box<Task>),
}

impl OpReply {
    /// Extract a descriptor from the reply, if present
    pub fn into_descriptor(self) -> Option<AgentDescriptor> {
        match self {
            OpReply::Descriptor(descriptor) => Some(*descriptor),
            _ => None,
        }
    }

    /// Extract a communicate reply, if present
    pub fn into_communicate(self) -> Option<CommunicateReply> {
        match self {
            OpReply::Communicate(reply) => Some(*reply),
            _ => None,
        }
    }

    /// Extract a delegation receipt, if present
    pub fn into_receipt(self) -> Option<DelegateReceipt> {
        match self {
            OpReply::Delegate(receipt) => Some(receipt),
            _ => None,
        }
    }

    /// Extract a health report, if present
    pub fn into_health(self) -> Option<HealthReport> {
        match self {
            OpReply::Health(report) => Some(report),
            _ => None,
        }
    }

    /// Extract a task snapshot, if present
    pub fn into_task(self) -> Option<Task> {
        match self {
            OpReply::Task(task) => Some(*task),
            _ => None,
        }
    }
}
