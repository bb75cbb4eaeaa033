//! The agent capability contract
//!
//! Every agent implements the same four operations; implementations differ
//! only in what happens inside them, never in their shapes. The protocol
//! server dispatches inbound calls to whichever handler it was constructed
//! with, so handlers are selected by injection rather than subclassing.

use async_trait::async_trait;

use crate::protocol::{
    agent::{AgentDescriptor, CommunicateReply, DelegateReceipt, HealthReport, TaskDescriptor},
    error::A2AResult,
    message::Message,
};

/// The four-operation capability contract
#[async_trait]
pub trait AgentHandler: Send + Sync + 'static {
    /// Describe this agent's identity and capabilities
    ///
    /// Idempotent and side-effect free.
    async fn discover(&self) -> A2AResult<AgentDescriptor>;

    /// Exchange a message with this agent
    ///
    /// The dispatch layer validates the inbound message against the data
    /// model before this method runs, so implementations may assume a
    /// well-formed message.
    async fn communicate(&self, message: Message) -> A2AResult<CommunicateReply>;

    /// Accept a delegated work item
    ///
    /// Implementations create a task from the descriptor's message and
    /// return an acceptance receipt immediately; execution happens
    /// asynchronously and completion is observed via a task status query.
    async fn delegate(&self, descriptor: TaskDescriptor) -> A2AResult<DelegateReceipt>;

    /// Report this agent's health
    ///
    /// Infallible by signature: an implementation that detects an internal
    /// problem reports `unhealthy` rather than erroring, so health
    /// reporting itself can never fail visibly.
    async fn health(&self) -> HealthReport;
}
