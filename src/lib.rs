//! # A2A Agent
//!
//! An agent-side implementation of the Agent2Agent (A2A) protocol.
//!
//! This library provides the protocol core every conforming agent shares:
//! the task lifecycle state machine, the message/artifact data model, the
//! JSON-RPC 2.0 envelope codec, and the four-operation capability contract
//! (`discover`, `communicate`, `delegate`, `health`). On top of that core
//! sit a protocol server that binds a capability handler to HTTP, and a
//! client for calling other agents. Two conforming agents interoperate
//! without knowing each other's internals.
//!
//! ## Features
//!
//! - **Uniform Contract**: one capability interface, per-domain handlers
//!   selected by injection
//! - **Audit-safe Lifecycle**: one-way task state machine with append-only
//!   history and artifacts
//! - **Dual Binding**: plain HTTP+JSON routes and JSON-RPC 2.0 framing over
//!   the same operations
//! - **Async**: built on tokio and Tower
//!
//! ## Example
//!
//! ```rust,no_run
//! use a2a_agent::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let url = "http://localhost:4100".parse().unwrap();
//!     let mut client = AgentClientBuilder::new_http(url).build()?;
//!
//!     let descriptor = client.discover().await?;
//!     println!("Connected to: {}", descriptor.name);
//!
//!     let receipt = client
//!         .delegate(TaskDescriptor::new(Message::user("sum 1..5")))
//!         .await?;
//!     let task = client.poll_until_terminal(receipt.task_id, 500, 20).await?;
//!     println!("Task finished as: {}", task.state());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod codec;
pub mod handler;
pub mod layer;
pub mod protocol;
pub mod server;
pub mod service;
pub mod transport;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        client::{AgentClient, AgentClientBuilder},
        handler::AgentHandler,
        protocol::error::A2AError,
        protocol::{
            AgentDescriptor, Artifact, HealthReport, Message, MessagePart, Role, Task,
            TaskDescriptor, TaskState, TaskStatus,
        },
        server::{A2aServer, ServerConfig, TaskStore},
    };
}
