//! A minimal echoing agent
//!
//! Serves the four capability operations on the port selected by `A2A_PORT`
//! (default 4100) and executes delegated tasks by echoing their text back
//! as an artifact.

use std::{
    sync::Arc,
    time::Instant,
};

use anyhow::Result;
use async_trait::async_trait;

use a2a_agent::{
    prelude::*,
    protocol::{error::A2AResult, CommunicateReply, DelegateReceipt},
    server::serve,
};

const AGENT_ID: &str = "echo-agent";

struct EchoAgent {
    store: Arc<TaskStore>,
    started: Instant,
}

impl EchoAgent {
    fn new(store: Arc<TaskStore>) -> Self {
        Self {
            store,
            started: Instant::now(),
        }
    }

    fn echo_text(message: &Message) -> String {
        message
            .parts
            .iter()
            .filter_map(|part| match part {
                MessagePart::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run a delegated task through its whole lifecycle in the background
    async fn execute(store: Arc<TaskStore>, task_id: String, echo: String) {
        let run = async {
            store
                .transition(&task_id, TaskState::Working, None)
                .await?;
            store
                .append_artifact(&task_id, Artifact::new("echo", vec![MessagePart::text(echo)]))
                .await?;
            store
                .transition(&task_id, TaskState::Completed, None)
                .await?;
            Ok::<_, A2AError>(())
        };

        if let Err(err) = run.await {
            tracing::warn!(%task_id, error = %err, "echo task failed");
            // Canceled and completed tasks are frozen; anything else is failed
            let _ = store.transition(&task_id, TaskState::Failed, None).await;
        }
    }
}

#[async_trait]
impl AgentHandler for EchoAgent {
    async fn discover(&self) -> A2AResult<AgentDescriptor> {
        Ok(
            AgentDescriptor::new(AGENT_ID, "Echo Agent", vec!["echo".to_string()])
                .with_description("Echoes whatever it is told"),
        )
    }

    async fn communicate(&self, message: Message) -> A2AResult<CommunicateReply> {
        let reply = Message::agent(Self::echo_text(&message));
        Ok(CommunicateReply::ok(reply, AGENT_ID))
    }

    async fn delegate(&self, descriptor: TaskDescriptor) -> A2AResult<DelegateReceipt> {
        let echo = Self::echo_text(&descriptor.message);

        let task = match descriptor.context_id {
            Some(context_id) => Task::create_in_context(descriptor.message, context_id),
            None => Task::create(descriptor.message),
        };
        let task = match descriptor.metadata {
            Some(metadata) => task.with_metadata(metadata),
            None => task,
        };

        let task_id = self.store.insert(task).await;
        tracing::info!(%task_id, "accepted delegated task");

        tokio::spawn(Self::execute(self.store.clone(), task_id.clone(), echo));

        Ok(DelegateReceipt::accepted(task_id, AGENT_ID))
    }

    async fn health(&self) -> HealthReport {
        HealthReport::healthy(AGENT_ID, self.started.elapsed().as_secs())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = ServerConfig::from_env(4100);

    let store = Arc::new(TaskStore::new());
    let agent = EchoAgent::new(store.clone());
    let server = A2aServer::new(agent, config).with_task_store(store);

    serve(server).await?;

    Ok(())
}
