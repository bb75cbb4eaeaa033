//! Task registry with per-task serialized mutation
//!
//! All mutations to one task's status, history, and artifacts go through a
//! single async mutex for that task id, so concurrent transitions on the
//! same task are mutually exclusive while operations on different tasks
//! proceed in parallel. The store hands out snapshot clones, never live
//! references.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, RwLock};

use crate::protocol::{
    error::{A2AError, A2AResult},
    message::Message,
    task::{Task, TaskState},
    Artifact,
};

/// Shared registry of the tasks an agent is executing
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: RwLock<HashMap<String, Arc<Mutex<Task>>>>,
}

impl TaskStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task, returning its id
    pub async fn insert(&self, task: Task) -> String {
        let id = task.id.clone();
        self.tasks
            .write()
            .await
            .insert(id.clone(), Arc::new(Mutex::new(task)));
        id
    }

    /// Number of registered tasks
    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    /// Whether the store has no tasks
    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }

    /// Snapshot of a task's current state
    pub async fn get(&self, task_id: &str) -> A2AResult<Task> {
        let entry = self.entry(task_id).await?;
        let task = entry.lock().await;
        Ok(task.clone())
    }

    /// Move a task to a new lifecycle state, returning the updated snapshot
    pub async fn transition(
        &self,
        task_id: &str,
        target: TaskState,
        status_message: Option<Message>,
    ) -> A2AResult<Task> {
        let entry = self.entry(task_id).await?;
        let mut task = entry.lock().await;
        task.transition(target, status_message)?;
        Ok(task.clone())
    }

    /// Append an artifact to a working task
    pub async fn append_artifact(&self, task_id: &str, artifact: Artifact) -> A2AResult<()> {
        let entry = self.entry(task_id).await?;
        let mut task = entry.lock().await;
        task.append_artifact(artifact)
    }

    /// Append a message to a task's history
    pub async fn append_message(&self, task_id: &str, message: Message) -> A2AResult<()> {
        let entry = self.entry(task_id).await?;
        let mut task = entry.lock().await;
        task.append_message(message)
    }

    async fn entry(&self, task_id: &str) -> A2AResult<Arc<Mutex<Task>>> {
        self.tasks
            .read()
            .await
            .get(task_id)
            .cloned()
            .ok_or_else(|| A2AError::TaskNotFound {
                task_id: task_id.to_string(),
            })
    }
}
