//! In-memory task store (non-persistent).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{NewTask, Task, TaskStore};

#[derive(Clone)]
pub struct InMemoryTaskStore {
    tasks: Arc<RwLock<Vec<Task>>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Seed the store with existing rows.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Arc::new(RwLock::new(tasks)),
        }
    }
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn list_tasks(&self, include_completed: bool) -> anyhow::Result<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .tasks
            .read()
            .await
            .iter()
            .filter(|t| include_completed || !t.is_completed)
            .cloned()
            .collect();
        // Stable sort keeps insertion order for equal timestamps; reverse it
        // so the latest insert still comes first.
        tasks.reverse();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn create_task(&self, task: NewTask) -> anyhow::Result<Task> {
        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: task.title,
            description: task.description,
            estimated_time: task.estimated_time,
            energy_level: task.energy_level,
            is_completed: task.is_completed,
            created_at: Utc::now().to_rfc3339(),
        };
        self.tasks.write().await.push(task.clone());
        Ok(task)
    }

    async fn set_completed(&self, id: &str, is_completed: bool) -> anyhow::Result<Option<Task>> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks.iter_mut().find(|t| t.id == id).map(|task| {
            task.is_completed = is_completed;
            task.clone()
        }))
    }

    async fn delete_task(&self, id: &str) -> anyhow::Result<()> {
        self.tasks.write().await.retain(|t| t.id != id);
        Ok(())
    }
}
