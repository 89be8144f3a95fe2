//! Task storage with pluggable backends.
//!
//! Supports:
//! - `supabase`: PostgREST `tasks` table (production)
//! - `memory`: In-memory storage (non-persistent, for local runs and tests)

mod memory;
mod supabase;

pub use memory::InMemoryTaskStore;
pub use supabase::SupabaseTaskStore;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::SupabaseConfig;

/// A task as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Minutes
    #[serde(default)]
    pub estimated_time: Option<i64>,
    /// 1 (light) to 3 (heavy)
    #[serde(default)]
    pub energy_level: Option<i64>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub created_at: String,
}

/// Insert payload for a new task. New tasks are never completed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub estimated_time: Option<i64>,
    pub energy_level: Option<i64>,
    pub is_completed: bool,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            estimated_time: None,
            energy_level: None,
            is_completed: false,
        }
    }
}

/// Task store trait - implemented by all storage backends.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Backend name, for logs and the health endpoint.
    fn backend_name(&self) -> &'static str;

    /// List tasks, newest first. Completed tasks only when requested.
    async fn list_tasks(&self, include_completed: bool) -> anyhow::Result<Vec<Task>>;

    /// Insert a task and return the stored row.
    async fn create_task(&self, task: NewTask) -> anyhow::Result<Task>;

    /// Set the completion flag. `None` if no task has this id.
    async fn set_completed(&self, id: &str, is_completed: bool) -> anyhow::Result<Option<Task>>;

    /// Delete a task. Deleting an unknown id succeeds.
    async fn delete_task(&self, id: &str) -> anyhow::Result<()>;
}

pub type SharedTaskStore = Arc<dyn TaskStore>;

/// Pick the backend for the given configuration.
pub fn init_store(config: &SupabaseConfig) -> SharedTaskStore {
    match (&config.url, &config.service_role_key) {
        (Some(url), Some(key)) => {
            tracing::info!("Task store: Supabase ({})", url);
            Arc::new(SupabaseTaskStore::new(url, key))
        }
        _ => {
            tracing::warn!(
                "Task store: in-memory (SUPABASE_URL / SUPABASE_SERVICE_ROLE_KEY not set); tasks will not persist"
            );
            Arc::new(InMemoryTaskStore::new())
        }
    }
}
