//! Supabase PostgREST task store.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};

use super::{NewTask, Task, TaskStore};

const TASKS_TABLE: &str = "tasks";

/// Task store backed by the Supabase `tasks` table.
pub struct SupabaseTaskStore {
    client: Client,
    url: String,
    service_role_key: String,
}

impl SupabaseTaskStore {
    /// Create a new Supabase store.
    pub fn new(url: &str, service_role_key: &str) -> Self {
        Self {
            client: Client::new(),
            url: url.trim_end_matches('/').to_string(),
            service_role_key: service_role_key.to_string(),
        }
    }

    /// Get the PostgREST URL for the tasks table.
    fn tasks_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url, TASKS_TABLE)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.service_role_key)
            .header("Authorization", format!("Bearer {}", self.service_role_key))
    }
}

/// PostgREST filter value for an equality match on `id`.
fn id_filter(id: &str) -> String {
    format!("eq.{}", id)
}

#[async_trait]
impl TaskStore for SupabaseTaskStore {
    fn backend_name(&self) -> &'static str {
        "supabase"
    }

    async fn list_tasks(&self, include_completed: bool) -> anyhow::Result<Vec<Task>> {
        let mut query = vec![
            ("select", "*".to_string()),
            ("order", "created_at.desc".to_string()),
        ];
        if !include_completed {
            query.push(("is_completed", "eq.false".to_string()));
        }

        let resp = self
            .authorized(self.client.get(self.tasks_url()))
            .query(&query)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            anyhow::bail!("Failed to list tasks: {} - {}", status, text);
        }

        Ok(serde_json::from_str(&text)?)
    }

    async fn create_task(&self, task: NewTask) -> anyhow::Result<Task> {
        let resp = self
            .authorized(self.client.post(self.tasks_url()))
            .header("Content-Type", "application/json")
            .header("Prefer", "return=representation")
            .json(&task)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            anyhow::bail!("Failed to create task: {} - {}", status, text);
        }

        let tasks: Vec<Task> = serde_json::from_str(&text)?;
        tasks
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("No task returned"))
    }

    async fn set_completed(&self, id: &str, is_completed: bool) -> anyhow::Result<Option<Task>> {
        let resp = self
            .authorized(self.client.patch(self.tasks_url()))
            .query(&[("id", id_filter(id)), ("select", "*".to_string())])
            .header("Content-Type", "application/json")
            .header("Prefer", "return=representation")
            .json(&serde_json::json!({ "is_completed": is_completed }))
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            anyhow::bail!("Failed to update task: {} - {}", status, text);
        }

        let tasks: Vec<Task> = serde_json::from_str(&text)?;
        Ok(tasks.into_iter().next())
    }

    async fn delete_task(&self, id: &str) -> anyhow::Result<()> {
        let resp = self
            .authorized(self.client.delete(self.tasks_url()))
            .query(&[("id", id_filter(id))])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await?;
            anyhow::bail!("Failed to delete task: {} - {}", status, text);
        }

        Ok(())
    }
}
