//! API request and response types.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::store::Task;

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error half of a handler result.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub type ApiResult<T> = Result<T, ApiError>;

/// Build an [`ApiError`].
pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Whether AI estimates and recommendations are available
    pub ai_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_model: Option<String>,
    /// Storage backend name
    pub store: String,
}

/// Query parameters for listing tasks.
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    /// `1` to include completed tasks
    #[serde(rename = "includeCompleted")]
    pub include_completed: Option<String>,
}

impl ListTasksQuery {
    pub fn include_completed(&self) -> bool {
        self.include_completed.as_deref() == Some("1")
    }
}

/// Request to create a task.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTaskRequest {
    pub title: Option<String>,

    pub description: Option<String>,

    /// Minutes, as a number or numeric string
    pub estimated_time: Option<serde_json::Value>,

    /// 1-3, as a number or numeric string
    pub energy_level: Option<serde_json::Value>,

    /// Ask the AI for missing fields (default: true)
    pub auto_estimate: Option<bool>,
}

/// Request to update a task.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub is_completed: Option<bool>,
}

/// Request for recommendations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendRequest {
    /// Free-text description of how the user feels
    pub mood: Option<String>,

    /// Candidate tasks; the store's open tasks are used when absent or empty
    pub tasks: Option<Vec<Task>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskResponse {
    pub task: Task,
}

#[derive(Debug, Clone, Serialize)]
pub struct TasksResponse {
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}
