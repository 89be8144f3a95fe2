//! Task CRUD endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::store::NewTask;
use crate::util::parse_leading_int;

use super::routes::AppState;
use super::types::*;

/// List tasks, newest first.
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<TasksResponse>> {
    let tasks = state
        .store
        .list_tasks(query.include_completed())
        .await
        .map_err(|e| {
            tracing::error!("Failed to list tasks: {}", e);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;
    Ok(Json(TasksResponse { tasks }))
}

/// Create a task, asking the AI for whichever of duration/energy is missing.
///
/// An AI failure never blocks creation: the missing fields stay null.
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    let title = req.title.as_deref().map(str::trim).unwrap_or_default();
    if title.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "title is required"));
    }

    let mut new_task = NewTask::new(title);
    new_task.description = req
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);
    new_task.estimated_time = req.estimated_time.as_ref().and_then(to_int_or_null);
    new_task.energy_level = req.energy_level.as_ref().and_then(to_int_or_null);

    let auto_estimate = req.auto_estimate.unwrap_or(true);
    if auto_estimate && (new_task.estimated_time.is_none() || new_task.energy_level.is_none()) {
        fill_estimate(&state, &mut new_task).await;
    }

    let task = state.store.create_task(new_task).await.map_err(|e| {
        tracing::error!("Failed to create task: {}", e);
        api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    tracing::info!("Created task {}", task.id);
    Ok((StatusCode::CREATED, Json(TaskResponse { task })))
}

async fn fill_estimate(state: &AppState, new_task: &mut NewTask) {
    let Some(assistant) = &state.assistant else {
        tracing::debug!("Skipping estimate: AI disabled");
        return;
    };

    match assistant
        .estimate_task_meta(&new_task.title, new_task.description.as_deref())
        .await
    {
        Ok(estimate) => {
            if new_task.estimated_time.is_none() {
                new_task.estimated_time = estimate.estimated_time;
            }
            if new_task.energy_level.is_none() {
                new_task.energy_level = estimate.energy_level;
            }
        }
        Err(e) => {
            tracing::warn!("Estimate failed, creating task without it: {}", e);
        }
    }
}

/// Mark a task complete or incomplete.
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let Some(is_completed) = req.is_completed else {
        return Err(api_error(StatusCode::BAD_REQUEST, "is_completed is required"));
    };

    let updated = state
        .store
        .set_completed(&id, is_completed)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update task {}: {}", id, e);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    updated
        .map(|task| Json(TaskResponse { task }))
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("Task {} not found", id)))
}

/// Delete a task.
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<OkResponse>> {
    state.store.delete_task(&id).await.map_err(|e| {
        tracing::error!("Failed to delete task {}: {}", id, e);
        api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    Ok(Json(OkResponse { ok: true }))
}

/// Number or numeric string to an integer; blank, null and junk are `None`.
fn to_int_or_null(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => parse_leading_int(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::testing::ScriptedClient;
    use crate::assistant::Assistant;
    use crate::config::Config;
    use crate::debug_log::NoopDebugSink;
    use crate::llm::LlmError;
    use crate::store::{InMemoryTaskStore, TaskStore};
    use serde_json::json;

    fn state_with(
        store: InMemoryTaskStore,
        client: Option<ScriptedClient>,
    ) -> (Arc<AppState>, Option<Arc<ScriptedClient>>) {
        let client = client.map(Arc::new);
        let assistant = client
            .clone()
            .map(|c| Arc::new(Assistant::new(c, Arc::new(NoopDebugSink))));
        let state = AppState::new(Config::default(), Arc::new(store), assistant);
        (Arc::new(state), client)
    }

    fn create_request(body: Value) -> CreateTaskRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_to_int_or_null() {
        assert_eq!(to_int_or_null(&json!(30)), Some(30));
        assert_eq!(to_int_or_null(&json!(12.9)), Some(12));
        assert_eq!(to_int_or_null(&json!("45")), Some(45));
        assert_eq!(to_int_or_null(&json!("")), None);
        assert_eq!(to_int_or_null(&json!("soon")), None);
        assert_eq!(to_int_or_null(&json!(null)), None);
        assert_eq!(to_int_or_null(&json!(true)), None);
    }

    #[tokio::test]
    async fn test_create_requires_title() {
        let (state, _) = state_with(InMemoryTaskStore::new(), None);
        let err = create_task(State(state), Json(create_request(json!({"title": "   "}))))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert_eq!(err.1.error, "title is required");
    }

    #[tokio::test]
    async fn test_create_fills_only_missing_fields_from_ai() {
        let (state, client) = state_with(
            InMemoryTaskStore::new(),
            Some(ScriptedClient::text(
                r#"{"estimated_time": 33, "energy_level": 3}"#,
            )),
        );

        let (status, Json(body)) = create_task(
            State(state.clone()),
            Json(create_request(json!({
                "title": " Clean desk ",
                "description": "  ",
                "estimated_time": "20",
            }))),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.task.title, "Clean desk");
        assert_eq!(body.task.description, None);
        assert_eq!(body.task.estimated_time, Some(20));
        assert_eq!(body.task.energy_level, Some(3));
        assert!(!body.task.is_completed);
        assert_eq!(client.unwrap().calls(), 1);
    }

    #[tokio::test]
    async fn test_create_skips_ai_when_fields_present_or_disabled() {
        let (state, client) = state_with(InMemoryTaskStore::new(), Some(ScriptedClient::default()));
        create_task(
            State(state.clone()),
            Json(create_request(json!({
                "title": "a",
                "estimated_time": 10,
                "energy_level": 1,
            }))),
        )
        .await
        .unwrap();
        create_task(
            State(state),
            Json(create_request(json!({"title": "b", "auto_estimate": false}))),
        )
        .await
        .unwrap();
        assert_eq!(client.unwrap().calls(), 0);
    }

    #[tokio::test]
    async fn test_create_survives_ai_failure() {
        let (state, _) = state_with(
            InMemoryTaskStore::new(),
            Some(ScriptedClient::failing(LlmError::network_error(
                "timeout".to_string(),
            ))),
        );
        let (status, Json(body)) =
            create_task(State(state.clone()), Json(create_request(json!({"title": "x"}))))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.task.estimated_time, None);
        assert_eq!(body.task.energy_level, None);
        assert_eq!(state.store.list_tasks(false).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_survives_unparseable_estimate() {
        let (state, _) = state_with(
            InMemoryTaskStore::new(),
            Some(ScriptedClient::text("I think about 15 minutes")),
        );
        let (_, Json(body)) =
            create_task(State(state), Json(create_request(json!({"title": "x"}))))
                .await
                .unwrap();
        assert_eq!(body.task.estimated_time, None);
    }

    #[tokio::test]
    async fn test_list_respects_include_completed() {
        let store = InMemoryTaskStore::new();
        let done = store.create_task(NewTask::new("done")).await.unwrap();
        store.create_task(NewTask::new("open")).await.unwrap();
        store.set_completed(&done.id, true).await.unwrap();
        let (state, _) = state_with(store, None);

        let Json(open) = list_tasks(State(state.clone()), Query(ListTasksQuery::default()))
            .await
            .unwrap();
        assert_eq!(open.tasks.len(), 1);
        assert_eq!(open.tasks[0].title, "open");

        let query = ListTasksQuery {
            include_completed: Some("1".to_string()),
        };
        let Json(all) = list_tasks(State(state), Query(query)).await.unwrap();
        assert_eq!(all.tasks.len(), 2);
    }

    #[tokio::test]
    async fn test_update_task() {
        let store = InMemoryTaskStore::new();
        let task = store.create_task(NewTask::new("x")).await.unwrap();
        let (state, _) = state_with(store, None);

        let err = update_task(
            State(state.clone()),
            Path(task.id.clone()),
            Json(UpdateTaskRequest::default()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert_eq!(err.1.error, "is_completed is required");

        let Json(body) = update_task(
            State(state.clone()),
            Path(task.id.clone()),
            Json(UpdateTaskRequest {
                is_completed: Some(true),
            }),
        )
        .await
        .unwrap();
        assert!(body.task.is_completed);

        let err = update_task(
            State(state),
            Path("missing".to_string()),
            Json(UpdateTaskRequest {
                is_completed: Some(true),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_task() {
        let store = InMemoryTaskStore::new();
        let task = store.create_task(NewTask::new("x")).await.unwrap();
        let (state, _) = state_with(store, None);

        let Json(body) = delete_task(State(state.clone()), Path(task.id))
            .await
            .unwrap();
        assert!(body.ok);
        assert!(state.store.list_tasks(true).await.unwrap().is_empty());
    }
}
