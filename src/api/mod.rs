//! HTTP API for Moodflow.
//!
//! ## Endpoints
//!
//! - `GET /api/health` - Health check
//! - `GET /api/tasks` - List tasks (`?includeCompleted=1` for all)
//! - `POST /api/tasks` - Create a task, AI-estimating missing fields
//! - `PATCH /api/tasks/{id}` - Mark a task complete or incomplete
//! - `DELETE /api/tasks/{id}` - Delete a task
//! - `POST /api/recommend` - Recommend tasks for a mood

mod recommend;
mod routes;
mod tasks;
pub mod types;

pub use routes::{router, serve, AppState};
pub use types::*;
