//! # Moodflow
//!
//! Task manager that asks a generative model how long each task takes and
//! which tasks suit the user's current mood.
//!
//! ## Architecture
//!
//! ```text
//!   axum API ──▶ TaskStore (Supabase | memory)
//!       │
//!       ▼
//!   Assistant ──▶ GenerativeClient (Gemini)
//!       │
//!       ▼
//!   normalize (lenient JSON, estimate, recommendations)
//! ```
//!
//! ## Modules
//! - `normalize`: turns loosely formatted model output into validated values
//! - `assistant`: prompts and AI round-trips
//! - `store`: task persistence
//! - `api`: HTTP endpoints

pub mod api;
pub mod assistant;
pub mod config;
pub mod debug_log;
pub mod llm;
pub mod normalize;
pub mod store;
pub mod util;

pub use assistant::{Assistant, AssistantError};
pub use config::Config;
pub use normalize::{normalize_estimate, normalize_recommendations, parse_lenient_json};
pub use store::{Task, TaskStore};
