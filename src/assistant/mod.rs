//! AI round-trips: prompt, generate, parse, normalize.
//!
//! ```text
//!   Assistant ──prompt──▶ GenerativeClient ──text──▶ parse_lenient_json
//!       ▲                                                   │
//!       └──── TaskEstimate / RecommendResponse ◀── normalize_*
//! ```
//!
//! Every step reports to the [`AiDebugSink`](crate::debug_log::AiDebugSink).

mod prompts;

pub use prompts::{estimate_prompt, recommend_prompt};

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::{json, Value};
use thiserror::Error;

use crate::debug_log::{preview, SharedDebugSink};
use crate::llm::{GenerationOptions, GenerativeClient, LlmError};
use crate::normalize::{
    normalize_estimate, normalize_recommendations, parse_lenient_json, AiResponseError,
    RecommendResponse, TaskEstimate,
};
use crate::store::Task;

const ESTIMATE_MAX_OUTPUT_TOKENS: u32 = 512;
const ESTIMATE_PREVIEW_CHARS: usize = 2000;
const RECOMMEND_PREVIEW_CHARS: usize = 4000;
const MOOD_PREVIEW_CHARS: usize = 200;
const PARSED_KEYS_LIMIT: usize = 20;

/// Failure of an AI round-trip.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Response(#[from] AiResponseError),
}

/// Runs estimate and recommendation requests against a generative model.
pub struct Assistant {
    client: Arc<dyn GenerativeClient>,
    debug: SharedDebugSink,
}

impl Assistant {
    pub fn new(client: Arc<dyn GenerativeClient>, debug: SharedDebugSink) -> Self {
        Self { client, debug }
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Estimate duration and energy for a task.
    pub async fn estimate_task_meta(
        &self,
        title: &str,
        description: Option<&str>,
    ) -> Result<TaskEstimate, AssistantError> {
        let prompt = estimate_prompt(title.trim(), description.unwrap_or("").trim());
        let options = GenerationOptions::default().with_max_output_tokens(ESTIMATE_MAX_OUTPUT_TOKENS);

        let text = self.client.generate(&prompt, &options).await?;
        self.debug.record(
            "task_estimate_raw_response",
            json!({
                "responseChars": text.chars().count(),
                "responsePreview": preview(&text, ESTIMATE_PREVIEW_CHARS),
            }),
        );

        let parsed = parse_lenient_json(&text)?;
        let estimate = normalize_estimate(&parsed);
        self.debug.record(
            "task_estimate_normalized",
            serde_json::to_value(&estimate).unwrap_or(Value::Null),
        );

        Ok(estimate)
    }

    /// Recommend up to three of `tasks` for the given mood.
    ///
    /// `tasks` is both the candidate set and the order used for ordinals.
    /// An empty task list yields an empty result without calling the model.
    pub async fn recommend(
        &self,
        mood: &str,
        tasks: &[Task],
    ) -> Result<RecommendResponse, AssistantError> {
        if tasks.is_empty() {
            return Ok(RecommendResponse::default());
        }

        let result = self.run_recommend(mood, tasks).await;
        if let Err(e) = &result {
            self.debug
                .record("recommend_error", json!({ "message": e.to_string() }));
        }
        result
    }

    async fn run_recommend(
        &self,
        mood: &str,
        tasks: &[Task],
    ) -> Result<RecommendResponse, AssistantError> {
        let ordered_ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        let valid_ids: HashSet<String> = ordered_ids.iter().map(|id| id.to_string()).collect();

        self.debug.record(
            "recommend_request",
            json!({
                "moodPreview": preview(mood, MOOD_PREVIEW_CHARS),
                "tasksCount": tasks.len(),
                "hasNullEstimatedTime": tasks.iter().any(|t| t.estimated_time.is_none()),
                "hasNullEnergyLevel": tasks.iter().any(|t| t.energy_level.is_none()),
            }),
        );

        let prompt = recommend_prompt(mood, tasks);
        let text = self
            .client
            .generate(&prompt, &GenerationOptions::default())
            .await?;
        self.debug.record(
            "recommend_raw_response",
            json!({
                "responseChars": text.chars().count(),
                "responsePreview": preview(&text, RECOMMEND_PREVIEW_CHARS),
            }),
        );

        let parsed = parse_lenient_json(&text)?;
        let parsed_keys: Vec<&String> = parsed
            .as_object()
            .map(|obj| obj.keys().take(PARSED_KEYS_LIMIT).collect())
            .unwrap_or_default();
        self.debug.record(
            "recommend_parsed_response",
            json!({
                "parsedType": json_type_name(&parsed),
                "parsedKeys": parsed_keys,
            }),
        );

        Ok(normalize_recommendations(&parsed, &valid_ids, &ordered_ids)?)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
