//! Task recommendations proposed by the model.
//!
//! The model is asked to echo task ids verbatim but frequently answers with
//! a differently spelled key, a nested object, or the 1-based position of the
//! task in the prompt. Every answer is reconciled against the caller's task
//! set, and an id the caller did not supply never leaves this module.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::extract::{to_finite_number, to_non_empty_string};
use super::AiResponseError;

/// Maximum number of recommendations returned.
pub const MAX_RECOMMENDATIONS: usize = 3;

/// A recommended task and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "taskId")]
    pub task_id: String,
    pub reason: String,
}

/// Normalized recommendation list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<Recommendation>,
}

/// Where a candidate task id may be found in a recommendation entry.
#[derive(Debug, Clone, Copy)]
enum IdSource {
    Field(&'static str),
    NestedId(&'static str),
}

impl IdSource {
    fn extract(self, entry: &Map<String, Value>) -> Option<String> {
        match self {
            IdSource::Field(key) => to_non_empty_string(entry.get(key)),
            IdSource::NestedId(key) => entry
                .get(key)
                .and_then(Value::as_object)
                .and_then(|nested| to_non_empty_string(nested.get("id"))),
        }
    }
}

const ID_SOURCES: &[IdSource] = &[
    IdSource::Field("taskId"),
    IdSource::Field("taskID"),
    IdSource::Field("task_id"),
    IdSource::Field("id"),
    IdSource::NestedId("task"),
];

const REASON_KEYS: &[&str] = &["reason", "why", "message", "comment"];

const ORDINAL_KEYS: &[&str] = &["taskNo", "task_no", "ordinal", "index", "rank", "taskId", "id"];

/// Validate an untrusted parsed response against the caller's tasks.
///
/// `ordered_ids` is the task list in the order it was shown to the model and
/// is only used to resolve 1-based ordinals.
pub fn normalize_recommendations<S: AsRef<str>>(
    raw: &Value,
    valid_ids: &HashSet<String>,
    ordered_ids: &[S],
) -> Result<RecommendResponse, AiResponseError> {
    let obj = raw.as_object().ok_or(AiResponseError::NotAnObject)?;
    let entries = obj
        .get("recommendations")
        .and_then(Value::as_array)
        .ok_or(AiResponseError::MissingRecommendations)?;

    let mut recommendations = Vec::new();
    for entry in entries {
        let Some(entry) = entry.as_object() else {
            continue;
        };
        let candidate = ID_SOURCES.iter().find_map(|source| source.extract(entry));
        let Some(reason) = REASON_KEYS
            .iter()
            .find_map(|key| to_non_empty_string(entry.get(*key)))
        else {
            continue;
        };
        let Some(task_id) = reconcile_task_id(candidate, entry, valid_ids, ordered_ids) else {
            continue;
        };
        recommendations.push(Recommendation { task_id, reason });
        if recommendations.len() >= MAX_RECOMMENDATIONS {
            break;
        }
    }

    if recommendations.is_empty() {
        return Err(AiResponseError::NoValidRecommendations);
    }

    Ok(RecommendResponse { recommendations })
}

/// Map `candidate` onto a member of `valid_ids`, falling back to reading the
/// entry as a 1-based position in `ordered_ids`.
///
/// An entry carrying only an ordinal (`{"taskNo": 1, ...}`) has no candidate
/// and goes straight to positional lookup.
fn reconcile_task_id<S: AsRef<str>>(
    candidate: Option<String>,
    entry: &Map<String, Value>,
    valid_ids: &HashSet<String>,
    ordered_ids: &[S],
) -> Option<String> {
    if let Some(candidate) = candidate.filter(|id| valid_ids.contains(id)) {
        return Some(candidate);
    }

    let ordinal = ORDINAL_KEYS
        .iter()
        .find_map(|key| to_finite_number(entry.get(*key)))?;
    let index = ordinal.trunc() - 1.0;
    if index < 0.0 || index >= ordered_ids.len() as f64 {
        return None;
    }

    let resolved = ordered_ids[index as usize].as_ref();
    valid_ids.contains(resolved).then(|| resolved.to_string())
}
