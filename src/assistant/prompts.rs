//! Prompt text for the two AI round-trips.

use serde_json::json;

use crate::store::Task;

/// Prompt asking for `estimated_time` and `energy_level` of one task.
pub fn estimate_prompt(title: &str, description: &str) -> String {
    [
        "You estimate how long a task takes and how much energy it needs.".to_string(),
        "For the task below, estimate estimated_time (minutes) and energy_level (1-3) and reply with JSON only.".to_string(),
        String::new(),
        "# Constraints".to_string(),
        "- JSON only (no text before or after)".to_string(),
        "- estimated_time is an integer from 5 to 240, rounded to 5-minute steps".to_string(),
        "- energy_level is an integer from 1 to 3".to_string(),
        String::new(),
        "# Input".to_string(),
        format!("title: {}", json!(title)),
        format!("description: {}", json!(description)),
        String::new(),
        "# Output schema".to_string(),
        json!({
            "estimated_time": 15,
            "energy_level": 2,
            "confidence": 0.6,
            "reason": "short explanation",
        })
        .to_string(),
    ]
    .join("\n")
}

/// Prompt asking for up to three tasks that suit `mood`.
///
/// Tasks are listed with a 1-based `no` so that a model which cannot copy
/// the id may answer with `taskNo` instead.
pub fn recommend_prompt(mood: &str, tasks: &[Task]) -> String {
    let listed: Vec<serde_json::Value> = tasks
        .iter()
        .enumerate()
        .map(|(idx, t)| {
            json!({
                "no": idx + 1,
                "id": t.id,
                "title": t.title,
                "description": t.description,
                "estimated_time": t.estimated_time,
                "energy_level": t.energy_level,
                "is_completed": t.is_completed,
            })
        })
        .collect();

    [
        "You are a capable task-management assistant.".to_string(),
        "Based on the user's current mood and their list of incomplete tasks, pick at most 3 tasks they should do now and reply with JSON only.".to_string(),
        String::new(),
        "# Constraints".to_string(),
        "- Output JSON only (no text before or after).".to_string(),
        "- Put objects inside a `recommendations` array.".to_string(),
        "- Each object has `taskId` and `reason` (why it fits, plus a word of encouragement).".to_string(),
        "- `taskId` must be an `id` copied exactly from the task list (never invent ids).".to_string(),
        "- When the user feels low, prefer easy or short tasks; when motivated, prefer heavier ones.".to_string(),
        String::new(),
        "# User mood".to_string(),
        json!(mood).to_string(),
        String::new(),
        "# Task list".to_string(),
        serde_json::Value::Array(listed).to_string(),
        String::new(),
        "# Output schema (example)".to_string(),
        json!({
            "recommendations": [
                {"taskId": "uuid", "reason": "why (with encouragement)"},
                {"taskNo": 1, "reason": "(taskNo is fine if taskId is hard)"},
            ]
        })
        .to_string(),
    ]
    .join("\n")
}
