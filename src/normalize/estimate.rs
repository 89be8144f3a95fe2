//! Duration and effort estimates proposed by the model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::extract::clamp_int;

/// Shortest estimate the service will report, in minutes.
pub const MIN_ESTIMATE_MINUTES: i64 = 5;
/// Longest estimate the service will report, in minutes.
pub const MAX_ESTIMATE_MINUTES: i64 = 240;
/// Upper bound on what counts as a plausible raw model answer.
const RAW_ESTIMATE_CEILING: i64 = 10_000;

/// A normalized estimate. Invalid fields are `None`, never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskEstimate {
    pub estimated_time: Option<i64>,
    pub energy_level: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Round to the nearest multiple of five, halves going up.
pub fn round_to_five_minutes(minutes: i64) -> i64 {
    (minutes + 2).div_euclid(5) * 5
}

/// Turn an untrusted parsed response into a [`TaskEstimate`].
///
/// Minutes are floored to 5 before rounding and only then clamped into
/// `[5, 240]`, so a raw `7` becomes `5` and a raw `1` becomes `5`.
pub fn normalize_estimate(raw: &Value) -> TaskEstimate {
    let Some(obj) = raw.as_object() else {
        return TaskEstimate::default();
    };

    let estimated_time = clamp_int(
        field(obj, "estimated_time", "estimatedTime"),
        1,
        RAW_ESTIMATE_CEILING,
    )
    .map(|minutes| {
        round_to_five_minutes(minutes.max(MIN_ESTIMATE_MINUTES))
            .clamp(MIN_ESTIMATE_MINUTES, MAX_ESTIMATE_MINUTES)
    });

    let energy_level = clamp_int(field(obj, "energy_level", "energyLevel"), 1, 3);

    // Advisory field: numeric strings are not accepted here.
    let confidence = obj
        .get("confidence")
        .filter(|v| v.is_number())
        .and_then(Value::as_f64)
        .filter(|c| c.is_finite())
        .map(|c| c.clamp(0.0, 1.0));

    let reason = obj
        .get("reason")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string());

    TaskEstimate {
        estimated_time,
        energy_level,
        confidence,
        reason,
    }
}

/// Look up `primary`, falling back to `alias` when it is missing or null.
fn field<'a>(obj: &'a Map<String, Value>, primary: &str, alias: &str) -> Option<&'a Value> {
    obj.get(primary)
        .filter(|v| !v.is_null())
        .or_else(|| obj.get(alias))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::parse_lenient_json;
    use serde_json::json;

    #[test]
    fn rounding_follows_floor_then_nearest() {
        assert_eq!(round_to_five_minutes(1.max(MIN_ESTIMATE_MINUTES)), 5);
        assert_eq!(round_to_five_minutes(12), 10);
        assert_eq!(round_to_five_minutes(13), 15);
        assert_eq!(round_to_five_minutes(7), 5);
        assert_eq!(round_to_five_minutes(8), 10);
        assert_eq!(round_to_five_minutes(240), 240);
    }

    #[test]
    fn non_object_yields_empty_estimate() {
        for raw in [json!(null), json!("15"), json!([15, 2]), json!(3)] {
            let estimate = normalize_estimate(&raw);
            assert_eq!(estimate, TaskEstimate::default());
        }
    }

    #[test]
    fn small_values_round_up_to_minimum() {
        let estimate = normalize_estimate(&json!({"estimated_time": 1}));
        assert_eq!(estimate.estimated_time, Some(5));
        let estimate = normalize_estimate(&json!({"estimated_time": "3"}));
        assert_eq!(estimate.estimated_time, Some(5));
    }

    #[test]
    fn large_values_collapse_to_maximum() {
        let estimate = normalize_estimate(&json!({"estimated_time": 241}));
        assert_eq!(estimate.estimated_time, Some(240));
        let estimate = normalize_estimate(&json!({"estimated_time": 10000}));
        assert_eq!(estimate.estimated_time, Some(240));
    }

    #[test]
    fn implausible_values_are_dropped() {
        let estimate = normalize_estimate(&json!({"estimated_time": 0, "energy_level": 4}));
        assert_eq!(estimate.estimated_time, None);
        assert_eq!(estimate.energy_level, None);

        let estimate = normalize_estimate(&json!({"estimated_time": 10001}));
        assert_eq!(estimate.estimated_time, None);
    }

    #[test]
    fn camel_case_fields_are_accepted() {
        let estimate = normalize_estimate(&json!({"estimatedTime": 45, "energyLevel": "2"}));
        assert_eq!(estimate.estimated_time, Some(45));
        assert_eq!(estimate.energy_level, Some(2));
    }

    #[test]
    fn snake_case_wins_over_camel_case_unless_null() {
        let estimate =
            normalize_estimate(&json!({"estimated_time": 30, "estimatedTime": 60}));
        assert_eq!(estimate.estimated_time, Some(30));

        let estimate =
            normalize_estimate(&json!({"estimated_time": null, "estimatedTime": 60}));
        assert_eq!(estimate.estimated_time, Some(60));
    }

    #[test]
    fn confidence_accepts_numbers_only() {
        let estimate = normalize_estimate(&json!({"confidence": 1.7}));
        assert_eq!(estimate.confidence, Some(1.0));
        let estimate = normalize_estimate(&json!({"confidence": -0.2}));
        assert_eq!(estimate.confidence, Some(0.0));
        let estimate = normalize_estimate(&json!({"confidence": "0.6"}));
        assert_eq!(estimate.confidence, None);
    }

    #[test]
    fn reason_is_trimmed_string() {
        let estimate = normalize_estimate(&json!({"reason": "  short task \n"}));
        assert_eq!(estimate.reason.as_deref(), Some("short task"));
        let estimate = normalize_estimate(&json!({"reason": 12}));
        assert_eq!(estimate.reason, None);
    }

    #[test]
    fn invalid_fields_do_not_block_valid_ones() {
        let estimate = normalize_estimate(&json!({
            "estimated_time": "soon",
            "energy_level": 3,
            "confidence": 0.4,
        }));
        assert_eq!(estimate.estimated_time, None);
        assert_eq!(estimate.energy_level, Some(3));
        assert_eq!(estimate.confidence, Some(0.4));
    }

    #[test]
    fn fenced_response_round_trip() {
        let parsed = parse_lenient_json("```json\n{\"estimated_time\": 7}\n```").unwrap();
        let estimate = normalize_estimate(&parsed);
        assert_eq!(estimate.estimated_time, Some(5));
        assert_eq!(estimate.energy_level, None);
    }

    #[test]
    fn serializes_nulls_but_skips_absent_optionals() {
        let value = serde_json::to_value(TaskEstimate::default()).unwrap();
        assert_eq!(value, json!({"estimated_time": null, "energy_level": null}));
    }
}
