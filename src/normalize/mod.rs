//! Validation of free-form model output.
//!
//! Everything the generative model returns crosses this boundary as text.
//! It is parsed leniently ([`parse_lenient_json`]) and then decoded into a
//! bounded, strongly-typed result:
//!
//! ```text
//!   raw text ──▶ parse_lenient_json ──▶ serde_json::Value
//!                                          │
//!                         ┌────────────────┴────────────────┐
//!                         ▼                                 ▼
//!              normalize_estimate                normalize_recommendations
//!              (total, soft-fails)               (Result, hard-fails)
//! ```

mod estimate;
pub mod extract;
mod lenient_json;
mod recommend;

pub use estimate::{
    normalize_estimate, round_to_five_minutes, TaskEstimate, MAX_ESTIMATE_MINUTES,
    MIN_ESTIMATE_MINUTES,
};
pub use lenient_json::parse_lenient_json;
pub use recommend::{
    normalize_recommendations, RecommendResponse, Recommendation, MAX_RECOMMENDATIONS,
};

use thiserror::Error;

/// Why a model response could not be turned into a usable result.
#[derive(Debug, Error)]
pub enum AiResponseError {
    #[error("AI response is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("AI response is not an object")]
    NotAnObject,

    #[error("AI response missing recommendations[]")]
    MissingRecommendations,

    #[error("AI response did not include valid recommendations")]
    NoValidRecommendations,
}

/// Coarse classification of [`AiResponseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiResponseErrorKind {
    /// Text could not be recovered as JSON.
    Parse,
    /// JSON parsed but lacks the expected top-level shape.
    Schema,
    /// Shape was fine but nothing survived validation.
    NoValidResults,
}

impl AiResponseError {
    pub fn kind(&self) -> AiResponseErrorKind {
        match self {
            AiResponseError::Parse(_) => AiResponseErrorKind::Parse,
            AiResponseError::NotAnObject | AiResponseError::MissingRecommendations => {
                AiResponseErrorKind::Schema
            }
            AiResponseError::NoValidRecommendations => AiResponseErrorKind::NoValidResults,
        }
    }
}
