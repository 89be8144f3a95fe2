//! Generative-text client used for estimates and recommendations.
//!
//! The service only ever needs "prompt in, text out", so the abstraction is
//! a single trait method. Gemini is the production implementation; tests
//! substitute scripted clients.

mod error;
mod gemini;

pub use error::{classify_http_status, LlmError, LlmErrorKind};
pub use gemini::{GeminiClient, DEFAULT_API_BASE};

use async_trait::async_trait;

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Optional parameters for a generation request.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    /// MIME type the model is asked to answer with.
    pub response_mime_type: String,
    /// Maximum output tokens to generate.
    pub max_output_tokens: Option<u32>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            response_mime_type: "application/json".to_string(),
            max_output_tokens: None,
        }
    }
}

impl GenerationOptions {
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }
}

/// Trait for generative-text clients.
///
/// The returned text is untrusted: it is supposed to be JSON but carries no
/// schema guarantee.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    async fn generate(&self, prompt: &str, options: &GenerationOptions)
        -> Result<String, LlmError>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}
