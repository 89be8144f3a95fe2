//! Google Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::error::LlmError;
use super::{GenerationOptions, GenerativeClient};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Gemini REST client. No retries: a failed call is reported to the caller.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl GeminiClient {
    /// Create a new Gemini client with the given request timeout.
    pub fn new(
        api_key: String,
        model: String,
        api_base: &str,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        if api_key.trim().is_empty() {
            return Err(LlmError::not_configured(
                "GEMINI_API_KEY is not set".to_string(),
            ));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::network_error(format!("Failed to build client: {}", e)))?;
        Ok(Self {
            client,
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            model,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        )
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, LlmError> {
        let request = GeminiRequest::new(prompt, options);

        tracing::debug!("Sending request to Gemini: model={}", self.model);

        let response = match self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                if e.is_timeout() {
                    return Err(LlmError::network_error(format!("Request timeout: {}", e)));
                } else if e.is_connect() {
                    return Err(LlmError::network_error(format!("Connection failed: {}", e)));
                } else {
                    return Err(LlmError::network_error(format!("Request failed: {}", e)));
                }
            }
        };

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            let err = LlmError::from_status(status.as_u16(), body);
            if err.is_transient() {
                tracing::warn!("Gemini request failed, retry later: {}", err);
            } else {
                tracing::error!("Gemini request rejected: {}", err);
            }
            return Err(err);
        }

        let parsed: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            LlmError::parse_error(format!("Failed to parse response: {}, body: {}", e, body))
        })?;

        parsed.into_text()
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

impl GeminiRequest {
    fn new(prompt: &str, options: &GenerationOptions) -> Self {
        Self {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: options.response_mime_type.clone(),
                max_output_tokens: options.max_output_tokens,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GeminiResponse {
    /// Concatenate the text parts of the first candidate.
    fn into_text(self) -> Result<String, LlmError> {
        let block_reason = self.prompt_feedback.and_then(|f| f.block_reason);
        let candidate = self.candidates.into_iter().next().ok_or_else(|| {
            LlmError::parse_error(match block_reason {
                Some(reason) => format!("Prompt blocked: {}", reason),
                None => "No candidates in response".to_string(),
            })
        })?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::parse_error(format!(
                "Empty candidate (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmErrorKind;
    use serde_json::json;

    #[test]
    fn request_uses_camel_case_generation_config() {
        let options = GenerationOptions::default().with_max_output_tokens(512);
        let value = serde_json::to_value(GeminiRequest::new("hi", &options)).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{"role": "user", "parts": [{"text": "hi"}]}],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "maxOutputTokens": 512
                }
            })
        );
    }

    #[test]
    fn max_output_tokens_omitted_when_unset() {
        let value =
            serde_json::to_value(GeminiRequest::new("hi", &GenerationOptions::default())).unwrap();
        assert!(value["generationConfig"].get("maxOutputTokens").is_none());
    }

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "{\"a\":"}, {"text": " 1}"}]},
                 "finishReason": "STOP"},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(response.into_text().unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn blocked_prompt_is_a_parse_error() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();
        let err = response.into_text().unwrap_err();
        assert_eq!(err.kind, LlmErrorKind::ParseError);
        assert!(err.message.contains("SAFETY"));
    }

    #[test]
    fn empty_candidate_is_a_parse_error() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{"finishReason": "MAX_TOKENS"}]
        }))
        .unwrap();
        let err = response.into_text().unwrap_err();
        assert!(err.message.contains("MAX_TOKENS"));
    }

    #[test]
    fn missing_api_key_is_not_configured() {
        let err = GeminiClient::new(
            "  ".to_string(),
            "gemini-2.5-flash".to_string(),
            DEFAULT_API_BASE,
            Duration::from_secs(5),
        )
        .err()
        .unwrap();
        assert_eq!(err.kind, LlmErrorKind::NotConfigured);
    }

    #[test]
    fn endpoint_includes_model() {
        let client = GeminiClient::new(
            "key".to_string(),
            "gemini-2.5-flash".to_string(),
            "https://example.test/",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
