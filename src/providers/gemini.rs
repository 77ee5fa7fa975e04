// Google Gemini API provider implementation
//
// Single-shot `generateContent` calls with one user turn. No retries: a
// rate-limited call surfaces immediately so the caller can fall back.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{GenerationError, LlmProvider};
use crate::config::constants::GEMINI_TIMEOUT_SECS;
use crate::config::GeminiConfig;

const PROVIDER: &str = "Gemini";

/// Header carrying the API key. Keeps the credential out of URLs and
/// therefore out of error messages.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Google Gemini API provider
#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    api_key: Option<String>,
    endpoint: Url,
    default_model: String,
}

impl GeminiProvider {
    /// Create a provider from configuration.
    ///
    /// A missing API key is allowed; upstream then rejects each call with its
    /// own authentication error.
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(GEMINI_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            endpoint: generate_endpoint(&config.base_url, &config.model)?,
            default_model: config.model.clone(),
        })
    }

    fn to_gemini_request(prompt: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
    /// Concatenate the text parts of the first candidate.
    fn extract_text(response: GeminiResponse) -> Result<String, GenerationError> {
        let Some(candidate) = response.candidates.into_iter().next() else {
            let reason = response
                .prompt_feedback
                .and_then(|feedback| feedback.block_reason)
                .unwrap_or_else(|| "no candidates".to_string());
            return Err(GenerationError::EmptyResponse {
                provider: PROVIDER.to_string(),
                reason,
            });
        };

        let text: String = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if text.is_empty() {
            return Err(GenerationError::EmptyResponse {
                provider: PROVIDER.to_string(),
                reason: candidate
                    .finish_reason
                    .unwrap_or_else(|| "unknown".to_string()),
            });
        }

        Ok(text)
    }
}

/// `{base}/models/{model}:generateContent`, with path segments encoded.
fn generate_endpoint(base_url: &str, model: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)
        .with_context(|| format!("Invalid Gemini base URL '{}'", base_url))?;
    url.path_segments_mut()
        .map_err(|_| anyhow!("Gemini base URL '{}' cannot carry a path", base_url))?
        .pop_if_empty()
        .push("models")
        .push(&format!("{}:generateContent", model));
    Ok(url)
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = Self::to_gemini_request(prompt);

        tracing::debug!(
            "Sending request to Gemini API (model: {}, {} chars)",
            self.default_model,
            prompt.chars().count()
        );

        let mut builder = self
            .client
            .post(self.endpoint.clone())
            .header("content-type", "application/json");
        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }

        let response = builder
            .json(&request)
            .send()
            .await
            .map_err(GenerationError::transport(PROVIDER))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Upstream {
                provider: PROVIDER.to_string(),
                status,
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(GenerationError::transport(PROVIDER))?;
        let parsed: GeminiResponse =
            serde_json::from_str(&body).map_err(|e| GenerationError::InvalidResponse {
                provider: PROVIDER.to_string(),
                detail: e.to_string(),
            })?;

        Self::extract_text(parsed)
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }
}

// Gemini API types

#[derive(Debug, Clone, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>, // "user" or "model"
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiPromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}
