//! Google Gemini `generateContent` client.
//!
//! One blocking POST per prompt. The API key travels in the
//! `x-goog-api-key` header so it never appears in logged URLs.

use super::TextGenerator;
use crate::config::Config;
use crate::error::{InfraError, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gemini API client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: Option<u32>,
    #[serde(default)]
    candidates_token_count: Option<u32>,
    #[serde(default)]
    total_token_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl GeminiClient {
    /// Create a client from configuration.
    ///
    /// Fails with [`InfraError::MissingApiKey`] before anything touches the
    /// network when no key is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| InfraError::NetworkFailure(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint_url(&config.base_url, &config.model),
            api_key,
            model: config.model.clone(),
            max_output_tokens: config.max_output_tokens,
            temperature: config.temperature,
        })
    }

    fn request_body<'a>(&self, prompt: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.max_output_tokens,
                temperature: self.temperature,
            },
        }
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String> {
        log::info!("sending prompt to {} ({} chars)", self.model, prompt.len());
        log::debug!("POST {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .map_err(|e| InfraError::NetworkFailure(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| InfraError::NetworkFailure(format!("failed to read response: {}", e)))?;

        log::debug!("Gemini API response status: {}", status);

        if !status.is_success() {
            return Err(InfraError::Api {
                status: status.as_u16(),
                message: provider_error_message(&body),
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&body).map_err(|e| {
            InfraError::AiResponseEmpty(format!("could not parse response body: {}", e))
        })?;

        if let Some(usage) = &parsed.usage_metadata {
            log::info!(
                "Gemini usage - prompt: {:?} tokens, response: {:?} tokens, total: {:?} tokens",
                usage.prompt_token_count,
                usage.candidates_token_count,
                usage.total_token_count
            );
        }

        extract_text(parsed)
    }

    fn describe(&self) -> String {
        format!("Gemini ({})", self.model)
    }
}

fn endpoint_url(base_url: &str, model: &str) -> String {
    format!("{}/{}:generateContent", base_url.trim_end_matches('/'), model)
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateResponse) -> Result<String> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .map(|r| format!("prompt blocked ({})", r))
            .unwrap_or_else(|| "no candidates in response".to_string());
        return Err(InfraError::AiResponseEmpty(reason));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = match candidate.finish_reason {
            Some(reason) => format!("candidate has no text (finish reason: {})", reason),
            None => "candidate has no text".to_string(),
        };
        return Err(InfraError::AiResponseEmpty(reason));
    }

    Ok(text)
}

/// The provider's `error.message`, or the raw body when it is not JSON.
fn provider_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ if body.trim().is_empty() => "(empty response body)".to_string(),
        _ => body.trim().to_string(),
    }
}
