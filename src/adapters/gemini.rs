//! Google Gemini `generateContent` client
//!
//! Implements [`CompletionClient`] with a single blocking-style request per
//! submission. No retries: any failure is reported to the caller immediately.

use crate::core::{CompletionClient, ConfigProvider, PromptRequest};
use crate::utils::error::{OrganizerError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 錯誤訊息中保留的上游回應長度
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

pub struct GeminiClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    temperature: f32,
    max_output_tokens: u32,
    timeout: Duration,
}

impl GeminiClient {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds());
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OrganizerError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            api_key: config.api_key().map(str::to_string),
            temperature: config.temperature(),
            max_output_tokens: config.max_output_tokens(),
            timeout,
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    fn build_request_body<'a>(&self, request: &'a PromptRequest) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &request.system_instruction,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        }
    }

    fn map_send_error(&self, error: reqwest::Error) -> OrganizerError {
        if error.is_timeout() {
            OrganizerError::request(format!("request timed out after {:?}", self.timeout))
        } else {
            OrganizerError::request(format!("network failure: {}", error))
        }
    }

    /// 401/403，或帶有 API_KEY_INVALID 的 400，表示 key 無效
    fn is_rejected_key(status: StatusCode, body: &str) -> bool {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => true,
            StatusCode::BAD_REQUEST => body.contains("API_KEY_INVALID"),
            _ => false,
        }
    }

    /// 只取第一個候選結果的文字部分
    fn extract_completion(body: &str) -> Result<String> {
        let response: GenerateContentResponse = serde_json::from_str(body)
            .map_err(|e| OrganizerError::empty_response(format!("malformed response body: {}", e)))?;

        let Some(candidate) = response.candidates.into_iter().next() else {
            let reason = response
                .prompt_feedback
                .and_then(|feedback| feedback.block_reason)
                .map(|reason| format!("prompt blocked: {}", reason))
                .unwrap_or_else(|| "response contained no candidates".to_string());
            return Err(OrganizerError::empty_response(reason));
        };

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(OrganizerError::empty_response(format!(
                "candidate had no text (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(text)
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn submit_completion(&self, request: &PromptRequest) -> Result<String> {
        // 沒有 key 時不發出任何請求
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| OrganizerError::configuration("GOOGLE_API_KEY is not set"))?;

        let url = self.endpoint(&request.model);
        tracing::debug!("Making LLM request to: {}", url);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&self.build_request_body(request))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        tracing::debug!("LLM response status: {}", status);

        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if Self::is_rejected_key(status, &body) {
            tracing::warn!("❌ LLM rejected the configured API key (status {})", status);
            return Err(OrganizerError::configuration(format!(
                "API key rejected with status {}",
                status
            )));
        }

        if !status.is_success() {
            let snippet: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            tracing::warn!("❌ LLM request failed with status {}: {}", status, snippet);
            return Err(OrganizerError::request(format!("status {}: {}", status, snippet)));
        }

        Self::extract_completion(&body)
    }
}
