use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Config;
use crate::llm::client::LlmProvider;
use crate::{Result, SuiteError};

const SERVICE: &str = "Gemini";

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn from_config(config: &Config) -> Result<Self> {
        let settings = &config.gemini;

        let api_key = settings.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(SuiteError::Config(
                "Gemini API key is missing. Set gemini.api_key in config or GOOGLE_API_KEY."
                    .to_string(),
            ));
        }

        let model = if settings.model.trim().is_empty() {
            DEFAULT_GEMINI_MODEL.to_string()
        } else {
            settings.model.trim().to_string()
        };

        let endpoint = if settings.endpoint.trim().is_empty() {
            DEFAULT_GEMINI_ENDPOINT.to_string()
        } else {
            settings.endpoint.trim().trim_end_matches('/').to_string()
        };

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| SuiteError::Config(format!("Failed to build Gemini HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            model,
            endpoint,
        })
    }

    fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        )
    }
}

#[async_trait]
impl LlmProvider for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "Sending Gemini request");

        let body = GeminiGenerateContentRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http
            .post(self.request_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| SuiteError::external(SERVICE, format!("request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let payload: GeminiGenerateContentResponse = response
            .json()
            .await
            .map_err(|e| SuiteError::external(SERVICE, format!("unreadable response: {}", e)))?;

        payload.summary_text()
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

/// Map a non-success status to a user-facing failure, keeping the provider's message
fn status_error(status: StatusCode, body: &str) -> SuiteError {
    let detail = serde_json::from_str::<GeminiErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    let kind = match status {
        StatusCode::BAD_REQUEST => "malformed request",
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => "authentication error",
        StatusCode::TOO_MANY_REQUESTS => "quota or rate limit exceeded",
        _ => "unexpected response",
    };

    SuiteError::external(SERVICE, format!("{} (HTTP {}): {}", kind, status.as_u16(), detail))
}

#[derive(Debug, Serialize)]
struct GeminiGenerateContentRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiGenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "promptFeedback", default)]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContentResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiPartResponse {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiPromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

impl GeminiGenerateContentResponse {
    /// Text of all parts of the first candidate that has any
    fn summary_text(&self) -> Result<String> {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
        {
            return Err(SuiteError::external(
                SERVICE,
                format!("prompt was blocked: {}", reason),
            ));
        }

        self.candidates
            .iter()
            .filter_map(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .map(|text| text.trim().to_string())
            .find(|text| !text.is_empty())
            .ok_or_else(|| SuiteError::external(SERVICE, "response did not contain any text"))
    }
}
