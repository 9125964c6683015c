//! AI backend abstraction.
//!
//! The scouting report is produced by Google's generative language API
//! (`generateContent`). The trait keeps the agent independent of the wire
//! format so tests can substitute a mock.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::AgentError;
use crate::config::ReportConfig;

/// A message in a conversation with the AI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Request to the AI backend.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temp: Option<f32>) -> Self {
        self.temperature = temp;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Response from the AI backend.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub content: String,
    pub model: String,
    pub tokens_used: Option<TokenUsage>,
}

#[derive(Debug, Clone, Default)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Trait for AI backends.
#[async_trait]
pub trait AiBackend: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Whether a credential is present. Callers must not send requests otherwise.
    fn is_configured(&self) -> bool;

    /// Send a chat completion request.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, AgentError>;
}

/// Gemini `generateContent` backend.
pub struct GeminiBackend {
    client: reqwest::Client,
    endpoint: url::Url,
    model: String,
    api_key: Option<String>,
    timeout_seconds: u64,
}

impl GeminiBackend {
    pub fn new(
        api_key: Option<String>,
        base_url: &str,
        model: String,
        timeout_seconds: u64,
    ) -> Result<Self, AgentError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| AgentError::BackendUnavailable(e.to_string()))?;

        let endpoint = generate_content_url(base_url, &model)?;

        Ok(Self {
            client,
            endpoint,
            model,
            api_key,
            timeout_seconds,
        })
    }

    /// Build from config, reading the key from the configured env var.
    pub fn from_config(config: &ReportConfig) -> Result<Self, AgentError> {
        Self::new(
            config.api_key(),
            &config.base_url,
            config.model.clone(),
            config.timeout_seconds,
        )
    }
}

/// `{base}/v1beta/models/{model}:generateContent`
fn generate_content_url(base_url: &str, model: &str) -> Result<url::Url, AgentError> {
    let mut base = base_url.to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    url::Url::parse(&base)
        .and_then(|u| u.join(&format!("v1beta/models/{}:generateContent", model)))
        .map_err(|e| AgentError::BackendUnavailable(format!("Invalid base URL {}: {}", base_url, e)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    generation_config: GeminiGenerationConfig,
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
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsage>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

impl GeminiRequest {
    /// System messages go to the system instruction; the rest become turns.
    fn from_chat(request: ChatRequest) -> Self {
        let mut system_parts: Vec<GeminiPart> = Vec::new();
        let mut contents: Vec<GeminiContent> = Vec::new();

        for msg in request.messages {
            let role = match msg.role {
                MessageRole::System => {
                    system_parts.push(GeminiPart { text: msg.content });
                    continue;
                }
                MessageRole::User => "user",
                MessageRole::Assistant => "model",
            };
            contents.push(GeminiContent {
                role: Some(role.to_string()),
                parts: vec![GeminiPart { text: msg.content }],
            });
        }

        let system_instruction = if system_parts.is_empty() {
            None
        } else {
            Some(GeminiContent {
                role: None,
                parts: system_parts,
            })
        };

        Self {
            contents,
            system_instruction,
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            },
        }
    }
}

impl GeminiResponse {
    /// Text of the first candidate, parts concatenated.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| {
                c.parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }

    fn into_chat_response(self, fallback_model: &str) -> ChatResponse {
        let content = self.text();
        let tokens_used = self.usage_metadata.map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        ChatResponse {
            content,
            model: self
                .model_version
                .unwrap_or_else(|| fallback_model.to_string()),
            tokens_used,
        }
    }
}

#[async_trait]
impl AiBackend for GeminiBackend {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, AgentError> {
        let api_key = self.api_key.as_ref().ok_or(AgentError::MissingCredential)?;
        let body = GeminiRequest::from_chat(request);

        debug!("Sending request to Gemini model {}", self.model);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AgentError::Timeout(self.timeout_seconds)
                } else {
                    AgentError::BackendUnavailable(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::BackendUnavailable(format!(
                "Gemini returned {}: {}",
                status,
                body.chars().take(500).collect::<String>()
            )));
        }

        let body_text = response
            .text()
            .await
            .map_err(|e| AgentError::ResponseParseError(e.to_string()))?;

        let parsed: GeminiResponse = serde_json::from_str(&body_text).map_err(|e| {
            warn!("Failed to parse Gemini response: {}", e);
            AgentError::ResponseParseError(format!("Invalid JSON from Gemini: {}", e))
        })?;

        Ok(parsed.into_chat_response(&self.model))
    }
}

/// Create the report backend from configuration.
pub fn create_backend(config: &ReportConfig) -> Result<std::sync::Arc<dyn AiBackend>, AgentError> {
    let backend = GeminiBackend::from_config(config)?;
    if !backend.is_configured() {
        warn!(
            "{} is not set; scouting reports are disabled",
            config.api_key_env
        );
    }
    Ok(std::sync::Arc::new(backend))
}

/// Mock backend for testing. Counts calls and can be slowed down to
/// exercise overlapping requests.
#[cfg(test)]
pub struct MockBackend {
    response: Result<String, String>,
    configured: bool,
    delay: Option<std::time::Duration>,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockBackend {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: Ok(response.into()),
            configured: true,
            delay: None,
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn failing(error: impl Into<String>) -> Self {
        Self {
            response: Err(error.into()),
            ..Self::new("")
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new("should never be returned")
        }
    }

    pub fn with_delay(mut self, delay: std::time::Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl AiBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn chat(&self, _request: ChatRequest) -> Result<ChatResponse, AgentError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.response {
            Ok(content) => Ok(ChatResponse {
                content: content.clone(),
                model: "mock".to_string(),
                tokens_used: None,
            }),
            Err(e) => Err(AgentError::BackendUnavailable(e.clone())),
        }
    }
}
