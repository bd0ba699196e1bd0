//! Chat-completion client for `OpenAI`-compatible and Ollama endpoints

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;

use super::retry::ProviderFailure;
use super::retry::RetryPolicy;
use super::streaming::lines;
use super::streaming::StreamingResponse;
use super::GenerationOptions;
use super::TextGenerator;
use crate::config::AppConfig;
use crate::errors::HairAdvisorError;
use crate::errors::Result;

/// Wire format spoken by the generation endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatProvider {
    /// `POST {endpoint}/chat/completions` (OpenAI, Groq, vLLM, ...)
    OpenAI,
    /// `POST {endpoint}/api/chat`
    Ollama,
}

impl ChatProvider {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "openai" => Ok(Self::OpenAI),
            "ollama" => Ok(Self::Ollama),
            other => Err(HairAdvisorError::ConfigError(format!(
                "unknown llm provider '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatMessage {
    pub role: &'static str,
    pub content: MessageContent,
    /// Ollama carries images beside the text instead of inside it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl ChatMessage {
    pub fn text(role: &'static str, content: impl Into<String>) -> Self {
        Self {
            role,
            content: MessageContent::Text(content.into()),
            images: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub(crate) enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ImageUrl {
    pub url: String,
}

#[derive(Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: usize,
    stream: bool,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: Option<AssistantMessage>,
    delta: Option<AssistantDelta>,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct AssistantDelta {
    content: Option<String>,
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: usize,
}

#[derive(Deserialize)]
struct OllamaResponse {
    message: Option<AssistantMessage>,
}

/// Text-generation client with bounded retry
#[derive(Clone)]
pub struct ChatClient {
    provider: ChatProvider,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    client: Client,
    retry: RetryPolicy,
}

impl ChatClient {
    /// Create a new chat client
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    pub fn new(
        provider: ChatProvider,
        endpoint: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| HairAdvisorError::HttpError(e.to_string()))?;

        Ok(Self {
            provider,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key,
            model: model.into(),
            client,
            retry,
        })
    }

    /// Create the text-generation client described by `[llm]`
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let llm = &config.llm;
        Self::new(
            ChatProvider::parse(&llm.provider)?,
            llm.endpoint.clone(),
            llm.api_key.clone(),
            llm.model.clone(),
            Duration::from_secs(llm.timeout_secs),
            RetryPolicy::new(llm.max_retries, Duration::from_millis(llm.retry_backoff_ms)),
        )
    }

    #[must_use]
    pub const fn provider(&self) -> ChatProvider {
        self.provider
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run a chat completion with retry, returning the raw failure on error
    pub(crate) async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &GenerationOptions,
    ) -> std::result::Result<String, ProviderFailure> {
        let operation = format!("{} chat completion", self.model);
        self.retry
            .run(&operation, || self.complete_once(messages, options))
            .await
    }

    async fn complete_once(
        &self,
        messages: &[ChatMessage],
        options: &GenerationOptions,
    ) -> std::result::Result<String, ProviderFailure> {
        let (url, body) = match self.provider {
            ChatProvider::OpenAI => (
                format!("{}/chat/completions", self.endpoint),
                serde_json::to_value(OpenAIRequest {
                    model: &self.model,
                    messages,
                    temperature: options.temperature,
                    max_tokens: options.max_tokens,
                    stream: options.stream,
                }),
            ),
            ChatProvider::Ollama => (
                format!("{}/api/chat", self.endpoint),
                serde_json::to_value(OllamaRequest {
                    model: &self.model,
                    messages,
                    stream: options.stream,
                    options: OllamaOptions {
                        temperature: options.temperature,
                        num_predict: options.max_tokens,
                    },
                }),
            ),
        };
        let body = body.map_err(|e| ProviderFailure::Permanent(e.to_string()))?;

        debug!("Calling chat API: {} (stream: {})", url, options.stream);
        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", api_key.trim()));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProviderFailure::from_request(&e))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(ProviderFailure::from_status(status, &text));
        }

        if options.stream {
            return self
                .collect_stream(response)
                .await
                .map_err(|e| ProviderFailure::Transient(e.to_string()));
        }

        match self.provider {
            ChatProvider::OpenAI => {
                let parsed: OpenAIResponse = response
                    .json()
                    .await
                    .map_err(|e| ProviderFailure::Permanent(format!("invalid reply: {e}")))?;
                Ok(parsed
                    .choices
                    .into_iter()
                    .find_map(|choice| choice.message.and_then(|m| m.content))
                    .unwrap_or_default())
            }
            ChatProvider::Ollama => {
                let parsed: OllamaResponse = response
                    .json()
                    .await
                    .map_err(|e| ProviderFailure::Permanent(format!("invalid reply: {e}")))?;
                Ok(parsed.message.and_then(|m| m.content).unwrap_or_default())
            }
        }
    }

    /// Read SSE (`OpenAI`) or NDJSON (Ollama) chunks into one string
    async fn collect_stream(&self, response: reqwest::Response) -> Result<String> {
        let provider = self.provider;
        let tokens = lines(response.bytes_stream()).filter_map(move |line| async move {
            match line {
                Ok(line) => parse_stream_line(provider, &line).map(Ok),
                Err(e) => Some(Err(e)),
            }
        });
        StreamingResponse::new(Box::pin(tokens)).collect_all().await
    }
}

/// Extract the token carried by one stream line, if any
fn parse_stream_line(provider: ChatProvider, line: &str) -> Option<String> {
    match provider {
        ChatProvider::OpenAI => {
            let payload = line.strip_prefix("data:")?.trim();
            if payload == "[DONE]" {
                return None;
            }
            let chunk: OpenAIResponse = serde_json::from_str(payload).ok()?;
            chunk
                .choices
                .into_iter()
                .find_map(|choice| choice.delta.and_then(|d| d.content))
        }
        ChatProvider::Ollama => {
            let chunk: OllamaResponse = serde_json::from_str(line).ok()?;
            chunk.message.and_then(|m| m.content)
        }
    }
}

#[async_trait]
impl TextGenerator for ChatClient {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &options.system_prompt {
            messages.push(ChatMessage::text("system", system.clone()));
        }
        messages.push(ChatMessage::text("user", prompt));

        let reply = self
            .complete(&messages, options)
            .await
            .map_err(|failure| HairAdvisorError::GenerationUnavailable(failure.to_string()))?;

        info!(
            "Generated {} chars with {} (temperature: {})",
            reply.len(),
            self.model,
            options.temperature
        );
        Ok(reply)
    }
}
