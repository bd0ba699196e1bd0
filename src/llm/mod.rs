//! LLM integration
//!
//! Two external capabilities live here behind small traits so the
//! recommendation engine and the conversational responder can be driven by
//! fakes in tests:
//! - [`TextGenerator`]: prompt in, text out
//! - [`ImageDescriber`]: image in, bounded description out
//!
//! [`ChatClient`] and [`VisionClient`] are the HTTP implementations for
//! `OpenAI`-compatible endpoints (OpenAI, Groq, vLLM) and Ollama.

pub mod client;
pub mod retry;
pub mod streaming;
pub mod vision;

use std::sync::Arc;

use async_trait::async_trait;

pub use client::ChatClient;
pub use client::ChatProvider;
pub use retry::ProviderFailure;
pub use retry::RetryPolicy;
pub use streaming::StreamingResponse;
pub use vision::VisionClient;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::ImageInput;

/// Per-call generation settings
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    /// Upper bound on generated tokens
    pub max_tokens: usize,
    pub stream: bool,
    pub system_prompt: Option<String>,
}

impl GenerationOptions {
    /// Options taken from the `[llm]` section, non-streaming
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            temperature: config.llm.temperature,
            max_tokens: config.llm.max_tokens,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    #[must_use]
    pub const fn with_stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: crate::config::default_temperature(),
            max_tokens: crate::config::default_max_tokens(),
            stream: false,
            system_prompt: None,
        }
    }
}

/// Text-generation capability.
///
/// Fails with `GenerationUnavailable` when the provider is unreachable,
/// rejects the request or runs out of quota.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String>;
}

/// Image-description capability.
///
/// Returns a short, length-bounded summary of the visible hair condition.
/// Fails with `DescriptionUnavailable` on provider error.
#[async_trait]
pub trait ImageDescriber: Send + Sync {
    async fn describe(&self, image: &ImageInput) -> Result<String>;
}

/// Build the text generator described by `[llm]`
pub fn generator_from_config(config: &AppConfig) -> Result<Arc<dyn TextGenerator>> {
    Ok(Arc::new(ChatClient::from_config(config)?))
}

/// Build the image describer described by `[vision]`, falling back to `[llm]`
pub fn describer_from_config(config: &AppConfig) -> Result<Arc<dyn ImageDescriber>> {
    Ok(Arc::new(VisionClient::from_config(config)?))
}
