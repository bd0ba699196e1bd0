//! Hair photo description through a multimodal chat model

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use tracing::info;

use super::client::ChatClient;
use super::client::ChatMessage;
use super::client::ChatProvider;
use super::client::ContentPart;
use super::client::ImageUrl;
use super::client::MessageContent;
use super::retry::RetryPolicy;
use super::GenerationOptions;
use super::ImageDescriber;
use crate::config::AppConfig;
use crate::embeddings::text_preprocessing::truncate_str;
use crate::errors::HairAdvisorError;
use crate::errors::Result;
use crate::models::ImageInput;

pub const DESCRIBE_INSTRUCTION: &str = "Analyze this photo and describe the hair condition \
     (dryness, shine, frizz, split ends, and visible damage).";

/// Rough characters-per-token used to cap the returned description
const CHARS_PER_TOKEN: usize = 4;

pub struct VisionClient {
    chat: ChatClient,
    max_tokens: usize,
}

impl VisionClient {
    #[must_use]
    pub const fn new(chat: ChatClient, max_tokens: usize) -> Self {
        Self { chat, max_tokens }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let chat = ChatClient::new(
            ChatProvider::parse(&config.llm.provider)?,
            config.vision_endpoint(),
            config.vision_api_key().map(str::to_string),
            config.vision_model(),
            Duration::from_secs(config.llm.timeout_secs),
            RetryPolicy::new(
                config.llm.max_retries,
                Duration::from_millis(config.llm.retry_backoff_ms),
            ),
        )?;
        Ok(Self::new(chat, config.vision.max_tokens))
    }

    fn build_message(&self, image: &ImageInput) -> ChatMessage {
        let encoded = BASE64.encode(&image.bytes);
        match self.chat.provider() {
            ChatProvider::OpenAI => ChatMessage {
                role: "user",
                content: MessageContent::Parts(vec![
                    ContentPart::Text {
                        text: DESCRIBE_INSTRUCTION.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: format!("data:{};base64,{encoded}", image.mime_type()),
                        },
                    },
                ]),
                images: None,
            },
            ChatProvider::Ollama => ChatMessage {
                role: "user",
                content: MessageContent::Text(DESCRIBE_INSTRUCTION.to_string()),
                images: Some(vec![encoded]),
            },
        }
    }
}

#[async_trait]
impl ImageDescriber for VisionClient {
    async fn describe(&self, image: &ImageInput) -> Result<String> {
        if image.bytes.is_empty() {
            return Err(HairAdvisorError::InvalidInput(
                "image upload is empty".to_string(),
            ));
        }

        let options = GenerationOptions {
            temperature: 0.2,
            max_tokens: self.max_tokens,
            ..GenerationOptions::default()
        };
        let message = self.build_message(image);

        let description = self
            .chat
            .complete(std::slice::from_ref(&message), &options)
            .await
            .map_err(|failure| HairAdvisorError::DescriptionUnavailable(failure.to_string()))?;

        let description = truncate_str(description.trim(), self.max_tokens * CHARS_PER_TOKEN);
        info!(
            "Described {} byte image with {} ({} chars)",
            image.bytes.len(),
            self.chat.model(),
            description.len()
        );
        Ok(description)
    }
}
