//! Embedding API clients for remote providers

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::StreamExt;
use futures::stream::{
    self,
};
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::text_preprocessing::preprocess_text_for_embedding;
use super::Embedder;
use crate::errors::HairAdvisorError;
use crate::errors::Result;

/// Parallel requests used for providers without a batch endpoint
const OLLAMA_CONCURRENCY: usize = 8;

/// Supported remote embedding providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingProvider {
    /// `OpenAI`-compatible `/embeddings` API
    OpenAI,
    /// Ollama local embeddings
    Ollama,
}

impl EmbeddingProvider {
    /// Parse the `embeddings.provider` configuration value
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "openai" => Ok(Self::OpenAI),
            "ollama" => Ok(Self::Ollama),
            other => Err(HairAdvisorError::ConfigError(format!(
                "'{other}' is not a remote embedding provider"
            ))),
        }
    }
}

/// Client for generating embeddings from a remote provider
pub struct EmbeddingClient {
    provider: EmbeddingProvider,
    model: String,
    endpoint: String,
    api_key: Option<String>,
    client: Client,
}

impl EmbeddingClient {
    /// Create a new embedding client
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    pub fn new(
        provider: EmbeddingProvider,
        model: String,
        endpoint: String,
        api_key: Option<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| HairAdvisorError::HttpError(e.to_string()))?;

        Ok(Self {
            provider,
            model,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    /// Generate embedding using `OpenAI` API
    async fn generate_openai(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        #[derive(Serialize)]
        struct OpenAIRequest<'a> {
            input: &'a [String],
            model: &'a str,
        }

        #[derive(Deserialize)]
        struct OpenAIResponse {
            data: Vec<EmbeddingData>,
        }

        #[derive(Deserialize)]
        struct EmbeddingData {
            index: Option<usize>,
            embedding: Vec<f32>,
        }

        let url = format!("{}/embeddings", self.endpoint);
        debug!("Calling OpenAI embeddings API: {} items", texts.len());

        let request = OpenAIRequest {
            input: &texts,
            model: &self.model,
        };

        let mut builder = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request);
        if let Some(api_key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {api_key}"));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| HairAdvisorError::EmbeddingError(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(HairAdvisorError::EmbeddingError(format!(
                "OpenAI API error ({status}): {error_text}"
            )));
        }

        let result: OpenAIResponse = response.json().await.map_err(|e| {
            HairAdvisorError::EmbeddingError(format!("Failed to parse response: {e}"))
        })?;

        let mut data = result.data;
        // The API may return items out of order; `index` restores input order.
        data.sort_by_key(|d| d.index.unwrap_or(usize::MAX));
        Ok(data.into_iter().map(|d| d.embedding).collect())
    }

    /// Generate embedding using Ollama API
    async fn generate_ollama(&self, text: &str) -> Result<Vec<f32>> {
        #[derive(Serialize)]
        struct OllamaRequest<'a> {
            model: &'a str,
            prompt: &'a str,
        }

        #[derive(Deserialize)]
        struct OllamaResponse {
            embedding: Vec<f32>,
        }

        let url = format!("{}/api/embeddings", self.endpoint);
        debug!("Calling Ollama embeddings API: {}", url);

        let request = OllamaRequest {
            model: &self.model,
            prompt: text,
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| HairAdvisorError::EmbeddingError(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(HairAdvisorError::EmbeddingError(format!(
                "Ollama API error ({status}): {error_text}"
            )));
        }

        let result: OllamaResponse = response.json().await.map_err(|e| {
            HairAdvisorError::EmbeddingError(format!("Failed to parse response: {e}"))
        })?;

        Ok(result.embedding)
    }
}

#[async_trait]
impl Embedder for EmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text]).await?;
        vectors
            .pop()
            .ok_or_else(|| HairAdvisorError::EmbeddingError("No embedding in response".to_string()))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let processed = texts
            .iter()
            .map(|text| preprocess_text_for_embedding(text))
            .collect::<Result<Vec<String>>>()?;

        let embeddings = match self.provider {
            EmbeddingProvider::OpenAI => self.generate_openai(processed).await?,
            EmbeddingProvider::Ollama => {
                // Ollama has no batch endpoint; `buffered` keeps input order.
                let concurrency = processed.len().min(OLLAMA_CONCURRENCY);
                let results: Vec<Result<Vec<f32>>> = stream::iter(processed)
                    .map(|text| async move { self.generate_ollama(&text).await })
                    .buffered(concurrency)
                    .collect()
                    .await;
                results.into_iter().collect::<Result<Vec<_>>>()?
            }
        };

        if embeddings.len() != texts.len() {
            return Err(HairAdvisorError::EmbeddingError(format!(
                "expected {} embeddings, provider returned {}",
                texts.len(),
                embeddings.len()
            )));
        }
        Ok(embeddings)
    }

    fn name(&self) -> &str {
        &self.model
    }
}
