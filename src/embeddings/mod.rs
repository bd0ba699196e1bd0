//! Embeddings generation module
//!
//! This module provides the embedding capability used by the knowledge
//! stores and the retriever:
//! - Local deterministic feature hashing (default, no network)
//! - `OpenAI`-compatible embedding APIs
//! - Ollama (local models)
//!
//! # Examples
//!
//! ```rust,no_run
//! use hairadvisor::config::AppConfig;
//! use hairadvisor::embeddings::embedder_from_config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let embedder = embedder_from_config(&config)?;
//!
//!     let embedding = embedder.embed("dry ends and frizz").await?;
//!     println!("Generated embedding with {} dimensions", embedding.len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod hashing;
pub mod text_preprocessing;

use std::sync::Arc;

use async_trait::async_trait;

pub use client::EmbeddingClient;
pub use client::EmbeddingProvider;
pub use hashing::HashingEmbedder;

use crate::config::AppConfig;
use crate::errors::Result;

/// Text → vector capability.
///
/// Implementations must be deterministic for identical input and produce a
/// fixed dimensionality, since query and passage vectors are compared
/// directly.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed one text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed many texts, preserving order
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }

    /// Identifier used in logs
    fn name(&self) -> &str;
}

/// Build the embedder selected by `[embeddings]`
pub fn embedder_from_config(config: &AppConfig) -> Result<Arc<dyn Embedder>> {
    let embeddings = &config.embeddings;
    if embeddings.provider == "hashing" {
        return Ok(Arc::new(HashingEmbedder::new(embeddings.dimension)?));
    }

    let provider = EmbeddingProvider::parse(&embeddings.provider)?;
    let client = EmbeddingClient::new(
        provider,
        embeddings.model.clone(),
        embeddings.endpoint.clone(),
        embeddings.api_key.clone(),
    )?;
    Ok(Arc::new(client))
}
