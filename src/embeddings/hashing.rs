//! Deterministic local embeddings via feature hashing
//!
//! Each lowercased token and each pair of adjacent tokens is hashed with
//! SHA-256 into one of `dimension` buckets with a hash-derived sign. The
//! resulting vector is L2-normalised, so cosine similarity reduces to a dot
//! product. No network, no model files, and identical text always yields an
//! identical vector.

use async_trait::async_trait;
use sha2::Digest;
use sha2::Sha256;

use super::text_preprocessing::tokenize;
use super::Embedder;
use crate::errors::HairAdvisorError;
use crate::errors::Result;

/// Bigrams carry less weight than single tokens
const BIGRAM_WEIGHT: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    /// Create a hashing embedder producing `dimension`-sized vectors
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(HairAdvisorError::ConfigError(
                "hashing embedder dimension must be greater than zero".to_string(),
            ));
        }
        Ok(Self { dimension })
    }

    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Synchronous embedding; the async trait method delegates here
    #[must_use]
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];
        let tokens = tokenize(text);

        for token in &tokens {
            self.accumulate(&mut vector, token.as_bytes(), 1.0);
        }
        for pair in tokens.windows(2) {
            let bigram = format!("{} {}", pair[0], pair[1]);
            self.accumulate(&mut vector, bigram.as_bytes(), BIGRAM_WEIGHT);
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        vector
    }

    fn accumulate(&self, vector: &mut [f32], feature: &[u8], weight: f32) {
        let digest = Sha256::digest(feature);
        let mut bucket_bytes = [0u8; 8];
        bucket_bytes.copy_from_slice(&digest[..8]);
        let bucket = (u64::from_le_bytes(bucket_bytes) % self.dimension as u64) as usize;
        let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
        vector[bucket] += sign * weight;
    }
}

#[async_trait]
impl Embedder for HashingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_text(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.embed_text(text)).collect())
    }

    fn name(&self) -> &str {
        "hashing"
    }
}
