//! Cosine-similarity retrieval over a knowledge base

use std::sync::Arc;

use tracing::debug;

use crate::embeddings::Embedder;
use crate::errors::HairAdvisorError;
use crate::errors::Result;
use crate::rag::KnowledgeBase;

/// Passage with its similarity to the query
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPassage {
    /// Position in the source corpus
    pub index: usize,
    pub text: String,
    pub score: f32,
}

/// Cosine similarity; 0.0 when either vector has zero norm
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let (mut dot, mut norm_a, mut norm_b) = (0.0f32, 0.0f32, 0.0f32);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Top-K semantic retriever.
///
/// Queries are embedded with the same embedder the knowledge bases were
/// built with.
#[derive(Clone)]
pub struct Retriever {
    embedder: Arc<dyn Embedder>,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    #[must_use]
    pub fn embedder(&self) -> &Arc<dyn Embedder> {
        &self.embedder
    }

    /// Texts of the `min(top_k, |base|)` passages most similar to `query`
    pub async fn retrieve(
        &self,
        query: &str,
        base: &KnowledgeBase,
        top_k: usize,
    ) -> Result<Vec<String>> {
        Ok(self
            .retrieve_scored(query, base, top_k)
            .await?
            .into_iter()
            .map(|passage| passage.text)
            .collect())
    }

    /// Same as [`Self::retrieve`] with scores and corpus positions
    pub async fn retrieve_scored(
        &self,
        query: &str,
        base: &KnowledgeBase,
        top_k: usize,
    ) -> Result<Vec<ScoredPassage>> {
        let k = top_k.min(base.len());
        if k == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(query).await?;
        if query_embedding.len() != base.dimension() {
            return Err(HairAdvisorError::EmbeddingError(format!(
                "query has {} dims but knowledge base '{}' has {}",
                query_embedding.len(),
                base.name(),
                base.dimension()
            )));
        }

        let mut scored: Vec<ScoredPassage> = base
            .passages()
            .iter()
            .enumerate()
            .map(|(index, passage)| ScoredPassage {
                index,
                text: passage.text.clone(),
                score: cosine_similarity(&query_embedding, &passage.embedding),
            })
            .collect();

        // Stable sort: equal scores keep corpus order.
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(k);

        debug!(
            "Retrieved {} of {} passages from '{}' (best score {:.3})",
            scored.len(),
            base.len(),
            base.name(),
            scored.first().map_or(0.0, |p| p.score)
        );
        Ok(scored)
    }
}
