//! Knowledge store: passages split from a static corpus, embedded once

use std::path::Path;

use tracing::info;

use crate::embeddings::Embedder;
use crate::errors::HairAdvisorError;
use crate::errors::Result;

/// One indexed unit of knowledge text
#[derive(Debug, Clone, PartialEq)]
pub struct Passage {
    pub text: String,
    pub embedding: Vec<f32>,
}

/// Ordered passages sharing one embedding space.
///
/// Read-only after construction; share it behind an `Arc` across requests.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    name: String,
    dimension: usize,
    passages: Vec<Passage>,
}

impl KnowledgeBase {
    /// Read and index the corpus at `path`
    ///
    /// # Errors
    /// - `SourceUnavailable` when the file cannot be read
    /// - Embedding errors, including inconsistent vector dimensions
    pub async fn load(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        embedder: &dyn Embedder,
    ) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|source| {
            HairAdvisorError::SourceUnavailable {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let base = Self::from_texts(name, split_passages(&content), embedder).await?;
        info!(
            "Loaded knowledge base '{}' from {} ({} passages, {} dims, embedder: {})",
            base.name,
            path.display(),
            base.len(),
            base.dimension,
            embedder.name()
        );
        Ok(base)
    }

    /// Index already-split passages
    pub async fn from_texts(
        name: impl Into<String>,
        texts: Vec<String>,
        embedder: &dyn Embedder,
    ) -> Result<Self> {
        let name = name.into();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let embeddings = embedder.embed_batch(&refs).await?;

        if embeddings.len() != texts.len() {
            return Err(HairAdvisorError::EmbeddingError(format!(
                "knowledge base '{name}': {} passages but {} embeddings",
                texts.len(),
                embeddings.len()
            )));
        }

        let dimension = embeddings.first().map_or(0, Vec::len);
        if let Some(bad) = embeddings.iter().position(|e| e.len() != dimension) {
            return Err(HairAdvisorError::EmbeddingError(format!(
                "knowledge base '{name}': passage {bad} has {} dims, expected {dimension}",
                embeddings[bad].len()
            )));
        }

        let passages = texts
            .into_iter()
            .zip(embeddings)
            .map(|(text, embedding)| Passage { text, embedding })
            .collect();

        Ok(Self {
            name,
            dimension,
            passages,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Vector length shared by all passages (0 for an empty base)
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    #[must_use]
    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.passages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }
}

/// Split a corpus on blank lines, dropping whitespace-only segments
#[must_use]
pub fn split_passages(content: &str) -> Vec<String> {
    let normalized = content.replace("\r\n", "\n");
    let mut passages = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in normalized.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                passages.push(current.join("\n").trim().to_string());
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        passages.push(current.join("\n").trim().to_string());
    }

    passages
}
