//! Recommendation pipeline: Retrieve -> Prompt -> Generate -> Parse

use std::sync::Arc;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::llm::GenerationOptions;
use crate::llm::TextGenerator;
use crate::models::QuizProfile;
use crate::models::Recommendation;
use crate::rag::parser::parse_recommendation;
use crate::rag::prompts::build_recommendation_prompt;
use crate::rag::prompts::build_recommendation_query;
use crate::rag::ContextAssembler;
use crate::rag::KnowledgeBase;
use crate::rag::Retriever;

/// Turns quiz answers and an image description into a [`Recommendation`]
pub struct RecommendationEngine {
    retriever: Retriever,
    knowledge: Arc<KnowledgeBase>,
    generator: Arc<dyn TextGenerator>,
    context_assembler: ContextAssembler,
    options: GenerationOptions,
    top_k: usize,
}

impl RecommendationEngine {
    /// Engine with default retrieval depth and generation options
    pub fn new(
        retriever: Retriever,
        knowledge: Arc<KnowledgeBase>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            retriever,
            knowledge,
            generator,
            context_assembler: ContextAssembler::default(),
            options: GenerationOptions::default(),
            top_k: crate::config::default_top_k(),
        }
    }

    /// Apply `[knowledge]` and `[llm]` settings
    #[must_use]
    pub fn configured(mut self, config: &AppConfig) -> Self {
        self.top_k = config.knowledge.recommendation_top_k;
        self.context_assembler = ContextAssembler::new(config.knowledge.max_context_length);
        self.options = GenerationOptions::from_config(config);
        self
    }

    #[must_use]
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Build the full generation prompt without calling the generator
    pub async fn build_prompt(&self, quiz: &QuizProfile, image_description: &str) -> Result<String> {
        let quiz_text = quiz.render();

        debug!("Step 1: Retrieving product knowledge");
        let query = build_recommendation_query(&quiz_text, image_description);
        let passages = self
            .retriever
            .retrieve(&query, &self.knowledge, self.top_k)
            .await?;
        debug!("Retrieved {} passages", passages.len());

        debug!("Step 2: Assembling prompt");
        let knowledge = self.context_assembler.assemble(&passages);
        Ok(build_recommendation_prompt(
            &knowledge,
            &quiz_text,
            image_description,
        ))
    }

    /// Recommend a product line.
    ///
    /// # Errors
    /// - Embedding errors while embedding the retrieval query
    /// - `GenerationUnavailable` when the generator fails
    ///
    /// A reply that does not follow the output format is not an error: the
    /// unmatched fields are simply `None`.
    pub async fn recommend(
        &self,
        quiz: &QuizProfile,
        image_description: &str,
    ) -> Result<Recommendation> {
        let prompt = self.build_prompt(quiz, image_description).await?;

        debug!("Step 3: Generating recommendation");
        let reply = self.generator.generate(&prompt, &self.options).await?;

        debug!("Step 4: Parsing reply");
        let recommendation = parse_recommendation(reply.trim());
        if recommendation.is_empty() {
            warn!("Generation reply matched no recommendation field");
        } else if !recommendation.is_complete() {
            warn!("Generation reply is missing some recommendation fields");
        }

        info!(
            "Recommended line: {}",
            recommendation.recommended_line.as_deref().unwrap_or("n/a")
        );
        Ok(recommendation)
    }
}
