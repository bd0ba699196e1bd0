//! Retrieval-augmented recommendation and chat
//!
//! - [`KnowledgeBase`]: passages loaded from a corpus and embedded once
//! - [`Retriever`]: cosine-similarity top-K over one knowledge base
//! - [`RecommendationEngine`]: quiz + image description -> structured
//!   [`Recommendation`](crate::models::Recommendation)
//! - [`ConversationalResponder`]: free-form follow-up answers
//!
//! The recommendation and chatbot corpora are two separate
//! [`KnowledgeBase`] values built with the same embedder; each component
//! owns the one it searches.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use hairadvisor::config::AppConfig;
//! use hairadvisor::embeddings::embedder_from_config;
//! use hairadvisor::llm::generator_from_config;
//! use hairadvisor::models::QuizProfile;
//! use hairadvisor::rag::{KnowledgeBase, RecommendationEngine, Retriever};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let embedder = embedder_from_config(&config)?;
//!     let knowledge = KnowledgeBase::load(
//!         "recommendation",
//!         &config.knowledge.recommendation_path,
//!         embedder.as_ref(),
//!     )
//!     .await?;
//!
//!     let engine = RecommendationEngine::new(
//!         Retriever::new(embedder),
//!         Arc::new(knowledge),
//!         generator_from_config(&config)?,
//!     )
//!     .configured(&config);
//!
//!     let recommendation = engine
//!         .recommend(&QuizProfile::default(), "No image provided")
//!         .await?;
//!     println!("{}", recommendation.format());
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod context;
pub mod knowledge;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod retriever;

pub use chat::ConversationalResponder;
pub use context::ContextAssembler;
pub use knowledge::KnowledgeBase;
pub use knowledge::Passage;
pub use parser::parse_recommendation;
pub use pipeline::RecommendationEngine;
pub use retriever::cosine_similarity;
pub use retriever::Retriever;
pub use retriever::ScoredPassage;
