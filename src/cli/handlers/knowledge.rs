//! Retrieval debugging

use crate::cli::commands::KnowledgeKind;
use crate::cli::output::print_search_results;
use crate::cli::output::print_warning;
use crate::embeddings::embedder_from_config;
use crate::rag::KnowledgeBase;
use crate::rag::Retriever;
use crate::AppConfig;
use crate::Result;

pub async fn handle_search(
    config: &AppConfig,
    query: &str,
    knowledge: KnowledgeKind,
    limit: usize,
) -> Result<()> {
    let embedder = embedder_from_config(config)?;
    let (name, path) = match knowledge {
        KnowledgeKind::Recommendation => ("recommendation", &config.knowledge.recommendation_path),
        KnowledgeKind::Chatbot => ("chatbot", &config.knowledge.chatbot_path),
    };

    let base = KnowledgeBase::load(name, path, embedder.as_ref()).await?;
    if base.is_empty() {
        print_warning(&format!("Knowledge base '{name}' has no passages"));
        return Ok(());
    }

    let results = Retriever::new(embedder)
        .retrieve_scored(query, &base, limit)
        .await?;
    print_search_results(query, name, &results);
    Ok(())
}
