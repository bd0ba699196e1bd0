//! Conversational follow-up grounded in the chatbot knowledge and the user's profile

use std::sync::Arc;

use tracing::debug;

use crate::config::AppConfig;
use crate::errors::HairAdvisorError;
use crate::errors::Result;
use crate::llm::GenerationOptions;
use crate::llm::TextGenerator;
use crate::models::UserProfile;
use crate::rag::prompts::build_chat_prompt;
use crate::rag::ContextAssembler;
use crate::rag::KnowledgeBase;
use crate::rag::Retriever;

pub struct ConversationalResponder {
    retriever: Retriever,
    knowledge: Arc<KnowledgeBase>,
    generator: Arc<dyn TextGenerator>,
    context_assembler: ContextAssembler,
    options: GenerationOptions,
    top_k: usize,
}

impl ConversationalResponder {
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

    #[must_use]
    pub fn configured(mut self, config: &AppConfig) -> Self {
        self.top_k = config.knowledge.chat_top_k;
        self.context_assembler = ContextAssembler::new(config.knowledge.max_context_length);
        self.options = GenerationOptions::from_config(config);
        self
    }

    /// Answer `message` for the user owning `profile`, returning the raw reply
    pub async fn respond(&self, message: &str, profile: &UserProfile) -> Result<String> {
        let message = message.trim();
        if message.is_empty() {
            return Err(HairAdvisorError::InvalidInput(
                "chat message is empty".to_string(),
            ));
        }

        let passages = self
            .retriever
            .retrieve(message, &self.knowledge, self.top_k)
            .await?;
        debug!("Chat retrieved {} passages", passages.len());

        let knowledge = self.context_assembler.assemble(&passages);
        let prompt = build_chat_prompt(&profile.to_context(), &knowledge, message);
        self.generator.generate(&prompt, &self.options).await
    }
}
