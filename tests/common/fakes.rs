//! In-process fake capabilities for pipeline and API tests
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use hairadvisor::advisor::AdvisorComponents;
use hairadvisor::embeddings::Embedder;
use hairadvisor::embeddings::HashingEmbedder;
use hairadvisor::llm::GenerationOptions;
use hairadvisor::llm::ImageDescriber;
use hairadvisor::llm::TextGenerator;
use hairadvisor::models::ImageInput;
use hairadvisor::profiles::MemoryProfileStore;
use hairadvisor::rag::ConversationalResponder;
use hairadvisor::rag::KnowledgeBase;
use hairadvisor::rag::RecommendationEngine;
use hairadvisor::rag::Retriever;
use hairadvisor::HairAdvisor;
use hairadvisor::HairAdvisorError;
use hairadvisor::Result;

pub const RECOMMENDATION_CORPUS: &str = "data/recommendation_knowledge.txt";
pub const CHATBOT_CORPUS: &str = "data/chatbot_knowledge.txt";

pub const WELL_FORMED_REPLY: &str = "Recommended line: Supreme Length\n\
Reason: Long hair with greasy roots and healthy ends needs lightweight protection.\n\
Product routine: Supreme Length Shampoo + Conditioner\n\
Alternative: Aqua Revive for extra hydration";

/// Generator returning a fixed reply and recording every prompt
pub struct FakeGenerator {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str, _options: &GenerationOptions) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// Generator that is always down
pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str, _options: &GenerationOptions) -> Result<String> {
        Err(HairAdvisorError::GenerationUnavailable(
            "quota exhausted".to_string(),
        ))
    }
}

pub struct FakeDescriber {
    pub description: String,
}

#[async_trait]
impl ImageDescriber for FakeDescriber {
    async fn describe(&self, image: &ImageInput) -> Result<String> {
        if image.bytes.is_empty() {
            return Err(HairAdvisorError::InvalidInput("empty image".to_string()));
        }
        Ok(self.description.clone())
    }
}

pub fn embedder() -> Arc<dyn Embedder> {
    Arc::new(HashingEmbedder::new(384).unwrap())
}

pub async fn load_base(name: &str, path: &str, embedder: &Arc<dyn Embedder>) -> Arc<KnowledgeBase> {
    Arc::new(
        KnowledgeBase::load(name, path, embedder.as_ref())
            .await
            .unwrap(),
    )
}

pub async fn engine(generator: Arc<dyn TextGenerator>) -> RecommendationEngine {
    let embedder = embedder();
    let base = load_base("recommendation", RECOMMENDATION_CORPUS, &embedder).await;
    RecommendationEngine::new(Retriever::new(embedder), base, generator)
}

/// Advisor wired with fakes and an in-memory store
pub async fn advisor(generator: Arc<dyn TextGenerator>, description: &str) -> HairAdvisor {
    let embedder = embedder();
    let recommendation = load_base("recommendation", RECOMMENDATION_CORPUS, &embedder).await;
    let chatbot = load_base("chatbot", CHATBOT_CORPUS, &embedder).await;
    let retriever = Retriever::new(embedder);

    HairAdvisor::with_components(AdvisorComponents {
        describer: Arc::new(FakeDescriber {
            description: description.to_string(),
        }),
        engine: RecommendationEngine::new(retriever.clone(), recommendation, generator.clone()),
        responder: ConversationalResponder::new(retriever, chatbot, generator),
        store: Arc::new(MemoryProfileStore::new()),
    })
}
