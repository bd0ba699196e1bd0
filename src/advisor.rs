//! Advisor service: image description, recommendation, persistence and chat

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::config::AppConfig;
use crate::embeddings::embedder_from_config;
use crate::errors::HairAdvisorError;
use crate::errors::Result;
use crate::llm::describer_from_config;
use crate::llm::generator_from_config;
use crate::llm::ImageDescriber;
use crate::llm::TextGenerator;
use crate::models::ImageInput;
use crate::models::QuizProfile;
use crate::models::UserProfile;
use crate::models::NO_IMAGE_DESCRIPTION;
use crate::profiles::generate_user_id;
use crate::profiles::sanitize_user_id;
use crate::profiles::FileProfileStore;
use crate::profiles::MemoryProfileStore;
use crate::profiles::ProfileStore;
use crate::rag::ConversationalResponder;
use crate::rag::KnowledgeBase;
use crate::rag::RecommendationEngine;
use crate::rag::Retriever;

/// Result of one `analyze_and_recommend` request
#[derive(Debug, Clone)]
pub struct AdviceOutcome {
    pub user_id: String,
    pub profile: UserProfile,
}

/// Capability objects, built once at startup and injected
pub struct AdvisorComponents {
    pub describer: Arc<dyn ImageDescriber>,
    pub engine: RecommendationEngine,
    pub responder: ConversationalResponder,
    pub store: Arc<dyn ProfileStore>,
}

pub struct HairAdvisor {
    describer: Arc<dyn ImageDescriber>,
    engine: RecommendationEngine,
    responder: ConversationalResponder,
    store: Arc<dyn ProfileStore>,
}

impl HairAdvisor {
    /// Build every component from configuration.
    ///
    /// # Errors
    /// - `SourceUnavailable` when either knowledge corpus cannot be read
    /// - Provider configuration errors
    /// - Profile directory creation errors
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let embedder = embedder_from_config(config)?;
        let generator: Arc<dyn TextGenerator> = generator_from_config(config)?;
        let describer = describer_from_config(config)?;

        let recommendation_kb = KnowledgeBase::load(
            "recommendation",
            &config.knowledge.recommendation_path,
            embedder.as_ref(),
        )
        .await?;
        let chatbot_kb = KnowledgeBase::load(
            "chatbot",
            &config.knowledge.chatbot_path,
            embedder.as_ref(),
        )
        .await?;

        let retriever = Retriever::new(embedder);
        let engine = RecommendationEngine::new(
            retriever.clone(),
            Arc::new(recommendation_kb),
            generator.clone(),
        )
        .configured(config);
        let responder =
            ConversationalResponder::new(retriever, Arc::new(chatbot_kb), generator)
                .configured(config);

        let store: Arc<dyn ProfileStore> = if config.storage.persist {
            Arc::new(FileProfileStore::open(&config.storage.profile_dir)?)
        } else {
            Arc::new(MemoryProfileStore::new())
        };

        info!("Hair advisor ready");
        Ok(Self::with_components(AdvisorComponents {
            describer,
            engine,
            responder,
            store,
        }))
    }

    #[must_use]
    pub fn with_components(components: AdvisorComponents) -> Self {
        Self {
            describer: components.describer,
            engine: components.engine,
            responder: components.responder,
            store: components.store,
        }
    }

    /// Describe the image (if any), recommend, and store the profile.
    ///
    /// The user id is the image file stem when a named image is supplied,
    /// otherwise a fresh `user_<uuid>`.
    pub async fn analyze_and_recommend(
        &self,
        quiz: QuizProfile,
        image: Option<ImageInput>,
    ) -> Result<AdviceOutcome> {
        let user_id = image
            .as_ref()
            .and_then(|image| image.filename.as_deref())
            .and_then(|name| Path::new(name).file_stem())
            .and_then(|stem| stem.to_str())
            .map(sanitize_user_id)
            .unwrap_or_else(generate_user_id);

        let image_analysis = match &image {
            Some(image) => self.describer.describe(image).await?,
            None => NO_IMAGE_DESCRIPTION.to_string(),
        };

        let recommendation = self.engine.recommend(&quiz, &image_analysis).await?;
        let profile = UserProfile::new(quiz, image_analysis, recommendation);
        self.store.put(&user_id, profile.clone()).await?;

        info!("Stored profile for {}", user_id);
        Ok(AdviceOutcome { user_id, profile })
    }

    /// Answer a follow-up question for a stored user
    ///
    /// # Errors
    /// - `ProfileNotFound` for unknown users
    /// - `GenerationUnavailable` when the generator fails
    pub async fn chat(&self, user_id: &str, message: &str) -> Result<String> {
        let profile = self.get_profile(user_id).await?;
        self.responder.respond(message, &profile).await
    }

    /// Answer against a profile the caller already holds (CLI session)
    pub async fn chat_with_profile(&self, profile: &UserProfile, message: &str) -> Result<String> {
        self.responder.respond(message, profile).await
    }

    pub async fn get_profile(&self, user_id: &str) -> Result<UserProfile> {
        self.store
            .get(&sanitize_user_id(user_id))
            .await?
            .ok_or_else(|| HairAdvisorError::ProfileNotFound(user_id.to_string()))
    }

    pub async fn list_profiles(&self) -> Result<Vec<String>> {
        self.store.list_ids().await
    }
}
