use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::errors::HairAdvisorError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Corpus describing the product lines, used by the recommendation engine
    #[serde(default = "default_recommendation_path")]
    pub recommendation_path: PathBuf,
    /// Open-ended corpus used by the conversational responder
    #[serde(default = "default_chatbot_path")]
    pub chatbot_path: PathBuf,
    #[serde(default = "default_top_k")]
    pub recommendation_top_k: usize,
    #[serde(default = "default_top_k")]
    pub chat_top_k: usize,
    /// Upper bound (in bytes) on the retrieved text placed into a prompt
    #[serde(default = "default_max_context_length")]
    pub max_context_length: usize,
}

fn default_recommendation_path() -> PathBuf {
    PathBuf::from("data/recommendation_knowledge.txt")
}

fn default_chatbot_path() -> PathBuf {
    PathBuf::from("data/chatbot_knowledge.txt")
}

pub(crate) fn default_top_k() -> usize {
    2
}

pub(crate) fn default_max_context_length() -> usize {
    4000
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            recommendation_path: default_recommendation_path(),
            chatbot_path: default_chatbot_path(),
            recommendation_top_k: default_top_k(),
            chat_top_k: default_top_k(),
            max_context_length: default_max_context_length(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsConfig {
    /// `hashing` (local, deterministic), `openai` or `ollama`
    #[serde(default = "default_embedding_provider")]
    pub provider: String,
    #[serde(default = "default_embedding_model")]
    pub model: String,
    #[serde(default = "default_embedding_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_embedding_dimension")]
    pub dimension: usize,
}

fn default_embedding_provider() -> String {
    "hashing".to_string()
}

fn default_embedding_model() -> String {
    "all-minilm".to_string()
}

fn default_embedding_endpoint() -> String {
    "http://localhost:11434".to_string()
}

pub(crate) fn default_embedding_dimension() -> usize {
    384
}

impl Default for EmbeddingsConfig {
    fn default() -> Self {
        Self {
            provider: default_embedding_provider(),
            model: default_embedding_model(),
            endpoint: default_embedding_endpoint(),
            api_key: None,
            dimension: default_embedding_dimension(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// `openai` (any OpenAI-compatible endpoint, e.g. Groq) or `ollama`
    #[serde(default = "default_llm_provider")]
    pub provider: String,
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

fn default_llm_provider() -> String {
    "ollama".to_string()
}

fn default_llm_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_llm_model() -> String {
    "gemma3:27b".to_string()
}

pub(crate) fn default_temperature() -> f32 {
    0.7
}

pub(crate) fn default_max_tokens() -> usize {
    1024
}

fn default_timeout_secs() -> u64 {
    60
}

pub(crate) fn default_max_retries() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    500
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            endpoint: default_llm_endpoint(),
            api_key: None,
            model: default_llm_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// Image description provider. Unset fields fall back to `[llm]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "default_vision_max_tokens")]
    pub max_tokens: usize,
}

fn default_vision_max_tokens() -> usize {
    300
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            model: None,
            max_tokens: default_vision_max_tokens(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_profile_dir")]
    pub profile_dir: PathBuf,
    /// Write every profile to `<profile_dir>/<id>_profile.json`
    #[serde(default = "default_persist")]
    pub persist: bool,
}

fn default_profile_dir() -> PathBuf {
    PathBuf::from("user_data")
}

fn default_persist() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            profile_dir: default_profile_dir(),
            persist: default_persist(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:5173".to_string()]
}

fn default_max_concurrent_requests() -> usize {
    64
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            max_concurrent_requests: default_max_concurrent_requests(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> PathBuf {
    PathBuf::from("logs")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: default_log_directory(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    #[serde(default)]
    pub embeddings: EmbeddingsConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub vision: VisionConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default config file path
    pub fn load() -> crate::Result<Self> {
        // Try to load from config.toml first, then fall back to config.example.toml
        if Path::new("config.toml").exists() {
            Self::from_file("config.toml")
        } else if Path::new("config.example.toml").exists() {
            tracing::warn!(
                "Using config.example.toml. Please create config.toml for production use."
            );
            Self::from_file("config.example.toml")
        } else {
            Err(HairAdvisorError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config file found. Please create config.toml or config.example.toml",
            )))
        }
    }

    /// Reject values that would make the pipeline meaningless
    pub fn validate(&self) -> crate::Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(HairAdvisorError::ConfigError(format!(
                "llm.temperature must be within [0, 2], got {}",
                self.llm.temperature
            )));
        }
        if self.llm.max_tokens == 0 || self.vision.max_tokens == 0 {
            return Err(HairAdvisorError::ConfigError(
                "max_tokens must be greater than zero".to_string(),
            ));
        }
        if self.knowledge.recommendation_top_k == 0 || self.knowledge.chat_top_k == 0 {
            return Err(HairAdvisorError::ConfigError(
                "knowledge top_k values must be greater than zero".to_string(),
            ));
        }
        if self.embeddings.dimension == 0 {
            return Err(HairAdvisorError::ConfigError(
                "embeddings.dimension must be greater than zero".to_string(),
            ));
        }
        if !matches!(
            self.embeddings.provider.as_str(),
            "hashing" | "openai" | "ollama"
        ) {
            return Err(HairAdvisorError::ConfigError(format!(
                "unknown embeddings.provider '{}'",
                self.embeddings.provider
            )));
        }
        if self.server.max_concurrent_requests == 0 {
            return Err(HairAdvisorError::ConfigError(
                "server.max_concurrent_requests must be greater than zero".to_string(),
            ));
        }
        if !matches!(self.llm.provider.as_str(), "openai" | "ollama") {
            return Err(HairAdvisorError::ConfigError(format!(
                "unknown llm.provider '{}'",
                self.llm.provider
            )));
        }
        Ok(())
    }

    /// Vision endpoint, defaulting to the text-generation endpoint
    pub fn vision_endpoint(&self) -> &str {
        self.vision.endpoint.as_deref().unwrap_or(&self.llm.endpoint)
    }

    /// Vision model, defaulting to the text-generation model
    pub fn vision_model(&self) -> &str {
        self.vision.model.as_deref().unwrap_or(&self.llm.model)
    }

    /// Vision API key, defaulting to the text-generation key
    pub fn vision_api_key(&self) -> Option<&str> {
        self.vision
            .api_key
            .as_deref()
            .or(self.llm.api_key.as_deref())
    }
}
