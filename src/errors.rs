use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HairAdvisorError {
    #[error("Knowledge source unavailable: {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image description unavailable: {0}")]
    DescriptionUnavailable(String),

    #[error("Text generation unavailable: {0}")]
    GenerationUnavailable(String),

    #[error("Embedding error: {0}")]
    EmbeddingError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

pub type Result<T> = std::result::Result<T, HairAdvisorError>;
