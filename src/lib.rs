pub mod advisor;
pub mod api;
pub mod cli;
pub mod config;
pub mod embeddings;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod models;
pub mod profiles;
pub mod quiz;
pub mod rag;

#[cfg(test)]
mod errors_tests;

pub use advisor::HairAdvisor;
pub use config::AppConfig;
pub use errors::*;
pub use models::QuizProfile;
pub use models::Recommendation;
pub use models::UserProfile;
