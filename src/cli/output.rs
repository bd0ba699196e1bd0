//! CLI output formatting utilities

use crate::embeddings::text_preprocessing::truncate_str;
use crate::models::Recommendation;
use crate::models::UserProfile;
use crate::rag::ScoredPassage;
use crate::AppConfig;

/// Print a recommendation as labelled lines
pub fn print_recommendation(recommendation: &Recommendation) {
    println!("💡 Your recommendation:");
    let show = |field: &Option<String>| field.as_deref().unwrap_or("n/a").to_string();
    println!("  Recommended line: {}", show(&recommendation.recommended_line));
    println!("  Reason:           {}", show(&recommendation.reason));
    println!("  Product routine:  {}", show(&recommendation.product_routine));
    println!("  Alternative:      {}", show(&recommendation.alternative));
    if recommendation.is_empty() {
        print_warning("The model reply did not follow the expected format");
    }
}

/// Print a stored profile
pub fn print_profile(user_id: &str, profile: &UserProfile) {
    println!("👤 Profile: {user_id}");
    println!();
    for line in profile.quiz.render().lines() {
        println!("  {line}");
    }
    println!();
    println!("📸 Image analysis: {}", truncate_str(&profile.image_analysis, 200));
    println!();
    print_recommendation(&profile.recommendation);
}

/// Print retrieval results with scores
pub fn print_search_results(query: &str, knowledge: &str, results: &[ScoredPassage]) {
    println!("🔍 Searching '{knowledge}' knowledge for: \"{query}\"");
    println!("Found {} passages:", results.len());

    for (rank, passage) in results.iter().enumerate() {
        println!();
        println!(
            "  {}. [passage #{}] score {:.3}",
            rank + 1,
            passage.index,
            passage.score
        );
        println!("     {}", truncate_str(&passage.text.replace('\n', " "), 160));
    }
}

/// Print configuration
pub fn print_config(config: &AppConfig) {
    println!("📋 Hair Advisor Configuration:");
    println!();

    println!("📚 Knowledge:");
    println!(
        "  Recommendation corpus: {}",
        config.knowledge.recommendation_path.display()
    );
    println!("  Chatbot corpus: {}", config.knowledge.chatbot_path.display());
    println!(
        "  Top-K (recommendation/chat): {}/{}",
        config.knowledge.recommendation_top_k, config.knowledge.chat_top_k
    );
    println!();

    println!("🧠 Embeddings:");
    println!("  Provider: {}", config.embeddings.provider);
    println!("  Model: {}", config.embeddings.model);
    println!("  Dimension: {}", config.embeddings.dimension);
    println!();

    println!("🤖 LLM:");
    println!("  Provider: {}", config.llm.provider);
    println!("  Endpoint: {}", config.llm.endpoint);
    println!("  Model: {}", config.llm.model);
    println!("  Key: {}", mask_key(config.llm.api_key.as_deref()));
    println!(
        "  Temperature: {} / max tokens: {}",
        config.llm.temperature, config.llm.max_tokens
    );
    println!(
        "  Retries: {} (backoff {}ms)",
        config.llm.max_retries, config.llm.retry_backoff_ms
    );
    println!();

    println!("📸 Vision:");
    println!("  Endpoint: {}", config.vision_endpoint());
    println!("  Model: {}", config.vision_model());
    println!("  Key: {}", mask_key(config.vision_api_key()));
    println!();

    println!("💾 Storage:");
    println!("  Profile dir: {}", config.storage.profile_dir.display());
    println!("  Persist: {}", config.storage.persist);
    println!();

    println!("🌐 Server:");
    println!("  Bind: {}:{}", config.server.host, config.server.port);
    println!("  CORS origins: {:?}", config.server.cors_origins);
}

/// Mask an API key for display (keep the last four characters)
fn mask_key(key: Option<&str>) -> String {
    match key {
        None => "(none)".to_string(),
        Some(key) if key.chars().count() <= 4 => "****".to_string(),
        Some(key) => {
            let tail: String = key.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
            format!("****{tail}")
        }
    }
}

/// Print colored output functions
pub fn print_info(msg: &str) {
    println!("ℹ️  {msg}");
}

pub fn print_success(msg: &str) {
    println!("✅ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("⚠️  {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("❌ {msg}");
}
