//! Text preprocessing utilities for embedding generation
//!
//! Provides utilities for cleaning, normalizing and tokenizing text before
//! it is embedded.

use tracing::debug;
use tracing::warn;

use crate::errors::HairAdvisorError;

/// Longest text (in characters) sent to a remote embedding model
pub const MAX_EMBEDDING_TEXT_CHARS: usize = 2000;

/// Preprocess text for embedding generation
///
/// This function handles:
/// - Normalizing whitespace and newlines
/// - Removing control characters
/// - Truncating overly long text at a word boundary
pub fn preprocess_text_for_embedding(text: &str) -> Result<String, HairAdvisorError> {
    let sanitized = sanitize_text(&normalize_whitespace(text));

    if sanitized.is_empty() {
        return Err(HairAdvisorError::EmbeddingError(
            "Text contains only whitespace after preprocessing".to_string(),
        ));
    }

    if sanitized.chars().count() > MAX_EMBEDDING_TEXT_CHARS {
        warn!(
            "Text too long ({} chars), truncating to {}",
            sanitized.chars().count(),
            MAX_EMBEDDING_TEXT_CHARS
        );
        return Ok(smart_truncate_text(&sanitized, MAX_EMBEDDING_TEXT_CHARS));
    }

    debug!(
        "Preprocessed text: {} -> {} chars",
        text.len(),
        sanitized.len()
    );
    Ok(sanitized)
}

/// Normalize whitespace and newlines
pub(crate) fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Replace control characters with spaces and collapse the result
fn sanitize_text(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Truncate to `max_chars` characters, preferring the last word boundary
/// in the final quarter
fn smart_truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let truncated: String = text.chars().take(max_chars).collect();
    if let Some(last_space) = truncated.rfind(' ') {
        if last_space > truncated.len() * 3 / 4 {
            return truncated[..last_space].to_string();
        }
    }
    truncated
}

/// Safely truncate a string at character boundary (not byte boundary)
///
/// Returns the string with a "..." suffix if it was truncated.
#[must_use]
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

/// Lowercased alphanumeric tokens, in order
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}
