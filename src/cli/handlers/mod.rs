//! CLI command handlers module
//!
//! Organized by functional domain:
//! - advise: interactive photo + quiz + chat session, one-shot recommend
//! - knowledge: retrieval debugging
//! - profiles: stored profiles and follow-up chat
//! - serve: API server
//! - info: configuration display

pub mod advise;
pub mod info;
pub mod knowledge;
pub mod profiles;
pub mod serve;

use std::path::Path;

// Re-export all public handlers
pub use advise::*;
pub use info::*;
pub use knowledge::*;
pub use profiles::*;
pub use serve::*;

use crate::errors::HairAdvisorError;
use crate::models::ImageInput;
use crate::Result;

/// Read an image file into an [`ImageInput`] named after the file
pub async fn load_image(path: &Path) -> Result<ImageInput> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        HairAdvisorError::InvalidInput(format!("cannot read image {}: {e}", path.display()))
    })?;
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string);
    Ok(ImageInput::new(bytes, filename))
}
