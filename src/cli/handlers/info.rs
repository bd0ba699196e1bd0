//! Information display handlers

use crate::cli::output::print_config;
use crate::cli::output::print_success;
use crate::cli::output::print_warning;
use crate::AppConfig;
use crate::Result;

pub fn handle_check_config(config: &AppConfig) -> Result<()> {
    config.validate()?;
    print_config(config);
    println!();

    for path in [
        &config.knowledge.recommendation_path,
        &config.knowledge.chatbot_path,
    ] {
        if !path.exists() {
            print_warning(&format!("Knowledge file not found: {}", path.display()));
        }
    }
    print_success("Configuration is valid");
    Ok(())
}
