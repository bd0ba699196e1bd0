//! Stored profile handlers

use crate::advisor::HairAdvisor;
use crate::cli::output::print_info;
use crate::cli::output::print_profile;
use crate::Result;

pub async fn handle_chat(advisor: &HairAdvisor, user_id: &str, message: &str) -> Result<()> {
    let reply = advisor.chat(user_id, message).await?;
    println!("💬 GlissBot: {}", reply.trim());
    Ok(())
}

pub async fn handle_profiles(advisor: &HairAdvisor, user_id: Option<String>) -> Result<()> {
    if let Some(user_id) = user_id {
        let profile = advisor.get_profile(&user_id).await?;
        print_profile(&user_id, &profile);
        return Ok(());
    }

    let ids = advisor.list_profiles().await?;
    if ids.is_empty() {
        print_info("No stored profiles");
    } else {
        println!("Found {} profiles:", ids.len());
        for id in ids {
            println!("  - {id}");
        }
    }
    Ok(())
}
