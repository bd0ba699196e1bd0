use clap::Parser;
use hairadvisor::cli::Cli;
use hairadvisor::cli::Commands;
use hairadvisor::cli::{
    self,
};
use hairadvisor::config::AppConfig;
use hairadvisor::HairAdvisor;
use hairadvisor::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load()?,
    };

    // Initialize logging
    if cli.verbose {
        hairadvisor::logging::init_logging_with_level("debug")?;
    } else {
        hairadvisor::logging::init_logging_with_config(&config)?;
    }
    info!("Configuration loaded successfully");

    // Execute the requested command
    match cli.command {
        Commands::Advise { image } => {
            let advisor = HairAdvisor::from_config(&config).await?;
            cli::handle_advise(&advisor, image).await?;
        }
        Commands::Recommend { quiz, image, json } => {
            let advisor = HairAdvisor::from_config(&config).await?;
            cli::handle_recommend(&advisor, &quiz, image, json).await?;
        }
        Commands::Search {
            query,
            knowledge,
            limit,
        } => {
            cli::handle_search(&config, &query, knowledge, limit).await?;
        }
        Commands::Chat { user_id, message } => {
            let advisor = HairAdvisor::from_config(&config).await?;
            cli::handle_chat(&advisor, &user_id, &message).await?;
        }
        Commands::Profiles { user_id } => {
            let advisor = HairAdvisor::from_config(&config).await?;
            cli::handle_profiles(&advisor, user_id).await?;
        }
        Commands::Serve { host, port } => {
            cli::handle_serve_api(&config, host, port).await?;
        }
        Commands::CheckConfig => {
            cli::handle_check_config(&config)?;
        }
    }

    Ok(())
}
