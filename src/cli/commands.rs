//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(name = "hairadvisor")]
#[command(about = "Haircare advisor: photo + quiz in, product recommendation out")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file (default: config.toml, then config.example.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive session: photo, quiz, recommendation, then chat
    Advise {
        /// Hair photo (prompted for when omitted; leave empty to skip)
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
    /// One-shot recommendation from quiz answers
    Recommend {
        /// Quiz answers as a JSON object
        #[arg(short, long)]
        quiz: String,
        /// Optional hair photo
        #[arg(short, long)]
        image: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show which passages a query retrieves
    Search {
        /// Free-text query
        query: String,
        /// Knowledge base to search
        #[arg(short, long, value_enum, default_value = "recommendation")]
        knowledge: KnowledgeKind,
        /// Number of passages
        #[arg(short, long, default_value = "2")]
        limit: usize,
    },
    /// Ask a follow-up question for a stored profile
    Chat {
        /// User id returned by `advise`, `recommend` or the API
        user_id: String,
        /// Question
        message: String,
    },
    /// List stored profiles, or show one
    Profiles {
        /// Profile to show
        user_id: Option<String>,
    },
    /// Start the HTTP API server
    Serve {
        /// Host to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Validate and print the effective configuration
    CheckConfig,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KnowledgeKind {
    /// Product-line knowledge used for recommendations
    Recommendation,
    /// Open-ended haircare knowledge used for chat
    Chatbot,
}
