//! Logging configuration for the hair advisor

use std::path::Path;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{
    self,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

use crate::config::AppConfig;
use crate::Result;

const LOG_FILE_PREFIX: &str = "hairadvisor.log";

/// Initialize logging from the `[logging]` section of the configuration
pub fn init_logging_with_config(config: &AppConfig) -> Result<()> {
    let level = &config.logging.level;
    let env_filter = EnvFilter::new(format!("{level},hairadvisor={level}"));
    init_registry(env_filter, &config.logging.directory)?;

    tracing::info!(
        "Logging initialized with level: {} - console and file output enabled",
        level
    );
    Ok(())
}

/// Initialize logging with custom log level, writing files under `logs/`
pub fn init_logging_with_level(level: &str) -> Result<()> {
    let env_filter = EnvFilter::new(format!("{level},hairadvisor={level}"));
    init_registry(env_filter, Path::new("logs"))?;

    tracing::info!(
        "Logging initialized with level: {} - console and file output enabled",
        level
    );
    Ok(())
}

fn init_registry(env_filter: EnvFilter, directory: &Path) -> Result<()> {
    if !directory.exists() {
        std::fs::create_dir_all(directory)?;
    }

    let file_appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(non_blocking)
        .with_ansi(false);

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| crate::HairAdvisorError::Custom(format!("logging already set: {e}")))?;

    tracing::info!(
        "Log files will be saved to: {}/{}.YYYY-MM-DD",
        directory.display(),
        LOG_FILE_PREFIX
    );

    // The writer must outlive every span; the process owns it until exit.
    std::mem::forget(guard);

    Ok(())
}

/// Initialize simple console logging for tests
pub fn init_simple_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_max_level(tracing::Level::INFO)
        .try_init()
        .map_err(|e| crate::HairAdvisorError::Custom(format!("logging already set: {e}")))?;

    tracing::info!("Simple logging initialized");
    Ok(())
}
