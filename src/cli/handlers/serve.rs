//! API server handlers

use crate::AppConfig;
use crate::Result;

pub async fn handle_serve_api(
    config: &AppConfig,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    use crate::api::serve_api;

    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    println!("🚀 Starting Hair Advisor API Server");
    println!("===================================\n");
    println!("📍 Host: {host}");
    println!("🔌 Port: {port}");
    println!("🌐 CORS origins: {}", config.server.cors_origins.join(", "));
    println!();

    serve_api(config, host, port).await
}
