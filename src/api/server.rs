//! HTTP server implementation

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::http::Method;
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing::warn;

use crate::advisor::HairAdvisor;
use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::AppConfig;
use crate::config::ServerConfig;
use crate::Result;

/// Build the application router with middleware applied
pub fn build_app(advisor: Arc<HairAdvisor>, server: &ServerConfig) -> Router {
    let state = AppState { advisor };

    routes::api_routes(state)
        .layer(ConcurrencyLimitLayer::new(server.max_concurrent_requests))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&server.cors_origins))
}

/// CORS restricted to the configured origins; `*` allows any origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if origins.iter().any(|origin| origin == "*") {
        return cors.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    cors.allow_origin(allowed)
}

/// Start the API server
pub async fn serve_api(config: &AppConfig, host: String, port: u16) -> Result<()> {
    info!("Starting hair advisor API server...");

    let advisor = Arc::new(HairAdvisor::from_config(config).await?);
    let app = build_app(advisor, &config.server);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("API server listening on http://{}", addr);
    info!("Allowed CORS origins: {:?}", config.server.cors_origins);
    info!("Available endpoints:");
    info!("  GET  /health                 - Health check");
    info!("  POST /analyze_and_recommend  - Photo + quiz recommendation (multipart)");
    info!("  POST /chat                   - Follow-up question (form)");
    info!("  GET  /profiles               - List stored user ids");
    info!("  GET  /profiles/:user_id      - Stored profile");

    axum::serve(listener, app).await?;

    Ok(())
}
