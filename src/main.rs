mod config;
mod dto;
mod handlers;
mod service;

use std::sync::Arc;

use handlers::rest;
use service::EmailGeneratorService;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        panic!("failed to locate or load config: {e}");
    });
    tracing::info!("Successfully loaded reply generator config");

    // Setup service
    let service = EmailGeneratorService::new(cfg.gemini).unwrap_or_else(|e| {
        tracing::error!("Failed to create generator service: {e}");
        panic!("failed to create generator service: {e}");
    });
    tracing::info!("Forwarding generation requests to {}", service.endpoint());

    // Setup router
    let router = rest::router(Arc::new(service));

    // Start server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", cfg.port))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind to port {}: {e}", cfg.port);
            panic!("failed to bind to port {}: {e}", cfg.port);
        });

    match listener.local_addr() {
        Ok(addr) => tracing::info!("Reply generator starting, listening on {}", addr),
        Err(e) => tracing::warn!("Could not read local address: {e}"),
    }

    if let Err(e) = axum::serve(listener, router).await {
        tracing::error!("HTTP server error: {e}");
        panic!("failed to start HTTP server: {e}");
    }
}
