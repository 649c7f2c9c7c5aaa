use anyhow::Result;
use api::{AppState, InventoryService};
use blockchain::SolanaRpcClient;
use shared::config::Config;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() -> Result<()> {
    api::logging::init_from_env();

    tracing::info!("Starting token account cleanup API");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    // Initialize Solana RPC client
    let rpc_client = Arc::new(SolanaRpcClient::new(&config.solana)?);
    tracing::info!("Solana RPC client initialized");

    let inventory_service = Arc::new(InventoryService::new(
        rpc_client,
        config.inventory.clone(),
    ));
    tracing::info!(
        "Inventory service initialized ({} accounts per page)",
        inventory_service.per_page()
    );

    let app_state = Arc::new(AppState::new(inventory_service));

    // Create router with CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::routes::create_router(app_state, &config.server.static_dir).layer(cors);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("API server listening on {}", addr);
    tracing::info!("Health check available at http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
