/// Axum HTTP server setup and routing

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::*;
use crate::state::MockState;

pub fn create_router(state: Arc<MockState>) -> Router {
    // Configure CORS to allow requests from the rewarder page/tests
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Indexing service
        .route("/subgraph", post(subgraph_query))

        // Wallet JSON-RPC
        .route("/rpc", post(wallet_rpc))

        // Mock control endpoints
        .route("/mock/accounts", post(set_accounts))
        .route("/mock/claim-behavior", post(set_claim_behavior))
        .route("/mock/transactions", get(list_transactions))

        // Shared state
        .with_state(state)

        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(state: Arc<MockState>, host: String, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    log::info!("🚀 Rewarder mock listening on http://{}", addr);
    log::info!("📡 Subgraph endpoint: POST /subgraph");
    log::info!("🔗 Wallet JSON-RPC endpoint: POST /rpc");

    axum::serve(listener, app).await?;

    Ok(())
}
