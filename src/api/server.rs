use anyhow::Context;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use crate::claim::ClaimSubmitter;
use crate::config::RewarderConfig;
use crate::session::RewardSession;
use crate::subgraph::SubgraphClient;
use crate::wallet::JsonRpcWallet;

pub fn create_router(session: Arc<RewardSession>) -> Router {
    // Set ALLOWED_ORIGINS="https://rewards.example.com,https://preview.example.com" for production
    let cors = match std::env::var("ALLOWED_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            log::info!("CORS configured for origins: {}", origins);
            let origin_list: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| match s.trim().parse::<HeaderValue>() {
                    Ok(origin) => Some(origin),
                    Err(_) => {
                        log::warn!("Ignoring invalid CORS origin: {}", s);
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(origin_list)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        _ => {
            log::warn!("CORS: allowing all origins. Set ALLOWED_ORIGINS to restrict them.");
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/claim", post(handlers::claim_form_handler))
        .route("/health", get(handlers::health_check))
        .route("/api/account", get(handlers::get_account_handler))
        .route("/api/rewards", get(handlers::get_rewards_handler))
        .route("/api/rewards/reload", post(handlers::reload_rewards_handler))
        .route("/api/claim", post(handlers::claim_handler))
        .route("/api/catalog", get(handlers::catalog_handler))
        .layer(cors)
        .with_state(session)
}

pub async fn start_server(config: RewarderConfig) -> anyhow::Result<()> {
    let wallet = Arc::new(JsonRpcWallet::new(config.wallet_rpc_url.clone()));
    let subgraph = SubgraphClient::new(config.subgraph_url.clone(), config.ipfs_gateway.clone());
    let submitter = ClaimSubmitter::new(config.receipt_poll_interval, config.receipt_max_attempts);

    let session = Arc::new(RewardSession::new(wallet.clone(), subgraph, submitter));

    session.connect().await;
    let _listener = session.clone().spawn_account_listener();
    let _watcher = wallet.watch_accounts(config.account_poll_interval);

    let app = create_router(session);

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    log::info!("Server listening on http://{}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            log::info!("Received SIGTERM signal");
        },
    }

    log::info!("Shutdown signal received, exiting gracefully...");
}
