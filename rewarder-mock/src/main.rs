/// Rewarder Mock Server
///
/// A lightweight stand-in for the nft-rewarder subgraph and a JSON-RPC wallet.
/// Designed for local development and integration tests.

mod handlers;
mod server;
mod state;
mod types;

use anyhow::{Context, Result};
use std::env;
use std::sync::Arc;

use server::run_server;
use state::MockState;
use types::Fixtures;

#[derive(Debug)]
struct Config {
    // Fixture file (subgraph data + wallet accounts)
    fixtures_path: Option<String>,

    // Server
    server_host: String,
    server_port: u16,
}

impl Config {
    fn from_env() -> Result<Self> {
        dotenv::dotenv().ok(); // Load .env file if present

        let fixtures_path = env::var("FIXTURES_PATH").ok();

        let server_host = env::var("SERVER_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "4000".to_string())
            .parse()
            .context("Invalid SERVER_PORT")?;

        Ok(Self {
            fixtures_path,
            server_host,
            server_port,
        })
    }
}

fn load_fixtures(path: Option<&str>) -> Result<Fixtures> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read fixtures from {}", path))?;
            serde_json::from_str(&raw).with_context(|| format!("Invalid fixtures in {}", path))
        }
        None => {
            log::warn!("FIXTURES_PATH not set, serving empty fixtures");
            Ok(Fixtures::default())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    log::info!("Starting Rewarder Mock Server...");

    // Load configuration
    let config = Config::from_env()
        .context("Failed to load configuration")?;

    let fixtures = load_fixtures(config.fixtures_path.as_deref())?;
    let state = Arc::new(MockState::new(fixtures));

    log::info!("Server will listen on {}:{}", config.server_host, config.server_port);

    // Run server
    run_server(state, config.server_host, config.server_port)
        .await
        .context("Server error")?;

    Ok(())
}
