use nft_rewarder::{api::server, RewarderConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logger (set RUST_LOG=debug for verbose output, RUST_LOG=info for normal)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = RewarderConfig::from_env();

    log::info!("Starting NFT rewarder on {}", config.bind_address);
    server::start_server(config).await?;
    Ok(())
}
