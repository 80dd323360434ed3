/// Rewarder configuration from environment variables
///
/// Controls the subgraph endpoint, the wallet JSON-RPC endpoint and
/// polling behavior. Defaults target the hosted nft-rewarder subgraph and a
/// local wallet node.

use std::env;
use std::time::Duration;

pub const DEFAULT_SUBGRAPH_URL: &str =
    "https://api.thegraph.com/subgraphs/name/gvladika/nft-rewarder";
pub const DEFAULT_WALLET_RPC_URL: &str = "http://localhost:8545";
pub const DEFAULT_IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";

#[derive(Clone, Debug)]
pub struct RewarderConfig {
    /// GraphQL endpoint of the indexing service
    pub subgraph_url: String,
    /// JSON-RPC endpoint of the wallet (EIP-1193 methods over HTTP)
    pub wallet_rpc_url: String,
    /// HTTP gateway used to resolve `ipfs://` reward images
    pub ipfs_gateway: String,
    /// How often the wallet is polled for account changes
    pub account_poll_interval: Duration,
    /// Delay between transaction receipt lookups
    pub receipt_poll_interval: Duration,
    /// Upper bound on receipt lookups; `None` waits until the receipt shows up
    pub receipt_max_attempts: Option<u32>,
    /// Address the HTTP server binds to
    pub bind_address: String,
}

impl RewarderConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `SUBGRAPH_URL`: GraphQL endpoint (defaults to the hosted nft-rewarder subgraph)
    /// - `WALLET_RPC_URL`: wallet JSON-RPC endpoint (default `http://localhost:8545`)
    /// - `IPFS_GATEWAY`: gateway base for reward images (default `https://ipfs.io/ipfs/`)
    /// - `ACCOUNT_POLL_INTERVAL_MS`: account watcher interval (default 1000)
    /// - `RECEIPT_POLL_INTERVAL_MS`: receipt polling interval (default 2000)
    /// - `RECEIPT_MAX_ATTEMPTS`: optional bound on receipt polling
    /// - `BIND_ADDRESS`: server address (default `0.0.0.0:3000`)
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Against a local mock of both the subgraph and the wallet
    /// SUBGRAPH_URL=http://localhost:4000/subgraph WALLET_RPC_URL=http://localhost:4000/rpc cargo run
    /// ```
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let defaults = Self::default();

        let subgraph_url = env::var("SUBGRAPH_URL").unwrap_or(defaults.subgraph_url);
        log::info!("📡 Subgraph URL: {}", subgraph_url);

        let wallet_rpc_url = env::var("WALLET_RPC_URL").unwrap_or(defaults.wallet_rpc_url);
        log::info!("🔗 Wallet RPC URL: {}", wallet_rpc_url);

        let ipfs_gateway = env::var("IPFS_GATEWAY").unwrap_or(defaults.ipfs_gateway);

        let account_poll_interval = env_millis("ACCOUNT_POLL_INTERVAL_MS")
            .unwrap_or(defaults.account_poll_interval);
        let receipt_poll_interval = env_millis("RECEIPT_POLL_INTERVAL_MS")
            .unwrap_or(defaults.receipt_poll_interval);

        let receipt_max_attempts = env_number::<u32>("RECEIPT_MAX_ATTEMPTS");
        if let Some(attempts) = receipt_max_attempts {
            log::info!("⏱️  Receipt polling bounded to {} attempts", attempts);
        }

        let bind_address = env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address);

        Self {
            subgraph_url,
            wallet_rpc_url,
            ipfs_gateway,
            account_poll_interval,
            receipt_poll_interval,
            receipt_max_attempts,
            bind_address,
        }
    }
}

impl Default for RewarderConfig {
    fn default() -> Self {
        Self {
            subgraph_url: DEFAULT_SUBGRAPH_URL.to_string(),
            wallet_rpc_url: DEFAULT_WALLET_RPC_URL.to_string(),
            ipfs_gateway: DEFAULT_IPFS_GATEWAY.to_string(),
            account_poll_interval: Duration::from_millis(1000),
            receipt_poll_interval: Duration::from_millis(2000),
            receipt_max_attempts: None,
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

fn env_millis(key: &str) -> Option<Duration> {
    env_number::<u64>(key).map(Duration::from_millis)
}

fn env_number<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("⚠️  Ignoring invalid {}='{}', using default", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RewarderConfig::default();
        assert_eq!(config.subgraph_url, DEFAULT_SUBGRAPH_URL);
        assert_eq!(config.ipfs_gateway, "https://ipfs.io/ipfs/");
        assert_eq!(config.receipt_max_attempts, None);
        assert_eq!(config.receipt_poll_interval, Duration::from_secs(2));
    }

    #[test]
    fn test_invalid_number_falls_back() {
        env::set_var("NFT_REWARDER_TEST_BAD_NUMBER", "soon");
        assert_eq!(env_number::<u64>("NFT_REWARDER_TEST_BAD_NUMBER"), None);

        env::set_var("NFT_REWARDER_TEST_GOOD_NUMBER", " 250 ");
        assert_eq!(
            env_millis("NFT_REWARDER_TEST_GOOD_NUMBER"),
            Some(Duration::from_millis(250))
        );
    }
}
