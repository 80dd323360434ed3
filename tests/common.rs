//! Common test utilities for rewarder integration tests
//!
//! This module provides shared test infrastructure including:
//! - Logging setup
//! - A mock subgraph + wallet node on an ephemeral port
//! - Sample fixtures and session construction

#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::Address;
use nft_rewarder::{ClaimSubmitter, JsonRpcWallet, RewardSession, SubgraphClient};
use rewarder_mock::{create_router, BalanceFixture, Fixtures, MockState, RewardFixture};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub const ACCOUNT_A: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
pub const ACCOUNT_B: &str = "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC";
pub const TOKEN: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
pub const GATEWAY: &str = "https://ipfs.io/ipfs/";

pub fn init_logging() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}

pub fn address(raw: &str) -> Address {
    Address::from_str(raw).expect("valid test address")
}

/// Mock server with automatic shutdown
pub struct MockServer {
    pub state: Arc<MockState>,
    pub base_url: String,
    handle: JoinHandle<()>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockServer {
    pub async fn start(fixtures: Fixtures) -> anyhow::Result<Self> {
        let state = Arc::new(MockState::new(fixtures));
        let app = create_router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        log::info!("📡 Mock listening on {}", addr);

        let (shutdown, stopped) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let serve = axum::serve(listener, app).with_graceful_shutdown(async {
                stopped.await.ok();
            });
            if let Err(e) = serve.await {
                log::error!("Mock server stopped: {}", e);
            }
        });

        Ok(Self {
            state,
            base_url: format!("http://{}", addr),
            handle,
            shutdown: Some(shutdown),
        })
    }

    /// Close the listener and every open connection, leaving the port unreachable
    pub async fn shutdown(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            shutdown.send(()).ok();
        }
        if tokio::time::timeout(Duration::from_secs(5), &mut self.handle)
            .await
            .is_err()
        {
            log::warn!("Mock server did not stop in time");
            self.handle.abort();
        }
    }

    pub fn subgraph_url(&self) -> String {
        format!("{}/subgraph", self.base_url)
    }

    pub fn rpc_url(&self) -> String {
        format!("{}/rpc", self.base_url)
    }

    pub fn subgraph(&self) -> SubgraphClient {
        SubgraphClient::new(self.subgraph_url(), GATEWAY)
    }

    /// Wallet + session wired to this mock
    pub fn session(&self) -> (Arc<JsonRpcWallet>, Arc<RewardSession>) {
        let wallet = Arc::new(JsonRpcWallet::new(self.rpc_url()));
        let session = Arc::new(RewardSession::new(
            wallet.clone(),
            self.subgraph(),
            ClaimSubmitter::new(Duration::from_millis(20), Some(50)),
        ));
        (wallet, session)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn reward(id: &str, name: &str) -> RewardFixture {
    RewardFixture {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{} reward", name),
        image: format!("ipfs://Qm{}", name),
        supply: "1000".to_string(),
        token_address: TOKEN.to_lowercase(),
        token_id: id.to_string(),
    }
}

pub fn balance(account: &str, reward_id: &str, owned: &str, claimable: &str) -> BalanceFixture {
    BalanceFixture {
        account: account.to_lowercase(),
        reward_id: reward_id.to_string(),
        amount_owned: owned.to_string(),
        amount_claimable: claimable.to_string(),
    }
}

/// Account A owns rewards 1 and 2 and can claim 3; account B can claim 4
pub fn sample_fixtures() -> Fixtures {
    Fixtures {
        accounts: vec![ACCOUNT_A.to_string(), ACCOUNT_B.to_string()],
        rewards: vec![
            reward("1", "Pioneer"),
            reward("2", "Builder"),
            reward("3", "Explorer"),
            reward("4", "Voyager"),
        ],
        balances: vec![
            balance(ACCOUNT_A, "1", "1", "0"),
            balance(ACCOUNT_A, "2", "4", "0"),
            balance(ACCOUNT_A, "3", "0", "2"),
            balance(ACCOUNT_B, "4", "0", "7"),
        ],
    }
}

/// Poll `check` until it holds or the timeout elapses
pub async fn wait_until<F: Fn() -> bool>(timeout: Duration, check: F) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    check()
}
