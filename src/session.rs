//! Reward session - orchestration layer
//!
//! Connects to the wallet, loads reward balances for the active account and
//! forwards claims. The current view is an immutable `Arc<AppView>` that is
//! replaced, never mutated. Every account change bumps a generation counter
//! and loads started under an older generation are discarded on arrival.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use alloy_primitives::Address;
use chrono::Utc;
use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::claim::{ClaimOutcome, ClaimRequest, ClaimSubmitter};
use crate::error::RewarderError;
use crate::rewards::{cards_from_balances, RewardsSnapshot};
use crate::subgraph::{RewardSummary, SubgraphClient};
use crate::wallet::WalletProvider;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConnectionState {
    NoWallet,
    Connected { account: Address },
}

impl ConnectionState {
    pub fn account(&self) -> Option<Address> {
        match self {
            ConnectionState::Connected { account } => Some(*account),
            ConnectionState::NoWallet => None,
        }
    }

    fn from_accounts(accounts: &[Address]) -> Self {
        match accounts.first() {
            Some(account) => ConnectionState::Connected { account: *account },
            None => ConnectionState::NoWallet,
        }
    }
}

/// Everything the UI renders
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AppView {
    pub connection: ConnectionState,
    pub rewards: RewardsSnapshot,
}

impl AppView {
    fn no_wallet() -> Self {
        Self {
            connection: ConnectionState::NoWallet,
            rewards: RewardsSnapshot::default(),
        }
    }
}

pub struct RewardSession {
    wallet: Arc<dyn WalletProvider>,
    subgraph: SubgraphClient,
    submitter: ClaimSubmitter,
    generation: AtomicU64,
    view: RwLock<Arc<AppView>>,
}

impl RewardSession {
    pub fn new(
        wallet: Arc<dyn WalletProvider>,
        subgraph: SubgraphClient,
        submitter: ClaimSubmitter,
    ) -> Self {
        Self {
            wallet,
            subgraph,
            submitter,
            generation: AtomicU64::new(0),
            view: RwLock::new(Arc::new(AppView::no_wallet())),
        }
    }

    /// Current view (cheap `Arc` clone)
    pub fn view(&self) -> Arc<AppView> {
        self.view
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn active_account(&self) -> Result<Address, RewarderError> {
        self.view()
            .connection
            .account()
            .ok_or(RewarderError::NoAccount)
    }

    /// Ask the wallet for accounts, adopt the first one and load its rewards.
    ///
    /// A missing wallet or an empty account list leaves the session in `NoWallet`.
    pub async fn connect(&self) -> ConnectionState {
        let accounts = match self.wallet.request_accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                log::warn!("No wallet available: {}", e);
                Vec::new()
            }
        };

        self.reset_for_accounts(&accounts);
        let connection = self.view().connection.clone();

        match &connection {
            ConnectionState::Connected { account } => {
                log::info!("Connected account {}", account);
                if let Err(e) = self.load().await {
                    log::error!("Initial reward load failed: {}", e);
                }
            }
            ConnectionState::NoWallet => log::info!("No wallet detected"),
        }

        connection
    }

    /// Load claimed, then claimable balances for the active account.
    ///
    /// A failed fetch is logged and leaves that collection as it was.
    pub async fn load(&self) -> Result<Arc<AppView>, RewarderError> {
        let generation = self.generation.load(Ordering::SeqCst);
        let account = self.active_account()?;
        log::info!("Loading rewards for {} (generation {})", account, generation);

        match self.subgraph.fetch_claimed(account).await {
            Ok(balances) => {
                let cards = cards_from_balances(&balances);
                self.apply(generation, move |rewards| rewards.claimed = Some(cards));
            }
            Err(e) => log::error!("Failed to load claimed rewards for {}: {}", account, e),
        }

        match self.subgraph.fetch_claimable(account).await {
            Ok(balances) => {
                let cards = cards_from_balances(&balances);
                self.apply(generation, move |rewards| rewards.claimable = Some(cards));
            }
            Err(e) => log::error!("Failed to load claimable rewards for {}: {}", account, e),
        }

        Ok(self.view())
    }

    /// Switch to a new account list: clear both collections, then reload
    pub async fn on_accounts_changed(&self, accounts: Vec<Address>) {
        self.reset_for_accounts(&accounts);
        log::info!("accountsChanged => {:?}", accounts.first());

        if accounts.is_empty() {
            return;
        }
        if let Err(e) = self.load().await {
            log::error!("Reward reload after account change failed: {}", e);
        }
    }

    /// Publish a cleared snapshot for `accounts` under a new generation
    pub fn reset_for_accounts(&self, accounts: &[Address]) -> u64 {
        let mut view = self
            .view
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        *view = Arc::new(AppView {
            connection: ConnectionState::from_accounts(accounts),
            rewards: RewardsSnapshot::empty(generation),
        });
        generation
    }

    /// Forward provider account-change notifications to `on_accounts_changed`
    pub fn spawn_account_listener(self: Arc<Self>) -> JoinHandle<()> {
        let mut changes = self.wallet.subscribe_account_changes();

        tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(event) => self.on_accounts_changed(event.accounts).await,
                    Err(RecvError::Lagged(skipped)) => {
                        log::warn!("Skipped {} account change notifications", skipped);
                    }
                    Err(RecvError::Closed) => {
                        log::info!("Wallet account notifications closed");
                        break;
                    }
                }
            }
        })
    }

    /// Submit a claim from the active account. Reward lists are not touched;
    /// call `load` to see the new on-chain state.
    pub async fn claim(&self, request: &ClaimRequest) -> Result<ClaimOutcome, RewarderError> {
        let account = self.active_account()?;
        let signer = self.wallet.signer(account)?;
        self.submitter.submit(signer.as_ref(), request).await
    }

    pub async fn catalog(&self) -> Result<Vec<RewardSummary>, RewarderError> {
        self.subgraph.fetch_catalog().await
    }

    /// Replace the snapshot unless the generation moved on since the load started
    fn apply<F>(&self, generation: u64, update: F) -> bool
    where
        F: FnOnce(&mut RewardsSnapshot),
    {
        let mut view = self
            .view
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if self.generation.load(Ordering::SeqCst) != generation {
            log::debug!("Dropping stale reward response (generation {})", generation);
            return false;
        }

        let mut next = (**view).clone();
        update(&mut next.rewards);
        next.rewards.loaded_at = Some(Utc::now());
        *view = Arc::new(next);
        true
    }
}
