//! NFT Rewarder: view and claim NFT rewards indexed by a subgraph
//!
//! This crate loads the reward balances of a wallet account from the
//! nft-rewarder subgraph, renders them as claimed and claimable cards, and
//! submits `claim(tokenId, amount)` transactions through the wallet's signer.
//!
//! # Architecture
//!
//! - **Wallet Connector**: exposes accounts and signers, reports account changes
//! - **Subgraph Client**: one-shot GraphQL queries for claimed and claimable balances
//! - **Reward Renderer**: maps balances to card view models and HTML
//! - **Claim Submitter**: sends the claim call and inspects the receipt status
//!
//! # Example
//!
//! ```ignore
//! use nft_rewarder::{ClaimSubmitter, JsonRpcWallet, RewardSession, SubgraphClient};
//!
//! let wallet = Arc::new(JsonRpcWallet::new("http://localhost:8545"));
//! let subgraph = SubgraphClient::new(DEFAULT_SUBGRAPH_URL, DEFAULT_IPFS_GATEWAY);
//! let session = RewardSession::new(wallet, subgraph, ClaimSubmitter::new(interval, None));
//!
//! session.connect().await;
//! let view = session.view();
//! ```

pub mod abi;
pub mod api;
pub mod claim;
pub mod config;
pub mod error;
pub mod ipfs;
pub mod render;
pub mod rewards;
pub mod session;
pub mod subgraph;
pub mod wallet;

pub use claim::{ClaimOutcome, ClaimRequest, ClaimSubmitter};
pub use config::{RewarderConfig, DEFAULT_IPFS_GATEWAY, DEFAULT_SUBGRAPH_URL};
pub use error::RewarderError;
pub use ipfs::ipfs_to_http_url;
pub use rewards::{cards_from_balances, RewardCard, RewardsSnapshot};
pub use session::{AppView, ConnectionState, RewardSession};
pub use subgraph::{BalanceKind, RewardBalance, RewardSummary, SubgraphClient};
pub use wallet::{JsonRpcWallet, TransactionSigner, WalletProvider};

// Common result type
pub type Result<T> = std::result::Result<T, RewarderError>;
