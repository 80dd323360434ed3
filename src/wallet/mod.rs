//! Wallet connector
//!
//! - Provider abstraction (accounts, signer, account-change notifications)
//! - JSON-RPC implementation speaking EIP-1193 methods over HTTP

mod json_rpc;
mod provider;

pub use json_rpc::{JsonRpcSigner, JsonRpcWallet, RpcTransport};
pub use provider::{
    AccountsChanged, TransactionReceipt, TransactionRequest, TransactionSigner, WalletProvider,
};
