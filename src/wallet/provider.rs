use std::sync::Arc;

use alloy_primitives::{Address, Bytes, TxHash};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::RewarderError;

/// Notification that the wallet now exposes a different set of accounts.
/// An empty list means the wallet was locked or disconnected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountsChanged {
    pub accounts: Vec<Address>,
}

/// Source of accounts and signers.
///
/// Implemented over JSON-RPC by [`super::JsonRpcWallet`]; tests swap in stubs.
pub trait WalletProvider: Send + Sync {
    /// Ask the wallet to expose its accounts (`eth_requestAccounts`)
    fn request_accounts(&self) -> BoxFuture<'_, Result<Vec<Address>, RewarderError>>;

    /// Signer that sends transactions from `account`
    fn signer(&self, account: Address) -> Result<Arc<dyn TransactionSigner>, RewarderError>;

    /// Receiver of account-change notifications
    fn subscribe_account_changes(&self) -> broadcast::Receiver<AccountsChanged>;
}

/// Sends transactions on behalf of one account and reports their receipts
pub trait TransactionSigner: Send + Sync {
    fn address(&self) -> Address;

    fn send_transaction(
        &self,
        tx: TransactionRequest,
    ) -> BoxFuture<'_, Result<TxHash, RewarderError>>;

    /// `None` while the transaction is still pending
    fn transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> BoxFuture<'_, Result<Option<TransactionReceipt>, RewarderError>>;
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
}

/// Mined transaction confirmation record
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TransactionReceipt {
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
    /// 1 for success, 0 for revert; absent on pre-Byzantium chains
    pub status: Option<u64>,
}

impl TransactionReceipt {
    /// Only an explicit status of 0 marks failure
    pub fn succeeded(&self) -> bool {
        self.status != Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt(status: Option<u64>) -> TransactionReceipt {
        TransactionReceipt {
            transaction_hash: TxHash::ZERO,
            block_number: Some(1),
            status,
        }
    }

    #[test]
    fn test_receipt_status() {
        assert!(receipt(Some(1)).succeeded());
        assert!(!receipt(Some(0)).succeeded());
        assert!(receipt(None).succeeded());
    }
}
