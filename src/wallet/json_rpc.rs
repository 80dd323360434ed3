use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, TxHash};
use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use super::provider::{
    AccountsChanged, TransactionReceipt, TransactionRequest, TransactionSigner, WalletProvider,
};
use crate::error::RewarderError;

const ACCOUNT_CHANGES_CAPACITY: usize = 16;

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
    transaction_hash: TxHash,
    block_number: Option<String>,
    status: Option<String>,
}

impl TryFrom<RpcReceipt> for TransactionReceipt {
    type Error = RewarderError;

    fn try_from(raw: RpcReceipt) -> Result<Self, Self::Error> {
        Ok(Self {
            transaction_hash: raw.transaction_hash,
            block_number: raw.block_number.as_deref().map(parse_quantity).transpose()?,
            status: raw.status.as_deref().map(parse_quantity).transpose()?,
        })
    }
}

/// Parse a JSON-RPC hex quantity such as `0x1`
fn parse_quantity(raw: &str) -> Result<u64, RewarderError> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    u64::from_str_radix(digits, 16)
        .map_err(|e| RewarderError::invalid_response(format!("bad quantity '{}': {}", raw, e)))
}

/// JSON-RPC 2.0 over HTTP
pub struct RpcTransport {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl RpcTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, RewarderError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        log::debug!("→ {} (id={})", method, id);

        let response = self
            .http
            .post(&self.url)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": id,
                "method": method,
                "params": params,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RewarderError::invalid_response(format!(
                "{} returned HTTP {}",
                method, status
            )));
        }

        let text = response.text().await?;
        let body: RpcResponse = serde_json::from_str(&text)?;
        if let Some(error) = body.error {
            return Err(RewarderError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        Ok(serde_json::from_value(body.result.unwrap_or(Value::Null))?)
    }
}

/// Wallet reachable over JSON-RPC (dev node with unlocked accounts, wallet bridge, ...)
pub struct JsonRpcWallet {
    transport: Arc<RpcTransport>,
    changes: broadcast::Sender<AccountsChanged>,
}

impl JsonRpcWallet {
    pub fn new(url: impl Into<String>) -> Self {
        let (changes, _) = broadcast::channel(ACCOUNT_CHANGES_CAPACITY);
        Self {
            transport: Arc::new(RpcTransport::new(url)),
            changes,
        }
    }

    /// Poll `eth_accounts` and broadcast a change whenever the active account differs.
    ///
    /// The first poll sets the baseline. An unreachable wallet counts as no accounts.
    pub fn watch_accounts(&self, interval: Duration) -> JoinHandle<()> {
        let transport = self.transport.clone();
        let changes = self.changes.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            let mut last: Option<Vec<Address>> = None;

            loop {
                ticker.tick().await;

                let accounts: Vec<Address> = match transport.call("eth_accounts", json!([])).await {
                    Ok(accounts) => accounts,
                    Err(RewarderError::Network(e)) if e.is_connect() => Vec::new(),
                    Err(e) => {
                        log::warn!("Account poll failed: {}", e);
                        continue;
                    }
                };

                if let Some(previous) = last.replace(accounts.clone()) {
                    if previous.first() != accounts.first() {
                        log::info!("accountsChanged => {:?}", accounts.first());
                        // No subscribers is fine
                        let _ = changes.send(AccountsChanged { accounts });
                    }
                }
            }
        })
    }
}

impl WalletProvider for JsonRpcWallet {
    fn request_accounts(&self) -> BoxFuture<'_, Result<Vec<Address>, RewarderError>> {
        Box::pin(async move {
            let accounts: Result<Vec<Address>, RewarderError> =
                self.transport.call("eth_requestAccounts", json!([])).await;
            match accounts {
                Err(RewarderError::Network(e)) if e.is_connect() => {
                    Err(RewarderError::NoWallet(e.to_string()))
                }
                other => other,
            }
        })
    }

    fn signer(&self, account: Address) -> Result<Arc<dyn TransactionSigner>, RewarderError> {
        Ok(Arc::new(JsonRpcSigner {
            transport: self.transport.clone(),
            address: account,
        }))
    }

    fn subscribe_account_changes(&self) -> broadcast::Receiver<AccountsChanged> {
        self.changes.subscribe()
    }
}

/// Signs through the wallet's `eth_sendTransaction`; keys never leave the wallet
pub struct JsonRpcSigner {
    transport: Arc<RpcTransport>,
    address: Address,
}

impl TransactionSigner for JsonRpcSigner {
    fn address(&self) -> Address {
        self.address
    }

    fn send_transaction(
        &self,
        tx: TransactionRequest,
    ) -> BoxFuture<'_, Result<TxHash, RewarderError>> {
        Box::pin(async move {
            let tx_hash: TxHash = self.transport.call("eth_sendTransaction", json!([tx])).await?;
            Ok(tx_hash)
        })
    }

    fn transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> BoxFuture<'_, Result<Option<TransactionReceipt>, RewarderError>> {
        Box::pin(async move {
            let raw: Option<RpcReceipt> = self
                .transport
                .call("eth_getTransactionReceipt", json!([tx_hash]))
                .await?;
            raw.map(TransactionReceipt::try_from).transpose()
        })
    }
}
