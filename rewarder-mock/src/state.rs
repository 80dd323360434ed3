/// In-memory backend shared by the subgraph and wallet endpoints

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::types::{BalanceFixture, Fixtures, RewardFixture};

/// How the wallet node reacts to `eth_sendTransaction`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimBehavior {
    /// Status written into receipts (1 = success, 0 = revert)
    pub receipt_status: u64,
    /// Answer with EIP-1193 error 4001 instead of a hash
    pub reject: bool,
    /// Number of receipt lookups answered with `null` before the receipt appears
    pub pending_polls: u32,
}

impl Default for ClaimBehavior {
    fn default() -> Self {
        Self {
            receipt_status: 1,
            reject: false,
            pending_polls: 0,
        }
    }
}

/// A transaction accepted by the mock wallet node
#[derive(Debug, Clone, Serialize)]
pub struct SentTransaction {
    pub hash: String,
    pub from: String,
    pub to: String,
    pub data: String,
    pub status: u64,
    pub block_number: u64,
    #[serde(skip)]
    pending_polls: u32,
}

pub struct MockState {
    fixtures: RwLock<Fixtures>,
    behavior: RwLock<ClaimBehavior>,
    transactions: RwLock<Vec<SentTransaction>>,
    next_block: AtomicU64,
}

impl MockState {
    pub fn new(fixtures: Fixtures) -> Self {
        log::info!(
            "Mock loaded {} accounts, {} rewards, {} balances",
            fixtures.accounts.len(),
            fixtures.rewards.len(),
            fixtures.balances.len()
        );
        Self {
            fixtures: RwLock::new(fixtures),
            behavior: RwLock::new(ClaimBehavior::default()),
            transactions: RwLock::new(Vec::new()),
            next_block: AtomicU64::new(1),
        }
    }

    pub fn accounts(&self) -> Vec<String> {
        self.read_fixtures().accounts.clone()
    }

    pub fn set_accounts(&self, accounts: Vec<String>) {
        log::info!("Wallet accounts switched to {:?}", accounts);
        self.fixtures
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .accounts = accounts;
    }

    pub fn behavior(&self) -> ClaimBehavior {
        self.behavior
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn set_behavior(&self, behavior: ClaimBehavior) {
        log::info!("Claim behavior set to {:?}", behavior);
        *self
            .behavior
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = behavior;
    }

    pub fn transactions(&self) -> Vec<SentTransaction> {
        self.transactions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// `accountBalances` records for `account` whose `amount_field` is positive
    pub fn account_balances(&self, account: &str, amount_field: &str) -> Vec<Value> {
        let fixtures = self.read_fixtures();
        let rewards: HashMap<&str, &RewardFixture> =
            fixtures.rewards.iter().map(|r| (r.id.as_str(), r)).collect();

        fixtures
            .balances
            .iter()
            .filter(|b| b.account.eq_ignore_ascii_case(account))
            .filter_map(|balance| {
                let amount = match amount_field {
                    "amountOwned" => &balance.amount_owned,
                    _ => &balance.amount_claimable,
                };
                if !is_positive(amount) {
                    return None;
                }
                let reward = rewards.get(balance.reward_id.as_str())?;
                Some(balance_record(balance, reward, amount_field, amount))
            })
            .collect()
    }

    pub fn rewards(&self) -> Vec<Value> {
        self.read_fixtures()
            .rewards
            .iter()
            .map(|r| json!({ "id": r.id, "name": r.name, "image": r.image }))
            .collect()
    }

    /// Record a transaction and mine it into its own block
    pub fn send_transaction(&self, from: String, to: String, data: String) -> SentTransaction {
        let behavior = self.behavior();
        let block_number = self.next_block.fetch_add(1, Ordering::SeqCst);
        let tx = SentTransaction {
            hash: format!("0x{:064x}", block_number),
            from,
            to,
            data,
            status: behavior.receipt_status,
            block_number,
            pending_polls: behavior.pending_polls,
        };
        log::info!("Accepted transaction {} (status {})", tx.hash, tx.status);

        self.transactions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(tx.clone());
        tx
    }

    /// Receipt JSON, or `None` while the transaction is still pending
    pub fn receipt(&self, hash: &str) -> Option<Value> {
        let mut transactions = self
            .transactions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let tx = transactions
            .iter_mut()
            .find(|tx| tx.hash.eq_ignore_ascii_case(hash))?;

        if tx.pending_polls > 0 {
            tx.pending_polls -= 1;
            return None;
        }

        Some(json!({
            "transactionHash": tx.hash,
            "blockNumber": format!("0x{:x}", tx.block_number),
            "from": tx.from,
            "to": tx.to,
            "status": format!("0x{:x}", tx.status),
        }))
    }

    fn read_fixtures(&self) -> std::sync::RwLockReadGuard<'_, Fixtures> {
        self.fixtures
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn is_positive(amount: &str) -> bool {
    amount.trim().parse::<u128>().map(|v| v > 0).unwrap_or(false)
}

fn balance_record(
    balance: &BalanceFixture,
    reward: &RewardFixture,
    amount_field: &str,
    amount: &str,
) -> Value {
    let mut record = json!({
        "id": format!("{}-{}", balance.account.to_lowercase(), reward.id),
        "reward": {
            "id": reward.id,
            "name": reward.name,
            "description": reward.description,
            "image": reward.image,
            "supply": reward.supply,
            "tokenAddress": reward.token_address,
            "tokenId": reward.token_id,
        }
    });
    record[amount_field] = Value::String(amount.to_string());
    record
}
