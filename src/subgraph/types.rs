// Subgraph request/response types

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::ipfs::ipfs_to_http_url;

/// Which side of an account balance a query selects
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceKind {
    /// Already transferred to the wallet (`amountOwned > 0`)
    Claimed,
    /// Allocated but not yet transferred (`amountClaimable > 0`)
    Claimable,
}

impl BalanceKind {
    pub fn amount_field(&self) -> &'static str {
        match self {
            BalanceKind::Claimed => "amountOwned",
            BalanceKind::Claimable => "amountClaimable",
        }
    }

    pub fn filter(&self) -> String {
        format!("{}_gt", self.amount_field())
    }
}

#[derive(Debug, Serialize)]
pub struct GraphQlRequest {
    pub query: String,
    pub variables: Value,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalancesData {
    pub account_balances: Vec<AccountBalanceRecord>,
}

#[derive(Debug, Deserialize)]
pub struct AccountBalanceRecord {
    pub id: String,
    #[serde(alias = "amountOwned", alias = "amountClaimable", deserialize_with = "big_int")]
    pub amount: String,
    pub reward: RewardRecord,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: String,
    #[serde(deserialize_with = "big_int")]
    pub supply: String,
    pub token_address: String,
    #[serde(deserialize_with = "big_int")]
    pub token_id: String,
}

#[derive(Debug, Deserialize)]
pub struct RewardsData {
    pub rewards: Vec<RewardCatalogRecord>,
}

#[derive(Debug, Deserialize)]
pub struct RewardCatalogRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
}

/// One reward balance of the connected account, as indexed by the subgraph
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RewardBalance {
    pub id: String,
    pub kind: BalanceKind,
    pub reward_id: String,
    pub reward_name: String,
    pub reward_description: String,
    /// Gateway URL, already rewritten from `ipfs://`
    pub reward_image: String,
    pub reward_supply: String,
    pub reward_token_address: String,
    pub reward_token_id: String,
    /// `amountOwned` for claimed balances, `amountClaimable` otherwise
    pub amount: String,
}

impl RewardBalance {
    pub fn from_record(record: AccountBalanceRecord, kind: BalanceKind, gateway: &str) -> Self {
        let reward = record.reward;
        Self {
            id: record.id,
            kind,
            reward_id: reward.id,
            reward_name: reward.name,
            reward_description: reward.description.unwrap_or_default(),
            reward_image: ipfs_to_http_url(&reward.image, gateway),
            reward_supply: reward.supply,
            reward_token_address: reward.token_address,
            reward_token_id: reward.token_id,
            amount: record.amount,
        }
    }
}

/// Entry of the reward catalog (every reward the indexer knows about)
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RewardSummary {
    pub id: String,
    pub name: String,
    pub image: String,
}

impl RewardSummary {
    pub fn from_record(record: RewardCatalogRecord, gateway: &str) -> Self {
        Self {
            id: record.id,
            name: record.name,
            image: ipfs_to_http_url(&record.image, gateway),
        }
    }
}

/// Subgraph `BigInt` values arrive as strings, some deployments emit plain numbers
fn big_int<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected BigInt string, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_accepts_either_amount_field() {
        let owned: AccountBalanceRecord = serde_json::from_value(json!({
            "id": "0xabc-1",
            "amountOwned": "3",
            "reward": {
                "id": "1", "name": "OG", "description": "First", "image": "ipfs://cid",
                "supply": "100", "tokenAddress": "0xtoken", "tokenId": 7
            }
        }))
        .unwrap();
        assert_eq!(owned.amount, "3");
        assert_eq!(owned.reward.token_id, "7");

        let claimable: AccountBalanceRecord = serde_json::from_value(json!({
            "id": "0xabc-2",
            "amountClaimable": 5,
            "reward": {
                "id": "2", "name": "Early", "description": null, "image": "ipfs://cid2",
                "supply": "10", "tokenAddress": "0xtoken", "tokenId": "8"
            }
        }))
        .unwrap();
        assert_eq!(claimable.amount, "5");

        let balance = RewardBalance::from_record(claimable, BalanceKind::Claimable, "https://ipfs.io/ipfs/");
        assert_eq!(balance.reward_description, "");
        assert_eq!(balance.reward_image, "https://ipfs.io/ipfs/cid2");
    }

    #[test]
    fn test_filters() {
        assert_eq!(BalanceKind::Claimed.filter(), "amountOwned_gt");
        assert_eq!(BalanceKind::Claimable.filter(), "amountClaimable_gt");
    }
}
