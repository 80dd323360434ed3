/// Fixture and wire types
///
/// Fixtures use the subgraph's camelCase field names so a fixture file reads
/// like a subgraph export.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything the mock serves
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixtures {
    /// Accounts exposed by the wallet node, first one is active
    #[serde(default)]
    pub accounts: Vec<String>,
    #[serde(default)]
    pub rewards: Vec<RewardFixture>,
    #[serde(default)]
    pub balances: Vec<BalanceFixture>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardFixture {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub supply: String,
    pub token_address: String,
    pub token_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceFixture {
    pub account: String,
    pub reward_id: String,
    #[serde(default = "zero")]
    pub amount_owned: String,
    #[serde(default = "zero")]
    pub amount_claimable: String,
}

fn zero() -> String {
    "0".to_string()
}

/// GraphQL POST body
#[derive(Debug, Deserialize)]
pub struct GraphQlRequest {
    pub query: String,
    #[serde(default)]
    pub variables: Value,
}

/// JSON-RPC 2.0 request
#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct SetAccountsRequest {
    pub accounts: Vec<String>,
}
