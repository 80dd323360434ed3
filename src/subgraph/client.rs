use alloy_primitives::Address;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::types::{
    AccountBalancesData, BalanceKind, GraphQlRequest, GraphQlResponse, RewardBalance,
    RewardSummary, RewardsData,
};
use crate::error::RewarderError;

const CATALOG_QUERY: &str = r#"
{
  rewards {
    id
    name
    image
  }
}"#;

/// GraphQL client for the nft-rewarder subgraph
///
/// Every call is a single POST with no retry. Errors are returned to the
/// caller, which decides whether to keep stale data.
#[derive(Clone)]
pub struct SubgraphClient {
    http: reqwest::Client,
    endpoint: String,
    ipfs_gateway: String,
}

impl SubgraphClient {
    pub fn new(endpoint: impl Into<String>, ipfs_gateway: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            ipfs_gateway: ipfs_gateway.into(),
        }
    }

    /// Rewards already transferred to `account`
    pub async fn fetch_claimed(&self, account: Address) -> Result<Vec<RewardBalance>, RewarderError> {
        self.fetch_balances(account, BalanceKind::Claimed).await
    }

    /// Rewards allocated to `account` but not yet claimed
    pub async fn fetch_claimable(
        &self,
        account: Address,
    ) -> Result<Vec<RewardBalance>, RewarderError> {
        self.fetch_balances(account, BalanceKind::Claimable).await
    }

    pub async fn fetch_balances(
        &self,
        account: Address,
        kind: BalanceKind,
    ) -> Result<Vec<RewardBalance>, RewarderError> {
        // Subgraph entity ids are lowercase hex
        let account_id = account.to_string().to_lowercase();
        let data: AccountBalancesData = self
            .query(account_balances_query(kind), json!({ "account": account_id }))
            .await?;

        log::debug!(
            "Subgraph returned {} {:?} balances for {}",
            data.account_balances.len(),
            kind,
            account_id
        );

        Ok(data
            .account_balances
            .into_iter()
            .map(|record| RewardBalance::from_record(record, kind, &self.ipfs_gateway))
            .collect())
    }

    /// Every reward known to the indexer
    pub async fn fetch_catalog(&self) -> Result<Vec<RewardSummary>, RewarderError> {
        let data: RewardsData = self.query(CATALOG_QUERY.to_string(), Value::Null).await?;
        Ok(data
            .rewards
            .into_iter()
            .map(|record| RewardSummary::from_record(record, &self.ipfs_gateway))
            .collect())
    }

    async fn query<T: DeserializeOwned>(
        &self,
        query: String,
        variables: Value,
    ) -> Result<T, RewarderError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RewarderError::Subgraph(format!("HTTP {}: {}", status, body)));
        }

        let text = response.text().await?;
        let body: GraphQlResponse<T> = serde_json::from_str(&text)?;
        if !body.errors.is_empty() {
            let messages: Vec<String> = body.errors.into_iter().map(|e| e.message).collect();
            return Err(RewarderError::Subgraph(messages.join("; ")));
        }

        body.data
            .ok_or_else(|| RewarderError::invalid_response("subgraph response has no data"))
    }
}

fn account_balances_query(kind: BalanceKind) -> String {
    format!(
        r#"
query AccountBalances($account: String!) {{
  accountBalances(where: {{ account: $account, {filter}: 0 }}) {{
    id
    {amount}
    reward {{
      id
      name
      description
      image
      supply
      tokenAddress
      tokenId
    }}
  }}
}}"#,
        filter = kind.filter(),
        amount = kind.amount_field(),
    )
}
