//! Reward card view models
//!
//! A snapshot is rebuilt wholesale on every load and never patched in place.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::subgraph::RewardBalance;

/// What one reward card shows
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RewardCard {
    pub id: String,
    pub image_url: String,
    pub name: String,
    pub description: String,
    pub amount: String,
    pub supply: String,
    pub token_address: String,
    pub token_id: String,
}

impl From<&RewardBalance> for RewardCard {
    fn from(balance: &RewardBalance) -> Self {
        Self {
            id: balance.id.clone(),
            image_url: balance.reward_image.clone(),
            name: balance.reward_name.clone(),
            description: balance.reward_description.clone(),
            amount: balance.amount.clone(),
            supply: balance.reward_supply.clone(),
            token_address: balance.reward_token_address.clone(),
            token_id: balance.reward_token_id.clone(),
        }
    }
}

pub fn cards_from_balances(balances: &[RewardBalance]) -> Vec<RewardCard> {
    balances.iter().map(RewardCard::from).collect()
}

/// Reward collections of the active account.
///
/// `None` means the collection was never loaded (or was cleared by an
/// account change); an empty `Vec` means the subgraph returned nothing.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RewardsSnapshot {
    pub generation: u64,
    pub claimed: Option<Vec<RewardCard>>,
    pub claimable: Option<Vec<RewardCard>>,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl RewardsSnapshot {
    pub fn empty(generation: u64) -> Self {
        Self {
            generation,
            ..Default::default()
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.claimed.is_none() && self.claimable.is_none()
    }
}
