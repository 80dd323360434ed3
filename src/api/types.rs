use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::claim::ClaimRequest;
use crate::error::RewarderError;
use crate::subgraph::RewardSummary;

/// Claim parameters as posted by the page form or a JSON client
#[derive(Debug, Deserialize, Serialize)]
pub struct ClaimForm {
    pub token_address: String,
    pub token_id: String,
    pub amount: String,
}

impl TryFrom<ClaimForm> for ClaimRequest {
    type Error = RewarderError;

    fn try_from(form: ClaimForm) -> Result<Self, Self::Error> {
        ClaimRequest::parse(&form.token_address, &form.token_id, &form.amount)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccountResponse {
    pub account: Option<Address>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub rewards: Vec<RewardSummary>,
}
