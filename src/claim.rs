//! Claim submission
//!
//! Sends `claim(tokenId, amount)` to the reward token contract through the
//! wallet signer and waits for the receipt. Every click is one attempt;
//! nothing is retried and local reward lists are left untouched.

use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::{Address, TxHash, U256};
use serde::{Deserialize, Serialize};

use crate::abi::encode_claim_call;
use crate::error::RewarderError;
use crate::wallet::{TransactionReceipt, TransactionRequest, TransactionSigner};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimRequest {
    pub token_address: Address,
    pub token_id: U256,
    pub amount: U256,
}

impl ClaimRequest {
    /// Build from the string form used by cards and forms (decimal or `0x` hex numbers)
    pub fn parse(token_address: &str, token_id: &str, amount: &str) -> Result<Self, RewarderError> {
        let token_address = Address::from_str(token_address.trim()).map_err(|e| {
            RewarderError::InvalidInput(format!("Invalid token address '{}': {}", token_address, e))
        })?;
        let token_id = U256::from_str(token_id.trim()).map_err(|e| {
            RewarderError::InvalidInput(format!("Invalid token id '{}': {}", token_id, e))
        })?;
        let amount = U256::from_str(amount.trim()).map_err(|e| {
            RewarderError::InvalidInput(format!("Invalid amount '{}': {}", amount, e))
        })?;

        if amount.is_zero() {
            return Err(RewarderError::InvalidInput(
                "Claim amount must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            token_address,
            token_id,
            amount,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClaimOutcome {
    /// Receipt status 1
    Confirmed {
        tx_hash: TxHash,
        block_number: Option<u64>,
    },
    /// Receipt status 0
    Reverted {
        tx_hash: TxHash,
        block_number: Option<u64>,
    },
    /// The wallet declined to sign (EIP-1193 code 4001)
    RejectedByUser,
}

impl ClaimOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, ClaimOutcome::Confirmed { .. })
    }
}

#[derive(Clone, Debug)]
pub struct ClaimSubmitter {
    receipt_poll_interval: Duration,
    receipt_max_attempts: Option<u32>,
}

impl ClaimSubmitter {
    pub fn new(receipt_poll_interval: Duration, receipt_max_attempts: Option<u32>) -> Self {
        Self {
            receipt_poll_interval,
            receipt_max_attempts,
        }
    }

    pub async fn submit(
        &self,
        signer: &dyn TransactionSigner,
        request: &ClaimRequest,
    ) -> Result<ClaimOutcome, RewarderError> {
        log::info!(
            "Claiming {} of token {} on {} for {}",
            request.amount,
            request.token_id,
            request.token_address,
            signer.address()
        );

        let tx = TransactionRequest {
            from: signer.address(),
            to: request.token_address,
            data: encode_claim_call(request.token_id, request.amount),
        };

        let tx_hash = match signer.send_transaction(tx).await {
            Ok(tx_hash) => tx_hash,
            Err(e) if e.is_user_rejection() => {
                log::info!("Claim rejected in wallet");
                return Ok(ClaimOutcome::RejectedByUser);
            }
            Err(e) => {
                log::error!("Failed to send claim transaction: {}", e);
                return Err(e);
            }
        };
        log::info!("Claim transaction sent: {}", tx_hash);

        let receipt = self.wait_for_receipt(signer, tx_hash).await?;

        if receipt.succeeded() {
            log::info!(
                "✅ Claim succeeded: {} (block {:?})",
                tx_hash,
                receipt.block_number
            );
            Ok(ClaimOutcome::Confirmed {
                tx_hash,
                block_number: receipt.block_number,
            })
        } else {
            log::error!(
                "❌ Claim transaction failed: {} (block {:?})",
                tx_hash,
                receipt.block_number
            );
            Ok(ClaimOutcome::Reverted {
                tx_hash,
                block_number: receipt.block_number,
            })
        }
    }

    /// Poll until the transaction is included in a block
    async fn wait_for_receipt(
        &self,
        signer: &dyn TransactionSigner,
        tx_hash: TxHash,
    ) -> Result<TransactionReceipt, RewarderError> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            if let Some(receipt) = signer.transaction_receipt(tx_hash).await? {
                return Ok(receipt);
            }
            log::debug!("Receipt for {} not available yet (attempt {})", tx_hash, attempt);

            if let Some(max_attempts) = self.receipt_max_attempts {
                if attempt >= max_attempts {
                    return Err(RewarderError::ReceiptTimeout {
                        tx_hash,
                        attempts: attempt,
                    });
                }
            }

            tokio::time::sleep(self.receipt_poll_interval).await;
        }
    }
}
