//! Error types for reward loading and claiming
//!
//! Covers wallet JSON-RPC failures, subgraph query problems and
//! transaction receipt handling.

use alloy_primitives::TxHash;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// EIP-1193 code returned when the user declines a wallet request
pub const ERROR_CODE_REJECTED_BY_USER: i64 = 4001;

#[derive(Error, Debug)]
pub enum RewarderError {
    #[error("No wallet detected: {0}")]
    NoWallet(String),

    #[error("No account connected")]
    NoAccount,

    #[error("Wallet RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Subgraph error: {0}")]
    Subgraph(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Receipt for {tx_hash} not available after {attempts} attempts")]
    ReceiptTimeout { tx_hash: TxHash, attempts: u32 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RewarderError {
    /// Create an invalid response error
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// True when the wallet reported that the user declined the request
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, Self::Rpc { code, .. } if *code == ERROR_CODE_REJECTED_BY_USER)
    }
}

impl IntoResponse for RewarderError {
    fn into_response(self) -> Response {
        let status = match &self {
            RewarderError::NoWallet(_) => StatusCode::SERVICE_UNAVAILABLE,
            RewarderError::NoAccount => StatusCode::CONFLICT,
            RewarderError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            RewarderError::Rpc { .. } | RewarderError::Subgraph(_) => StatusCode::BAD_GATEWAY,
            RewarderError::Network(_) => StatusCode::SERVICE_UNAVAILABLE,
            RewarderError::ReceiptTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
