/// Axum HTTP handlers for the subgraph, wallet and helper endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::state::{ClaimBehavior, MockState, SentTransaction};
use crate::types::*;

/// Shared application state
pub type AppState = Arc<MockState>;

/// Custom error type for handlers
pub enum ApiError {
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        (status, message).into_response()
    }
}

/// POST /subgraph
/// Answers the two query shapes the rewarder sends: `accountBalances` and `rewards`
pub async fn subgraph_query(
    State(state): State<AppState>,
    Json(req): Json<GraphQlRequest>,
) -> Json<Value> {
    if req.query.contains("accountBalances") {
        let amount_field = if req.query.contains("amountClaimable_gt") {
            "amountClaimable"
        } else if req.query.contains("amountOwned_gt") {
            "amountOwned"
        } else {
            return graphql_error("accountBalances needs an amount filter");
        };

        let account = req
            .variables
            .get("account")
            .and_then(Value::as_str)
            .unwrap_or_default();

        let balances = state.account_balances(account, amount_field);
        log::info!(
            "accountBalances({}, {}) -> {} records",
            account,
            amount_field,
            balances.len()
        );
        return Json(json!({ "data": { "accountBalances": balances } }));
    }

    if req.query.contains("rewards") {
        return Json(json!({ "data": { "rewards": state.rewards() } }));
    }

    graphql_error("Unsupported query")
}

fn graphql_error(message: &str) -> Json<Value> {
    Json(json!({ "errors": [{ "message": message }] }))
}

/// POST /rpc
/// Minimal EIP-1193 wallet node
pub async fn wallet_rpc(
    State(state): State<AppState>,
    Json(req): Json<RpcRequest>,
) -> Json<Value> {
    log::debug!("RPC {}", req.method);

    let result = match req.method.as_str() {
        "eth_requestAccounts" | "eth_accounts" => Ok(json!(state.accounts())),
        "eth_chainId" => Ok(json!("0x7a69")),
        "eth_sendTransaction" => send_transaction(&state, &req.params),
        "eth_getTransactionReceipt" => match req.params.first().and_then(Value::as_str) {
            Some(hash) => Ok(state.receipt(hash).unwrap_or(Value::Null)),
            None => Err((-32602, "missing transaction hash".to_string())),
        },
        other => Err((-32601, format!("Method {} not found", other))),
    };

    Json(match result {
        Ok(result) => json!({ "jsonrpc": "2.0", "id": req.id, "result": result }),
        Err((code, message)) => json!({
            "jsonrpc": "2.0",
            "id": req.id,
            "error": { "code": code, "message": message },
        }),
    })
}

fn send_transaction(state: &MockState, params: &[Value]) -> Result<Value, (i64, String)> {
    if state.behavior().reject {
        return Err((4001, "User rejected the request.".to_string()));
    }

    let tx = params
        .first()
        .ok_or((-32602, "missing transaction".to_string()))?;
    let field = |name: &str| {
        tx.get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let sent = state.send_transaction(field("from"), field("to"), field("data"));
    Ok(json!(sent.hash))
}

// ============================================================================
// MOCK CONTROL ENDPOINTS (tests and local development)
// ============================================================================

/// POST /mock/accounts
/// Switch the accounts the wallet exposes (simulates an account change)
pub async fn set_accounts(
    State(state): State<AppState>,
    Json(req): Json<SetAccountsRequest>,
) -> Result<StatusCode, ApiError> {
    if req.accounts.iter().any(|a| !a.starts_with("0x")) {
        return Err(ApiError::BadRequest("accounts must be 0x-prefixed".to_string()));
    }
    state.set_accounts(req.accounts);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /mock/claim-behavior
pub async fn set_claim_behavior(
    State(state): State<AppState>,
    Json(behavior): Json<ClaimBehavior>,
) -> StatusCode {
    state.set_behavior(behavior);
    StatusCode::NO_CONTENT
}

/// GET /mock/transactions
pub async fn list_transactions(State(state): State<AppState>) -> Json<Vec<SentTransaction>> {
    Json(state.transactions())
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}
