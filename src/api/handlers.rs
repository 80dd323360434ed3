use axum::{
    extract::State,
    response::{Html, Redirect},
    Form, Json,
};
use std::sync::Arc;

use super::types::{AccountResponse, CatalogResponse, ClaimForm};
use crate::{
    claim::{ClaimOutcome, ClaimRequest},
    error::RewarderError,
    render::render_page,
    session::{AppView, RewardSession},
};

pub async fn index_handler(State(session): State<Arc<RewardSession>>) -> Html<String> {
    Html(render_page(&session.view()))
}

pub async fn get_account_handler(
    State(session): State<Arc<RewardSession>>,
) -> Json<AccountResponse> {
    Json(AccountResponse {
        account: session.view().connection.account(),
    })
}

pub async fn get_rewards_handler(State(session): State<Arc<RewardSession>>) -> Json<AppView> {
    Json(session.view().as_ref().clone())
}

pub async fn reload_rewards_handler(
    State(session): State<Arc<RewardSession>>,
) -> Result<Json<AppView>, RewarderError> {
    let view = session.load().await?;
    Ok(Json(view.as_ref().clone()))
}

pub async fn claim_handler(
    State(session): State<Arc<RewardSession>>,
    Json(form): Json<ClaimForm>,
) -> Result<Json<ClaimOutcome>, RewarderError> {
    let request = ClaimRequest::try_from(form)?;
    let outcome = session.claim(&request).await?;
    Ok(Json(outcome))
}

/// Form variant used by the rendered page; the outcome is only logged
pub async fn claim_form_handler(
    State(session): State<Arc<RewardSession>>,
    Form(form): Form<ClaimForm>,
) -> Result<Redirect, RewarderError> {
    let request = ClaimRequest::try_from(form)?;
    if let Err(e) = session.claim(&request).await {
        log::error!("Claim failed: {}", e);
    }
    Ok(Redirect::to("/"))
}

pub async fn catalog_handler(
    State(session): State<Arc<RewardSession>>,
) -> Result<Json<CatalogResponse>, RewarderError> {
    let rewards = session.catalog().await?;
    Ok(Json(CatalogResponse { rewards }))
}

pub async fn health_check() -> &'static str {
    "OK"
}
