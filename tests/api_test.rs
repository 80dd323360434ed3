mod common;

use std::sync::Arc;

use common::*;
use nft_rewarder::{api::server::create_router, api::types::AccountResponse, RewardSession};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

async fn serve(session: Arc<RewardSession>) -> anyhow::Result<(String, JoinHandle<()>)> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = create_router(session);
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    Ok((format!("http://{}", addr), handle))
}

#[tokio::test]
async fn test_page_and_json_views() -> anyhow::Result<()> {
    init_logging();
    let mock = MockServer::start(sample_fixtures()).await?;
    let (_wallet, session) = mock.session();
    session.connect().await;
    let (base_url, server) = serve(session).await?;
    let client = reqwest::Client::new();

    let health = client.get(format!("{}/health", base_url)).send().await?;
    assert_eq!(health.text().await?, "OK");

    let account: AccountResponse = client
        .get(format!("{}/api/account", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(account.account, Some(address(ACCOUNT_A)));

    let rewards: Value = client
        .get(format!("{}/api/rewards", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(rewards["connection"]["state"], "connected");
    assert_eq!(rewards["rewards"]["claimed"].as_array().map(Vec::len), Some(2));
    assert_eq!(
        rewards["rewards"]["claimable"][0]["image_url"],
        "https://ipfs.io/ipfs/QmExplorer"
    );

    let page = client.get(&base_url).send().await?.text().await?;
    assert!(page.contains("You can claim: 2"));
    assert!(page.contains("Pioneer"));

    let catalog: Value = client
        .get(format!("{}/api/catalog", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(catalog["rewards"].as_array().map(Vec::len), Some(4));

    server.abort();
    Ok(())
}

#[tokio::test]
async fn test_claim_endpoints() -> anyhow::Result<()> {
    init_logging();
    let mock = MockServer::start(sample_fixtures()).await?;
    let (_wallet, session) = mock.session();
    session.connect().await;
    let (base_url, server) = serve(session).await?;
    let client = reqwest::Client::new();

    let outcome: Value = client
        .post(format!("{}/api/claim", base_url))
        .json(&json!({ "token_address": TOKEN, "token_id": "3", "amount": "2" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(outcome["outcome"], "confirmed");

    let invalid = client
        .post(format!("{}/api/claim", base_url))
        .json(&json!({ "token_address": TOKEN, "token_id": "three", "amount": "2" }))
        .send()
        .await?;
    assert_eq!(invalid.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = invalid.json().await?;
    assert!(body["error"].as_str().unwrap_or_default().contains("Invalid token id"));

    // Form submission from the page redirects back to it
    let form_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;
    let redirected = form_client
        .post(format!("{}/claim", base_url))
        .form(&[("token_address", TOKEN), ("token_id", "3"), ("amount", "2")])
        .send()
        .await?;
    assert!(redirected.status().is_redirection());

    assert_eq!(mock.state.transactions().len(), 2);

    server.abort();
    Ok(())
}

#[tokio::test]
async fn test_reload_endpoint_refreshes_snapshot() -> anyhow::Result<()> {
    init_logging();
    let mock = MockServer::start(sample_fixtures()).await?;
    let (_wallet, session) = mock.session();
    session.connect().await;
    let (base_url, server) = serve(session).await?;

    let reloaded: Value = reqwest::Client::new()
        .post(format!("{}/api/rewards/reload", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(reloaded["rewards"]["claimable"].as_array().map(Vec::len), Some(1));
    assert!(reloaded["rewards"]["loaded_at"].is_string());

    server.abort();
    Ok(())
}
