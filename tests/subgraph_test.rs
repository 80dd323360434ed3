mod common;

use axum::{routing::post, Json, Router};
use common::*;
use nft_rewarder::{
    cards_from_balances, BalanceKind, JsonRpcWallet, RewarderError, SubgraphClient, WalletProvider,
};
use serde_json::{json, Value};

#[tokio::test]
async fn test_claimed_cards_match_owned_records() -> anyhow::Result<()> {
    init_logging();

    let mut fixtures = sample_fixtures();
    fixtures.balances.push(balance(ACCOUNT_A, "4", "9", "0"));
    let mock = MockServer::start(fixtures).await?;

    let balances = mock.subgraph().fetch_claimed(address(ACCOUNT_A)).await?;
    assert_eq!(balances.len(), 3, "only amountOwned > 0 records come back");

    let cards = cards_from_balances(&balances);
    assert_eq!(cards.len(), balances.len());

    let pioneer = cards.iter().find(|c| c.name == "Pioneer").expect("Pioneer card");
    assert_eq!(pioneer.description, "Pioneer reward");
    assert_eq!(pioneer.amount, "1");
    assert_eq!(pioneer.supply, "1000");
    assert_eq!(pioneer.token_id, "1");
    assert_eq!(pioneer.token_address, TOKEN.to_lowercase());
    assert_eq!(pioneer.image_url, "https://ipfs.io/ipfs/QmPioneer");

    assert!(balances.iter().all(|b| b.kind == BalanceKind::Claimed));
    Ok(())
}

#[tokio::test]
async fn test_claimable_uses_amount_claimable() -> anyhow::Result<()> {
    init_logging();
    let mock = MockServer::start(sample_fixtures()).await?;
    let subgraph = mock.subgraph();

    let claimable = subgraph.fetch_claimable(address(ACCOUNT_A)).await?;
    assert_eq!(claimable.len(), 1);
    assert_eq!(claimable[0].reward_name, "Explorer");
    assert_eq!(claimable[0].amount, "2");
    assert_eq!(claimable[0].kind, BalanceKind::Claimable);

    let other = subgraph.fetch_claimable(address(ACCOUNT_B)).await?;
    assert_eq!(other.len(), 1);
    assert_eq!(other[0].amount, "7");

    assert!(subgraph.fetch_claimed(address(ACCOUNT_B)).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_catalog_lists_every_reward() -> anyhow::Result<()> {
    init_logging();
    let mock = MockServer::start(sample_fixtures()).await?;

    let catalog = mock.subgraph().fetch_catalog().await?;
    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog[3].name, "Voyager");
    assert_eq!(catalog[3].image, "https://ipfs.io/ipfs/QmVoyager");
    Ok(())
}

#[tokio::test]
async fn test_graphql_errors_surface() -> anyhow::Result<()> {
    init_logging();

    let app = Router::new().route(
        "/subgraph",
        post(|Json(_): Json<Value>| async {
            Json(json!({ "errors": [{ "message": "indexer is syncing" }] }))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    let subgraph = SubgraphClient::new(format!("http://{}/subgraph", addr), GATEWAY);
    let result = subgraph.fetch_claimed(address(ACCOUNT_A)).await;

    match result {
        Err(RewarderError::Subgraph(message)) => assert!(message.contains("indexer is syncing")),
        other => panic!("expected subgraph error, got {:?}", other),
    }

    server.abort();
    Ok(())
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    init_logging();

    let subgraph = SubgraphClient::new("http://127.0.0.1:1/subgraph", GATEWAY);
    let result = subgraph.fetch_claimable(address(ACCOUNT_A)).await;
    assert!(matches!(result, Err(RewarderError::Network(_))));
}

/// Serves an HTML error page on every POST route, like a misconfigured gateway
async fn start_html_server() -> anyhow::Result<(std::net::SocketAddr, tokio::task::JoinHandle<()>)> {
    let page = || async { axum::response::Html("<html>gateway error</html>") };
    let app = Router::new()
        .route("/subgraph", post(page))
        .route("/rpc", post(page));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    Ok((addr, server))
}

#[tokio::test]
async fn test_non_json_subgraph_body_is_decode_error() -> anyhow::Result<()> {
    init_logging();
    let (addr, server) = start_html_server().await?;

    let subgraph = SubgraphClient::new(format!("http://{}/subgraph", addr), GATEWAY);
    let result = subgraph.fetch_claimed(address(ACCOUNT_A)).await;

    match result {
        Err(RewarderError::Json(_)) => {}
        other => panic!("expected JSON decode error, got {:?}", other),
    }

    server.abort();
    Ok(())
}

#[tokio::test]
async fn test_non_json_wallet_body_is_decode_error() -> anyhow::Result<()> {
    init_logging();
    let (addr, server) = start_html_server().await?;

    let wallet = JsonRpcWallet::new(format!("http://{}/rpc", addr));
    let result = wallet.request_accounts().await;

    match result {
        Err(RewarderError::Json(_)) => {}
        other => panic!("expected JSON decode error, got {:?}", other),
    }

    server.abort();
    Ok(())
}
