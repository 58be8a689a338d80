use axum_test::TestServer;
use minichain_core::Block;
use minichain_node::{router, AppState};
use serde_json::{json, Value};

fn server() -> TestServer {
    TestServer::new(router(AppState::new())).expect("failed to build test server")
}

#[tokio::test]
async fn health_endpoint() {
    let server = server();
    let res = server.get("/health").await;
    assert_eq!(res.status_code(), 200);
    let body: Value = res.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn submit_reports_target_block() {
    let server = server();
    let res = server
        .post("/transactions/new")
        .json(&json!({ "sender": "a", "recipient": "b", "amount": 5 }))
        .await;
    assert_eq!(res.status_code(), 201);
    let body: Value = res.json();
    assert_eq!(body["message"], "Transaction will be added to Block 2");
}

#[tokio::test]
async fn submit_rejects_missing_fields() {
    let server = server();
    let bad_bodies = [
        json!({ "recipient": "b", "amount": 5 }),
        json!({ "sender": "a", "amount": 5 }),
        json!({ "sender": "a", "recipient": "b" }),
    ];
    for bad in bad_bodies {
        let res = server.post("/transactions/new").json(&bad).await;
        assert_eq!(res.status_code(), 400);
        let body: Value = res.json();
        assert_eq!(body["error"], "Missing values");
    }
}

#[tokio::test]
async fn mine_commits_submitted_and_reward_transactions() {
    let server = server();
    let res = server
        .post("/transactions/new")
        .json(&json!({ "sender": "a", "recipient": "b", "amount": 5 }))
        .await;
    assert_eq!(res.status_code(), 201);

    let res = server.get("/mine").await;
    assert_eq!(res.status_code(), 200);
    let mined: Value = res.json();
    assert_eq!(mined["message"], "New Block Forged");
    assert_eq!(mined["index"], 2);
    let txs = mined["transactions"].as_array().unwrap();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0]["sender"], "a");
    assert_eq!(txs[0]["recipient"], "b");
    assert_eq!(txs[0]["amount"], 5);
    assert_eq!(txs[1]["sender"], "0");
    assert_eq!(txs[1]["amount"], 1);

    // The committed previous_hash must match an independent hash of genesis.
    let res = server.get("/chain").await;
    assert_eq!(res.status_code(), 200);
    let chain: Value = res.json();
    assert_eq!(chain["length"], 2);
    let genesis: Block = serde_json::from_value(chain["chain"][0].clone()).unwrap();
    assert_eq!(mined["previous_hash"], genesis.hash());
}

#[tokio::test]
async fn mined_proof_validates_against_previous() {
    let server = server();
    let res = server.get("/mine").await;
    assert_eq!(res.status_code(), 200);
    let mined: Value = res.json();
    let proof = mined["proof"].as_u64().unwrap();
    // The genesis proof is 100, so the first mined proof must pair with it.
    assert!(minichain_core::pow::is_valid(100, proof));
}

#[tokio::test]
async fn chain_reads_are_idempotent() {
    let server = server();
    server
        .post("/transactions/new")
        .json(&json!({ "sender": "a", "recipient": "b", "amount": 1 }))
        .await;
    let first = server.get("/chain").await.text();
    let second = server.get("/chain").await.text();
    assert_eq!(first, second);
}
