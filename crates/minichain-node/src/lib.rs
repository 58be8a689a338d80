use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use minichain_core::{
    constants::{MINING_REWARD, REWARD_SENDER},
    pow, Block, Ledger,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

/// Shared per-node state handed to every handler. The ledger mutex is held
/// only for pool and chain accesses; a separate async lock serializes whole
/// mining rounds so the proof search never blocks submissions.
#[derive(Clone)]
pub struct AppState {
    ledger: Arc<Mutex<Ledger>>,
    mine_lock: Arc<tokio::sync::Mutex<()>>,
    node_id: String,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            ledger: Arc::new(Mutex::new(Ledger::new())),
            mine_lock: Arc::new(tokio::sync::Mutex::new(())),
            node_id: Uuid::new_v4().simple().to_string(),
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    fn ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().expect("ledger mutex poisoned")
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub enum ApiError {
    /// Malformed submission; reported to the caller as a rejected request.
    Validation(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
        }
    }
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

fn required_str(body: &Value, key: &str) -> Result<String, ApiError> {
    body.get(key)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(ApiError::Validation("Missing values"))
}

async fn submit_transaction(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let sender = required_str(&body, "sender")?;
    let recipient = required_str(&body, "recipient")?;
    let amount = body
        .get("amount")
        .and_then(Value::as_u64)
        .ok_or(ApiError::Validation("Missing values"))?;

    let index = state.ledger().enqueue_transaction(sender, recipient, amount);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": format!("Transaction will be added to Block {index}") })),
    ))
}

#[derive(Serialize)]
struct MineResponse {
    message: &'static str,
    index: u64,
    transactions: Vec<minichain_core::Transaction>,
    proof: u64,
    previous_hash: String,
}

async fn mine(State(state): State<AppState>) -> Json<MineResponse> {
    // One round at a time: nothing else may touch the pool or chain between
    // reading the head proof and committing the new block, except submissions
    // made while the search runs, which simply land in this block.
    let _round = state.mine_lock.lock().await;

    let last_proof = state.ledger().head().proof;
    let proof = tokio::task::spawn_blocking(move || pow::search(last_proof))
        .await
        .expect("proof search task panicked");

    let mut ledger = state.ledger();
    ledger.enqueue_transaction(REWARD_SENDER.to_string(), state.node_id.clone(), MINING_REWARD);
    let block = ledger.create_block(proof, None).clone();
    drop(ledger);

    info!(index = block.index, "new block forged");
    Json(MineResponse {
        message: "New Block Forged",
        index: block.index,
        transactions: block.transactions,
        proof: block.proof,
        previous_hash: block.previous_hash,
    })
}

#[derive(Serialize)]
struct ChainResponse {
    chain: Vec<Block>,
    length: usize,
}

async fn full_chain(State(state): State<AppState>) -> Json<ChainResponse> {
    let ledger = state.ledger();
    Json(ChainResponse {
        chain: ledger.chain().to_vec(),
        length: ledger.len(),
    })
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/transactions/new", post(submit_transaction))
        .route("/mine", get(mine))
        .route("/chain", get(full_chain))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
