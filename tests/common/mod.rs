//! Shared utilities for integration testing: an in-process mock chain API.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::net::TcpListener;

use idchain_cli::blockchain::{ChainClient, TransactionSigner, Wallet};
use idchain_cli::config::{Network, NetworkConfig};
use idchain_cli::resilience::Delay;
use secrecy::SecretString;

pub const PHRASE: &str =
    "abandon ability able about above absent absorb abstract absurd abuse access accident";
pub const SECOND_PHRASE: &str =
    "zoo zone zero youth young you yellow year yard wrong write wrist";

pub const TOKEN_ID: &str = "5b2a6c1c0c8f1f9e2d7b8a3e4f5d6c7b8a9e0f1d2c3b4a5e6f7d8c9b0a1e2f3d";

/// Address derived from `phrase`.
pub fn address_of(phrase: &str) -> String {
    Wallet::from_passphrase(&SecretString::from(phrase.to_string()))
        .unwrap()
        .address()
}

/// Everything the mock chain knows and everything it has seen.
#[derive(Debug, Default)]
pub struct ChainState {
    pub wallets: HashMap<String, Value>,
    pub wallet_tokens: HashMap<String, Vec<Value>>,
    pub tokens: HashMap<String, Value>,
    pub properties: HashMap<(String, String), String>,
    /// Answers to successive `GET /transactions/{id}`; `None` is a 404.
    /// The last entry repeats once the script runs out.
    pub confirmations: VecDeque<Option<u64>>,
    /// Errors reported against every posted transaction when set.
    pub broadcast_errors: Option<Vec<Value>>,
    pub posted: Vec<Value>,
    pub status_queries: usize,
    /// `GET /transactions/{id}` answers 500 when set.
    pub status_unavailable: bool,
    /// `GET /node/configuration` answers 503 when set.
    pub configuration_unavailable: bool,
    pub blocktime: u64,
    pub fingerprint: Option<String>,
    pub fingerprint_requests: Vec<Value>,
}

impl ChainState {
    pub fn add_wallet(&mut self, address: &str, nonce: &str, second_public_key: Option<&str>) {
        let mut wallet = json!({
            "address": address,
            "publicKey": "02aa",
            "balance": "250000000",
            "nonce": nonce,
        });
        if let Some(key) = second_public_key {
            wallet["secondPublicKey"] = json!(key);
        }
        self.wallets.insert(address.to_string(), wallet);
    }
}

type Shared = Arc<Mutex<ChainState>>;

/// A running mock chain bound to an ephemeral port.
pub struct MockChain {
    pub addr: SocketAddr,
    state: Shared,
}

impl MockChain {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(ChainState {
            blocktime: 5,
            ..ChainState::default()
        }));

        let app = Router::new()
            .route("/api/wallets/{id}", get(wallet))
            .route("/api/wallets/{id}/tokens", get(wallet_tokens))
            .route("/api/transactions", post(broadcast))
            .route("/api/transactions/{id}", get(transaction))
            .route("/api/tokens/{id}", get(token))
            .route("/api/tokens/{id}/properties/{key}", get(property))
            .route("/api/node/status", get(node_status))
            .route("/api/node/configuration", get(node_configuration))
            .route("/api/blockchain", get(blockchain))
            .route("/api/fingerprint", post(fingerprint))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state }
    }

    pub fn api_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn state(&self) -> MutexGuard<'_, ChainState> {
        self.state.lock().unwrap()
    }

    pub fn client(&self) -> ChainClient {
        ChainClient::new(&self.api_url(), 5).unwrap()
    }

    /// Local preset pointed at this mock.
    pub fn network_config(&self) -> NetworkConfig {
        let mut config = Network::Local.preset();
        config.api_url = self.api_url();
        config.fingerprint_url = self.api_url();
        config.explorer_url = "http://explorer.test".to_string();
        config
    }

    /// Config file pointing the `local` network at this mock.
    pub fn config_file(&self, extra: &str) -> tempfile::NamedTempFile {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[local]\napi_url = \"{api}\"\nfingerprint_url = \"{api}\"\n\
             explorer_url = \"http://explorer.test\"\n{extra}",
            api = self.api_url(),
        )
        .unwrap();
        file
    }
}

/// Delay that returns at once and records what it was asked to wait.
#[derive(Debug, Default, Clone)]
pub struct InstantDelay {
    pub waits: Arc<Mutex<Vec<Duration>>>,
}

impl InstantDelay {
    pub fn recorded(&self) -> Vec<Duration> {
        self.waits.lock().unwrap().clone()
    }
}

#[async_trait]
impl Delay for InstantDelay {
    async fn wait(&self, duration: Duration) {
        self.waits.lock().unwrap().push(duration);
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": "Not Found", "message": "Resource not found"})),
    )
        .into_response()
}

fn data(value: Value) -> Response {
    Json(json!({ "data": value })).into_response()
}

async fn wallet(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    match state.lock().unwrap().wallets.get(&id) {
        Some(wallet) => data(wallet.clone()),
        None => not_found(),
    }
}

async fn wallet_tokens(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    match state.lock().unwrap().wallet_tokens.get(&id) {
        Some(tokens) => data(Value::Array(tokens.clone())),
        None => not_found(),
    }
}

async fn transaction(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let mut state = state.lock().unwrap();
    state.status_queries += 1;
    if state.status_unavailable {
        return (StatusCode::INTERNAL_SERVER_ERROR, "database locked").into_response();
    }
    let next = if state.confirmations.len() > 1 {
        state.confirmations.pop_front().flatten()
    } else {
        state.confirmations.front().copied().flatten()
    };
    match next {
        Some(confirmations) => data(json!({
            "id": id,
            "confirmations": confirmations,
            "type": 0,
            "amount": "100000000",
            "fee": "10000000",
        })),
        None => not_found(),
    }
}

async fn broadcast(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    let ids: Vec<String> = body["transactions"]
        .as_array()
        .map(|txs| {
            txs.iter()
                .filter_map(|tx| tx["id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    state.posted.push(body);

    match &state.broadcast_errors {
        Some(list) => {
            let errors: serde_json::Map<String, Value> = ids
                .iter()
                .map(|id| (id.clone(), Value::Array(list.clone())))
                .collect();
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "data": {"accept": [], "broadcast": [], "excess": [], "invalid": ids},
                    "errors": errors,
                })),
            )
                .into_response()
        }
        None => Json(json!({
            "data": {"accept": ids, "broadcast": ids, "excess": [], "invalid": []},
        }))
        .into_response(),
    }
}

async fn token(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    match state.lock().unwrap().tokens.get(&id) {
        Some(token) => data(token.clone()),
        None => not_found(),
    }
}

async fn property(
    State(state): State<Shared>,
    Path((id, key)): Path<(String, String)>,
) -> Response {
    match state.lock().unwrap().properties.get(&(id, key.clone())) {
        Some(value) => data(json!({"key": key, "value": value})),
        None => not_found(),
    }
}

async fn node_status() -> Response {
    data(json!({"synced": true, "now": 1200, "blocksCount": 0}))
}

async fn node_configuration(State(state): State<Shared>) -> Response {
    let (blocktime, unavailable) = {
        let state = state.lock().unwrap();
        (state.blocktime, state.configuration_unavailable)
    };
    if unavailable {
        return (StatusCode::SERVICE_UNAVAILABLE, "node starting").into_response();
    }
    data(json!({
        "nethash": "ab12",
        "token": "IDCHAIN",
        "symbol": "IDC",
        "explorer": "http://explorer.test",
        "constants": {"blocktime": blocktime, "height": 1},
    }))
}

async fn blockchain() -> Response {
    data(json!({"block": {"height": 1200, "id": "ff00"}, "supply": "12500000000000000"}))
}

async fn fingerprint(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    state.fingerprint_requests.push(body);
    match &state.fingerprint {
        Some(fingerprint) => data(json!({"fingerprint": fingerprint})),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "fingerprint backend down").into_response(),
    }
}
