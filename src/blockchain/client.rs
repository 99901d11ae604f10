//! Chain HTTP API client.
//!
//! # Responsibilities
//! - Resolve endpoints against the configured API base URL
//! - Decode the `{ data, chainmeta? }` envelope
//! - Map 404 to [`ChainError::NotFound`] and every other failure to a
//!   technical error carrying the operation name and target id
//!
//! Call sites decide what "not found" means for them; this client never
//! swallows it.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::blockchain::types::{
    BlockchainState, BroadcastResponse, ChainError, ChainResult, Envelope, NodeConfiguration,
    NodeStatus, SignedTransaction, TokenProperty, TokenRecord, TransactionRecord, WalletRecord,
};

/// Thin typed wrapper over the chain API.
#[derive(Clone)]
pub struct ChainClient {
    http: reqwest::Client,
    base_url: Url,
    timeout_duration: Duration,
}

impl ChainClient {
    /// Create a client for `api_url` with a per-request timeout.
    pub fn new(api_url: &str, timeout_secs: u64) -> ChainResult<Self> {
        let base_url = parse_base_url(api_url)?;
        let timeout_duration = Duration::from_secs(timeout_secs);
        let http = reqwest::Client::builder()
            .timeout(timeout_duration)
            .build()
            .map_err(|e| ChainError::InvalidUrl {
                url: api_url.to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!(api_url = %base_url, timeout_secs, "Chain client initialized");

        Ok(Self {
            http,
            base_url,
            timeout_duration,
        })
    }

    /// Get a wallet by address or public key.
    pub async fn get_wallet(&self, id: &str) -> ChainResult<WalletRecord> {
        self.get_data("get wallet", "wallet", id, &["wallets", id])
            .await
    }

    /// List the identity tokens owned by a wallet.
    pub async fn get_wallet_tokens(&self, id: &str) -> ChainResult<Vec<TokenRecord>> {
        self.get_data("get wallet tokens", "wallet", id, &["wallets", id, "tokens"])
            .await
    }

    /// Get a transaction by id.
    pub async fn get_transaction(&self, id: &str) -> ChainResult<TransactionRecord> {
        self.get_data("get transaction", "transaction", id, &["transactions", id])
            .await
    }

    /// Get an identity token by id.
    pub async fn get_token(&self, id: &str) -> ChainResult<TokenRecord> {
        self.get_data("get token", "token", id, &["tokens", id])
            .await
    }

    /// Get a single property of a token.
    pub async fn get_token_property(&self, id: &str, key: &str) -> ChainResult<TokenProperty> {
        let target = format!("{}/{}", id, key);
        self.get_data(
            "get token property",
            "token property",
            &target,
            &["tokens", id, "properties", key],
        )
        .await
    }

    pub async fn get_node_status(&self) -> ChainResult<NodeStatus> {
        self.get_data("get node status", "node status", "node", &["node", "status"])
            .await
    }

    pub async fn get_node_configuration(&self) -> ChainResult<NodeConfiguration> {
        self.get_data(
            "get node configuration",
            "node configuration",
            "node",
            &["node", "configuration"],
        )
        .await
    }

    pub async fn get_blockchain(&self) -> ChainResult<BlockchainState> {
        self.get_data("get blockchain", "blockchain", "blockchain", &["blockchain"])
            .await
    }

    /// Broadcast signed transactions.
    ///
    /// The node answers 422 when every transaction is invalid; that body
    /// still carries the per-transaction errors and is decoded normally.
    pub async fn post_transactions(
        &self,
        transactions: &[SignedTransaction],
    ) -> ChainResult<BroadcastResponse> {
        const OPERATION: &str = "broadcast transactions";
        let target = transactions
            .iter()
            .map(SignedTransaction::id)
            .collect::<Vec<_>>()
            .join(",");
        let url = self.endpoint(&["transactions"]);

        tracing::debug!(url = %url, count = transactions.len(), "Broadcasting transactions");

        let response = self
            .http
            .post(url)
            .json(&serde_json::json!({ "transactions": transactions }))
            .send()
            .await
            .map_err(|source| self.transport_error(OPERATION, &target, source))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| self.transport_error(OPERATION, &target, source))?;

        if !status.is_success() && status != StatusCode::UNPROCESSABLE_ENTITY {
            return Err(ChainError::Http {
                operation: OPERATION,
                target,
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| ChainError::Decode {
            operation: OPERATION,
            target,
            message: e.to_string(),
        })
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        resource: &'static str,
        target: &str,
        segments: &[&str],
    ) -> ChainResult<T> {
        let url = self.endpoint(segments);
        tracing::debug!(url = %url, operation, "Chain API request");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| self.transport_error(operation, target, source))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ChainError::NotFound {
                resource,
                id: target.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| self.transport_error(operation, target, source))?;

        if !status.is_success() {
            return Err(ChainError::Http {
                operation,
                target: target.to_string(),
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| ChainError::Decode {
                operation,
                target: target.to_string(),
                message: e.to_string(),
            })?;
        Ok(envelope.data)
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // parse_base_url guarantees a hierarchical URL
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn transport_error(
        &self,
        operation: &'static str,
        target: &str,
        source: reqwest::Error,
    ) -> ChainError {
        if source.is_timeout() {
            tracing::warn!(
                operation,
                target,
                timeout_secs = self.timeout_duration.as_secs(),
                "Chain API request timed out"
            );
        }
        ChainError::Transport {
            operation,
            target: target.to_string(),
            source,
        }
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}

/// Parse an http(s) base URL that path segments can be appended to.
pub(crate) fn parse_base_url(raw: &str) -> ChainResult<Url> {
    let url: Url = raw.parse().map_err(|e: url::ParseError| ChainError::InvalidUrl {
        url: raw.to_string(),
        message: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ChainError::InvalidUrl {
            url: raw.to_string(),
            message: "expected an http or https URL".to_string(),
        });
    }
    Ok(url)
}

/// Pull a readable message out of an error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().chars().take(200).collect())
}
