//! Chain API records, transaction payloads and error definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur while talking to the chain or building transactions.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The chain API answered 404 for the requested resource.
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// The chain API answered with a non-success status other than 404.
    #[error("{operation} failed for {target}: HTTP {status}: {message}")]
    Http {
        operation: &'static str,
        target: String,
        status: u16,
        message: String,
    },

    /// The request never produced a response (connect error, timeout, ...).
    #[error("{operation} failed for {target}: {source}")]
    Transport {
        operation: &'static str,
        target: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body did not have the expected shape.
    #[error("Unexpected response from {operation} for {target}: {message}")]
    Decode {
        operation: &'static str,
        target: String,
        message: String,
    },

    /// Key derivation or signing failed.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// The node refused the broadcast transaction.
    #[error("Transaction {id} rejected: {}", .messages.join("; "))]
    Rejected { id: String, messages: Vec<String> },

    /// A configured endpoint is not a usable base URL.
    #[error("Invalid API URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// Confirmation polling failed after the node took the transaction.
    #[error("Transaction {id} was broadcast but its status could not be checked: {source}")]
    Unobserved {
        id: String,
        #[source]
        source: Box<ChainError>,
    },
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// Response envelope shared by every chain API endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub meta: Option<Value>,
    #[serde(default)]
    pub chainmeta: Option<Value>,
}

/// On-chain account state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletRecord {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    /// Present once the account registered a second passphrase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_public_key: Option<String>,
    #[serde(default)]
    pub balance: String,
    #[serde(default)]
    pub nonce: String,
}

impl WalletRecord {
    pub fn has_second_passphrase(&self) -> bool {
        self.second_public_key
            .as_deref()
            .is_some_and(|key| !key.is_empty())
    }
}

/// Transaction as reported by the chain API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: String,
    #[serde(default)]
    pub confirmations: u64,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
}

/// Confirmation count observed for a transaction at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionStatus {
    pub id: String,
    pub confirmations: u64,
}

impl From<TransactionRecord> for TransactionStatus {
    fn from(record: TransactionRecord) -> Self {
        Self {
            id: record.id,
            confirmations: record.confirmations,
        }
    }
}

/// Identity token record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

/// Single token property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenProperty {
    pub key: String,
    pub value: String,
}

/// Node status summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStatus {
    #[serde(default)]
    pub synced: bool,
    #[serde(default)]
    pub now: u64,
    #[serde(default)]
    pub blocks_count: i64,
}

/// Node configuration, of which only the network constants matter here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nethash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorer: Option<String>,
    #[serde(default)]
    pub constants: NodeConstants,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConstants {
    /// Seconds between blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocktime: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
}

/// Aggregate blockchain state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockchainState {
    pub block: BlockSummary,
    #[serde(default)]
    pub supply: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSummary {
    pub height: u64,
    pub id: String,
}

/// Body returned by `POST /transactions`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BroadcastResponse {
    #[serde(default)]
    pub data: BroadcastData,
    /// Per-transaction rejection reasons keyed by transaction id.
    #[serde(default)]
    pub errors: Option<BTreeMap<String, Vec<BroadcastError>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BroadcastData {
    #[serde(default)]
    pub accept: Vec<String>,
    #[serde(default)]
    pub broadcast: Vec<String>,
    #[serde(default)]
    pub excess: Vec<String>,
    #[serde(default)]
    pub invalid: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BroadcastError {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub message: String,
}

/// Kind of identity token a fingerprint is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Individual,
    Organization,
    Network,
}

impl TokenType {
    /// Numeric code carried in mint transactions.
    pub fn code(&self) -> u8 {
        match self {
            TokenType::Individual => 1,
            TokenType::Organization => 2,
            TokenType::Network => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TokenType::Individual => "individual",
            TokenType::Organization => "organization",
            TokenType::Network => "network",
        }
    }
}

/// Transaction types this client can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionKind {
    Transfer,
    TokenMint,
    TokenUpdate,
}

/// What a command wants to do, before sender, nonce and fee are known.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub recipient: Option<String>,
    /// Amount in base units.
    pub amount: u64,
    pub asset: Option<Value>,
}

impl TransactionDraft {
    pub fn transfer(recipient: impl Into<String>, amount: u64) -> Self {
        Self {
            kind: TransactionKind::Transfer,
            recipient: Some(recipient.into()),
            amount,
            asset: None,
        }
    }

    pub fn token_mint(token_id: &str, token_type: TokenType) -> Self {
        Self {
            kind: TransactionKind::TokenMint,
            recipient: None,
            amount: 0,
            asset: Some(serde_json::json!({
                "token": {
                    "tokenId": token_id,
                    "properties": { "type": token_type.code().to_string() },
                }
            })),
        }
    }

    pub fn token_update(token_id: &str, key: &str, value: &str) -> Self {
        Self {
            kind: TransactionKind::TokenUpdate,
            recipient: None,
            amount: 0,
            asset: Some(serde_json::json!({
                "token": {
                    "tokenId": token_id,
                    "properties": { key: value },
                }
            })),
        }
    }

    /// Fill in the fields resolved by the pipeline.
    pub fn into_unsigned(self, sender: String, nonce: String, fee: u64) -> UnsignedTransaction {
        UnsignedTransaction {
            kind: self.kind,
            sender,
            recipient: self.recipient,
            amount: self.amount.to_string(),
            fee: fee.to_string(),
            nonce,
            asset: self.asset,
        }
    }
}

/// Transaction payload ready to be signed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsignedTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub sender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    pub amount: String,
    pub fee: String,
    pub nonce: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<Value>,
}

/// Signed transaction. Fields are read-only once signed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTransaction {
    id: String,
    #[serde(flatten)]
    payload: UnsignedTransaction,
    signature: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    second_signature: Option<String>,
}

impl SignedTransaction {
    pub fn new(
        id: String,
        payload: UnsignedTransaction,
        signature: String,
        second_signature: Option<String>,
    ) -> Self {
        Self {
            id,
            payload,
            signature,
            second_signature,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn payload(&self) -> &UnsignedTransaction {
        &self.payload
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn second_signature(&self) -> Option<&str> {
        self.second_signature.as_deref()
    }
}

/// Final state of a write command as far as this client could observe it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ConfirmationOutcome {
    /// Broadcast accepted; the caller chose not to wait.
    Broadcast,
    /// Required confirmation depth observed.
    Confirmed { confirmations: u64 },
    /// Retry budget exhausted. The transaction may still land later.
    Unconfirmed { confirmations: Option<u64> },
}

impl ConfirmationOutcome {
    /// Classify the last status seen by the confirmation waiter.
    pub fn from_last_status(status: Option<&TransactionStatus>, required: u64) -> Self {
        match status {
            Some(s) if s.confirmations >= required => Self::Confirmed {
                confirmations: s.confirmations,
            },
            Some(s) => Self::Unconfirmed {
                confirmations: Some(s.confirmations),
            },
            None => Self::Unconfirmed {
                confirmations: None,
            },
        }
    }

    pub fn is_accepted(&self) -> bool {
        !matches!(self, Self::Unconfirmed { .. })
    }
}
