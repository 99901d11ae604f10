//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Passphrases (flags or masked prompt)
//!     → wallet.rs (key derivation, signing)
//!     → nonce.rs (fresh nonce per build)
//!     → client.rs (chain API over HTTP with timeouts)
//!     → broadcast.rs (check node answer, translate rejections)
//!     → confirmation.rs (bounded polling)
//! transaction.rs drives the whole sequence for write commands.
//! ```
//!
//! # Security Constraints
//! - Passphrases never leave memory and are never logged
//! - All HTTP calls have configurable timeouts
//! - 404 handling is decided per call site, never in a shared helper

pub mod broadcast;
pub mod client;
pub mod confirmation;
pub mod fingerprint;
pub mod nonce;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::ChainClient;
pub use fingerprint::FingerprintClient;
pub use transaction::{SubmitOptions, SubmitReport, TransactionPipeline};
pub use types::{ChainError, ChainResult, ConfirmationOutcome, TokenType, TransactionDraft};
pub use wallet::{TransactionSigner, Wallet};
