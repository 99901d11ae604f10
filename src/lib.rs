//! IDChain command-line client library.
//!
//! # Architecture Overview
//!
//! ```text
//!   argv ──▶ cli ──▶ context (network preset + config file + HTTP client)
//!                       │
//!                       ▼
//!                   commands ──▶ validation (before any network call)
//!                       │
//!          ┌────────────┴─────────────┐
//!          ▼                          ▼
//!   read commands               write commands
//!   (blockchain::client)        (blockchain::transaction pipeline)
//!                                 security::passphrase → nonce → sign
//!                                 → broadcast → confirmation waiter
//!          │                          │
//!          └────────────┬─────────────┘
//!                       ▼
//!                    output (json | yaml | table | raw) ──▶ stdout
//! ```
//!
//! Logs go to stderr through `observability::logging`.

pub mod blockchain;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod observability;
pub mod output;
pub mod resilience;
pub mod security;
pub mod validation;

pub use cli::Cli;
pub use context::CommandContext;
pub use error::{CliError, CliResult};
