//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate URLs and value ranges for every network, not only the selected one
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: CliConfig → Result<(), Vec<ValidationError>>

use std::fmt;

use crate::blockchain::client::parse_base_url;
use crate::config::schema::{CliConfig, Network};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `testnet.api_url`.
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validate the resolved settings of every network.
pub fn validate_config(config: &CliConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for network in [Network::Mainnet, Network::Testnet, Network::Local] {
        let resolved = config.network(network);
        let mut push = |field: &str, message: String| {
            errors.push(ValidationError {
                field: format!("{}.{}", network.name(), field),
                message,
            });
        };

        for (field, url) in [
            ("api_url", &resolved.api_url),
            ("explorer_url", &resolved.explorer_url),
            ("fingerprint_url", &resolved.fingerprint_url),
        ] {
            if let Err(e) = parse_base_url(url) {
                push(field, e.to_string());
            }
        }
        if resolved.block_time_secs == 0 {
            push("block_time_secs", "must be greater than zero".to_string());
        }
        if resolved.request_timeout_secs == 0 {
            push("request_timeout_secs", "must be greater than zero".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
