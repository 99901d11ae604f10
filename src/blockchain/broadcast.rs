//! Broadcast result checking and rejection message translation.

use crate::blockchain::types::{BroadcastResponse, ChainError, ChainResult};

/// Known node rejection messages and the wording shown to users instead.
///
/// Matched case-insensitively as substrings, first match wins.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    (
        "cold wallet",
        "The sender wallet has never received funds (cold wallet). Fund it before sending transactions",
    ),
    (
        "insufficient balance",
        "The sender wallet does not hold enough funds to cover the amount and fee",
    ),
    (
        "invalid nonce",
        "The transaction nonce is out of sequence. Another transaction from this wallet may be pending; retry once it is confirmed",
    ),
    (
        "already in pool",
        "An identical transaction is already waiting in the pool",
    ),
    (
        "second signature",
        "This wallet has a second passphrase registered; provide it with --second-passphrase",
    ),
];

/// Replace a node message with its user-facing wording, if one is known.
pub fn humanize(message: &str) -> String {
    let lowered = message.to_lowercase();
    SUBSTITUTIONS
        .iter()
        .find(|(needle, _)| lowered.contains(needle))
        .map(|(_, replacement)| replacement.to_string())
        .unwrap_or_else(|| message.to_string())
}

/// Check that the node took transaction `id`.
///
/// Errors reported for the transaction are translated and returned as
/// [`ChainError::Rejected`]. A transaction the node neither accepted nor
/// relayed is rejected as well.
pub fn check_broadcast(id: &str, response: &BroadcastResponse) -> ChainResult<()> {
    if let Some(errors) = &response.errors {
        let messages: Vec<String> = errors
            .get(id)
            .into_iter()
            .flatten()
            .map(|e| humanize(&e.message))
            .collect();
        if !messages.is_empty() {
            return Err(ChainError::Rejected {
                id: id.to_string(),
                messages,
            });
        }
    }

    let data = &response.data;
    let id = id.to_string();
    if data.accept.contains(&id) || data.broadcast.contains(&id) {
        return Ok(());
    }

    let reason = if data.excess.contains(&id) {
        "The transaction pool is full, retry later"
    } else if data.invalid.contains(&id) {
        "The node reported the transaction as invalid"
    } else {
        "The node did not acknowledge the transaction"
    };

    Err(ChainError::Rejected {
        id,
        messages: vec![reason.to_string()],
    })
}
