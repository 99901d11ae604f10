//! Confirmation waiter.
//!
//! Polls a transaction's status until it reaches the required confirmation
//! depth or the retry budget runs out. Performs at most `max_retries + 1`
//! queries and only waits between queries, never before the first one.
//! Query errors are returned as-is; only "not confirmed yet" is retried.

use async_trait::async_trait;
use std::time::Duration;

use crate::blockchain::client::ChainClient;
use crate::blockchain::types::{ChainError, ChainResult, TransactionStatus};
use crate::resilience::Delay;

/// Source of transaction status.
///
/// `Ok(None)` means the transaction is not visible yet.
#[async_trait]
pub trait TransactionLookup: Send + Sync {
    async fn transaction_status(&self, id: &str) -> ChainResult<Option<TransactionStatus>>;
}

#[async_trait]
impl TransactionLookup for ChainClient {
    async fn transaction_status(&self, id: &str) -> ChainResult<Option<TransactionStatus>> {
        match self.get_transaction(id).await {
            Ok(record) => Ok(Some(record.into())),
            // Not indexed yet: keep polling
            Err(ChainError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// How long and how deep to wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    /// Interval between polls, one block time.
    pub block_time: Duration,
    pub max_retries: u32,
    pub required_confirmations: u64,
}

impl WaitPolicy {
    pub fn new(block_time: Duration, max_retries: u32) -> Self {
        Self {
            block_time,
            max_retries,
            required_confirmations: 1,
        }
    }

    pub fn with_confirmations(mut self, required_confirmations: u64) -> Self {
        self.required_confirmations = required_confirmations;
        self
    }
}

/// Poll `transaction_id` until confirmed or out of retries.
///
/// Returns the last observed status, which is `None` if the transaction was
/// never seen. Callers decide whether that status meets their threshold.
pub async fn wait_for_confirmations<L, D>(
    lookup: &L,
    delay: &D,
    transaction_id: &str,
    policy: WaitPolicy,
) -> ChainResult<Option<TransactionStatus>>
where
    L: TransactionLookup + ?Sized,
    D: Delay + ?Sized,
{
    let mut retries_left = policy.max_retries;

    loop {
        let status = lookup.transaction_status(transaction_id).await?;
        let confirmed = status
            .as_ref()
            .is_some_and(|s| s.confirmations >= policy.required_confirmations);

        if confirmed || retries_left == 0 {
            return Ok(status);
        }

        tracing::debug!(
            tx_id = %transaction_id,
            confirmations = status.as_ref().map(|s| s.confirmations),
            required = policy.required_confirmations,
            retries_left,
            "Waiting for confirmations"
        );

        delay.wait(policy.block_time).await;
        retries_left -= 1;
    }
}
