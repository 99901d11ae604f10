//! Transaction lifecycle shared by every write command.
//!
//! # State machine
//! ```text
//! COLLECT_PASSPHRASE → RESOLVE_NONCE → BUILD_TRANSACTION → BROADCAST
//!     → [WAIT_FOR_CONFIRMATION] → REPORT
//! ```
//! Each state runs once. Only the confirmation waiter loops, and only while
//! the transaction is not confirmed yet.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::time::Duration;

use crate::blockchain::broadcast::check_broadcast;
use crate::blockchain::client::ChainClient;
use crate::blockchain::confirmation::{wait_for_confirmations, WaitPolicy};
use crate::blockchain::nonce::resolve_nonce;
use crate::blockchain::types::{ChainError, ChainResult, ConfirmationOutcome, TransactionDraft};
use crate::blockchain::wallet::{TransactionSigner, Wallet};
use crate::config::NetworkConfig;
use crate::error::CliResult;
use crate::resilience::Delay;
use crate::security::passphrase::{
    validate_passphrase, PassphraseGate, PassphrasePair, SecretKind, SecretSource,
};

/// Per-invocation knobs of a write command.
#[derive(Debug)]
pub struct SubmitOptions {
    pub passphrase: Option<SecretString>,
    pub second_passphrase: Option<SecretString>,
    /// Fee in base units; the network default when absent.
    pub fee: Option<u64>,
    /// Skip WAIT_FOR_CONFIRMATION when false.
    pub wait: bool,
    pub max_retries: u32,
    pub confirmations: u64,
}

/// What a write command reports back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReport {
    pub id: String,
    pub sender: String,
    pub nonce: String,
    pub fee: u64,
    pub outcome: ConfirmationOutcome,
    pub explorer_url: String,
}

/// Runs the write-command state machine against one network.
pub struct TransactionPipeline<'a, S, D> {
    client: &'a ChainClient,
    network: &'a NetworkConfig,
    gate: PassphraseGate<S>,
    delay: D,
}

impl<'a, S, D> TransactionPipeline<'a, S, D>
where
    S: SecretSource,
    D: Delay,
{
    pub fn new(client: &'a ChainClient, network: &'a NetworkConfig, source: S, delay: D) -> Self {
        Self {
            client,
            network,
            gate: PassphraseGate::new(source),
            delay,
        }
    }

    /// Sign, broadcast and optionally wait for `draft`.
    pub async fn submit(
        &self,
        draft: TransactionDraft,
        options: SubmitOptions,
    ) -> CliResult<SubmitReport> {
        // COLLECT_PASSPHRASE
        // Flag values are checked before the first lookup; prompted ones as entered
        if let Some(flag) = &options.second_passphrase {
            validate_passphrase(SecretKind::SecondPassphrase, flag.expose_secret())?;
        }
        let primary = self.gate.primary(options.passphrase)?;
        let sender = Wallet::from_passphrase(&primary)?.address();
        let second_required = self.second_passphrase_registered(&sender).await?;
        let pair = PassphrasePair {
            primary,
            secondary: self
                .gate
                .secondary(options.second_passphrase, second_required)?,
        };
        let wallet = Wallet::from_pair(&pair)?;

        // RESOLVE_NONCE
        let nonce = resolve_nonce(self.client, &sender).await?;

        // BUILD_TRANSACTION
        let fee = options.fee.unwrap_or(self.network.default_fee);
        let signed = wallet.sign(draft.into_unsigned(sender.clone(), nonce.clone(), fee))?;
        let id = signed.id().to_string();

        // Settled before broadcast: once the node holds the transaction, only
        // the waiter may fail, and its errors carry the id
        let block_time = if options.wait {
            Some(self.block_time().await)
        } else {
            None
        };

        // BROADCAST
        let response = self
            .client
            .post_transactions(std::slice::from_ref(&signed))
            .await?;
        check_broadcast(&id, &response)?;
        tracing::info!(tx_id = %id, sender = %sender, nonce = %nonce, "Transaction broadcast");

        // WAIT_FOR_CONFIRMATION
        let outcome = match block_time {
            Some(block_time) => {
                let policy = WaitPolicy::new(block_time, options.max_retries)
                    .with_confirmations(options.confirmations);
                let last = wait_for_confirmations(self.client, &self.delay, &id, policy)
                    .await
                    .map_err(|source| ChainError::Unobserved {
                        id: id.clone(),
                        source: Box::new(source),
                    })?;
                ConfirmationOutcome::from_last_status(last.as_ref(), options.confirmations)
            }
            None => ConfirmationOutcome::Broadcast,
        };

        if !outcome.is_accepted() {
            tracing::warn!(
                tx_id = %id,
                retries = options.max_retries,
                "Transaction not confirmed yet, it may still be included later"
            );
        }

        // REPORT
        Ok(SubmitReport {
            explorer_url: self.network.explorer_transaction_url(&id),
            id,
            sender,
            nonce,
            fee,
            outcome,
        })
    }

    /// Whether the sender registered a second passphrase on-chain.
    ///
    /// A wallet the chain has never seen cannot have one.
    async fn second_passphrase_registered(&self, sender: &str) -> ChainResult<bool> {
        match self.client.get_wallet(sender).await {
            Ok(wallet) => Ok(wallet.has_second_passphrase()),
            Err(ChainError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Poll interval: the node's block time, else the network preset's.
    ///
    /// Never fails; an unreachable node configuration falls back to the preset.
    async fn block_time(&self) -> Duration {
        let reported = match self.client.get_node_configuration().await {
            Ok(configuration) => configuration.constants.blocktime,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    fallback_secs = self.network.block_time_secs,
                    "Node configuration unavailable, using the network block time"
                );
                None
            }
        };
        let secs = reported
            .filter(|secs| *secs > 0)
            .unwrap_or(self.network.block_time_secs);
        Duration::from_secs(secs)
    }
}
