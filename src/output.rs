//! Output formatting for CLI.

use colored::Colorize;
use serde::Serialize;

use crate::blockchain::types::{
    BlockchainState, NodeConfiguration, NodeStatus, TokenRecord, TransactionRecord, WalletRecord,
};
use crate::blockchain::{ConfirmationOutcome, SubmitReport};
use crate::config::Network;
use crate::error::CliResult;
use crate::validation::format_amount;

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    Yaml,
    /// Human-readable key/value table.
    #[default]
    Table,
    /// Single-line JSON, for piping.
    Raw,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Table => write!(f, "table"),
            Self::Raw => write!(f, "raw"),
        }
    }
}

/// Trait for renderable output.
pub trait Render: Serialize {
    /// Render as human-readable table.
    fn render_table(&self) -> String;

    /// Render in the specified format.
    fn render(&self, format: OutputFormat) -> CliResult<String> {
        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(self)?,
            OutputFormat::Yaml => serde_yaml::to_string(self)?.trim_end().to_string(),
            OutputFormat::Table => self.render_table(),
            OutputFormat::Raw => serde_json::to_string(self)?,
        })
    }
}

/// Aligned `label: value` rows.
fn table(rows: &[(&str, String)]) -> String {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0) + 1;
    rows.iter()
        .map(|(label, value)| {
            let label = format!("{:<width$}", format!("{}:", label), width = width);
            format!("{} {}", label.bold(), value)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn amount_or_dash(raw: Option<&str>) -> String {
    raw.map(display_amount).unwrap_or_else(|| "-".to_string())
}

/// Balances arrive as base-unit strings; show them in tokens when they parse.
fn display_amount(raw: &str) -> String {
    raw.parse::<u64>()
        .map(format_amount)
        .unwrap_or_else(|_| raw.to_string())
}

// =============================================================================
// Read commands
// =============================================================================

/// Output for `status`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusOutput {
    pub network: Network,
    pub api_url: String,
    pub status: NodeStatus,
    pub configuration: NodeConfiguration,
    pub blockchain: BlockchainState,
}

impl Render for StatusOutput {
    fn render_table(&self) -> String {
        let synced = if self.status.synced {
            "yes".green().to_string()
        } else {
            "no".yellow().to_string()
        };
        table(&[
            ("Network", self.network.to_string()),
            ("API", self.api_url.clone()),
            ("Synced", synced),
            ("Height", self.blockchain.block.height.to_string()),
            ("Last block", self.blockchain.block.id.clone()),
            ("Supply", display_amount(&self.blockchain.supply)),
            ("Token", or_dash(self.configuration.token.as_deref())),
            ("Nethash", or_dash(self.configuration.nethash.as_deref())),
        ])
    }
}

/// Output for `wallet`.
#[derive(Debug, Serialize)]
pub struct WalletOutput {
    pub wallet: WalletRecord,
    pub tokens: Vec<TokenRecord>,
    #[serde(skip)]
    pub symbol: Option<String>,
}

impl Render for WalletOutput {
    fn render_table(&self) -> String {
        let balance = match &self.symbol {
            Some(symbol) => format!("{} {}", display_amount(&self.wallet.balance), symbol),
            None => display_amount(&self.wallet.balance),
        };
        let second = if self.wallet.has_second_passphrase() {
            "registered"
        } else {
            "none"
        };
        let mut out = table(&[
            ("Address", self.wallet.address.clone()),
            ("Balance", balance),
            ("Nonce", self.wallet.nonce.clone()),
            ("Public key", or_dash(self.wallet.public_key.as_deref())),
            ("Second passphrase", second.to_string()),
            ("Tokens", self.tokens.len().to_string()),
        ]);
        for token in &self.tokens {
            out.push_str(&format!("\n  {}", token.id));
        }
        out
    }
}

/// Output for `transaction`.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct TransactionOutput(pub TransactionRecord);

impl Render for TransactionOutput {
    fn render_table(&self) -> String {
        let tx = &self.0;
        let kind = tx
            .kind
            .as_ref()
            .map(|v| v.to_string().trim_matches('"').to_string());
        table(&[
            ("ID", tx.id.clone()),
            ("Type", or_dash(kind.as_deref())),
            ("Confirmations", tx.confirmations.to_string()),
            ("Sender", or_dash(tx.sender.as_deref())),
            ("Recipient", or_dash(tx.recipient.as_deref())),
            ("Amount", amount_or_dash(tx.amount.as_deref())),
            ("Fee", amount_or_dash(tx.fee.as_deref())),
            ("Nonce", or_dash(tx.nonce.as_deref())),
            ("Block", or_dash(tx.block_id.as_deref())),
        ])
    }
}

/// Output for `token`.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct TokenOutput(pub TokenRecord);

impl Render for TokenOutput {
    fn render_table(&self) -> String {
        let mut out = table(&[
            ("Token", self.0.id.clone()),
            ("Owner", or_dash(self.0.owner_id.as_deref())),
        ]);
        if self.0.properties.is_empty() {
            out.push_str(&format!("\n{}", "No properties".dimmed()));
        }
        for (key, value) in &self.0.properties {
            out.push_str(&format!("\n  {} = {}", key.cyan(), value));
        }
        out
    }
}

/// Output for `property get`. `value` is `None` when the key is not set.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyOutput {
    pub token_id: String,
    pub key: String,
    pub value: Option<String>,
}

impl Render for PropertyOutput {
    fn render_table(&self) -> String {
        let value = match &self.value {
            Some(value) => value.clone(),
            None => "not set".dimmed().to_string(),
        };
        table(&[
            ("Token", self.token_id.clone()),
            ("Key", self.key.clone()),
            ("Value", value),
        ])
    }
}

/// Output for `fingerprint`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintOutput {
    #[serde(rename = "type")]
    pub token_type: String,
    pub value: String,
    pub fingerprint: String,
}

impl Render for FingerprintOutput {
    fn render_table(&self) -> String {
        table(&[
            ("Type", self.token_type.clone()),
            ("Value", self.value.clone()),
            ("Fingerprint", self.fingerprint.clone()),
        ])
    }
}

// =============================================================================
// Write commands
// =============================================================================

impl Render for SubmitReport {
    fn render_table(&self) -> String {
        let status = match self.outcome {
            ConfirmationOutcome::Broadcast => "broadcast (not waiting)".cyan().to_string(),
            ConfirmationOutcome::Confirmed { confirmations } => {
                format!("confirmed ({})", confirmations).green().bold().to_string()
            }
            ConfirmationOutcome::Unconfirmed { confirmations } => {
                let seen = confirmations.map_or("not seen yet".to_string(), |c| {
                    format!("{} confirmation(s)", c)
                });
                format!("unconfirmed, {}", seen).yellow().bold().to_string()
            }
        };
        let mut out = table(&[
            ("Transaction", self.id.clone()),
            ("Sender", self.sender.clone()),
            ("Nonce", self.nonce.clone()),
            ("Fee", format_amount(self.fee)),
            ("Status", status),
            ("Explorer", self.explorer_url.clone()),
        ]);
        if !self.outcome.is_accepted() {
            out.push_str(&format!(
                "\n{}",
                "The transaction may still be included; check the explorer link above.".yellow()
            ));
        }
        out
    }
}
