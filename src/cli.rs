//! Command-line surface.

use clap::{Args, Parser, Subcommand};
use secrecy::SecretString;
use std::path::PathBuf;

use crate::blockchain::{SubmitOptions, TokenType};
use crate::config::{Network, WaitConfig, NETWORK_ENV_VAR};
use crate::error::CliResult;
use crate::output::OutputFormat;
use crate::validation::parse_amount;

#[derive(Debug, Parser)]
#[command(name = "idchain")]
#[command(version, about = "Query and transact on the IDChain blockchain", long_about = None)]
pub struct Cli {
    /// Network to talk to
    #[arg(short, long, global = true, value_enum, env = NETWORK_ENV_VAR)]
    pub network: Option<Network>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// TOML file overriding network presets
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// The selected network. A global flag cannot be declared required, so
    /// the check happens here and reports like any other usage error.
    pub fn network(&self) -> Result<Network, clap::Error> {
        self.network.ok_or_else(|| {
            use clap::CommandFactory;
            Self::command().error(
                clap::error::ErrorKind::MissingRequiredArgument,
                format!(
                    "the following required argument was not provided: --network <NETWORK> (or set {})",
                    NETWORK_ENV_VAR
                ),
            )
        })
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show node and chain status
    Status,

    /// Show a wallet, its balance and tokens
    Wallet {
        /// Wallet address
        id: String,
    },

    /// Show a transaction
    Transaction {
        /// Transaction id (64 hex characters)
        id: String,
    },

    /// Show a token and its properties
    Token {
        /// Token id (64 hex characters)
        id: String,
    },

    /// Read or write token properties
    #[command(subcommand)]
    Property(PropertyCommand),

    /// Compute the fingerprint (token id) of a value
    Fingerprint {
        #[arg(long = "type", value_enum)]
        token_type: TokenType,

        /// Explicit value, such as a name or handle
        value: String,
    },

    /// Transfer tokens to another wallet
    Send {
        /// Recipient wallet address
        #[arg(long)]
        to: String,

        /// Amount in tokens, up to 8 decimals
        amount: String,

        #[command(flatten)]
        write: WriteArgs,
    },

    /// Mint a token for a fingerprinted value
    Create {
        #[arg(long = "type", value_enum)]
        token_type: TokenType,

        value: String,

        #[command(flatten)]
        write: WriteArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum PropertyCommand {
    /// Read one property; reports "not set" when absent
    Get { token_id: String, key: String },

    /// Set one property through a transaction
    Set {
        token_id: String,
        key: String,
        value: String,

        #[command(flatten)]
        write: WriteArgs,
    },
}

/// Flags shared by every command that submits a transaction.
#[derive(Debug, Clone, Default, Args)]
pub struct WriteArgs {
    /// 12-word passphrase; prompted for when absent
    #[arg(long)]
    pub passphrase: Option<String>,

    /// Second passphrase, when the wallet has one registered
    #[arg(long)]
    pub second_passphrase: Option<String>,

    /// Fee in tokens; network default when absent
    #[arg(long)]
    pub fee: Option<String>,

    /// Return after broadcast without waiting for confirmation
    #[arg(long)]
    pub no_wait: bool,

    /// Confirmations to wait for
    #[arg(long)]
    pub confirmations: Option<u64>,

    /// Status polls after the first one
    #[arg(long)]
    pub retries: Option<u32>,
}

impl WriteArgs {
    /// Validate the flags and fill gaps from the `[wait]` defaults.
    pub fn submit_options(self, defaults: &WaitConfig) -> CliResult<SubmitOptions> {
        let fee = self
            .fee
            .as_deref()
            .map(|raw| parse_amount("fee", raw))
            .transpose()?;

        Ok(SubmitOptions {
            passphrase: self.passphrase.map(SecretString::from),
            second_passphrase: self.second_passphrase.map(SecretString::from),
            fee,
            wait: !self.no_wait,
            max_retries: self.retries.unwrap_or(defaults.max_retries),
            confirmations: self.confirmations.unwrap_or(defaults.confirmations),
        })
    }
}
