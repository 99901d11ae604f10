//! Configuration schema definitions.
//!
//! Every network has a built-in preset; the optional config file only
//! overrides individual fields. All types derive Serde traits for
//! deserialization from TOML.

use serde::{Deserialize, Serialize};

/// Environment variable consulted when `--network` is not given.
pub const NETWORK_ENV_VAR: &str = "IDCHAIN_NETWORK";

/// Supported networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Local,
}

impl Network {
    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Local => "local",
        }
    }

    /// Built-in settings for this network.
    pub fn preset(&self) -> NetworkConfig {
        match self {
            Network::Mainnet => NetworkConfig {
                api_url: "https://api.idchain.network/api".to_string(),
                explorer_url: "https://explorer.idchain.network".to_string(),
                fingerprint_url: "https://fingerprint.idchain.network/api".to_string(),
                block_time_secs: 8,
                default_fee: 10_000_000,
                request_timeout_secs: 10,
            },
            Network::Testnet => NetworkConfig {
                api_url: "https://api.testnet.idchain.network/api".to_string(),
                explorer_url: "https://explorer.testnet.idchain.network".to_string(),
                fingerprint_url: "https://fingerprint.testnet.idchain.network/api".to_string(),
                block_time_secs: 8,
                default_fee: 10_000_000,
                request_timeout_secs: 10,
            },
            Network::Local => NetworkConfig {
                api_url: "http://localhost:4003/api".to_string(),
                explorer_url: "http://localhost:4200".to_string(),
                fingerprint_url: "http://localhost:4004/api".to_string(),
                block_time_secs: 8,
                default_fee: 10_000_000,
                request_timeout_secs: 5,
            },
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved settings for one network.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// Chain API base URL.
    pub api_url: String,

    /// Block explorer base URL, used in confirmation reports.
    pub explorer_url: String,

    /// Fingerprint backend base URL.
    pub fingerprint_url: String,

    /// Fallback block time when the node does not report one.
    pub block_time_secs: u64,

    /// Fee in base units when `--fee` is not given.
    pub default_fee: u64,

    /// Per-request HTTP timeout in seconds.
    pub request_timeout_secs: u64,
}

impl NetworkConfig {
    /// Where users can follow a transaction.
    pub fn explorer_transaction_url(&self, id: &str) -> String {
        format!("{}/transaction/{}", self.explorer_url.trim_end_matches('/'), id)
    }

    fn apply(&mut self, overrides: &NetworkOverrides) {
        if let Some(v) = &overrides.api_url {
            self.api_url = v.clone();
        }
        if let Some(v) = &overrides.explorer_url {
            self.explorer_url = v.clone();
        }
        if let Some(v) = &overrides.fingerprint_url {
            self.fingerprint_url = v.clone();
        }
        if let Some(v) = overrides.block_time_secs {
            self.block_time_secs = v;
        }
        if let Some(v) = overrides.default_fee {
            self.default_fee = v;
        }
        if let Some(v) = overrides.request_timeout_secs {
            self.request_timeout_secs = v;
        }
    }
}

/// Per-network overrides as written in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkOverrides {
    pub api_url: Option<String>,
    pub explorer_url: Option<String>,
    pub fingerprint_url: Option<String>,
    pub block_time_secs: Option<u64>,
    pub default_fee: Option<u64>,
    pub request_timeout_secs: Option<u64>,
}

/// Confirmation waiting defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaitConfig {
    /// Polls after the first one before giving up.
    pub max_retries: u32,

    /// Confirmations required to report a transaction as confirmed.
    pub confirmations: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            max_retries: 10,
            confirmations: 1,
        }
    }
}

/// Root configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub mainnet: NetworkOverrides,
    pub testnet: NetworkOverrides,
    pub local: NetworkOverrides,
    pub wait: WaitConfig,
}

impl CliConfig {
    /// Preset for `network` with this file's overrides applied.
    pub fn network(&self, network: Network) -> NetworkConfig {
        let mut resolved = network.preset();
        let overrides = match network {
            Network::Mainnet => &self.mainnet,
            Network::Testnet => &self.testnet,
            Network::Local => &self.local,
        };
        resolved.apply(overrides);
        resolved
    }
}
