//! Read-only state shared by one command invocation.

use std::path::Path;

use crate::blockchain::{ChainClient, FingerprintClient};
use crate::config::{load_or_default, Network, NetworkConfig, WaitConfig};
use crate::error::CliResult;
use crate::output::OutputFormat;

/// Resolved network, configuration and HTTP client for one command.
#[derive(Debug)]
pub struct CommandContext {
    pub network: Network,
    pub config: NetworkConfig,
    pub wait: WaitConfig,
    pub client: ChainClient,
    pub format: OutputFormat,
}

impl CommandContext {
    pub fn new(
        network: Network,
        config_path: Option<&Path>,
        format: OutputFormat,
    ) -> CliResult<Self> {
        let file = load_or_default(config_path)?;
        let config = file.network(network);
        let client = ChainClient::new(&config.api_url, config.request_timeout_secs)?;

        tracing::debug!(
            network = %network,
            api = %config.api_url,
            timeout_secs = config.request_timeout_secs,
            "Command context ready"
        );

        Ok(Self {
            network,
            config,
            wait: file.wait,
            client,
            format,
        })
    }

    pub fn fingerprint_client(&self) -> CliResult<FingerprintClient> {
        Ok(FingerprintClient::new(
            &self.config.fingerprint_url,
            self.config.request_timeout_secs,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_presets_without_file() {
        let ctx = CommandContext::new(Network::Local, None, OutputFormat::Json).unwrap();
        assert_eq!(ctx.config, Network::Local.preset());
        assert_eq!(ctx.wait, WaitConfig::default());
        assert!(ctx.fingerprint_client().is_ok());
    }

    #[test]
    fn test_file_overrides_apply() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[mainnet]\napi_url = \"http://127.0.0.1:4999/api\"\n[wait]\nconfirmations = 3"
        )
        .unwrap();

        let ctx = CommandContext::new(Network::Mainnet, Some(file.path()), OutputFormat::Table)
            .unwrap();
        assert_eq!(ctx.client.base_url().as_str(), "http://127.0.0.1:4999/api");
        assert_eq!(ctx.wait.confirmations, 3);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[local]\napi_url = \"not a url\"").unwrap();

        let err = CommandContext::new(Network::Local, Some(file.path()), OutputFormat::Table)
            .unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
