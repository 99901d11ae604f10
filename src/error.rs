//! CLI error types.

use thiserror::Error;

use crate::blockchain::ChainError;
use crate::config::ConfigError;
use crate::security::passphrase::PassphraseError;
use crate::validation::InputError;

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;

/// Every error a command can end with. All of them exit with status 1.
#[derive(Debug, Error)]
pub enum CliError {
    /// Malformed argument, caught before any network call.
    #[error("{0}")]
    Input(#[from] InputError),

    #[error("{0}")]
    Passphrase(#[from] PassphraseError),

    /// Not-found, technical and rejection errors from the chain.
    #[error("{0}")]
    Chain(#[from] ChainError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// True for errors detected locally, before talking to the network.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Input(_) | Self::Passphrase(PassphraseError::Format { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::passphrase::SecretKind;

    #[test]
    fn test_messages_pass_through() {
        let err: CliError = ChainError::NotFound {
            resource: "token",
            id: "ab".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "token not found: ab");
        assert!(!err.is_validation());
    }

    #[test]
    fn test_validation_classification() {
        let err: CliError = PassphraseError::Format {
            kind: SecretKind::Passphrase,
            expected: 12,
            actual: 3,
        }
        .into();
        assert!(err.is_validation());

        let err: CliError = PassphraseError::NotInteractive(SecretKind::Passphrase).into();
        assert!(!err.is_validation());
    }
}
