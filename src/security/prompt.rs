//! Masked terminal input for secrets.

use dialoguer::{theme::ColorfulTheme, Password};
use secrecy::SecretString;
use std::io::IsTerminal;

use crate::security::passphrase::{PassphraseError, SecretKind, SecretSource};

/// Check if we're running in an interactive terminal.
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal()
}

/// Prompts on the controlling terminal with hidden input.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

impl SecretSource for TerminalPrompt {
    fn obtain(&self, kind: SecretKind) -> Result<SecretString, PassphraseError> {
        if !is_interactive() {
            return Err(PassphraseError::NotInteractive(kind));
        }

        Password::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Enter your {}", kind))
            .interact()
            .map(SecretString::from)
            .map_err(|e| PassphraseError::Prompt {
                kind,
                message: e.to_string(),
            })
    }
}
