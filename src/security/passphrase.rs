//! Passphrase gate.
//!
//! Every signing call goes through here first. Phrases come from flags or,
//! when a flag is missing, from a [`SecretSource`] (masked terminal input in
//! production). Either way they must be exactly
//! [`PASSPHRASE_WORD_COUNT`] whitespace-separated words.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use thiserror::Error;

/// Words in a valid mnemonic passphrase.
pub const PASSPHRASE_WORD_COUNT: usize = 12;

/// Which secret is being asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretKind {
    Passphrase,
    SecondPassphrase,
}

impl fmt::Display for SecretKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretKind::Passphrase => write!(f, "passphrase"),
            SecretKind::SecondPassphrase => write!(f, "second passphrase"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PassphraseError {
    #[error("Invalid {kind}: expected {expected} words, got {actual}")]
    Format {
        kind: SecretKind,
        expected: usize,
        actual: usize,
    },

    #[error("A {0} is required but stdin is not a terminal; pass it as a flag")]
    NotInteractive(SecretKind),

    #[error("Failed to read {kind}: {message}")]
    Prompt { kind: SecretKind, message: String },
}

/// Obtains a secret of the given kind from somewhere outside the program.
pub trait SecretSource {
    fn obtain(&self, kind: SecretKind) -> Result<SecretString, PassphraseError>;
}

/// Primary and optional second passphrase for one command invocation.
#[derive(Debug)]
pub struct PassphrasePair {
    pub primary: SecretString,
    pub secondary: Option<SecretString>,
}

/// Check the mnemonic shape of `phrase`. Content is not inspected.
pub fn validate_passphrase(kind: SecretKind, phrase: &str) -> Result<(), PassphraseError> {
    let actual = phrase.split_whitespace().count();
    if actual != PASSPHRASE_WORD_COUNT {
        return Err(PassphraseError::Format {
            kind,
            expected: PASSPHRASE_WORD_COUNT,
            actual,
        });
    }
    Ok(())
}

/// Collects and validates passphrases, prompting only when needed.
pub struct PassphraseGate<S> {
    source: S,
}

impl<S: SecretSource> PassphraseGate<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Primary passphrase from the flag, or prompted for.
    pub fn primary(&self, flag: Option<SecretString>) -> Result<SecretString, PassphraseError> {
        self.collect(SecretKind::Passphrase, flag)
    }

    /// Second passphrase.
    ///
    /// Prompted for only when the flag is absent and the account has one
    /// registered. A flag value is validated even when not required.
    pub fn secondary(
        &self,
        flag: Option<SecretString>,
        required: bool,
    ) -> Result<Option<SecretString>, PassphraseError> {
        match flag {
            Some(value) => self
                .collect(SecretKind::SecondPassphrase, Some(value))
                .map(Some),
            None if required => self.collect(SecretKind::SecondPassphrase, None).map(Some),
            None => Ok(None),
        }
    }

    fn collect(
        &self,
        kind: SecretKind,
        flag: Option<SecretString>,
    ) -> Result<SecretString, PassphraseError> {
        let phrase = match flag {
            Some(value) => value,
            None => {
                tracing::debug!(%kind, "Prompting for secret");
                self.source.obtain(kind)?
            }
        };
        validate_passphrase(kind, phrase.expose_secret())?;
        Ok(phrase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    const PHRASE: &str =
        "abandon ability able about above absent absorb abstract absurd abuse access accident";

    /// Answers prompts from a fixed list and records what was asked.
    struct ScriptedSource {
        answers: RefCell<Vec<String>>,
        asked: RefCell<Vec<SecretKind>>,
    }

    impl ScriptedSource {
        fn new(answers: &[&str]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().rev().map(|s| s.to_string()).collect()),
                asked: RefCell::new(Vec::new()),
            }
        }
    }

    impl SecretSource for &ScriptedSource {
        fn obtain(&self, kind: SecretKind) -> Result<SecretString, PassphraseError> {
            self.asked.borrow_mut().push(kind);
            self.answers
                .borrow_mut()
                .pop()
                .map(SecretString::from)
                .ok_or(PassphraseError::NotInteractive(kind))
        }
    }

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    #[test]
    fn test_word_count_rule() {
        assert!(validate_passphrase(SecretKind::Passphrase, PHRASE).is_ok());
        let padded = "  one two three four five six seven eight nine ten eleven twelve\n";
        assert!(validate_passphrase(SecretKind::Passphrase, padded).is_ok());

        for phrase in ["", "one", "a b c d e f g h i j k", "a b c d e f g h i j k l m"] {
            let err = validate_passphrase(SecretKind::Passphrase, phrase).unwrap_err();
            assert!(matches!(err, PassphraseError::Format { expected: 12, .. }));
        }
    }

    #[test]
    fn test_format_error_message() {
        let err = validate_passphrase(SecretKind::SecondPassphrase, "a b c").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid second passphrase: expected 12 words, got 3"
        );
    }

    #[test]
    fn test_flag_skips_prompt() {
        let source = ScriptedSource::new(&[]);
        let gate = PassphraseGate::new(&source);

        let primary = gate.primary(Some(secret(PHRASE))).unwrap();
        assert_eq!(primary.expose_secret(), PHRASE);
        assert!(source.asked.borrow().is_empty());
    }

    #[test]
    fn test_missing_primary_is_prompted() {
        let source = ScriptedSource::new(&[PHRASE]);
        let gate = PassphraseGate::new(&source);

        gate.primary(None).unwrap();
        assert_eq!(*source.asked.borrow(), vec![SecretKind::Passphrase]);
    }

    #[test]
    fn test_prompted_value_is_validated() {
        let source = ScriptedSource::new(&["too short"]);
        let gate = PassphraseGate::new(&source);

        let err = gate.primary(None).unwrap_err();
        assert!(matches!(err, PassphraseError::Format { actual: 2, .. }));
    }

    #[test]
    fn test_secondary_not_required_not_prompted() {
        let source = ScriptedSource::new(&[PHRASE]);
        let gate = PassphraseGate::new(&source);

        assert!(gate.secondary(None, false).unwrap().is_none());
        assert!(source.asked.borrow().is_empty());
    }

    #[test]
    fn test_secondary_required_is_prompted() {
        let source = ScriptedSource::new(&[PHRASE]);
        let gate = PassphraseGate::new(&source);

        assert!(gate.secondary(None, true).unwrap().is_some());
        assert_eq!(*source.asked.borrow(), vec![SecretKind::SecondPassphrase]);
    }

    #[test]
    fn test_unrequired_secondary_flag_still_validated() {
        let source = ScriptedSource::new(&[]);
        let gate = PassphraseGate::new(&source);

        let err = gate.secondary(Some(secret("one two")), false).unwrap_err();
        assert!(matches!(
            err,
            PassphraseError::Format {
                kind: SecretKind::SecondPassphrase,
                ..
            }
        ));
        assert!(gate.secondary(Some(secret(PHRASE)), false).unwrap().is_some());
    }

    #[test]
    fn test_pair_debug_is_redacted() {
        let pair = PassphrasePair {
            primary: secret(PHRASE),
            secondary: None,
        };
        assert!(!format!("{:?}", pair).contains("abandon"));
    }
}
