//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Write command:
//!     → passphrase.rs (flag value, or prompt through a SecretSource)
//!     → prompt.rs (masked terminal input)
//!     → validated PassphrasePair handed to the wallet
//! ```
//!
//! # Design Decisions
//! - Secrets are held in `SecretString` and redacted from Debug output
//! - Flag-supplied phrases are rejected before any network call; a prompted
//!   second passphrase is checked as soon as it is entered
//! - Prompting sits behind a single-method trait so validation is testable

pub mod passphrase;
pub mod prompt;

pub use passphrase::{PassphraseGate, PassphrasePair, SecretKind, SecretSource};
pub use prompt::TerminalPrompt;
