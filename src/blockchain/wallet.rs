//! Passphrase-derived wallet and transaction signing.
//!
//! # Security
//! - Keys are derived in memory for the duration of one command
//! - Keys and passphrases are never logged or serialized
//!
//! Key derivation and signatures are delegated to `alloy`'s local signer;
//! this module only decides what bytes get signed.

use alloy::primitives::{hex, keccak256, B256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;
use secrecy::{ExposeSecret, SecretString};

use crate::blockchain::types::{ChainError, ChainResult, SignedTransaction, UnsignedTransaction};
use crate::security::passphrase::PassphrasePair;

/// Boundary to the transaction signing SDK.
pub trait TransactionSigner {
    /// Address transactions are sent from.
    fn address(&self) -> String;

    /// Sign `transaction`, producing its final id.
    fn sign(&self, transaction: UnsignedTransaction) -> ChainResult<SignedTransaction>;
}

/// Signing keys for one command invocation.
#[derive(Debug, Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
    second_signer: Option<PrivateKeySigner>,
}

impl Wallet {
    /// Derive the primary signing key from a passphrase.
    pub fn from_passphrase(passphrase: &SecretString) -> ChainResult<Self> {
        let signer = signer_from_phrase(passphrase)?;

        tracing::debug!(address = %signer.address(), "Wallet derived from passphrase");

        Ok(Self {
            signer,
            second_signer: None,
        })
    }

    /// Derive the primary and, if present, the second signing key.
    pub fn from_pair(pair: &PassphrasePair) -> ChainResult<Self> {
        let wallet = Self::from_passphrase(&pair.primary)?;
        match &pair.secondary {
            Some(second) => wallet.with_second_passphrase(second),
            None => Ok(wallet),
        }
    }

    /// Add a second passphrase; transactions get counter-signed with it.
    pub fn with_second_passphrase(mut self, passphrase: &SecretString) -> ChainResult<Self> {
        self.second_signer = Some(signer_from_phrase(passphrase)?);
        Ok(self)
    }

    fn sign_digest(signer: &PrivateKeySigner, digest: &B256) -> ChainResult<String> {
        signer
            .sign_hash_sync(digest)
            .map(|signature| hex::encode(signature.as_bytes()))
            .map_err(|e| ChainError::Wallet(format!("Signing failed: {}", e)))
    }
}

impl TransactionSigner for Wallet {
    fn address(&self) -> String {
        self.signer.address().to_checksum(None)
    }

    fn sign(&self, transaction: UnsignedTransaction) -> ChainResult<SignedTransaction> {
        let payload = serde_json::to_vec(&transaction)
            .map_err(|e| ChainError::Wallet(format!("Transaction encoding failed: {}", e)))?;
        let digest = keccak256(&payload);

        let signature = Self::sign_digest(&self.signer, &digest)?;
        let second_signature = self
            .second_signer
            .as_ref()
            .map(|second| {
                let mut counter = payload.clone();
                counter.extend_from_slice(signature.as_bytes());
                Self::sign_digest(second, &keccak256(&counter))
            })
            .transpose()?;

        let mut id_input = payload;
        id_input.extend_from_slice(signature.as_bytes());
        if let Some(second) = &second_signature {
            id_input.extend_from_slice(second.as_bytes());
        }
        let id = hex::encode(keccak256(&id_input));

        tracing::debug!(tx_id = %id, nonce = %transaction.nonce, "Transaction signed");

        Ok(SignedTransaction::new(
            id,
            transaction,
            signature,
            second_signature,
        ))
    }
}

/// Keys are the keccak-256 digest of the whitespace-normalized phrase.
fn signer_from_phrase(phrase: &SecretString) -> ChainResult<PrivateKeySigner> {
    let normalized = phrase
        .expose_secret()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let key = keccak256(normalized.as_bytes());

    PrivateKeySigner::from_bytes(&key)
        .map_err(|e| ChainError::Wallet(format!("Key derivation failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::types::TransactionDraft;

    const PHRASE: &str =
        "abandon ability able about above absent absorb abstract absurd abuse access accident";
    const SECOND: &str =
        "zoo zone zero youth young yellow year wrong write wrist wrestle worth";

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    fn unsigned(sender: String) -> UnsignedTransaction {
        TransactionDraft::transfer("0x0000000000000000000000000000000000000001", 100)
            .into_unsigned(sender, "1".to_string(), 10_000_000)
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let a = Wallet::from_passphrase(&secret(PHRASE)).unwrap();
        let b = Wallet::from_passphrase(&secret(PHRASE)).unwrap();
        assert_eq!(a.address(), b.address());
        assert!(a.address().starts_with("0x"));
        assert_eq!(a.address().len(), 42);
    }

    #[test]
    fn test_whitespace_is_normalized() {
        let a = Wallet::from_passphrase(&secret(PHRASE)).unwrap();
        let spaced = PHRASE.replace(' ', "   ");
        let b = Wallet::from_passphrase(&secret(&format!("  {}\n", spaced))).unwrap();
        assert_eq!(a.address(), b.address());
    }

    #[test]
    fn test_different_phrases_different_addresses() {
        let a = Wallet::from_passphrase(&secret(PHRASE)).unwrap();
        let b = Wallet::from_passphrase(&secret(SECOND)).unwrap();
        assert_ne!(a.address(), b.address());
    }

    #[test]
    fn test_sign_produces_id_and_signature() {
        let wallet = Wallet::from_passphrase(&secret(PHRASE)).unwrap();
        let signed = wallet.sign(unsigned(wallet.address())).unwrap();

        assert_eq!(signed.id().len(), 64);
        // 65-byte recoverable signature, hex encoded
        assert_eq!(signed.signature().len(), 130);
        assert!(signed.second_signature().is_none());
        assert_eq!(signed.payload().nonce, "1");

        let again = wallet.sign(unsigned(wallet.address())).unwrap();
        assert_eq!(signed.id(), again.id());
    }

    #[test]
    fn test_second_passphrase_counter_signs() {
        let pair = PassphrasePair {
            primary: secret(PHRASE),
            secondary: Some(secret(SECOND)),
        };
        let wallet = Wallet::from_pair(&pair).unwrap();

        let single = Wallet::from_passphrase(&secret(PHRASE)).unwrap();
        assert_eq!(wallet.address(), single.address());

        let signed = wallet.sign(unsigned(wallet.address())).unwrap();
        let plain = single.sign(unsigned(single.address())).unwrap();

        assert_eq!(signed.second_signature().map(str::len), Some(130));
        assert_eq!(signed.signature(), plain.signature());
        assert_ne!(signed.id(), plain.id());
    }
}
