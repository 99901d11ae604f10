//! Nonce resolution.
//!
//! The nonce is fetched fresh before every transaction build and never
//! cached across commands.

use async_trait::async_trait;

use crate::blockchain::client::ChainClient;
use crate::blockchain::types::{ChainError, ChainResult, WalletRecord};

/// Source of on-chain account state.
#[async_trait]
pub trait AccountLookup: Send + Sync {
    async fn account(&self, id: &str) -> ChainResult<WalletRecord>;
}

#[async_trait]
impl AccountLookup for ChainClient {
    async fn account(&self, id: &str) -> ChainResult<WalletRecord> {
        self.get_wallet(id).await
    }
}

/// Next nonce to use for `address`, as a numeric string.
///
/// An account the chain has never seen is a cold wallet and starts at `"0"`.
/// Any other lookup failure is returned to the caller.
pub async fn resolve_nonce<A>(accounts: &A, address: &str) -> ChainResult<String>
where
    A: AccountLookup + ?Sized,
{
    let wallet = match accounts.account(address).await {
        Ok(wallet) => wallet,
        Err(ChainError::NotFound { .. }) => {
            tracing::debug!(address, "Cold wallet, starting at nonce 0");
            return Ok("0".to_string());
        }
        Err(e) => return Err(e),
    };

    let current: u64 = wallet.nonce.trim().parse().map_err(|_| ChainError::Decode {
        operation: "resolve nonce",
        target: address.to_string(),
        message: format!("nonce '{}' is not a non-negative integer", wallet.nonce),
    })?;

    let next = current.checked_add(1).ok_or_else(|| ChainError::Decode {
        operation: "resolve nonce",
        target: address.to_string(),
        message: "nonce overflow".to_string(),
    })?;

    tracing::debug!(address, current, next, "Resolved nonce");
    Ok(next.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct StubAccounts {
        result: Mutex<Option<ChainResult<WalletRecord>>>,
    }

    impl StubAccounts {
        fn new(result: ChainResult<WalletRecord>) -> Self {
            Self {
                result: Mutex::new(Some(result)),
            }
        }
    }

    #[async_trait]
    impl AccountLookup for StubAccounts {
        async fn account(&self, _id: &str) -> ChainResult<WalletRecord> {
            self.result
                .lock()
                .unwrap()
                .take()
                .expect("account looked up more than once")
        }
    }

    fn wallet_with_nonce(nonce: &str) -> WalletRecord {
        WalletRecord {
            address: "0xabc".to_string(),
            public_key: None,
            second_public_key: None,
            balance: "0".to_string(),
            nonce: nonce.to_string(),
        }
    }

    #[tokio::test]
    async fn test_cold_wallet_starts_at_zero() {
        let accounts = StubAccounts::new(Err(ChainError::NotFound {
            resource: "wallet",
            id: "0xabc".to_string(),
        }));
        assert_eq!(resolve_nonce(&accounts, "0xabc").await.unwrap(), "0");
    }

    #[tokio::test]
    async fn test_known_wallet_increments() {
        let accounts = StubAccounts::new(Ok(wallet_with_nonce("0")));
        assert_eq!(resolve_nonce(&accounts, "0xabc").await.unwrap(), "1");

        let accounts = StubAccounts::new(Ok(wallet_with_nonce("41")));
        assert_eq!(resolve_nonce(&accounts, "0xabc").await.unwrap(), "42");
    }

    #[tokio::test]
    async fn test_other_errors_propagate() {
        let accounts = StubAccounts::new(Err(ChainError::Http {
            operation: "get wallet",
            target: "0xabc".to_string(),
            status: 503,
            message: "unavailable".to_string(),
        }));
        let err = resolve_nonce(&accounts, "0xabc").await.unwrap_err();
        assert!(matches!(err, ChainError::Http { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_garbage_nonce_is_decode_error() {
        let accounts = StubAccounts::new(Ok(wallet_with_nonce("-3")));
        let err = resolve_nonce(&accounts, "0xabc").await.unwrap_err();
        assert!(matches!(err, ChainError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_overflow_is_rejected() {
        let accounts = StubAccounts::new(Ok(wallet_with_nonce(&u64::MAX.to_string())));
        assert!(resolve_nonce(&accounts, "0xabc").await.is_err());
    }
}
