//! Fingerprint backend client.
//!
//! Turns a token type and an explicit value (a name, a handle) into the
//! deterministic identifier used as the token id.

use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::blockchain::client::parse_base_url;
use crate::blockchain::types::{ChainError, ChainResult, Envelope, TokenType};

#[derive(Debug, Deserialize)]
struct FingerprintData {
    fingerprint: String,
}

#[derive(Debug, Clone)]
pub struct FingerprintClient {
    http: reqwest::Client,
    base_url: Url,
}

impl FingerprintClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> ChainResult<Self> {
        let base_url = parse_base_url(base_url)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ChainError::InvalidUrl {
                url: base_url.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { http, base_url })
    }

    /// Compute the fingerprint of `explicit_value` for `token_type`.
    pub async fn compute(
        &self,
        token_type: TokenType,
        explicit_value: &str,
    ) -> ChainResult<String> {
        const OPERATION: &str = "compute fingerprint";

        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("fingerprint");
        }

        tracing::debug!(url = %url, token_type = token_type.name(), "Computing fingerprint");

        let transport = |source: reqwest::Error| ChainError::Transport {
            operation: OPERATION,
            target: explicit_value.to_string(),
            source,
        };

        let response = self
            .http
            .post(url)
            .json(&serde_json::json!({
                "type": token_type.name(),
                "explicitValue": explicit_value,
            }))
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(ChainError::Http {
                operation: OPERATION,
                target: explicit_value.to_string(),
                status: status.as_u16(),
                message: body.trim().chars().take(200).collect(),
            });
        }

        let envelope: Envelope<FingerprintData> =
            serde_json::from_str(&body).map_err(|e| ChainError::Decode {
                operation: OPERATION,
                target: explicit_value.to_string(),
                message: e.to_string(),
            })?;

        Ok(envelope.data.fingerprint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(FingerprintClient::new("fingerprint.local", 5).is_err());
        assert!(FingerprintClient::new("http://localhost:4004/api", 5).is_ok());
    }

    #[test]
    fn test_fingerprint_envelope() {
        let envelope: Envelope<FingerprintData> =
            serde_json::from_str(r#"{"data":{"fingerprint":"abcd"}}"#).unwrap();
        assert_eq!(envelope.data.fingerprint, "abcd");
    }
}
