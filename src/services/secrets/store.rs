//! Secret-store interface used by the request authorizer.
use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Result type for secret-store operations.
pub type SecretResult<T> = Result<T, SecretsError>;

/// Secret-store errors.
///
/// Note:
/// - Kept independent from `AppError` so callers can decide how to fail.
///   The authorizer fails closed on all of these.
#[derive(Debug, Error)]
pub enum SecretsError {
    #[error("secret backend error: {0}")]
    Backend(String),
    #[error("secret not found: {0}")]
    NotFound(String),
    #[error("secret payload invalid: {0}")]
    InvalidPayload(String),
}

/// Verification-key material for one authorization call.
///
/// The store keeps a JSON payload (`{"secretKey": "..."}`); only the key
/// string survives parsing, and only for the duration of one call.
#[derive(Clone)]
pub struct SecretMaterial {
    secret_key: String,
}

impl SecretMaterial {
    /// Parse the stored payload. An empty key is treated as invalid rather
    /// than handed to the verifier.
    pub fn from_payload(payload: &str) -> SecretResult<Self> {
        #[derive(Deserialize)]
        struct SecretPayload {
            #[serde(rename = "secretKey")]
            secret_key: String,
        }

        let parsed: SecretPayload = serde_json::from_str(payload)
            .map_err(|e| SecretsError::InvalidPayload(e.to_string()))?;

        if parsed.secret_key.is_empty() {
            return Err(SecretsError::InvalidPayload("empty secretKey".to_string()));
        }

        Ok(Self {
            secret_key: parsed.secret_key,
        })
    }

    #[cfg(test)]
    pub fn from_key(secret_key: &str) -> Self {
        Self {
            secret_key: secret_key.to_string(),
        }
    }

    pub fn key_bytes(&self) -> &[u8] {
        self.secret_key.as_bytes()
    }
}

impl fmt::Debug for SecretMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("SecretMaterial").finish_non_exhaustive()
    }
}

/// A minimal secret-store interface.
///
/// One read-only operation: the authorizer fetches the verification key
/// fresh per invocation (no caching, no retry), so a rotated secret takes
/// effect on the next call.
#[async_trait]
pub trait SecretStore: Send + Sync + 'static {
    // Returns the backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Fetch the current secret by its configured identifier.
    async fn get_secret(&self, secret_id: &str) -> SecretResult<SecretMaterial>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_payload() {
        let material = SecretMaterial::from_payload(r#"{"secretKey": "s3cr3t"}"#).unwrap();
        assert_eq!(material.key_bytes(), b"s3cr3t");
    }

    #[test]
    fn rejects_malformed_payload() {
        let err = SecretMaterial::from_payload("not json").unwrap_err();
        assert!(matches!(err, SecretsError::InvalidPayload(_)));
    }

    #[test]
    fn rejects_missing_or_empty_key() {
        let err = SecretMaterial::from_payload(r#"{"other": "x"}"#).unwrap_err();
        assert!(matches!(err, SecretsError::InvalidPayload(_)));

        let err = SecretMaterial::from_payload(r#"{"secretKey": ""}"#).unwrap_err();
        assert!(matches!(err, SecretsError::InvalidPayload(_)));
    }

    #[test]
    fn debug_does_not_leak_key_material() {
        let material = SecretMaterial::from_payload(r#"{"secretKey": "s3cr3t"}"#).unwrap();
        let rendered = format!("{:?}", material);
        assert!(!rendered.contains("s3cr3t"));
    }
}
