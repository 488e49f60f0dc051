use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

use crate::services::secrets::SecretMaterial;

// Errors returned by token verification + claim validation.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("empty 'sub' claim")]
    EmptySub,
}

/// Bearer-token (JWT) claims the authorizer cares about.
///
/// NOTE:
/// - `sub` is an opaque subject identifier here, not a UUID; the directory
///   key uses whatever the token issuer put in.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub exp: u64,
}

/// HS256 token verifier.
///
/// Holds only validation settings. The decoding key is rebuilt per call
/// because the secret is fetched fresh per authorization, so rotation takes
/// effect immediately.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(leeway_seconds: u64) -> Self {
        // `Validation::new` already requires and checks `exp`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_seconds;

        Self { validation }
    }

    /// Verify signature + expiry and decode the claims.
    ///
    /// `jsonwebtoken` rejects bad signatures, expired tokens (modulo
    /// leeway), and malformed input; on top of that we refuse a blank `sub`
    /// since everything downstream keys off it.
    pub fn verify(
        &self,
        token: &str,
        secret: &SecretMaterial,
    ) -> Result<TokenClaims, VerifyError> {
        let key = DecodingKey::from_secret(secret.key_bytes());
        let data = jsonwebtoken::decode::<TokenClaims>(token, &key, &self.validation)?;

        if data.claims.sub.trim().is_empty() {
            return Err(VerifyError::EmptySub);
        }

        tracing::trace!(sub = %data.claims.sub, exp = data.claims.exp, "token verified");

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::errors::ErrorKind;
    use jsonwebtoken::{EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        exp: i64,
    }

    fn sign(sub: &str, exp: i64, key: &str) -> String {
        let claims = TestClaims {
            sub: sub.to_string(),
            exp,
        };
        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(key.as_bytes()),
        )
        .unwrap()
    }

    fn in_one_hour() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    #[test]
    fn accepts_validly_signed_token() {
        let verifier = TokenVerifier::new(0);
        let token = sign("u2", in_one_hour(), "top-secret");

        let claims = verifier
            .verify(&token, &SecretMaterial::from_key("top-secret"))
            .unwrap();
        assert_eq!(claims.sub, "u2");
    }

    #[test]
    fn rejects_wrong_key() {
        let verifier = TokenVerifier::new(0);
        let token = sign("u2", in_one_hour(), "top-secret");

        let err = verifier
            .verify(&token, &SecretMaterial::from_key("other-secret"))
            .unwrap_err();
        match err {
            VerifyError::Jwt(e) => assert!(matches!(e.kind(), ErrorKind::InvalidSignature)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_expired_token() {
        let verifier = TokenVerifier::new(0);
        let token = sign("u2", chrono::Utc::now().timestamp() - 3600, "top-secret");

        let err = verifier
            .verify(&token, &SecretMaterial::from_key("top-secret"))
            .unwrap_err();
        match err {
            VerifyError::Jwt(e) => assert!(matches!(e.kind(), ErrorKind::ExpiredSignature)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn leeway_tolerates_slightly_stale_exp() {
        let verifier = TokenVerifier::new(120);
        let token = sign("u2", chrono::Utc::now().timestamp() - 30, "top-secret");

        assert!(
            verifier
                .verify(&token, &SecretMaterial::from_key("top-secret"))
                .is_ok()
        );
    }

    #[test]
    fn rejects_malformed_token() {
        let verifier = TokenVerifier::new(0);

        let err = verifier
            .verify("not-a-jwt", &SecretMaterial::from_key("top-secret"))
            .unwrap_err();
        assert!(matches!(err, VerifyError::Jwt(_)));
    }

    #[test]
    fn rejects_blank_sub() {
        let verifier = TokenVerifier::new(0);
        let token = sign("   ", in_one_hour(), "top-secret");

        let err = verifier
            .verify(&token, &SecretMaterial::from_key("top-secret"))
            .unwrap_err();
        assert!(matches!(err, VerifyError::EmptySub));
    }
}
