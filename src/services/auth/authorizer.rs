/*
 * Responsibility
 * - 認可判定の本体 (secret 取得 → token 検証 → user 参照 → 判定)
 * - collaborator は trait 経由で注入 (テストダブル差し替え可能)
 * - 呼び出し間で状態を持たない (同じ入力なら同じ判定)
 */
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::services::auth::verifier::{TokenVerifier, VerifyError};
use crate::services::directory::{DirectoryError, UserDirectory};
use crate::services::secrets::{SecretStore, SecretsError};

/// One incoming authorization request, as handed over by the gateway.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub authorization_token: String,
}

impl AuthorizationRequest {
    pub fn new(authorization_token: impl Into<String>) -> Self {
        Self {
            authorization_token: authorization_token.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverContext {
    pub allowed_offices: String,
}

/// Decision returned to the gateway for downstream field-level enforcement.
///
/// Exactly one of three wire shapes:
/// - `{"isAuthorized": true}`
/// - `{"isAuthorized": true, "resolverContext": {"allowedOffices": "..."}}`
/// - `{"isAuthorized": false, "deniedFields": []}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationDecision {
    pub is_authorized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub denied_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolver_context: Option<ResolverContext>,
}

impl AuthorizationDecision {
    /// Full access, no scope restriction (privileged subjects).
    pub fn allow_unrestricted() -> Self {
        Self {
            is_authorized: true,
            denied_fields: None,
            resolver_context: None,
        }
    }

    /// Access limited to the given office scope token.
    pub fn allow_scoped(allowed_offices: String) -> Self {
        Self {
            is_authorized: true,
            denied_fields: None,
            resolver_context: Some(ResolverContext { allowed_offices }),
        }
    }

    /// Denial. `deniedFields` stays empty; populating it is the downstream
    /// field filter's concern, not ours.
    pub fn deny() -> Self {
        Self {
            is_authorized: false,
            denied_fields: Some(Vec::new()),
            resolver_context: None,
        }
    }
}

/// Error taxonomy for one authorization call.
///
/// `TokenRejected` is denial-shaped; the rest are system faults. The split
/// lets the HTTP layer answer 401 vs 500 instead of collapsing every failure
/// into one generic internal error.
#[derive(Debug, Error)]
pub enum AuthorizeError {
    #[error("token rejected: {0}")]
    TokenRejected(#[from] VerifyError),
    #[error("secret store failure: {0}")]
    SecretStore(#[from] SecretsError),
    #[error("user lookup failure: {0}")]
    UserLookup(#[from] DirectoryError),
    #[error("office scope encoding failed: {0}")]
    ScopeEncoding(#[from] serde_json::Error),
}

impl AuthorizeError {
    /// True when the failure means "this caller is not allowed", as opposed
    /// to "we could not decide".
    pub fn is_denial(&self) -> bool {
        matches!(self, Self::TokenRejected(_))
    }
}

/// The request gatekeeper: one `authorize` call per incoming API request.
pub struct RequestAuthorizer {
    secrets: Arc<dyn SecretStore>,
    directory: Arc<dyn UserDirectory>,
    verifier: TokenVerifier,
    secret_id: String,
    privileged_subjects: Vec<String>,
}

impl RequestAuthorizer {
    pub fn new(
        secrets: Arc<dyn SecretStore>,
        directory: Arc<dyn UserDirectory>,
        verifier: TokenVerifier,
        secret_id: String,
        privileged_subjects: Vec<String>,
    ) -> Self {
        Self {
            secrets,
            directory,
            verifier,
            secret_id,
            privileged_subjects,
        }
    }

    /// Authorize one request.
    ///
    /// Linear sequence: fetch secret → verify token → (privileged subjects
    /// short-circuit) → look up user record → decide. Each step depends on
    /// the previous one, so the I/O is strictly sequential. Read-only
    /// throughout; an aborted call leaves no partial state behind.
    pub async fn authorize(
        &self,
        req: &AuthorizationRequest,
    ) -> Result<AuthorizationDecision, AuthorizeError> {
        // Fetched fresh every call so a rotated secret takes effect on the
        // next request. No caching, no retry, no fallback key.
        let secret = self.secrets.get_secret(&self.secret_id).await?;

        let claims = self.verifier.verify(&req.authorization_token, &secret)?;
        let subject = claims.sub;

        if self.is_privileged(&subject) {
            tracing::debug!(subject = %subject, "privileged subject, skipping directory lookup");
            return Ok(AuthorizationDecision::allow_unrestricted());
        }

        let Some(record) = self.directory.find(&subject).await? else {
            tracing::debug!(subject = %subject, "no directory record, denying");
            return Ok(AuthorizationDecision::deny());
        };

        let allowed_offices = record.office_id.to_scope_token()?;
        tracing::debug!(subject = %record.subject, "directory record found, scoping to offices");

        Ok(AuthorizationDecision::allow_scoped(allowed_offices))
    }

    fn is_privileged(&self, subject: &str) -> bool {
        self.privileged_subjects.iter().any(|s| s == subject)
    }
}
