use async_trait::async_trait;
use sqlx::PgPool;

use crate::services::secrets::store::{SecretMaterial, SecretResult, SecretStore, SecretsError};

/// Postgres-backed secret store.
///
/// Single-row lookup in the `secrets` table. The payload format (JSON with
/// a `secretKey` field) is handled by `SecretMaterial::from_payload`.
#[derive(Clone, Debug)]
pub struct PgSecretStore {
    db: PgPool,
}

impl PgSecretStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SecretStore for PgSecretStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn get_secret(&self, secret_id: &str) -> SecretResult<SecretMaterial> {
        let row: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT "secretString"
            FROM secrets
            WHERE "secretId" = $1
            "#,
        )
        .bind(secret_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| SecretsError::Backend(e.to_string()))?;

        let (payload,) = row.ok_or_else(|| SecretsError::NotFound(secret_id.to_string()))?;

        SecretMaterial::from_payload(&payload)
    }
}
