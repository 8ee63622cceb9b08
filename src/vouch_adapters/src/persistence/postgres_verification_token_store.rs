use chrono::{DateTime, Utc};
use secrecy::Secret;
use sqlx::{PgPool, Pool, Postgres, Row};

use vouch_core::{
    Email, TokenValue, VerificationToken, VerificationTokenStore, VerificationTokenStoreError,
};

/// Token store backed by the `verification_tokens` table.
#[derive(Clone)]
pub struct PostgresVerificationTokenStore {
    pool: PgPool,
}

impl PostgresVerificationTokenStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresVerificationTokenStore { pool }
    }
}

#[async_trait::async_trait]
impl VerificationTokenStore for PostgresVerificationTokenStore {
    #[tracing::instrument(name = "Persisting verification token in PostgreSQL", skip_all)]
    async fn put(&self, token: VerificationToken) -> Result<(), VerificationTokenStoreError> {
        sqlx::query(
            r#"
                INSERT INTO verification_tokens (token, identifier, expires_at)
                VALUES ($1, $2, $3)
            "#,
        )
        .bind(token.value().as_str())
        .bind(token.identifier().as_str())
        .bind(token.expires_at())
        .execute(&self.pool)
        .await
        .map_err(|e| VerificationTokenStoreError::UnexpectedError(e.to_string()))?;

        Ok(())
    }

    #[tracing::instrument(name = "Consuming verification token in PostgreSQL", skip_all)]
    async fn take(
        &self,
        token: &TokenValue,
    ) -> Result<Option<VerificationToken>, VerificationTokenStoreError> {
        // Single conditional delete: of N concurrent redemptions, exactly one
        // gets the returned row.
        let row = sqlx::query(
            r#"
                DELETE FROM verification_tokens
                WHERE token = $1
                RETURNING token, identifier, expires_at
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| VerificationTokenStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let unexpected = |e: sqlx::Error| VerificationTokenStoreError::UnexpectedError(e.to_string());

        let value: String = row.try_get("token").map_err(unexpected)?;
        let identifier: String = row.try_get("identifier").map_err(unexpected)?;
        let expires_at: DateTime<Utc> = row.try_get("expires_at").map_err(unexpected)?;

        let value = TokenValue::parse(value)
            .map_err(|e| VerificationTokenStoreError::UnexpectedError(e.to_string()))?;
        let identifier = Email::try_from(Secret::from(identifier))
            .map_err(|e| VerificationTokenStoreError::UnexpectedError(e.to_string()))?;

        Ok(Some(VerificationToken::parse(value, identifier, expires_at)))
    }

    #[tracing::instrument(name = "Superseding verification tokens in PostgreSQL", skip_all)]
    async fn remove_for_identifier(
        &self,
        identifier: &Email,
    ) -> Result<(), VerificationTokenStoreError> {
        sqlx::query("DELETE FROM verification_tokens WHERE identifier = $1")
            .bind(identifier.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| VerificationTokenStoreError::UnexpectedError(e.to_string()))?;

        Ok(())
    }
}
