use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Pool, Postgres, Row, postgres::PgRow};
use uuid::Uuid;

use vouch_core::{Account, Email, UserStore, UserStoreError};

/// Credential store backed by the `accounts` table.
#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresUserStore { pool }
    }
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding account to PostgreSQL", skip_all)]
    async fn add_account(&self, account: Account) -> Result<(), UserStoreError> {
        let query = sqlx::query(
            r#"
                INSERT INTO accounts (id, email, password_hash, display_name, verified_at)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(account.id())
        .bind(account.email().as_str())
        .bind(account.password_hash().map(|h| h.expose_secret().clone()))
        .bind(account.display_name())
        .bind(account.verified_at());

        query.execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return UserStoreError::AccountAlreadyExists;
                }
            }
            UserStoreError::UnexpectedError(e.to_string())
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving account from PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Account, UserStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, email, password_hash, display_name, verified_at
                FROM accounts
                WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(UserStoreError::AccountNotFound);
        };

        account_from_row(&row)
    }

    #[tracing::instrument(name = "Marking account verified in PostgreSQL", skip_all)]
    async fn mark_verified(
        &self,
        email: &Email,
        when: DateTime<Utc>,
    ) -> Result<(), UserStoreError> {
        // The predicate enforces monotonicity in the database: once set, the
        // timestamp cannot be replaced.
        let result = sqlx::query(
            r#"
                UPDATE accounts
                SET verified_at = $2
                WHERE email = $1 AND verified_at IS NULL
            "#,
        )
        .bind(email.as_str())
        .bind(when)
        .execute(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        // Zero rows: either the account does not exist, or it is already
        // verified and the call is an idempotent no-op.
        let exists = sqlx::query("SELECT 1 FROM accounts WHERE email = $1")
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        match exists {
            Some(_) => Ok(()),
            None => Err(UserStoreError::AccountNotFound),
        }
    }

    #[tracing::instrument(name = "Counting accounts in PostgreSQL", skip_all)]
    async fn count(&self) -> Result<u64, UserStoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM accounts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let count: i64 = row
            .try_get("count")
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        Ok(count as u64)
    }
}

fn account_from_row(row: &PgRow) -> Result<Account, UserStoreError> {
    let unexpected = |e: sqlx::Error| UserStoreError::UnexpectedError(e.to_string());

    let id: Uuid = row.try_get("id").map_err(unexpected)?;
    let email: String = row.try_get("email").map_err(unexpected)?;
    let password_hash: Option<String> = row.try_get("password_hash").map_err(unexpected)?;
    let display_name: Option<String> = row.try_get("display_name").map_err(unexpected)?;
    let verified_at: Option<DateTime<Utc>> = row.try_get("verified_at").map_err(unexpected)?;

    let email = Email::try_from(Secret::from(email))
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

    Ok(Account::parse(
        id,
        email,
        password_hash.map(Secret::from),
        display_name,
        verified_at,
    ))
}
