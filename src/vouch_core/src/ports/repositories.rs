use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    account::Account,
    email::Email,
    verification_token::{TokenValue, VerificationToken},
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("Account already exists")]
    AccountAlreadyExists,
    #[error("Account not found")]
    AccountNotFound,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::AccountAlreadyExists, Self::AccountAlreadyExists) => true,
            (Self::AccountNotFound, Self::AccountNotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Durable source of truth for accounts, their password hashes, and their
/// verification state.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new account. Fails with [`UserStoreError::AccountAlreadyExists`]
    /// if the normalized email is already taken.
    async fn add_account(&self, account: Account) -> Result<(), UserStoreError>;

    /// Exact lookup on the normalized email.
    async fn find_by_email(&self, email: &Email) -> Result<Account, UserStoreError>;

    /// Set `verified_at` for the account. Idempotent in effect: once set, the
    /// timestamp never regresses, and re-invocation is a no-op.
    async fn mark_verified(&self, email: &Email, when: DateTime<Utc>)
    -> Result<(), UserStoreError>;

    /// Number of stored accounts. Diagnostic only.
    async fn count(&self) -> Result<u64, UserStoreError>;
}

// VerificationTokenStore port trait and errors
#[derive(Debug, Error)]
pub enum VerificationTokenStoreError {
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

/// Storage for live verification tokens, keyed by their token value.
///
/// Consumed and expired tokens are represented by absence: there is no
/// tombstone state, and replays against a removed record report nothing
/// found.
#[async_trait]
pub trait VerificationTokenStore: Send + Sync {
    /// Persist a token record.
    async fn put(&self, token: VerificationToken) -> Result<(), VerificationTokenStoreError>;

    /// Atomically remove and return the record for `token`, if present.
    ///
    /// This is the double-redeem guard: under concurrent redemption of the
    /// same token, exactly one caller observes the record. Implementations
    /// must use a conditional delete, never separate read-then-delete steps.
    async fn take(
        &self,
        token: &TokenValue,
    ) -> Result<Option<VerificationToken>, VerificationTokenStoreError>;

    /// Remove every live token issued for `identifier`. Used to supersede
    /// prior links when a new one is issued.
    async fn remove_for_identifier(
        &self,
        identifier: &Email,
    ) -> Result<(), VerificationTokenStoreError>;
}
