use vouch_core::{
    Clock, Email, TokenValue, UserStore, UserStoreError, VerificationTokenStore,
    VerificationTokenStoreError,
};

/// Error types specific to token redemption
#[derive(Debug, thiserror::Error)]
pub enum RedeemVerificationError {
    /// No record exists for the presented value: unknown or already consumed.
    /// Terminal and non-retryable.
    #[error("Verification link is invalid")]
    InvalidToken,
    /// The record existed but its deadline had passed. The record has been
    /// removed; the caller should offer a fresh link.
    #[error("Verification link has expired")]
    ExpiredToken,
    /// The token was valid but no account matches its identifier. The token
    /// has been restored, nothing was marked.
    #[error("No account matches the verified address")]
    UnknownIdentifier,
    #[error("User store error: {0}")]
    UserStore(UserStoreError),
    #[error("Verification token store error: {0}")]
    TokenStore(#[from] VerificationTokenStoreError),
}

/// Redeem verification use case - consumes a token exactly once and flips the
/// matching account to verified.
///
/// Consuming the token and marking the account must be observable together.
/// The store's `take` is an atomic conditional remove, so of two concurrent
/// redemptions exactly one sees the record; if marking the account then
/// fails, the record is put back so the token is not half-consumed.
#[derive(Clone)]
pub struct RedeemVerificationUseCase<T, U, C>
where
    T: VerificationTokenStore,
    U: UserStore,
    C: Clock,
{
    token_store: T,
    user_store: U,
    clock: C,
}

impl<T, U, C> RedeemVerificationUseCase<T, U, C>
where
    T: VerificationTokenStore,
    U: UserStore,
    C: Clock,
{
    pub fn new(token_store: T, user_store: U, clock: C) -> Self {
        Self {
            token_store,
            user_store,
            clock,
        }
    }

    /// Execute the redemption use case
    ///
    /// # Returns
    /// The identifier the token attested to, with the matching account now
    /// verified.
    #[tracing::instrument(name = "RedeemVerificationUseCase::execute", skip_all)]
    pub async fn execute(&self, token: &TokenValue) -> Result<Email, RedeemVerificationError> {
        let Some(record) = self.token_store.take(token).await? else {
            return Err(RedeemVerificationError::InvalidToken);
        };

        let now = self.clock.now();
        if record.is_expired(now) {
            // Cleanup-on-read: the record is already gone, a replay of the
            // same value now correctly reports InvalidToken.
            tracing::info!("expired verification token removed");
            return Err(RedeemVerificationError::ExpiredToken);
        }

        match self.user_store.mark_verified(record.identifier(), now).await {
            Ok(()) => Ok(record.identifier().clone()),
            Err(error) => {
                // Restore the record so a transient fault does not burn the
                // user's only link.
                let outcome = match error {
                    UserStoreError::AccountNotFound => RedeemVerificationError::UnknownIdentifier,
                    other => RedeemVerificationError::UserStore(other),
                };
                self.token_store.put(record).await?;
                Err(outcome)
            }
        }
    }
}
