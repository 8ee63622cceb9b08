use vouch_core::{Clock, Email, VerificationToken, VerificationTokenStore, VerificationTokenStoreError};

/// Error types specific to token issuance
#[derive(Debug, thiserror::Error)]
pub enum IssueVerificationError {
    #[error("Verification token store error: {0}")]
    TokenStore(#[from] VerificationTokenStoreError),
}

/// Issue verification use case - creates a single-use, time-bounded token
/// proving control of an email address.
///
/// At most one live token exists per identifier: issuing a new one removes
/// any prior live token, so stale links stop working the moment a fresh one
/// is sent.
#[derive(Clone)]
pub struct IssueVerificationUseCase<T, C>
where
    T: VerificationTokenStore,
    C: Clock,
{
    token_store: T,
    clock: C,
}

impl<T, C> IssueVerificationUseCase<T, C>
where
    T: VerificationTokenStore,
    C: Clock,
{
    pub fn new(token_store: T, clock: C) -> Self {
        Self { token_store, clock }
    }

    /// Execute the issuance use case
    ///
    /// # Arguments
    /// * `identifier` - Email address the token attests to. It does not have
    ///   to reference an existing account yet; the lookup that matters
    ///   happens at redemption.
    ///
    /// # Returns
    /// The persisted token, for the caller to hand to the mailer boundary.
    #[tracing::instrument(name = "IssueVerificationUseCase::execute", skip_all)]
    pub async fn execute(&self, identifier: Email) -> Result<VerificationToken, IssueVerificationError> {
        // Supersede any live token for this identifier before inserting.
        self.token_store.remove_for_identifier(&identifier).await?;

        let token = VerificationToken::issue(identifier, self.clock.now());
        self.token_store.put(token.clone()).await?;

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{email, ManualClock, MemoryTokenStore};
    use chrono::Utc;
    use vouch_core::VERIFICATION_TOKEN_TTL;

    #[tokio::test]
    async fn issued_token_expires_24_hours_out() {
        let now = Utc::now();
        let use_case = IssueVerificationUseCase::new(MemoryTokenStore::new(), ManualClock::new(now));

        let token = use_case.execute(email("alice@example.com")).await.unwrap();

        assert_eq!(token.expires_at(), now + VERIFICATION_TOKEN_TTL);
        assert_eq!(token.identifier(), &email("alice@example.com"));
    }

    #[tokio::test]
    async fn issued_token_is_persisted() {
        let store = MemoryTokenStore::new();
        let use_case = IssueVerificationUseCase::new(store.clone(), ManualClock::new(Utc::now()));

        let token = use_case.execute(email("alice@example.com")).await.unwrap();

        assert!(store.contains(token.value()));
    }

    #[tokio::test]
    async fn new_token_supersedes_the_previous_one() {
        let store = MemoryTokenStore::new();
        let use_case = IssueVerificationUseCase::new(store.clone(), ManualClock::new(Utc::now()));

        let first = use_case.execute(email("alice@example.com")).await.unwrap();
        let second = use_case.execute(email("alice@example.com")).await.unwrap();

        assert!(!store.contains(first.value()));
        assert!(store.contains(second.value()));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn tokens_for_other_identifiers_are_untouched() {
        let store = MemoryTokenStore::new();
        let use_case = IssueVerificationUseCase::new(store.clone(), ManualClock::new(Utc::now()));

        let alice = use_case.execute(email("alice@example.com")).await.unwrap();
        let bob = use_case.execute(email("bob@example.com")).await.unwrap();

        assert!(store.contains(alice.value()));
        assert!(store.contains(bob.value()));
    }
}
