use vouch_core::{
    Clock, Email, EmailClient, UserStore, UserStoreError, VerificationTokenStore,
};

use crate::use_cases::issue_verification::{IssueVerificationError, IssueVerificationUseCase};
use crate::verification_mail;

/// Error types specific to the re-send use case
#[derive(Debug, thiserror::Error)]
pub enum ResendVerificationError {
    #[error("User store error: {0}")]
    UserStore(UserStoreError),
    #[error(transparent)]
    Issue(#[from] IssueVerificationError),
    #[error("Failed to send verification email: {0}")]
    EmailDelivery(String),
}

/// Re-send verification use case - issues a fresh link for an existing,
/// still-unverified account.
///
/// The outcome is identical whether the address has an account, has none, or
/// is already verified; only a delivery or store fault surfaces. Anything
/// else would let the endpoint be used to enumerate accounts.
#[derive(Clone)]
pub struct ResendVerificationUseCase<U, T, E, C>
where
    U: UserStore,
    T: VerificationTokenStore,
    E: EmailClient,
    C: Clock,
{
    user_store: U,
    email_client: E,
    issuer: IssueVerificationUseCase<T, C>,
    base_url: String,
}

impl<U, T, E, C> ResendVerificationUseCase<U, T, E, C>
where
    U: UserStore,
    T: VerificationTokenStore,
    E: EmailClient,
    C: Clock,
{
    pub fn new(user_store: U, token_store: T, email_client: E, clock: C, base_url: String) -> Self {
        Self {
            user_store,
            email_client,
            issuer: IssueVerificationUseCase::new(token_store, clock),
            base_url,
        }
    }

    /// Execute the re-send use case
    #[tracing::instrument(name = "ResendVerificationUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email) -> Result<(), ResendVerificationError> {
        let account = match self.user_store.find_by_email(&email).await {
            Ok(account) => account,
            Err(UserStoreError::AccountNotFound) => {
                tracing::info!("re-send requested for unknown address");
                return Ok(());
            }
            Err(error) => return Err(ResendVerificationError::UserStore(error)),
        };

        if account.is_verified() {
            tracing::info!("re-send requested for already-verified account");
            return Ok(());
        }

        let token = self.issuer.execute(email.clone()).await?;

        let url = verification_mail::verification_url(&self.base_url, token.value());
        self.email_client
            .send_email(
                &email,
                verification_mail::VERIFICATION_SUBJECT,
                &verification_mail::verification_body(&url),
            )
            .await
            .map_err(ResendVerificationError::EmailDelivery)?;

        Ok(())
    }
}
