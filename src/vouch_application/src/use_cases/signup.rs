use vouch_core::{
    Account, Clock, Email, EmailClient, Password, PasswordScheme, UserStore, UserStoreError,
    VerificationTokenStore,
};

use crate::use_cases::issue_verification::{IssueVerificationError, IssueVerificationUseCase};
use crate::verification_mail;

/// Error types specific to the signup use case
#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    #[error("Account already exists")]
    AccountAlreadyExists,
    #[error("Failed to hash password: {0}")]
    PasswordHash(String),
    #[error("User store error: {0}")]
    UserStore(UserStoreError),
    #[error(transparent)]
    Issue(#[from] IssueVerificationError),
    /// The account and its token were persisted but the mail could not be
    /// delivered. The link stays valid; the user can request a re-send.
    #[error("Failed to send verification email: {0}")]
    EmailDelivery(String),
}

/// Signup use case - creates an unverified account and sends its first
/// verification link.
#[derive(Clone)]
pub struct SignupUseCase<U, T, P, E, C>
where
    U: UserStore,
    T: VerificationTokenStore,
    P: PasswordScheme,
    E: EmailClient,
    C: Clock,
{
    user_store: U,
    password_scheme: P,
    email_client: E,
    issuer: IssueVerificationUseCase<T, C>,
    base_url: String,
}

impl<U, T, P, E, C> SignupUseCase<U, T, P, E, C>
where
    U: UserStore,
    T: VerificationTokenStore,
    P: PasswordScheme,
    E: EmailClient,
    C: Clock,
{
    pub fn new(
        user_store: U,
        token_store: T,
        password_scheme: P,
        email_client: E,
        clock: C,
        base_url: String,
    ) -> Self {
        Self {
            user_store,
            password_scheme,
            email_client,
            issuer: IssueVerificationUseCase::new(token_store, clock),
            base_url,
        }
    }

    /// Execute the signup use case
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password` - Validated password
    /// * `display_name` - Optional name shown in the dashboard
    #[tracing::instrument(name = "SignupUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
        display_name: Option<String>,
    ) -> Result<(), SignupError> {
        let password_hash = self
            .password_scheme
            .hash_password(&password)
            .await
            .map_err(SignupError::PasswordHash)?;

        let account = Account::new(email.clone(), Some(password_hash), display_name);
        match self.user_store.add_account(account).await {
            Ok(()) => {}
            Err(UserStoreError::AccountAlreadyExists) => {
                return Err(SignupError::AccountAlreadyExists);
            }
            Err(error) => return Err(SignupError::UserStore(error)),
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
            .map_err(SignupError::EmailDelivery)?;

        Ok(())
    }
}
