use secrecy::Secret;
use vouch_core::{AccountSummary, Email, Password, PasswordScheme, UserStore, UserStoreError};

/// Error types specific to the login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Empty or missing email/password. Always safe to reveal.
    #[error("Email and password are required")]
    MalformedInput,
    /// Deliberately ambiguous: covers unknown account, wrong password, and
    /// externally-managed accounts alike, so responses cannot be used to
    /// enumerate accounts.
    #[error("Invalid email or password")]
    InvalidCredentials,
    /// The password was correct but the email is not verified yet. Only
    /// reported after the password proof, so it reveals nothing a correct
    /// login would not.
    #[error("Please verify your email address before signing in")]
    AccountNotVerified,
    #[error("User store error: {0}")]
    UserStore(UserStoreError),
}

/// Login use case - decides whether an email/password pair authorizes a
/// session.
///
/// Authentication never mutates state; turning a success into a session is
/// the caller's business.
#[derive(Clone)]
pub struct LoginUseCase<U, P>
where
    U: UserStore,
    P: PasswordScheme,
{
    user_store: U,
    password_scheme: P,
}

impl<U, P> LoginUseCase<U, P>
where
    U: UserStore,
    P: PasswordScheme,
{
    pub fn new(user_store: U, password_scheme: P) -> Self {
        Self {
            user_store,
            password_scheme,
        }
    }

    /// Execute the login use case
    ///
    /// # Arguments
    /// * `email` - Submitted email address, unvalidated
    /// * `password` - Submitted password, unvalidated
    ///
    /// # Returns
    /// The account summary on success - id, email, display name, and
    /// verification timestamp, never the password hash.
    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Secret<String>,
        password: Secret<String>,
    ) -> Result<AccountSummary, LoginError> {
        let email = Email::try_from(email).map_err(|_| LoginError::MalformedInput)?;
        let password = Password::try_from(password).map_err(|_| LoginError::MalformedInput)?;

        let account = match self.user_store.find_by_email(&email).await {
            Ok(account) => account,
            Err(UserStoreError::AccountNotFound) => return Err(LoginError::InvalidCredentials),
            Err(error) => return Err(LoginError::UserStore(error)),
        };

        // Accounts without a password hash authenticate elsewhere; credential
        // login treats them the same as a wrong password.
        let Some(expected_hash) = account.password_hash() else {
            return Err(LoginError::InvalidCredentials);
        };

        if !self
            .password_scheme
            .verify_password(&password, expected_hash)
            .await
        {
            return Err(LoginError::InvalidCredentials);
        }

        // Only after the password has been proven correct.
        if !account.is_verified() {
            return Err(LoginError::AccountNotVerified);
        }

        Ok(account.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{email, password, secret, MemoryUserStore, PlainTextScheme};
    use chrono::Utc;
    use vouch_core::Account;

    async fn store_with_account(address: &str, pass: &str, verified: bool) -> MemoryUserStore {
        let store = MemoryUserStore::new();
        let hash = PlainTextScheme
            .hash_password(&password(pass))
            .await
            .unwrap();
        let mut account = Account::new(email(address), Some(hash), Some("Alice".to_string()));
        if verified {
            account.mark_verified(Utc::now());
        }
        store.add_account(account).await.unwrap();
        store
    }

    fn use_case(store: MemoryUserStore) -> LoginUseCase<MemoryUserStore, PlainTextScheme> {
        LoginUseCase::new(store, PlainTextScheme)
    }

    #[tokio::test]
    async fn correct_password_on_verified_account_succeeds() {
        let store = store_with_account("alice@example.com", "S3cret!", true).await;
        let summary = use_case(store)
            .execute(secret("alice@example.com"), secret("S3cret!"))
            .await
            .unwrap();

        assert_eq!(summary.email, "alice@example.com");
        assert_eq!(summary.display_name.as_deref(), Some("Alice"));
        assert!(summary.verified_at.is_some());
    }

    #[tokio::test]
    async fn email_is_normalized_before_lookup() {
        let store = store_with_account("alice@example.com", "S3cret!", true).await;
        let result = use_case(store)
            .execute(secret("  ALICE@Example.Com "), secret("S3cret!"))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let store = store_with_account("alice@example.com", "S3cret!", true).await;
        let result = use_case(store)
            .execute(secret("alice@example.com"), secret("wrong"))
            .await;
        assert!(matches!(result, Err(LoginError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn unknown_email_is_invalid_credentials_not_not_found() {
        let store = store_with_account("alice@example.com", "S3cret!", true).await;
        let result = use_case(store)
            .execute(secret("nobody@example.com"), secret("S3cret!"))
            .await;
        assert!(matches!(result, Err(LoginError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn external_identity_account_is_invalid_credentials() {
        let store = MemoryUserStore::new();
        let mut account = Account::new(email("sso@example.com"), None, None);
        account.mark_verified(Utc::now());
        store.add_account(account).await.unwrap();

        let result = use_case(store)
            .execute(secret("sso@example.com"), secret("anything"))
            .await;
        assert!(matches!(result, Err(LoginError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn correct_password_on_unverified_account_is_not_verified() {
        let store = store_with_account("bob@example.com", "S3cret!", false).await;
        let result = use_case(store)
            .execute(secret("bob@example.com"), secret("S3cret!"))
            .await;
        assert!(matches!(result, Err(LoginError::AccountNotVerified)));
    }

    #[tokio::test]
    async fn wrong_password_on_unverified_account_stays_ambiguous() {
        // The verification gate must not fire before the password proof,
        // or it would leak which addresses have accounts.
        let store = store_with_account("bob@example.com", "S3cret!", false).await;
        let result = use_case(store)
            .execute(secret("bob@example.com"), secret("wrong"))
            .await;
        assert!(matches!(result, Err(LoginError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn empty_email_is_malformed_input() {
        let store = store_with_account("alice@example.com", "S3cret!", true).await;
        let result = use_case(store).execute(secret(""), secret("x")).await;
        assert!(matches!(result, Err(LoginError::MalformedInput)));
    }

    #[tokio::test]
    async fn empty_password_is_malformed_input() {
        let store = store_with_account("a@b.com", "S3cret!", true).await;
        let result = use_case(store).execute(secret("a@b.com"), secret("")).await;
        assert!(matches!(result, Err(LoginError::MalformedInput)));
    }

    #[tokio::test]
    async fn login_does_not_mutate_the_store() {
        let store = store_with_account("bob@example.com", "S3cret!", false).await;
        let before = store.get(&email("bob@example.com")).unwrap();

        let _ = use_case(store.clone())
            .execute(secret("bob@example.com"), secret("S3cret!"))
            .await;

        let after = store.get(&email("bob@example.com")).unwrap();
        assert_eq!(after.verified_at(), before.verified_at());
        assert_eq!(after.id(), before.id());
    }
}
