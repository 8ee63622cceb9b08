use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::Secret;

use crate::domain::{email::Email, password::Password};

/// Port trait for email sending service
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}

/// Port trait for the slow, salted password hash used by signup and login.
#[async_trait]
pub trait PasswordScheme: Send + Sync {
    /// Produce a salted one-way hash for storage.
    async fn hash_password(&self, password: &Password) -> Result<Secret<String>, String>;

    /// Compare a candidate against a stored hash. Deliberately expensive;
    /// a stored hash that fails to parse counts as a mismatch.
    async fn verify_password(&self, candidate: &Password, expected_hash: &Secret<String>) -> bool;
}

/// Port trait for the current time, so expiry is testable without sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
