//! In-memory fakes shared by the use case tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, Secret};
use vouch_core::{
    Account, Clock, Email, EmailClient, Password, PasswordScheme, TokenValue, UserStore,
    UserStoreError, VerificationToken, VerificationTokenStore, VerificationTokenStoreError,
};

pub fn email(raw: &str) -> Email {
    Email::try_from(Secret::from(raw.to_string())).unwrap()
}

pub fn password(raw: &str) -> Password {
    Password::try_from(Secret::from(raw.to_string())).unwrap()
}

pub fn secret(raw: &str) -> Secret<String> {
    Secret::from(raw.to_string())
}

#[derive(Default, Clone)]
pub struct MemoryUserStore {
    accounts: Arc<RwLock<HashMap<Email, Account>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, email: &Email) -> Option<Account> {
        self.accounts.read().unwrap().get(email).cloned()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn add_account(&self, account: Account) -> Result<(), UserStoreError> {
        let mut accounts = self.accounts.write().unwrap();
        if accounts.contains_key(account.email()) {
            return Err(UserStoreError::AccountAlreadyExists);
        }
        accounts.insert(account.email().clone(), account);
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Account, UserStoreError> {
        self.accounts
            .read()
            .unwrap()
            .get(email)
            .cloned()
            .ok_or(UserStoreError::AccountNotFound)
    }

    async fn mark_verified(
        &self,
        email: &Email,
        when: DateTime<Utc>,
    ) -> Result<(), UserStoreError> {
        let mut accounts = self.accounts.write().unwrap();
        let account = accounts.get_mut(email).ok_or(UserStoreError::AccountNotFound)?;
        account.mark_verified(when);
        Ok(())
    }

    async fn count(&self) -> Result<u64, UserStoreError> {
        Ok(self.accounts.read().unwrap().len() as u64)
    }
}

#[derive(Default, Clone)]
pub struct MemoryTokenStore {
    tokens: Arc<RwLock<HashMap<TokenValue, VerificationToken>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, token: &TokenValue) -> bool {
        self.tokens.read().unwrap().contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.read().unwrap().len()
    }
}

#[async_trait]
impl VerificationTokenStore for MemoryTokenStore {
    async fn put(&self, token: VerificationToken) -> Result<(), VerificationTokenStoreError> {
        self.tokens
            .write()
            .unwrap()
            .insert(token.value().clone(), token);
        Ok(())
    }

    async fn take(
        &self,
        token: &TokenValue,
    ) -> Result<Option<VerificationToken>, VerificationTokenStoreError> {
        Ok(self.tokens.write().unwrap().remove(token))
    }

    async fn remove_for_identifier(
        &self,
        identifier: &Email,
    ) -> Result<(), VerificationTokenStoreError> {
        self.tokens
            .write()
            .unwrap()
            .retain(|_, record| record.identifier() != identifier);
        Ok(())
    }
}

/// Clock that only moves when the test says so.
#[derive(Clone)]
pub struct ManualClock {
    now: Arc<RwLock<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(RwLock::new(now)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap()
    }
}

/// Password scheme with a transparent "hash" so tests stay fast.
#[derive(Debug, Clone, Default)]
pub struct PlainTextScheme;

#[async_trait]
impl PasswordScheme for PlainTextScheme {
    async fn hash_password(&self, password: &Password) -> Result<Secret<String>, String> {
        Ok(Secret::from(format!(
            "plain:{}",
            password.as_ref().expose_secret()
        )))
    }

    async fn verify_password(&self, candidate: &Password, expected_hash: &Secret<String>) -> bool {
        expected_hash.expose_secret() == &format!("plain:{}", candidate.as_ref().expose_secret())
    }
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub content: String,
}

/// Email client that records what was sent, optionally failing on demand.
#[derive(Clone, Default)]
pub struct RecordingEmailClient {
    pub sent: Arc<Mutex<Vec<SentEmail>>>,
    pub fail: Arc<Mutex<bool>>,
}

impl RecordingEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let client = Self::default();
        *client.fail.lock().unwrap() = true;
        client
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailClient for RecordingEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        if *self.fail.lock().unwrap() {
            return Err("smtp unreachable".to_string());
        }
        self.sent.lock().unwrap().push(SentEmail {
            recipient: recipient.as_str().to_string(),
            subject: subject.to_string(),
            content: content.to_string(),
        });
        Ok(())
    }
}
