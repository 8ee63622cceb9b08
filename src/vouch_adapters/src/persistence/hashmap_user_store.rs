use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use vouch_core::{Account, Email, UserStore, UserStoreError};

/// In-memory credential store for tests and local development.
///
/// Clones share the same map via the inner `Arc`.
#[derive(Default, Clone)]
pub struct HashMapUserStore {
    accounts: Arc<RwLock<HashMap<Email, Account>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn add_account(&self, account: Account) -> Result<(), UserStoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(account.email()) {
            return Err(UserStoreError::AccountAlreadyExists);
        }
        accounts.insert(account.email().clone(), account);
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Account, UserStoreError> {
        let accounts = self.accounts.read().await;
        accounts
            .get(email)
            .cloned()
            .ok_or(UserStoreError::AccountNotFound)
    }

    async fn mark_verified(
        &self,
        email: &Email,
        when: DateTime<Utc>,
    ) -> Result<(), UserStoreError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(email)
            .ok_or(UserStoreError::AccountNotFound)?;

        // Monotonicity lives in the domain type: a second call keeps the
        // original timestamp.
        account.mark_verified(when);
        Ok(())
    }

    async fn count(&self) -> Result<u64, UserStoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.len() as u64)
    }
}
