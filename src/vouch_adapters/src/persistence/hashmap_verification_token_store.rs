use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use vouch_core::{
    Email, TokenValue, VerificationToken, VerificationTokenStore, VerificationTokenStoreError,
};

/// In-memory token store for tests and local development.
///
/// `take` removes under the write lock, so two concurrent redemptions of the
/// same value can never both observe the record.
#[derive(Default, Clone)]
pub struct HashMapVerificationTokenStore {
    tokens: Arc<RwLock<HashMap<TokenValue, VerificationToken>>>,
}

impl HashMapVerificationTokenStore {
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl VerificationTokenStore for HashMapVerificationTokenStore {
    async fn put(&self, token: VerificationToken) -> Result<(), VerificationTokenStoreError> {
        let mut tokens = self.tokens.write().await;
        tokens.insert(token.value().clone(), token);
        Ok(())
    }

    async fn take(
        &self,
        token: &TokenValue,
    ) -> Result<Option<VerificationToken>, VerificationTokenStoreError> {
        let mut tokens = self.tokens.write().await;
        Ok(tokens.remove(token))
    }

    async fn remove_for_identifier(
        &self,
        identifier: &Email,
    ) -> Result<(), VerificationTokenStoreError> {
        let mut tokens = self.tokens.write().await;
        tokens.retain(|_, record| record.identifier() != identifier);
        Ok(())
    }
}
