use std::sync::{Arc, Mutex};

use vouch_core::{Email, EmailClient};

/// A delivered message, as recorded by [`MockEmailClient`].
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub content: String,
}

/// Email client for development and tests: logs the message at debug level
/// instead of sending it, and keeps a record for assertions.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient {
    sent: Arc<Mutex<Vec<SentEmail>>>,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().expect("mock email lock poisoned").clone()
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        tracing::debug!(subject, content, "mock email client: not sending");
        self.sent
            .lock()
            .map_err(|e| e.to_string())?
            .push(SentEmail {
                recipient: recipient.as_str().to_string(),
                subject: subject.to_string(),
                content: content.to_string(),
            });
        Ok(())
    }
}
