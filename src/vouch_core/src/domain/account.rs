use chrono::{DateTime, Utc};
use secrecy::Secret;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::email::Email;

/// An admin account as stored in the credential store.
///
/// `password_hash` is `None` for accounts that authenticate through an
/// external identity method; such accounts can never pass credential login.
/// `verified_at` is set exactly once and never regresses.
#[derive(Debug, Clone)]
pub struct Account {
    id: Uuid,
    email: Email,
    password_hash: Option<Secret<String>>,
    display_name: Option<String>,
    verified_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Create a fresh, unverified account. The id is assigned here and is
    /// immutable for the lifetime of the record.
    pub fn new(
        email: Email,
        password_hash: Option<Secret<String>>,
        display_name: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            display_name,
            verified_at: None,
        }
    }

    /// Rehydrate an account from a persisted row.
    pub fn parse(
        id: Uuid,
        email: Email,
        password_hash: Option<Secret<String>>,
        display_name: Option<String>,
        verified_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            display_name,
            verified_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> Option<&Secret<String>> {
        self.password_hash.as_ref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn verified_at(&self) -> Option<DateTime<Utc>> {
        self.verified_at
    }

    pub fn is_verified(&self) -> bool {
        self.verified_at.is_some()
    }

    /// Record the verification timestamp. Monotonic: once set, later calls
    /// keep the original timestamp.
    pub fn mark_verified(&mut self, when: DateTime<Utc>) {
        if self.verified_at.is_none() {
            self.verified_at = Some(when);
        }
    }

    /// The outward-facing view of a verified account. Never carries the
    /// password hash.
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id,
            email: self.email.as_str().to_string(),
            display_name: self.display_name.clone(),
            verified_at: self.verified_at,
        }
    }
}

/// Minimal account view handed to the session layer after a successful login.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSummary {
    pub id: Uuid,
    pub email: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "verifiedAt")]
    pub verified_at: Option<DateTime<Utc>>,
}
