use std::hash::{Hash, Hasher};

use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EmailError {
    #[error("Email cannot be empty")]
    Empty,
    #[error("Email is not a valid address")]
    InvalidFormat,
}

/// A validated, case-normalized email address.
///
/// The raw input is trimmed and lowercased before validation, so two spellings
/// of the same address always compare equal and hash identically. The inner
/// value is wrapped in [`Secret`] to keep addresses out of debug output and
/// logs.
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl Email {
    pub fn as_str(&self) -> &str {
        self.0.expose_secret()
    }
}

impl TryFrom<Secret<String>> for Email {
    type Error = EmailError;

    fn try_from(raw: Secret<String>) -> Result<Self, Self::Error> {
        let normalized = raw.expose_secret().trim().to_lowercase();
        if normalized.is_empty() {
            return Err(EmailError::Empty);
        }

        // Structural check only: one '@' with a non-empty local part and a
        // dotted domain. Deliverability is proven by the verification flow,
        // not by parsing.
        match normalized.split_once('@') {
            Some((local, domain))
                if !local.is_empty()
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && !domain.contains('@') =>
            {
                Ok(Self(Secret::from(normalized)))
            }
            _ => Err(EmailError::InvalidFormat),
        }
    }
}

impl AsRef<Secret<String>> for Email {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}
