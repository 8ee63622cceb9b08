use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PasswordError {
    #[error("Password cannot be empty")]
    Empty,
}

/// A submitted password, validated only for presence.
///
/// Strength policy is not enforced here: an authenticator that rejected short
/// passwords before comparing hashes would leak which accounts exist with
/// which policies. Anything non-empty is compared against the stored hash.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl TryFrom<Secret<String>> for Password {
    type Error = PasswordError;

    fn try_from(raw: Secret<String>) -> Result<Self, Self::Error> {
        if raw.expose_secret().is_empty() {
            return Err(PasswordError::Empty);
        }
        Ok(Self(raw))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty() {
        let result = Password::try_from(Secret::from(String::new()));
        assert_eq!(result.unwrap_err(), PasswordError::Empty);
    }

    #[test]
    fn accepts_non_empty() {
        assert!(Password::try_from(Secret::from("S3cret!".to_string())).is_ok());
    }

    #[test]
    fn debug_output_is_redacted() {
        let password = Password::try_from(Secret::from("S3cret!".to_string())).unwrap();
        assert!(!format!("{password:?}").contains("S3cret!"));
    }
}
