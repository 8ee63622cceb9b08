use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use thiserror::Error;

use crate::domain::email::Email;

/// How long an issued verification link stays redeemable.
pub const VERIFICATION_TOKEN_TTL: Duration = Duration::hours(24);

#[derive(Debug, Error, PartialEq)]
pub enum TokenError {
    #[error("Token cannot be empty")]
    Empty,
}

/// The random secret that identifies a verification token.
///
/// 128 bits from the thread-local CSPRNG, hex-encoded. Enumeration and
/// guessing are computationally infeasible at this size, which is what makes
/// `Expired`/`Invalid` responses safe to distinguish.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TokenValue(String);

impl TokenValue {
    pub fn new() -> Self {
        let value: u128 = rand::rng().random();
        Self(format!("{value:032x}"))
    }

    /// Accept an inbound token value, e.g. from a URL query parameter.
    /// Unknown values are caught downstream at redemption, so only presence
    /// is checked here.
    pub fn parse(raw: String) -> Result<Self, TokenError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TokenError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TokenValue {
    fn default() -> Self {
        Self::new()
    }
}

// Token values are bearer secrets; keep them out of debug output and spans.
impl fmt::Debug for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenValue(..)")
    }
}

/// A single-use, time-bounded proof that a party controls `identifier`.
///
/// The record is never updated in place: it is created at issuance and
/// deleted at redemption or expiry detection. Absence of the record is what
/// makes replays report `Invalid`.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationToken {
    token: TokenValue,
    identifier: Email,
    expires_at: DateTime<Utc>,
}

impl VerificationToken {
    /// Issue a fresh token for `identifier`, expiring [`VERIFICATION_TOKEN_TTL`]
    /// after `now`.
    pub fn issue(identifier: Email, now: DateTime<Utc>) -> Self {
        Self {
            token: TokenValue::new(),
            identifier,
            expires_at: now + VERIFICATION_TOKEN_TTL,
        }
    }

    /// Rehydrate a token record from a persisted row.
    pub fn parse(token: TokenValue, identifier: Email, expires_at: DateTime<Utc>) -> Self {
        Self {
            token,
            identifier,
            expires_at,
        }
    }

    pub fn value(&self) -> &TokenValue {
        &self.token
    }

    pub fn identifier(&self) -> &Email {
        &self.identifier
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn email(raw: &str) -> Email {
        Email::try_from(Secret::from(raw.to_string())).unwrap()
    }

    #[test]
    fn token_value_is_32_hex_chars() {
        let value = TokenValue::new();
        assert_eq!(value.as_str().len(), 32);
        assert!(value.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn token_values_do_not_repeat() {
        let a = TokenValue::new();
        let b = TokenValue::new();
        assert_ne!(a, b);
    }

    #[test]
    fn debug_output_is_redacted() {
        let value = TokenValue::new();
        assert!(!format!("{value:?}").contains(value.as_str()));
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(TokenValue::parse("  ".to_string()).unwrap_err(), TokenError::Empty);
    }

    #[test]
    fn expires_exactly_at_the_deadline() {
        let now = Utc::now();
        let token = VerificationToken::issue(email("a@example.com"), now);

        assert!(!token.is_expired(now));
        assert!(!token.is_expired(now + VERIFICATION_TOKEN_TTL - Duration::seconds(1)));
        // `now >= expires_at` counts as expired, boundary included.
        assert!(token.is_expired(now + VERIFICATION_TOKEN_TTL));
        assert!(token.is_expired(now + VERIFICATION_TOKEN_TTL + Duration::seconds(1)));
    }
}
