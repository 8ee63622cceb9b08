//! Argon2id password hashing, run on the blocking thread pool.

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use vouch_core::{Password, PasswordScheme};

/// The workspace's [`PasswordScheme`]: Argon2id with salted PHC-string
/// output. Hashing and verification are deliberately expensive, so both run
/// under `spawn_blocking` to keep the async workers free.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Scheme;

impl Argon2Scheme {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PasswordScheme for Argon2Scheme {
    async fn hash_password(&self, password: &Password) -> Result<Secret<String>, String> {
        compute_password_hash(password.clone()).await
    }

    async fn verify_password(&self, candidate: &Password, expected_hash: &Secret<String>) -> bool {
        // A stored hash that fails to parse is a mismatch, not an error the
        // caller can distinguish.
        verify_password_hash(expected_hash.clone(), candidate.clone())
            .await
            .is_ok()
    }
}

fn hasher() -> Result<Argon2<'static>, String> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
    ))
}

#[tracing::instrument(name = "Verify password hash", skip_all)]
async fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Password,
) -> Result<(), String> {
    let current_span: tracing::Span = tracing::Span::current();
    let result = tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let expected_password_hash: PasswordHash<'_> =
                PasswordHash::new(expected_password_hash.expose_secret())
                    .map_err(|e| e.to_string())?;

            hasher()?
                .verify_password(
                    password_candidate.as_ref().expose_secret().as_bytes(),
                    &expected_password_hash,
                )
                .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?;

    result
}

#[tracing::instrument(name = "Computing password hash", skip_all)]
async fn compute_password_hash(password: Password) -> Result<Secret<String>, String> {
    let current_span: tracing::Span = tracing::Span::current();

    let result = tokio::task::spawn_blocking(move || {
        current_span.in_scope(move || {
            let salt: SaltString = SaltString::generate(rand_core::OsRng);
            hasher()?
                .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                .map(|h| Secret::from(h.to_string()))
                .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?;

    result
}
