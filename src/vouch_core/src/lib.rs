pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    account::{Account, AccountSummary},
    email::{Email, EmailError},
    password::{Password, PasswordError},
    verification_token::{TokenError, TokenValue, VerificationToken, VERIFICATION_TOKEN_TTL},
};

pub use ports::{
    repositories::{
        UserStore, UserStoreError, VerificationTokenStore, VerificationTokenStoreError,
    },
    services::{Clock, EmailClient, PasswordScheme},
};
